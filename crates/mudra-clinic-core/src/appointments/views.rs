//! Calendar view derivations: daily (morning/afternoon), weekly, monthly.
//!
//! Every view shows active appointments only.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::AppointmentBook;
use crate::models::{Appointment, DaySession};

/// Doctor filter and free-text search applied to every view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppointmentFilter {
    pub doctor: Option<String>,
    pub search: Option<String>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if !appointment.is_active() {
            return false;
        }
        if let Some(doctor) = self.doctor.as_deref().filter(|d| !d.is_empty()) {
            if appointment.doctor.as_deref() != Some(doctor) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => appointment.matches_text(needle),
            _ => true,
        }
    }
}

/// One day split at lunch.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyView<'a> {
    pub date: NaiveDate,
    pub morning: Vec<&'a Appointment>,
    pub afternoon: Vec<&'a Appointment>,
}

impl DailyView<'_> {
    pub fn total(&self) -> usize {
        self.morning.len() + self.afternoon.len()
    }
}

/// Appointments of a single calendar day, sorted by time.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn<'a> {
    pub date: NaiveDate,
    pub appointments: Vec<&'a Appointment>,
}

/// Sunday-to-Saturday week containing the anchor date.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyView<'a> {
    pub start: NaiveDate,
    pub days: Vec<DayColumn<'a>>,
}

impl WeeklyView<'_> {
    pub fn total(&self) -> usize {
        self.days.iter().map(|d| d.appointments.len()).sum()
    }
}

/// A cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub enum MonthCell<'a> {
    /// Padding before the 1st or after the last day
    Blank,
    Day(DayColumn<'a>),
}

/// Month grid, seven cells per row starting on Sunday.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyView<'a> {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthCell<'a>>,
}

impl<'a> MonthlyView<'a> {
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell<'a>]> {
        self.cells.chunks(7)
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, MonthCell::Blank))
            .count()
    }

    pub fn total(&self) -> usize {
        self.cells
            .iter()
            .map(|c| match c {
                MonthCell::Day(day) => day.appointments.len(),
                MonthCell::Blank => 0,
            })
            .sum()
    }
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// Number of days in the month of `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_first
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

impl AppointmentBook {
    fn day_column(&self, date: NaiveDate, filter: &AppointmentFilter) -> DayColumn<'_> {
        let mut appointments: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.date == date && filter.matches(a))
            .collect();
        appointments.sort_by_key(|a| a.time);
        DayColumn { date, appointments }
    }

    /// Appointments on `date`, split into morning and afternoon sessions.
    pub fn daily_view(&self, date: NaiveDate, filter: &AppointmentFilter) -> DailyView<'_> {
        let (morning, afternoon) = self
            .day_column(date, filter)
            .appointments
            .into_iter()
            .partition(|a| a.time.session() == DaySession::Morning);
        DailyView {
            date,
            morning,
            afternoon,
        }
    }

    /// Seven day columns for the week containing `date`.
    pub fn weekly_view(&self, date: NaiveDate, filter: &AppointmentFilter) -> WeeklyView<'_> {
        let start = week_start(date);
        let days = start
            .iter_days()
            .take(7)
            .map(|day| self.day_column(day, filter))
            .collect();
        WeeklyView { start, days }
    }

    /// Month grid for the month containing `date`.
    pub fn monthly_view(&self, date: NaiveDate, filter: &AppointmentFilter) -> MonthlyView<'_> {
        let first = date.with_day(1).unwrap_or(date);
        let leading = first.weekday().num_days_from_sunday() as usize;
        let length = days_in_month(first) as usize;
        let trailing = (7 - (leading + length) % 7) % 7;

        let mut cells = Vec::with_capacity(leading + length + trailing);
        cells.extend(std::iter::repeat_with(|| MonthCell::Blank).take(leading));
        cells.extend(
            first
                .iter_days()
                .take(length)
                .map(|day| MonthCell::Day(self.day_column(day, filter))),
        );
        cells.extend(std::iter::repeat_with(|| MonthCell::Blank).take(trailing));

        MonthlyView {
            year: first.year(),
            month: first.month(),
            cells,
        }
    }
}
