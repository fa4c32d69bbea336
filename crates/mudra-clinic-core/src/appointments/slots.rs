//! Booking slot catalogue and availability.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AppointmentBook;
use crate::models::SlotTime;

/// Opening window of one clinic session. `end` is exclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionHours {
    pub start: SlotTime,
    pub end: SlotTime,
}

/// Fixed grid of bookable times: a morning and an afternoon session
/// separated by a lunch gap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlotSchedule {
    pub interval_minutes: u32,
    pub morning: SessionHours,
    pub afternoon: SessionHours,
}

impl Default for SlotSchedule {
    fn default() -> Self {
        let at = |hour, minute| SlotTime::from_hm(hour, minute).unwrap_or_default();
        // 9:00 AM - 12:45 PM, lunch, 2:00 PM - 5:45 PM
        Self {
            interval_minutes: 15,
            morning: SessionHours {
                start: at(9, 0),
                end: at(13, 0),
            },
            afternoon: SessionHours {
                start: at(14, 0),
                end: at(18, 0),
            },
        }
    }
}

impl SlotSchedule {
    /// Every slot of the day in chronological order.
    pub fn slots(&self) -> Vec<SlotTime> {
        let mut slots = Vec::new();
        if self.interval_minutes == 0 {
            return slots;
        }
        for session in [&self.morning, &self.afternoon] {
            let mut minutes = session.start.minutes_from_midnight();
            let end = session.end.minutes_from_midnight();
            while minutes < end {
                if let Some(slot) = SlotTime::from_hm(minutes / 60, minutes % 60) {
                    slots.push(slot);
                }
                minutes += self.interval_minutes;
            }
        }
        slots
    }

    pub fn contains(&self, time: SlotTime) -> bool {
        self.slots().contains(&time)
    }

    /// Check the sessions are ordered and non-empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.interval_minutes == 0 {
            return Err("slot interval must be positive".into());
        }
        if self.morning.start >= self.morning.end {
            return Err("morning session ends before it starts".into());
        }
        if self.afternoon.start >= self.afternoon.end {
            return Err("afternoon session ends before it starts".into());
        }
        if self.morning.end > self.afternoon.start {
            return Err("morning session overlaps the afternoon session".into());
        }
        Ok(())
    }
}

impl AppointmentBook {
    /// Number of active appointments holding `time` on `date`.
    pub fn booked_count(&self, date: NaiveDate, time: SlotTime) -> usize {
        self.appointments
            .iter()
            .filter(|a| a.is_active() && a.date == date && a.time == time)
            .count()
    }

    /// Whether one more appointment fits at `time` on `date`.
    pub fn has_capacity(&self, date: NaiveDate, time: SlotTime) -> bool {
        self.booked_count(date, time) < self.clinic.slot_capacity()
    }

    /// Catalogue slots on `date` that still have room under the clinic capacity.
    pub fn available_slots(&self, date: NaiveDate) -> Vec<SlotTime> {
        self.schedule
            .slots()
            .into_iter()
            .filter(|slot| self.has_capacity(date, *slot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogue() {
        let slots = SlotSchedule::default().slots();
        assert_eq!(slots.len(), 32);
        assert_eq!(slots.first().unwrap().to_string(), "9:00 AM");
        assert_eq!(slots[15].to_string(), "12:45 PM");
        assert_eq!(slots[16].to_string(), "2:00 PM");
        assert_eq!(slots.last().unwrap().to_string(), "5:45 PM");
    }

    #[test]
    fn test_lunch_gap_not_bookable() {
        let schedule = SlotSchedule::default();
        assert!(!schedule.contains("1:00 PM".parse().unwrap()));
        assert!(!schedule.contains("1:30 PM".parse().unwrap()));
        assert!(schedule.contains("10:00 AM".parse().unwrap()));
        assert!(!schedule.contains("10:05 AM".parse().unwrap()));
    }

    #[test]
    fn test_validate() {
        assert!(SlotSchedule::default().validate().is_ok());

        let mut overlapping = SlotSchedule::default();
        overlapping.afternoon.start = "12:00".parse().unwrap();
        assert!(overlapping.validate().is_err());

        let zero = SlotSchedule {
            interval_minutes: 0,
            ..SlotSchedule::default()
        };
        assert!(zero.validate().is_err());
        assert!(zero.slots().is_empty());
    }
}
