//! Active clinic tenant and the document theme that follows it.

use std::collections::BTreeSet;

use tracing::info;

use crate::models::Clinic;

/// The clinic every screen is currently scoped to.
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicContext {
    active: Clinic,
    /// Class list of the document body
    body_classes: BTreeSet<String>,
}

impl ClinicContext {
    pub fn new(active: Clinic) -> Self {
        let mut context = Self {
            active,
            body_classes: BTreeSet::new(),
        };
        context.apply_theme();
        context
    }

    pub fn active_clinic(&self) -> Clinic {
        self.active
    }

    /// Switch tenant. Returns `true` when the clinic actually changed.
    pub fn set_active_clinic(&mut self, clinic: Clinic) -> bool {
        let changed = self.active != clinic;
        self.active = clinic;
        self.apply_theme();
        if changed {
            info!(clinic = %clinic, "Active clinic switched");
        }
        changed
    }

    pub fn is_dental(&self) -> bool {
        self.active == Clinic::Dental
    }

    pub fn is_meditouch(&self) -> bool {
        self.active == Clinic::Meditouch
    }

    pub fn slot_capacity(&self) -> usize {
        self.active.slot_capacity()
    }

    pub fn display_name(&self) -> &'static str {
        self.active.display_name()
    }

    pub fn services(&self) -> &'static [&'static str] {
        self.active.services()
    }

    pub fn doctors(&self) -> &'static [&'static str] {
        self.active.doctors()
    }

    pub fn body_classes(&self) -> impl Iterator<Item = &str> {
        self.body_classes.iter().map(String::as_str)
    }

    /// Add an unrelated class to the body, as a host page might.
    pub fn add_body_class(&mut self, class: &str) {
        self.body_classes.insert(class.to_string());
    }

    fn apply_theme(&mut self) {
        for clinic in Clinic::ALL {
            self.body_classes.remove(clinic.theme_class());
        }
        self.body_classes.insert(self.active.theme_class().to_string());
    }
}

impl Default for ClinicContext {
    fn default() -> Self {
        Self::new(Clinic::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dental() {
        let context = ClinicContext::default();
        assert!(context.is_dental());
        assert_eq!(context.slot_capacity(), 2);
        assert_eq!(context.body_classes().collect::<Vec<_>>(), vec!["theme-dental"]);
    }

    #[test]
    fn test_switch_replaces_theme_only() {
        let mut context = ClinicContext::default();
        context.add_body_class("sidebar-open");

        assert!(context.set_active_clinic(Clinic::Meditouch));
        assert!(context.is_meditouch());
        assert_eq!(context.slot_capacity(), 1);
        assert!(context.doctors().is_empty());

        let classes: Vec<_> = context.body_classes().collect();
        assert_eq!(classes, vec!["sidebar-open", "theme-meditouch"]);
    }

    #[test]
    fn test_switch_to_same_clinic() {
        let mut context = ClinicContext::new(Clinic::Meditouch);
        assert!(!context.set_active_clinic(Clinic::Meditouch));
        assert_eq!(context.body_classes().count(), 1);
    }
}
