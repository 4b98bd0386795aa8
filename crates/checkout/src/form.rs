//! Order form state holder.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use kiosk_events::{EventBus, names};

use crate::validation::{FieldErrors, FormField, FormGroup, GroupValidation, validate_field};

/// The four raw field values. Empty string = not filled in yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormData {
    pub payment: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl FormData {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Payment => &self.payment,
            FormField::Address => &self.address,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
        }
    }
}

/// Owns the checkout form fields.
///
/// The field setter emits `form:changed` on every call, including writes of
/// an unchanged value: fields are cheap and downstream re-validation is
/// idempotent. `reset` commits the whole wipe, then emits once.
#[derive(Debug)]
pub struct OrderForm {
    data: RefCell<FormData>,
    bus: Rc<EventBus>,
}

impl OrderForm {
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self {
            data: RefCell::new(FormData::default()),
            bus,
        }
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        {
            let mut data = self.data.borrow_mut();
            match field {
                FormField::Payment => data.payment = value.into(),
                FormField::Address => data.address = value.into(),
                FormField::Email => data.email = value.into(),
                FormField::Phone => data.phone = value.into(),
            }
        }
        self.bus.emit_unit(names::FORM_CHANGED);
    }

    pub fn reset(&self) {
        *self.data.borrow_mut() = FormData::default();
        self.bus.emit_unit(names::FORM_CHANGED);
    }

    pub fn data(&self) -> FormData {
        self.data.borrow().clone()
    }

    /// Validate one group against the current field values. Pure read: no
    /// mutation, no emission.
    pub fn validate_group(&self, group: FormGroup) -> GroupValidation {
        let data = self.data.borrow();
        let mut errors = FieldErrors::new();
        for field in group.fields() {
            if let Some(msg) = validate_field(*field, data.field(*field)) {
                errors.insert(*field, msg.to_string());
            }
        }
        GroupValidation::new(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with_journal() -> (Rc<EventBus>, OrderForm) {
        let bus = Rc::new(EventBus::with_journal(32));
        let form = OrderForm::new(Rc::clone(&bus));
        (bus, form)
    }

    fn form_changed_count(bus: &EventBus) -> usize {
        bus.journal()
            .unwrap()
            .names()
            .iter()
            .filter(|n| n.as_str() == names::FORM_CHANGED)
            .count()
    }

    #[test]
    fn set_field_emits_even_for_an_unchanged_value() {
        let (bus, form) = form_with_journal();

        form.set_field(FormField::Payment, "card");
        form.set_field(FormField::Payment, "card");

        assert_eq!(form.data().payment, "card");
        assert_eq!(form_changed_count(&bus), 2);
    }

    #[test]
    fn reset_wipes_all_fields_and_emits_once() {
        let (bus, form) = form_with_journal();
        form.set_field(FormField::Email, "a@b.co");
        form.set_field(FormField::Address, "Main St 5");

        form.reset();

        assert_eq!(form.data(), FormData::default());
        assert_eq!(form_changed_count(&bus), 3);
    }

    #[test]
    fn order_group_validity_tracks_both_fields() {
        let (_bus, form) = form_with_journal();

        form.set_field(FormField::Payment, "card");
        form.set_field(FormField::Address, "a");
        let invalid = form.validate_group(FormGroup::Order);
        assert!(!invalid.is_valid());
        assert!(invalid.error_for(FormField::Address).is_some());
        assert!(invalid.error_for(FormField::Payment).is_none());

        form.set_field(FormField::Address, "Ленина 5");
        assert!(form.validate_group(FormGroup::Order).is_valid());
    }

    #[test]
    fn contacts_group_reports_both_fields_with_distinct_messages() {
        let (_bus, form) = form_with_journal();

        form.set_field(FormField::Email, "bad");
        form.set_field(FormField::Phone, "123");
        let validation = form.validate_group(FormGroup::Contacts);

        assert!(!validation.is_valid());
        assert_eq!(validation.errors().len(), 2);
        assert_ne!(
            validation.error_for(FormField::Email),
            validation.error_for(FormField::Phone)
        );

        form.set_field(FormField::Email, "a@b.co");
        form.set_field(FormField::Phone, "+79991234567");
        assert!(form.validate_group(FormGroup::Contacts).is_valid());
    }

    #[test]
    fn groups_are_independent() {
        let (_bus, form) = form_with_journal();
        form.set_field(FormField::Email, "a@b.co");
        form.set_field(FormField::Phone, "+79991234567");

        // Order group untouched and invalid; contacts valid.
        assert!(!form.validate_group(FormGroup::Order).is_valid());
        assert!(form.validate_group(FormGroup::Contacts).is_valid());
    }
}
