//! Field and group validation for the checkout form.
//!
//! Validation results are data, not errors: each group validation produces a
//! field → message map, and an empty map means the group is valid.

use std::collections::BTreeMap;

/// One of the four checkout form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Payment,
    Address,
    Email,
    Phone,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Address => "address",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl core::fmt::Display for FormField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two independently validated field groups of the two-step checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormGroup {
    /// Step 1: payment method + delivery address.
    Order,
    /// Step 2: email + phone.
    Contacts,
}

impl FormGroup {
    pub fn fields(&self) -> &'static [FormField] {
        match self {
            Self::Order => &[FormField::Payment, FormField::Address],
            Self::Contacts => &[FormField::Email, FormField::Phone],
        }
    }
}

/// Field → error message. Absent entry = field currently valid.
pub type FieldErrors = BTreeMap<FormField, String>;

/// Outcome of validating one group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupValidation {
    errors: FieldErrors,
}

impl GroupValidation {
    pub fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// A group is valid iff every field in it is valid.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// All messages joined for single-line display.
    pub fn message(&self) -> String {
        self.errors
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate a single field value; `None` means valid.
pub fn validate_field(field: FormField, value: &str) -> Option<&'static str> {
    match field {
        FormField::Payment => (value.is_empty()).then_some("choose a payment method"),
        FormField::Address => {
            (value.trim().chars().count() < 5).then_some("enter an address of at least 5 characters")
        }
        FormField::Email => (!is_valid_email(value)).then_some("enter a valid email"),
        FormField::Phone => {
            (!is_valid_phone(value)).then_some("enter a valid phone (10-15 digits)")
        }
    }
}

// Shape check: `local@domain.tld`, no whitespace, exactly one '@', at least
// one dot in the domain with non-empty text on both sides.
fn is_valid_email(value: &str) -> bool {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// Optional leading '+', then 10-15 ASCII digits and nothing else.
fn is_valid_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    (10..=15).contains(&digits.chars().count()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_is_valid_iff_non_empty() {
        assert!(validate_field(FormField::Payment, "card").is_none());
        assert!(validate_field(FormField::Payment, "").is_some());
    }

    #[test]
    fn address_requires_five_trimmed_characters() {
        assert!(validate_field(FormField::Address, "a").is_some());
        assert!(validate_field(FormField::Address, "  ab  ").is_some());
        assert!(validate_field(FormField::Address, "Ленина 5").is_none());
        assert!(validate_field(FormField::Address, "Main St 5").is_none());
    }

    #[test]
    fn email_shape_checks() {
        assert!(validate_field(FormField::Email, "a@b.co").is_none());
        assert!(validate_field(FormField::Email, "user.name@mail.example.org").is_none());
        assert!(validate_field(FormField::Email, "bad").is_some());
        assert!(validate_field(FormField::Email, "a@b").is_some());
        assert!(validate_field(FormField::Email, "a@.co").is_some());
        assert!(validate_field(FormField::Email, "@b.co").is_some());
        assert!(validate_field(FormField::Email, "a b@c.de").is_some());
        assert!(validate_field(FormField::Email, "a@b@c.de").is_some());
    }

    #[test]
    fn phone_accepts_ten_to_fifteen_digits_with_optional_plus() {
        assert!(validate_field(FormField::Phone, "+79991234567").is_none());
        assert!(validate_field(FormField::Phone, "9991234567").is_none());
        assert!(validate_field(FormField::Phone, "123456789").is_some()); // 9 digits
        assert!(validate_field(FormField::Phone, "1234567890").is_none()); // 10 digits
        assert!(validate_field(FormField::Phone, "123456789012345").is_none()); // 15 digits
        assert!(validate_field(FormField::Phone, "1234567890123456").is_some()); // 16 digits
        assert!(validate_field(FormField::Phone, "+7 999 123 45 67").is_some());
        assert!(validate_field(FormField::Phone, "123").is_some());
    }

    #[test]
    fn group_validation_collects_distinct_messages() {
        let mut errors = FieldErrors::new();
        for field in FormGroup::Contacts.fields() {
            if let Some(msg) = validate_field(*field, "bad") {
                errors.insert(*field, msg.to_string());
            }
        }
        let validation = GroupValidation::new(errors);

        assert!(!validation.is_valid());
        assert_ne!(
            validation.error_for(FormField::Email),
            validation.error_for(FormField::Phone)
        );
        assert!(validation.message().contains("; "));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any +-prefixed digit run validates iff it has 10-15 digits.
            #[test]
            fn phone_digit_runs(digits in proptest::collection::vec(0u8..10, 1..20), plus in proptest::bool::ANY) {
                let run: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
                let value = if plus { format!("+{run}") } else { run.clone() };

                let expect_valid = (10..=15).contains(&digits.len());
                prop_assert_eq!(validate_field(FormField::Phone, &value).is_none(), expect_valid);
            }
        }
    }
}
