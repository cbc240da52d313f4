//! Utilities for validating constraints on types.

use validator::{Validate, ValidationErrors};

/// A value whose [`Validate`] rules have been checked.
/// If you have a [`Valid<T>`], `T` is guaranteed to be valid.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Valid<T> {
    value: T,
}

impl<T: Validate> Valid<T> {
    /// Validates a value.
    pub fn new(value: T) -> Result<Valid<T>, ValidationErrors> {
        value.validate().map(|_| Valid { value })
    }
}

impl<T> Valid<T> {
    /// Returns a reference to the validated value.
    pub fn inner(&self) -> &T {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::Valid;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Fields {
        #[validate(length(min = 1, max = 5))]
        label: String,
        #[validate(length(max = 5))]
        note: Option<String>,
    }

    #[test]
    fn valid_value_succeeds() {
        let fields = Fields {
            label: "1234".to_string(),
            note: None,
        };
        let valid = Valid::new(fields).unwrap();
        assert_eq!("1234", valid.inner().label);
    }

    #[test]
    fn empty_required_fails() {
        let fields = Fields {
            label: String::new(),
            note: None,
        };
        assert!(Valid::new(fields).is_err());
    }

    #[test]
    fn too_long_optional_fails() {
        let fields = Fields {
            label: "a".to_string(),
            note: Some("123456".to_string()),
        };
        let errors = Valid::new(fields).unwrap_err();
        assert!(errors.field_errors().contains_key("note"));
    }
}
