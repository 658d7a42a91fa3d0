/// Validation failures, attached to the field they apply to.  These are
/// expected when checking user data, and are accumulated rather than
/// returned on the first failure.
use rust_decimal::Decimal;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    #[error("Invalid account")]
    InvalidAccount,

    #[error("Invalid category for this account")]
    InvalidCategory,

    #[error("Invalid partner for this account and category")]
    InvalidPartner,

    #[error("Invalid direction for this category")]
    InvalidDirection,

    #[error("Value must be specified")]
    Missing,

    #[error("Value is not allowed")]
    Exists,

    #[error("Value has the wrong type")]
    BadType,

    #[error("Value is longer than {max} characters")]
    TooLong { max: usize },

    #[error("Value has an invalid format")]
    BadFormat,

    #[error("Currency does not match the owner's currency")]
    CurrencyMismatch,

    #[error("Value must be positive")]
    NotPositive,

    #[error("Value must not be negative")]
    Negative,

    #[error("Value must be in range [{min}, {max}]")]
    OutOfRange { min: Decimal, max: Decimal },

    #[error("Value is lower than the allowance it extends")]
    BelowAllowance,

    #[error("Linked security must be shares")]
    BadLink,
}

#[derive(Debug, Clone)]
pub struct FieldErrors<F> {
    errors: Vec<(F, Problem)>,
}

impl<F> Default for FieldErrors<F> {
    fn default() -> Self {
        FieldErrors { errors: Vec::new() }
    }
}

impl<F: Copy + PartialEq> FieldErrors<F> {
    pub fn add(&mut self, field: F, problem: Problem) {
        self.errors.push((field, problem));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether at least one error applies to this field
    #[must_use]
    pub fn has_error(&self, field: F) -> bool {
        self.errors.iter().any(|(f, _)| *f == field)
    }

    /// The problems reported for one field
    pub fn for_field(&self, field: F) -> impl Iterator<Item = &Problem> + '_ {
        self.errors
            .iter()
            .filter(move |(f, _)| *f == field)
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(F, Problem)> {
        self.errors.iter()
    }
}

#[cfg(test)]
mod test {
    use crate::field_errors::{FieldErrors, Problem};

    #[test]
    fn test_accumulate() {
        let mut errors = FieldErrors::default();
        assert!(errors.is_empty());
        errors.add(1, Problem::Missing);
        errors.add(2, Problem::TooLong { max: 20 });
        errors.add(1, Problem::BadType);
        assert_eq!(errors.len(), 3);
        assert!(errors.has_error(2));
        assert!(!errors.has_error(3));
        assert_eq!(
            errors.for_field(1).collect::<Vec<_>>(),
            vec![&Problem::Missing, &Problem::BadType]
        );
        assert_eq!(
            Problem::TooLong { max: 20 }.to_string(),
            "Value is longer than 20 characters"
        );
    }
}
