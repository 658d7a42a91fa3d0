/// Optional extension fields attached to an owner (a deposit, a security,
/// a tax year,...).
///
/// Each owner type has its own set of field classes.  Whether a given
/// class must, can or must not be present depends on the owner (its
/// category, its tax regime,...), which is what `InfoOwner` describes.
/// Validation then walks all possible classes and accumulates every
/// problem found.
use crate::asset_classes::SecurityTypeClass;
use crate::assets::SecurityId;
use crate::errors::Error;
use crate::field_errors::{FieldErrors, Problem};
use crate::money::Money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRequired {
    MustExist,
    CanExist,
    NotAllowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoDataType {
    Date,
    Money,
    Rate,
    Text,
    Security,
}

/// A reference to another security, along with the class of that
/// security as known when the link was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedSecurity {
    pub id: SecurityId,
    pub class: SecurityTypeClass,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Date(NaiveDate),
    Money(Money),

    // A percentage, e.g. 20 for 20%
    Rate(Decimal),

    Text(String),
    Security(LinkedSecurity),
}

impl InfoValue {
    #[must_use]
    pub fn data_type(&self) -> InfoDataType {
        match self {
            InfoValue::Date(_) => InfoDataType::Date,
            InfoValue::Money(_) => InfoDataType::Money,
            InfoValue::Rate(_) => InfoDataType::Rate,
            InfoValue::Text(_) => InfoDataType::Text,
            InfoValue::Security(_) => InfoDataType::Security,
        }
    }
}

pub trait InfoClass: Copy + Ord + std::fmt::Debug + 'static {
    /// All classes, in the order they are validated
    const ALL: &'static [Self];

    fn name(self) -> &'static str;
    fn data_type(self) -> InfoDataType;

    /// For text fields, the maximum number of characters
    fn max_length(self) -> Option<usize> {
        None
    }

    fn from_name(name: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownName {
                kind: "info class",
                name: name.to_string(),
            })
    }
}

#[derive(Debug, Clone)]
pub struct InfoSet<C> {
    values: BTreeMap<C, InfoValue>,
}

impl<C> Default for InfoSet<C> {
    fn default() -> Self {
        InfoSet {
            values: BTreeMap::new(),
        }
    }
}

impl<C: InfoClass> InfoSet<C> {
    /// Set a value, and return the previous one if any
    pub fn set(&mut self, class: C, value: InfoValue) -> Option<InfoValue> {
        self.values.insert(class, value)
    }

    pub fn remove(&mut self, class: C) -> Option<InfoValue> {
        self.values.remove(&class)
    }

    #[must_use]
    pub fn get(&self, class: C) -> Option<&InfoValue> {
        self.values.get(&class)
    }

    #[must_use]
    pub fn get_money(&self, class: C) -> Option<Money> {
        match self.get(class) {
            Some(InfoValue::Money(m)) => Some(*m),
            Some(_) | None => None,
        }
    }

    #[must_use]
    pub fn get_text(&self, class: C) -> Option<&str> {
        match self.get(class) {
            Some(InfoValue::Text(t)) => Some(t.as_str()),
            Some(_) | None => None,
        }
    }
}

/// An entity which carries an info set
pub trait InfoOwner {
    type Class: InfoClass;

    fn info_set(&self) -> &InfoSet<Self::Class>;

    /// Whether a given class of field is required for this owner
    fn is_class_required(&self, class: Self::Class) -> FieldRequired;

    /// Checks specific to a class, called only for values that are allowed
    /// and of the expected type.
    fn validate_value(
        &self,
        class: Self::Class,
        value: &InfoValue,
        errors: &mut FieldErrors<Self::Class>,
    );

    /// Check all possible classes of fields
    fn validate_info(&self) -> FieldErrors<Self::Class> {
        let mut errors = FieldErrors::default();
        let info = self.info_set();

        for class in Self::Class::ALL.iter().copied() {
            match (self.is_class_required(class), info.get(class)) {
                (FieldRequired::MustExist, None) => {
                    errors.add(class, Problem::Missing);
                }
                (FieldRequired::CanExist | FieldRequired::NotAllowed, None) => {}
                (FieldRequired::NotAllowed, Some(_)) => {
                    errors.add(class, Problem::Exists);
                }
                (FieldRequired::MustExist | FieldRequired::CanExist, Some(value)) => {
                    if value.data_type() != class.data_type() {
                        errors.add(class, Problem::BadType);
                        continue;
                    }
                    if let (InfoValue::Text(text), Some(max)) =
                        (value, class.max_length())
                    {
                        if text.chars().count() > max {
                            errors.add(class, Problem::TooLong { max });
                            continue;
                        }
                    }
                    self.validate_value(class, value, &mut errors);
                }
            }
        }

        if !errors.is_empty() {
            log::debug!("{} invalid info fields", errors.len());
        }
        errors
    }
}

/// Checks shared by several owners: money must not be negative
pub(crate) fn check_not_negative<C: Copy + PartialEq>(
    class: C,
    value: &InfoValue,
    errors: &mut FieldErrors<C>,
) {
    if let InfoValue::Money(m) = value {
        if m.is_negative() {
            errors.add(class, Problem::Negative);
        }
    }
}

/// Rates are percentages
pub(crate) fn check_rate<C: Copy + PartialEq>(
    class: C,
    value: &InfoValue,
    errors: &mut FieldErrors<C>,
) {
    if let InfoValue::Rate(r) = value {
        if *r < Decimal::ZERO || *r > Decimal::ONE_HUNDRED {
            errors.add(
                class,
                Problem::OutOfRange {
                    min: Decimal::ZERO,
                    max: Decimal::ONE_HUNDRED,
                },
            );
        }
    }
}

#[cfg(test)]
mod test {
    use crate::field_errors::{FieldErrors, Problem};
    use crate::info_sets::{
        FieldRequired, InfoClass, InfoDataType, InfoOwner, InfoSet, InfoValue,
    };
    use rust_decimal_macros::dec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Field {
        Name,
        Rate,
        Extra,
    }

    impl InfoClass for Field {
        const ALL: &'static [Self] = &[Field::Name, Field::Rate, Field::Extra];

        fn name(self) -> &'static str {
            match self {
                Field::Name => "Name",
                Field::Rate => "Rate",
                Field::Extra => "Extra",
            }
        }

        fn data_type(self) -> InfoDataType {
            match self {
                Field::Name | Field::Extra => InfoDataType::Text,
                Field::Rate => InfoDataType::Rate,
            }
        }

        fn max_length(self) -> Option<usize> {
            Some(4)
        }
    }

    struct Owner {
        info: InfoSet<Field>,
    }

    impl InfoOwner for Owner {
        type Class = Field;

        fn info_set(&self) -> &InfoSet<Field> {
            &self.info
        }

        fn is_class_required(&self, class: Field) -> FieldRequired {
            match class {
                Field::Name => FieldRequired::MustExist,
                Field::Rate => FieldRequired::CanExist,
                Field::Extra => FieldRequired::NotAllowed,
            }
        }

        fn validate_value(
            &self,
            class: Field,
            value: &InfoValue,
            errors: &mut FieldErrors<Field>,
        ) {
            crate::info_sets::check_rate(class, value, errors);
        }
    }

    #[test]
    fn test_walk() {
        let mut owner = Owner {
            info: InfoSet::default(),
        };
        let errors = owner.validate_info();
        assert_eq!(errors.for_field(Field::Name).next(), Some(&Problem::Missing));
        assert_eq!(errors.len(), 1);

        owner.info.set(Field::Name, InfoValue::Text("abcdef".into()));
        owner.info.set(Field::Rate, InfoValue::Rate(dec!(120)));
        owner.info.set(Field::Extra, InfoValue::Text("x".into()));
        let errors = owner.validate_info();
        assert_eq!(errors.len(), 3);
        assert!(errors.has_error(Field::Rate));
        assert_eq!(errors.for_field(Field::Extra).next(), Some(&Problem::Exists));
        assert_eq!(
            errors.for_field(Field::Name).next(),
            Some(&Problem::TooLong { max: 4 })
        );

        owner.info.set(Field::Name, InfoValue::Rate(dec!(1)));
        owner.info.set(Field::Rate, InfoValue::Rate(dec!(20)));
        owner.info.remove(Field::Extra);
        let errors = owner.validate_info();
        assert_eq!(errors.for_field(Field::Name).next(), Some(&Problem::BadType));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_from_name() {
        assert!(matches!(Field::from_name("rate"), Ok(Field::Rate)));
        assert!(Field::from_name("unknown").is_err());
    }
}
