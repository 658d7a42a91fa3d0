use crate::assets::Security;
use crate::field_errors::{FieldErrors, Problem};
use crate::info_sets::{
    FieldRequired, InfoClass, InfoDataType, InfoOwner, InfoSet, InfoValue,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SecurityInfoClass {
    Symbol,
    Region,
    UnderlyingStock,
    OptionPrice,
    Notes,
}

impl InfoClass for SecurityInfoClass {
    const ALL: &'static [Self] = &[
        SecurityInfoClass::Symbol,
        SecurityInfoClass::Region,
        SecurityInfoClass::UnderlyingStock,
        SecurityInfoClass::OptionPrice,
        SecurityInfoClass::Notes,
    ];

    fn name(self) -> &'static str {
        match self {
            SecurityInfoClass::Symbol => "Symbol",
            SecurityInfoClass::Region => "Region",
            SecurityInfoClass::UnderlyingStock => "UnderlyingStock",
            SecurityInfoClass::OptionPrice => "OptionPrice",
            SecurityInfoClass::Notes => "Notes",
        }
    }

    fn data_type(self) -> InfoDataType {
        match self {
            SecurityInfoClass::Symbol
            | SecurityInfoClass::Region
            | SecurityInfoClass::Notes => InfoDataType::Text,
            SecurityInfoClass::UnderlyingStock => InfoDataType::Security,
            SecurityInfoClass::OptionPrice => InfoDataType::Money,
        }
    }

    fn max_length(self) -> Option<usize> {
        match self {
            SecurityInfoClass::Symbol | SecurityInfoClass::Region => Some(30),
            SecurityInfoClass::Notes => Some(500),
            SecurityInfoClass::UnderlyingStock
            | SecurityInfoClass::OptionPrice => None,
        }
    }
}

impl InfoOwner for Security {
    type Class = SecurityInfoClass;

    fn info_set(&self) -> &InfoSet<SecurityInfoClass> {
        &self.info
    }

    fn is_class_required(&self, class: SecurityInfoClass) -> FieldRequired {
        let needed = match class {
            SecurityInfoClass::Notes => return FieldRequired::CanExist,
            SecurityInfoClass::Symbol => self.class.needs_symbol(),
            SecurityInfoClass::Region => self.class.needs_region(),
            SecurityInfoClass::UnderlyingStock
            | SecurityInfoClass::OptionPrice => self.class.is_option(),
        };
        if needed {
            FieldRequired::MustExist
        } else {
            FieldRequired::NotAllowed
        }
    }

    fn validate_value(
        &self,
        class: SecurityInfoClass,
        value: &InfoValue,
        errors: &mut FieldErrors<SecurityInfoClass>,
    ) {
        match (class, value) {
            (SecurityInfoClass::UnderlyingStock, InfoValue::Security(link)) => {
                if !link.class.is_shares() {
                    errors.add(class, Problem::BadLink);
                }
            }
            (SecurityInfoClass::OptionPrice, InfoValue::Money(price)) => {
                if !price.is_positive() {
                    errors.add(class, Problem::NotPositive);
                }
                if Some(price.currency) != self.base.currency {
                    errors.add(class, Problem::CurrencyMismatch);
                }
            }
            _ => {}
        }
    }
}

impl Security {
    /// Check the security's info fields
    #[must_use]
    pub fn validate(&self) -> FieldErrors<SecurityInfoClass> {
        self.validate_info()
    }
}

#[cfg(test)]
mod test {
    use crate::asset_classes::SecurityTypeClass;
    use crate::assets::{AssetBase, Security, SecurityId};
    use crate::currencies::CurrencyId;
    use crate::field_errors::Problem;
    use crate::info_sets::{InfoValue, LinkedSecurity};
    use crate::money::Money;
    use crate::security_info::SecurityInfoClass;
    use rust_decimal_macros::dec;

    fn security(class: SecurityTypeClass) -> Security {
        Security::new(
            SecurityId(1),
            AssetBase::new("Sec", Some(CurrencyId(1))),
            class,
        )
    }

    #[test]
    fn test_shares() {
        let mut s = security(SecurityTypeClass::Shares);
        let errors = s.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.has_error(SecurityInfoClass::Symbol));
        assert!(errors.has_error(SecurityInfoClass::Region));

        s.info.set(SecurityInfoClass::Symbol, InfoValue::Text("AAPL".into()));
        s.info.set(SecurityInfoClass::Region, InfoValue::Text("US".into()));
        assert!(s.validate().is_empty());

        // Option fields are only for options
        s.info.set(
            SecurityInfoClass::OptionPrice,
            InfoValue::Money(Money::new(dec!(2), CurrencyId(1))),
        );
        assert_eq!(
            s.validate().for_field(SecurityInfoClass::OptionPrice).next(),
            Some(&Problem::Exists)
        );
    }

    #[test]
    fn test_options() {
        let mut s = security(SecurityTypeClass::StockOption);
        let errors = s.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.has_error(SecurityInfoClass::UnderlyingStock));
        assert!(errors.has_error(SecurityInfoClass::OptionPrice));

        s.info.set(
            SecurityInfoClass::UnderlyingStock,
            InfoValue::Security(LinkedSecurity {
                id: SecurityId(2),
                class: SecurityTypeClass::Property,
            }),
        );
        s.info.set(
            SecurityInfoClass::OptionPrice,
            InfoValue::Money(Money::new(dec!(0), CurrencyId(2))),
        );
        let errors = s.validate();
        assert_eq!(
            errors.for_field(SecurityInfoClass::UnderlyingStock).next(),
            Some(&Problem::BadLink)
        );
        assert_eq!(errors.for_field(SecurityInfoClass::OptionPrice).count(), 2);

        s.info.set(
            SecurityInfoClass::UnderlyingStock,
            InfoValue::Security(LinkedSecurity {
                id: SecurityId(2),
                class: SecurityTypeClass::Shares,
            }),
        );
        s.info.set(
            SecurityInfoClass::OptionPrice,
            InfoValue::Money(Money::new(dec!(1.25), CurrencyId(1))),
        );
        assert!(s.validate().is_empty());
    }

    #[test]
    fn test_property() {
        let mut s = security(SecurityTypeClass::Property);
        assert!(s.validate().is_empty());
        s.info.set(SecurityInfoClass::Notes, InfoValue::Text("Flat".into()));
        s.info.set(SecurityInfoClass::Symbol, InfoValue::Text("FLAT".into()));
        assert_eq!(s.validate().len(), 1);
    }
}
