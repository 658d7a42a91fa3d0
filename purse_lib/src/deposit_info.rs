use crate::assets::Deposit;
use crate::field_errors::{FieldErrors, Problem};
use crate::info_sets::{
    FieldRequired, InfoClass, InfoDataType, InfoOwner, InfoSet, InfoValue,
};
use regex::Regex;
use std::sync::LazyLock;

// Bank sort codes, e.g. 12-34-56
static SORT_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}-\d{2}-\d{2}$").expect("invalid sort code pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepositInfoClass {
    Maturity,
    OpeningBalance,
    SortCode,
    Account,
    Reference,
    WebSite,
    CustomerNo,
    UserId,
    Password,
    Notes,
}

impl InfoClass for DepositInfoClass {
    const ALL: &'static [Self] = &[
        DepositInfoClass::Maturity,
        DepositInfoClass::OpeningBalance,
        DepositInfoClass::SortCode,
        DepositInfoClass::Account,
        DepositInfoClass::Reference,
        DepositInfoClass::WebSite,
        DepositInfoClass::CustomerNo,
        DepositInfoClass::UserId,
        DepositInfoClass::Password,
        DepositInfoClass::Notes,
    ];

    fn name(self) -> &'static str {
        match self {
            DepositInfoClass::Maturity => "Maturity",
            DepositInfoClass::OpeningBalance => "OpeningBalance",
            DepositInfoClass::SortCode => "SortCode",
            DepositInfoClass::Account => "Account",
            DepositInfoClass::Reference => "Reference",
            DepositInfoClass::WebSite => "WebSite",
            DepositInfoClass::CustomerNo => "CustomerNo",
            DepositInfoClass::UserId => "UserId",
            DepositInfoClass::Password => "Password",
            DepositInfoClass::Notes => "Notes",
        }
    }

    fn data_type(self) -> InfoDataType {
        match self {
            DepositInfoClass::Maturity => InfoDataType::Date,
            DepositInfoClass::OpeningBalance => InfoDataType::Money,
            DepositInfoClass::SortCode
            | DepositInfoClass::Account
            | DepositInfoClass::Reference
            | DepositInfoClass::WebSite
            | DepositInfoClass::CustomerNo
            | DepositInfoClass::UserId
            | DepositInfoClass::Password
            | DepositInfoClass::Notes => InfoDataType::Text,
        }
    }

    fn max_length(self) -> Option<usize> {
        match self {
            DepositInfoClass::Maturity | DepositInfoClass::OpeningBalance => {
                None
            }
            DepositInfoClass::SortCode
            | DepositInfoClass::Account
            | DepositInfoClass::Reference
            | DepositInfoClass::CustomerNo
            | DepositInfoClass::UserId
            | DepositInfoClass::Password => Some(20),
            DepositInfoClass::WebSite => Some(50),
            DepositInfoClass::Notes => Some(500),
        }
    }
}

impl InfoOwner for Deposit {
    type Class = DepositInfoClass;

    fn info_set(&self) -> &InfoSet<DepositInfoClass> {
        &self.info
    }

    fn is_class_required(&self, class: DepositInfoClass) -> FieldRequired {
        match class {
            DepositInfoClass::Maturity => {
                if self.class.has_maturity() {
                    FieldRequired::MustExist
                } else {
                    FieldRequired::NotAllowed
                }
            }
            DepositInfoClass::OpeningBalance
            | DepositInfoClass::SortCode
            | DepositInfoClass::Account
            | DepositInfoClass::Reference
            | DepositInfoClass::WebSite
            | DepositInfoClass::CustomerNo
            | DepositInfoClass::UserId
            | DepositInfoClass::Password
            | DepositInfoClass::Notes => FieldRequired::CanExist,
        }
    }

    fn validate_value(
        &self,
        class: DepositInfoClass,
        value: &InfoValue,
        errors: &mut FieldErrors<DepositInfoClass>,
    ) {
        match (class, value) {
            (DepositInfoClass::OpeningBalance, InfoValue::Money(balance)) => {
                if Some(balance.currency) != self.base.currency {
                    errors.add(class, Problem::CurrencyMismatch);
                }
            }
            (DepositInfoClass::SortCode, InfoValue::Text(code)) => {
                if !SORT_CODE.is_match(code) {
                    errors.add(class, Problem::BadFormat);
                }
            }
            _ => {}
        }
    }
}

impl Deposit {
    /// Check the deposit's info fields
    #[must_use]
    pub fn validate(&self) -> FieldErrors<DepositInfoClass> {
        self.validate_info()
    }
}

#[cfg(test)]
mod test {
    use crate::asset_classes::DepositCategoryClass;
    use crate::assets::{AssetBase, Deposit, DepositId};
    use crate::currencies::CurrencyId;
    use crate::deposit_info::DepositInfoClass;
    use crate::field_errors::Problem;
    use crate::info_sets::{FieldRequired, InfoOwner, InfoValue};
    use crate::money::Money;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn deposit(class: DepositCategoryClass) -> Deposit {
        Deposit::new(
            DepositId(1),
            AssetBase::new("Savings", Some(CurrencyId(1))),
            class,
        )
    }

    #[test]
    fn test_maturity() {
        let mut bond = deposit(DepositCategoryClass::Bond);
        assert_eq!(
            bond.is_class_required(DepositInfoClass::Maturity),
            FieldRequired::MustExist
        );
        assert_eq!(
            bond.validate().for_field(DepositInfoClass::Maturity).next(),
            Some(&Problem::Missing)
        );
        bond.info.set(
            DepositInfoClass::Maturity,
            InfoValue::Date(NaiveDate::from_ymd_opt(2030, 4, 5).unwrap()),
        );
        assert!(bond.validate().is_empty());

        let mut savings = deposit(DepositCategoryClass::Savings);
        assert!(savings.validate().is_empty());
        savings.info.set(
            DepositInfoClass::Maturity,
            InfoValue::Date(NaiveDate::from_ymd_opt(2030, 4, 5).unwrap()),
        );
        assert_eq!(
            savings.validate().for_field(DepositInfoClass::Maturity).next(),
            Some(&Problem::Exists)
        );
    }

    #[test]
    fn test_opening_balance() {
        let mut d = deposit(DepositCategoryClass::Checking);
        d.info.set(
            DepositInfoClass::OpeningBalance,
            InfoValue::Money(Money::new(dec!(100), CurrencyId(1))),
        );
        assert!(d.validate().is_empty());

        d.info.set(
            DepositInfoClass::OpeningBalance,
            InfoValue::Money(Money::new(dec!(100), CurrencyId(2))),
        );
        assert_eq!(
            d.validate().for_field(DepositInfoClass::OpeningBalance).next(),
            Some(&Problem::CurrencyMismatch)
        );
    }

    #[test]
    fn test_text_fields() {
        let mut d = deposit(DepositCategoryClass::Checking);
        d.info.set(DepositInfoClass::SortCode, InfoValue::Text("12-34-56".into()));
        d.info.set(DepositInfoClass::Notes, InfoValue::Text("Joint account".into()));
        assert!(d.validate().is_empty());

        d.info.set(DepositInfoClass::SortCode, InfoValue::Text("123456".into()));
        d.info.set(DepositInfoClass::Account, InfoValue::Text("9".repeat(21)));
        let errors = d.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field(DepositInfoClass::SortCode).next(),
            Some(&Problem::BadFormat)
        );
        assert_eq!(
            errors.for_field(DepositInfoClass::Account).next(),
            Some(&Problem::TooLong { max: 20 })
        );
    }
}
