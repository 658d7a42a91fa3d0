/// Fine-grained classes for each variant of account.  The coarse
/// AssetKind is not always enough for the validation rules, which sometimes
/// need to know for instance whether a loan is a credit card, or whether a
/// payee is an employer.
use serde::{Deserialize, Serialize};

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum DepositCategoryClass {
    Checking,
    Savings,
    TaxFreeSavings,
    Peer2Peer,
    Bond,
    TaxFreeBond,
}

impl DepositCategoryClass {
    /// Whether deposits of this class are locked until a maturity date
    #[must_use]
    pub const fn has_maturity(self) -> bool {
        matches!(
            self,
            DepositCategoryClass::Bond | DepositCategoryClass::TaxFreeBond
        )
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum CashCategoryClass {
    Cash,

    // Spending is expensed as soon as the money is withdrawn
    AutoExpense,
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum LoanCategoryClass {
    CreditCard,
    PrivateLoan,
    Loan,
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum PortfolioTypeClass {
    Standard,
    TaxFree,
    Pension,
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum SecurityTypeClass {
    Shares,
    IncomeUnitTrust,
    GrowthUnitTrust,
    LifeBond,
    Endowment,
    StockOption,
    Property,
    Vehicle,
    Asset,
}

impl SecurityTypeClass {
    /// Whether holdings can be subject to structural stock events (splits,
    /// takeovers, rights,...)
    #[must_use]
    pub const fn is_shares(self) -> bool {
        matches!(self, SecurityTypeClass::Shares)
    }

    /// Whether holdings are measured in units
    #[must_use]
    pub const fn is_capital(self) -> bool {
        match self {
            SecurityTypeClass::Shares
            | SecurityTypeClass::IncomeUnitTrust
            | SecurityTypeClass::GrowthUnitTrust
            | SecurityTypeClass::LifeBond
            | SecurityTypeClass::Endowment => true,
            SecurityTypeClass::StockOption
            | SecurityTypeClass::Property
            | SecurityTypeClass::Vehicle
            | SecurityTypeClass::Asset => false,
        }
    }

    /// Whether the security is traded under a ticker symbol
    #[must_use]
    pub const fn needs_symbol(self) -> bool {
        matches!(
            self,
            SecurityTypeClass::Shares
                | SecurityTypeClass::IncomeUnitTrust
                | SecurityTypeClass::GrowthUnitTrust
        )
    }

    #[must_use]
    pub const fn needs_region(self) -> bool {
        self.needs_symbol()
    }

    #[must_use]
    pub const fn is_option(self) -> bool {
        matches!(self, SecurityTypeClass::StockOption)
    }

    #[must_use]
    pub const fn is_property(self) -> bool {
        matches!(self, SecurityTypeClass::Property)
    }
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum PayeeTypeClass {
    Employer,
    Government,
    Individual,
    Institution,
    TaxMan,
    LoanHolder,

    // Internal payee used to book market movements.  Never selectable.
    Market,

    Payee,
}

impl PayeeTypeClass {
    /// Whether this payee can be the source of a grant
    #[must_use]
    pub const fn can_grant(self) -> bool {
        matches!(
            self,
            PayeeTypeClass::Individual
                | PayeeTypeClass::Institution
                | PayeeTypeClass::Government
        )
    }

    #[must_use]
    pub const fn is_hidden_type(self) -> bool {
        matches!(self, PayeeTypeClass::Market)
    }
}

#[cfg(test)]
mod test {
    use crate::asset_classes::{
        DepositCategoryClass, PayeeTypeClass, SecurityTypeClass,
    };

    #[test]
    fn test_classes() {
        assert!(DepositCategoryClass::Bond.has_maturity());
        assert!(!DepositCategoryClass::Savings.has_maturity());
        assert!(SecurityTypeClass::Shares.is_capital());
        assert!(SecurityTypeClass::LifeBond.is_capital());
        assert!(!SecurityTypeClass::LifeBond.is_shares());
        assert!(!SecurityTypeClass::Property.is_capital());
        assert!(SecurityTypeClass::GrowthUnitTrust.needs_symbol());
        assert!(!SecurityTypeClass::Vehicle.needs_region());
        assert!(PayeeTypeClass::Government.can_grant());
        assert!(!PayeeTypeClass::Employer.can_grant());
        assert!(PayeeTypeClass::Market.is_hidden_type());
    }
}
