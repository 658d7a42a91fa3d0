use crate::errors::Error;
use serde::{Deserialize, Serialize};

/// The business purpose of a transaction.  Each user category is attached
/// to exactly one of these, which then drives the validation rules.
#[derive(
    Debug, Eq, PartialEq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TransactionCategoryKind {
    //------------------------------
    // Income
    TaxedIncome,
    RentalIncome,
    RoomRentalIncome,
    Interest,
    Dividend,
    GrantIncome,
    BenefitIncome,
    GiftedIncome,
    Inherited,
    LoanInterestEarned,
    CashBack,
    LoyaltyBonus,
    OtherIncome,
    OptionsGrant,
    OptionsVest,
    OptionsExercise,

    // Generated by the system when computing gains
    TaxableGain,
    CapitalGain,
    MarketGrowth,
    CurrencyFluctuation,

    //------------------------------
    // Transfers, including changes in the structure of a holding
    Transfer,
    UnitsAdjust,
    StockSplit,
    SecurityReplace,
    StockTakeover,
    StockDemerger,
    StockRightsTaken,
    StockRightsWaived,
    PortfolioTransfer,

    //------------------------------
    // Expenses
    Expense,
    WriteOff,
    LocalTaxes,
    TaxRelief,
    TaxSettlement,
    LoanInterestCharged,
    CharityDonation,

    // Generated by the system when splitting taxed income
    TaxCredit,
    NatInsurance,
    DeemedBenefit,

    //------------------------------
    // Aggregates, only used in reports
    IncomeTotals,
    ExpenseTotals,
    Totals,
}

impl TransactionCategoryKind {
    pub const ALL: [TransactionCategoryKind; 42] = [
        TransactionCategoryKind::TaxedIncome,
        TransactionCategoryKind::RentalIncome,
        TransactionCategoryKind::RoomRentalIncome,
        TransactionCategoryKind::Interest,
        TransactionCategoryKind::Dividend,
        TransactionCategoryKind::GrantIncome,
        TransactionCategoryKind::BenefitIncome,
        TransactionCategoryKind::GiftedIncome,
        TransactionCategoryKind::Inherited,
        TransactionCategoryKind::LoanInterestEarned,
        TransactionCategoryKind::CashBack,
        TransactionCategoryKind::LoyaltyBonus,
        TransactionCategoryKind::OtherIncome,
        TransactionCategoryKind::OptionsGrant,
        TransactionCategoryKind::OptionsVest,
        TransactionCategoryKind::OptionsExercise,
        TransactionCategoryKind::TaxableGain,
        TransactionCategoryKind::CapitalGain,
        TransactionCategoryKind::MarketGrowth,
        TransactionCategoryKind::CurrencyFluctuation,
        TransactionCategoryKind::Transfer,
        TransactionCategoryKind::UnitsAdjust,
        TransactionCategoryKind::StockSplit,
        TransactionCategoryKind::SecurityReplace,
        TransactionCategoryKind::StockTakeover,
        TransactionCategoryKind::StockDemerger,
        TransactionCategoryKind::StockRightsTaken,
        TransactionCategoryKind::StockRightsWaived,
        TransactionCategoryKind::PortfolioTransfer,
        TransactionCategoryKind::Expense,
        TransactionCategoryKind::WriteOff,
        TransactionCategoryKind::LocalTaxes,
        TransactionCategoryKind::TaxRelief,
        TransactionCategoryKind::TaxSettlement,
        TransactionCategoryKind::LoanInterestCharged,
        TransactionCategoryKind::CharityDonation,
        TransactionCategoryKind::TaxCredit,
        TransactionCategoryKind::NatInsurance,
        TransactionCategoryKind::DeemedBenefit,
        TransactionCategoryKind::IncomeTotals,
        TransactionCategoryKind::ExpenseTotals,
        TransactionCategoryKind::Totals,
    ];

    /// The stable numeric id, as stored by external collaborators.  Ids
    /// start at 1.
    #[must_use]
    pub fn id(self) -> u32 {
        // ALL is declared in id order
        TransactionCategoryKind::ALL
            .iter()
            .position(|k| *k == self)
            .map_or(0, |pos| pos as u32 + 1)
    }

    pub fn from_id(id: u32) -> Result<Self, Error> {
        id.checked_sub(1)
            .and_then(|pos| TransactionCategoryKind::ALL.get(pos as usize))
            .copied()
            .ok_or(Error::UnknownId {
                kind: "transaction category",
                id,
            })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TransactionCategoryKind::TaxedIncome => "TaxedIncome",
            TransactionCategoryKind::RentalIncome => "RentalIncome",
            TransactionCategoryKind::RoomRentalIncome => "RoomRentalIncome",
            TransactionCategoryKind::Interest => "Interest",
            TransactionCategoryKind::Dividend => "Dividend",
            TransactionCategoryKind::GrantIncome => "GrantIncome",
            TransactionCategoryKind::BenefitIncome => "BenefitIncome",
            TransactionCategoryKind::GiftedIncome => "GiftedIncome",
            TransactionCategoryKind::Inherited => "Inherited",
            TransactionCategoryKind::LoanInterestEarned => "LoanInterestEarned",
            TransactionCategoryKind::CashBack => "CashBack",
            TransactionCategoryKind::LoyaltyBonus => "LoyaltyBonus",
            TransactionCategoryKind::OtherIncome => "OtherIncome",
            TransactionCategoryKind::OptionsGrant => "OptionsGrant",
            TransactionCategoryKind::OptionsVest => "OptionsVest",
            TransactionCategoryKind::OptionsExercise => "OptionsExercise",
            TransactionCategoryKind::TaxableGain => "TaxableGain",
            TransactionCategoryKind::CapitalGain => "CapitalGain",
            TransactionCategoryKind::MarketGrowth => "MarketGrowth",
            TransactionCategoryKind::CurrencyFluctuation => {
                "CurrencyFluctuation"
            }
            TransactionCategoryKind::Transfer => "Transfer",
            TransactionCategoryKind::UnitsAdjust => "UnitsAdjust",
            TransactionCategoryKind::StockSplit => "StockSplit",
            TransactionCategoryKind::SecurityReplace => "SecurityReplace",
            TransactionCategoryKind::StockTakeover => "StockTakeover",
            TransactionCategoryKind::StockDemerger => "StockDemerger",
            TransactionCategoryKind::StockRightsTaken => "StockRightsTaken",
            TransactionCategoryKind::StockRightsWaived => "StockRightsWaived",
            TransactionCategoryKind::PortfolioTransfer => "PortfolioTransfer",
            TransactionCategoryKind::Expense => "Expense",
            TransactionCategoryKind::WriteOff => "WriteOff",
            TransactionCategoryKind::LocalTaxes => "LocalTaxes",
            TransactionCategoryKind::TaxRelief => "TaxRelief",
            TransactionCategoryKind::TaxSettlement => "TaxSettlement",
            TransactionCategoryKind::LoanInterestCharged => {
                "LoanInterestCharged"
            }
            TransactionCategoryKind::CharityDonation => "CharityDonation",
            TransactionCategoryKind::TaxCredit => "TaxCredit",
            TransactionCategoryKind::NatInsurance => "NatInsurance",
            TransactionCategoryKind::DeemedBenefit => "DeemedBenefit",
            TransactionCategoryKind::IncomeTotals => "IncomeTotals",
            TransactionCategoryKind::ExpenseTotals => "ExpenseTotals",
            TransactionCategoryKind::Totals => "Totals",
        }
    }

    /// Whether users can never select this kind for a transaction: either
    /// an aggregate used in reports, or a kind only generated internally.
    #[must_use]
    pub const fn is_hidden_type(self) -> bool {
        matches!(
            self,
            TransactionCategoryKind::TaxableGain
                | TransactionCategoryKind::CapitalGain
                | TransactionCategoryKind::MarketGrowth
                | TransactionCategoryKind::CurrencyFluctuation
                | TransactionCategoryKind::TaxCredit
                | TransactionCategoryKind::NatInsurance
                | TransactionCategoryKind::DeemedBenefit
                | TransactionCategoryKind::IncomeTotals
                | TransactionCategoryKind::ExpenseTotals
                | TransactionCategoryKind::Totals
        )
    }

    #[must_use]
    pub const fn is_totals(self) -> bool {
        matches!(
            self,
            TransactionCategoryKind::IncomeTotals
                | TransactionCategoryKind::ExpenseTotals
                | TransactionCategoryKind::Totals
        )
    }
}

impl std::fmt::Display for TransactionCategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TransactionCategoryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionCategoryKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownName {
                kind: "transaction category",
                name: s.to_string(),
            })
    }
}

/// A user-defined category, e.g. "Salary" or "Groceries", attached to one
/// kind.
#[derive(Debug, Clone)]
pub struct TransactionCategory {
    pub name: String,
    pub kind: TransactionCategoryKind,
}

impl TransactionCategory {
    pub fn new(name: &str, kind: TransactionCategoryKind) -> Self {
        TransactionCategory {
            name: name.into(),
            kind,
        }
    }

    /// A category whose name is simply the name of its kind
    #[must_use]
    pub fn of_kind(kind: TransactionCategoryKind) -> Self {
        TransactionCategory::new(kind.name(), kind)
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.kind.is_hidden_type()
    }
}

#[cfg(test)]
mod test {
    use crate::categories::TransactionCategoryKind;
    use crate::errors::Error;

    #[test]
    fn test_ids() -> Result<(), Error> {
        for (pos, k) in TransactionCategoryKind::ALL.iter().enumerate() {
            assert_eq!(k.id(), pos as u32 + 1);
            assert_eq!(TransactionCategoryKind::from_id(k.id())?, *k);
            assert_eq!(k.name().parse::<TransactionCategoryKind>()?, *k);
        }
        assert!(TransactionCategoryKind::from_id(0).is_err());
        assert!(TransactionCategoryKind::from_id(43).is_err());
        Ok(())
    }

    #[test]
    fn test_hidden() {
        assert!(TransactionCategoryKind::IncomeTotals.is_hidden_type());
        assert!(TransactionCategoryKind::NatInsurance.is_hidden_type());
        assert!(!TransactionCategoryKind::Expense.is_hidden_type());
        assert!(!TransactionCategoryKind::CharityDonation.is_hidden_type());
        assert!(TransactionCategoryKind::ALL
            .iter()
            .filter(|k| k.is_totals())
            .all(|k| k.is_hidden_type()));
    }
}
