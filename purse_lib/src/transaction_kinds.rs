use crate::categories::TransactionCategoryKind;
use crate::errors::Error;
use serde::{Deserialize, Serialize};

/// The semantic classification of a transaction, derived either from the
/// kinds of its two accounts or from its category.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum TransactionKind {
    Transfer,
    Income,
    Expense,

    // From a real account into an auto-expense account
    CashWithdrawal,

    // From an auto-expense account back into a real account
    CashDeposit,

    // Spending from an auto-expense account
    CashPayment,

    // A refund into an auto-expense account
    CashRecovery,

    Illegal,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 8] = [
        TransactionKind::Transfer,
        TransactionKind::Income,
        TransactionKind::Expense,
        TransactionKind::CashWithdrawal,
        TransactionKind::CashDeposit,
        TransactionKind::CashPayment,
        TransactionKind::CashRecovery,
        TransactionKind::Illegal,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TransactionKind::Transfer => "Transfer",
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::CashWithdrawal => "CashWithdrawal",
            TransactionKind::CashDeposit => "CashDeposit",
            TransactionKind::CashPayment => "CashPayment",
            TransactionKind::CashRecovery => "CashRecovery",
            TransactionKind::Illegal => "Illegal",
        }
    }

    #[must_use]
    pub const fn is_transfer(self) -> bool {
        matches!(self, TransactionKind::Transfer)
    }

    #[must_use]
    pub const fn is_income(self) -> bool {
        matches!(self, TransactionKind::Income | TransactionKind::CashRecovery)
    }

    #[must_use]
    pub const fn is_expense(self) -> bool {
        matches!(self, TransactionKind::Expense | TransactionKind::CashPayment)
    }

    /// Whether one side of the transaction is an auto-expense account
    #[must_use]
    pub const fn is_auto_expense(self) -> bool {
        matches!(
            self,
            TransactionKind::CashWithdrawal
                | TransactionKind::CashDeposit
                | TransactionKind::CashPayment
                | TransactionKind::CashRecovery
        )
    }

    #[must_use]
    pub const fn is_illegal(self) -> bool {
        matches!(self, TransactionKind::Illegal)
    }

    /// The kind of the transaction that refunds a transaction of kind self.
    #[must_use]
    pub const fn recovered(self) -> TransactionKind {
        match self {
            TransactionKind::Expense => TransactionKind::Income,
            TransactionKind::CashPayment => TransactionKind::CashRecovery,
            TransactionKind::CashWithdrawal => TransactionKind::CashDeposit,
            TransactionKind::Transfer
            | TransactionKind::Income
            | TransactionKind::CashDeposit
            | TransactionKind::CashRecovery
            | TransactionKind::Illegal => TransactionKind::Illegal,
        }
    }

    #[must_use]
    pub const fn derive_from_category(
        category: TransactionCategoryKind,
    ) -> TransactionKind {
        match category {
            TransactionCategoryKind::TaxedIncome
            | TransactionCategoryKind::RentalIncome
            | TransactionCategoryKind::RoomRentalIncome
            | TransactionCategoryKind::Interest
            | TransactionCategoryKind::Dividend
            | TransactionCategoryKind::GrantIncome
            | TransactionCategoryKind::BenefitIncome
            | TransactionCategoryKind::GiftedIncome
            | TransactionCategoryKind::Inherited
            | TransactionCategoryKind::LoanInterestEarned
            | TransactionCategoryKind::CashBack
            | TransactionCategoryKind::LoyaltyBonus
            | TransactionCategoryKind::OtherIncome
            | TransactionCategoryKind::OptionsGrant
            | TransactionCategoryKind::OptionsVest
            | TransactionCategoryKind::OptionsExercise
            | TransactionCategoryKind::TaxableGain
            | TransactionCategoryKind::CapitalGain
            | TransactionCategoryKind::MarketGrowth
            | TransactionCategoryKind::CurrencyFluctuation => {
                TransactionKind::Income
            }

            TransactionCategoryKind::Transfer
            | TransactionCategoryKind::UnitsAdjust
            | TransactionCategoryKind::StockSplit
            | TransactionCategoryKind::SecurityReplace
            | TransactionCategoryKind::StockTakeover
            | TransactionCategoryKind::StockDemerger
            | TransactionCategoryKind::StockRightsTaken
            | TransactionCategoryKind::StockRightsWaived
            | TransactionCategoryKind::PortfolioTransfer => {
                TransactionKind::Transfer
            }

            TransactionCategoryKind::IncomeTotals
            | TransactionCategoryKind::ExpenseTotals
            | TransactionCategoryKind::Totals => TransactionKind::Illegal,

            TransactionCategoryKind::Expense
            | TransactionCategoryKind::WriteOff
            | TransactionCategoryKind::LocalTaxes
            | TransactionCategoryKind::TaxRelief
            | TransactionCategoryKind::TaxSettlement
            | TransactionCategoryKind::LoanInterestCharged
            | TransactionCategoryKind::CharityDonation
            | TransactionCategoryKind::TaxCredit
            | TransactionCategoryKind::NatInsurance
            | TransactionCategoryKind::DeemedBenefit => TransactionKind::Expense,
        }
    }

    /// Same as derive_from_category, for a category kind known only by its
    /// stored id.  An unknown id means the rule tables are out of sync with
    /// the data, and is reported as an error rather than a validation
    /// failure.
    pub fn derive_from_category_id(id: u32) -> Result<TransactionKind, Error> {
        TransactionCategoryKind::from_id(id).map(Self::derive_from_category)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
