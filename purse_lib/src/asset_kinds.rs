/// Coarse classification of the accounts that can take part in a
/// transaction.  The kind of an account is decided when it is created and
/// never changes afterwards.
use crate::errors::Error;
use crate::transaction_kinds::TransactionKind;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Eq, PartialEq, Hash, Clone, Copy, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AssetKind {
    Deposit,
    Cash,

    // A cash account used on a cash-basis: spending from it is recorded
    // as it happens, and the account never holds a real balance.
    AutoExpense,

    Portfolio,
    Loan,
    Security,

    // Who money was paid to, or who paid you money.  Not an asset.
    Payee,
}

impl AssetKind {
    pub const ALL: [AssetKind; 7] = [
        AssetKind::Deposit,
        AssetKind::Cash,
        AssetKind::AutoExpense,
        AssetKind::Portfolio,
        AssetKind::Loan,
        AssetKind::Security,
        AssetKind::Payee,
    ];

    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            AssetKind::Deposit => 1,
            AssetKind::Cash => 2,
            AssetKind::AutoExpense => 3,
            AssetKind::Portfolio => 4,
            AssetKind::Loan => 5,
            AssetKind::Security => 6,
            AssetKind::Payee => 7,
        }
    }

    pub fn from_id(id: u32) -> Result<Self, Error> {
        AssetKind::ALL
            .into_iter()
            .find(|k| k.id() == id)
            .ok_or(Error::UnknownId {
                kind: "asset kind",
                id,
            })
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AssetKind::Deposit => "Deposit",
            AssetKind::Cash => "Cash",
            AssetKind::AutoExpense => "AutoExpense",
            AssetKind::Portfolio => "Portfolio",
            AssetKind::Loan => "Loan",
            AssetKind::Security => "Security",
            AssetKind::Payee => "Payee",
        }
    }

    /// Whether accounts of this kind carry an actual balance
    #[must_use]
    pub const fn is_valued(self) -> bool {
        matches!(self, AssetKind::Deposit | AssetKind::Cash | AssetKind::Loan)
    }

    #[must_use]
    pub const fn is_asset(self) -> bool {
        !self.is_payee()
    }

    /// Whether accounts of this kind can be the primary leg of a
    /// transaction.
    #[must_use]
    pub const fn is_base_account(self) -> bool {
        match self {
            AssetKind::Deposit
            | AssetKind::Cash
            | AssetKind::AutoExpense
            | AssetKind::Portfolio
            | AssetKind::Loan
            | AssetKind::Security => true,
            AssetKind::Payee => false,
        }
    }

    #[must_use]
    pub const fn is_deposit(self) -> bool {
        matches!(self, AssetKind::Deposit)
    }
    #[must_use]
    pub const fn is_loan(self) -> bool {
        matches!(self, AssetKind::Loan)
    }
    #[must_use]
    pub const fn is_payee(self) -> bool {
        matches!(self, AssetKind::Payee)
    }
    #[must_use]
    pub const fn is_auto_expense(self) -> bool {
        matches!(self, AssetKind::AutoExpense)
    }

    /// The kind of transaction where money flows from an account of kind
    /// `self` to an account of kind `partner`.
    #[must_use]
    pub const fn classify(self, partner: AssetKind) -> TransactionKind {
        let partner_is_asset = partner.is_asset();

        if self.is_asset() {
            if self.is_auto_expense() {
                if partner.is_auto_expense() {
                    TransactionKind::Illegal
                } else if partner_is_asset {
                    TransactionKind::CashDeposit
                } else {
                    TransactionKind::CashPayment
                }
            } else if partner_is_asset {
                if partner.is_auto_expense() {
                    TransactionKind::CashWithdrawal
                } else {
                    TransactionKind::Transfer
                }
            } else {
                TransactionKind::Expense
            }
        } else if !partner_is_asset {
            TransactionKind::Illegal
        } else if partner.is_auto_expense() {
            TransactionKind::CashRecovery
        } else {
            TransactionKind::Income
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for AssetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownName {
                kind: "asset kind",
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod test {
    use crate::asset_kinds::AssetKind;
    use crate::errors::Error;
    use crate::transaction_kinds::TransactionKind;

    #[test]
    fn test_classify() {
        assert_eq!(
            AssetKind::Deposit.classify(AssetKind::Payee),
            TransactionKind::Expense
        );
        assert_eq!(
            AssetKind::Payee.classify(AssetKind::Deposit),
            TransactionKind::Income
        );
        assert_eq!(
            AssetKind::AutoExpense.classify(AssetKind::Deposit),
            TransactionKind::CashDeposit
        );
        assert_eq!(
            AssetKind::AutoExpense.classify(AssetKind::Payee),
            TransactionKind::CashPayment
        );
        assert_eq!(
            AssetKind::Deposit.classify(AssetKind::AutoExpense),
            TransactionKind::CashWithdrawal
        );
        assert_eq!(
            AssetKind::Payee.classify(AssetKind::AutoExpense),
            TransactionKind::CashRecovery
        );
        assert_eq!(
            AssetKind::Loan.classify(AssetKind::Security),
            TransactionKind::Transfer
        );
    }

    #[test]
    fn test_classify_illegal() {
        assert_eq!(
            AssetKind::AutoExpense.classify(AssetKind::AutoExpense),
            TransactionKind::Illegal
        );
        assert_eq!(
            AssetKind::Payee.classify(AssetKind::Payee),
            TransactionKind::Illegal
        );

        // Every other combination is legal
        for a in AssetKind::ALL {
            for p in AssetKind::ALL {
                let illegal = (a.is_auto_expense() && p.is_auto_expense())
                    || (a.is_payee() && p.is_payee());
                assert_eq!(a.classify(p).is_illegal(), illegal, "{a} {p}");
            }
        }
    }

    #[test]
    fn test_predicates() {
        assert!(AssetKind::Cash.is_valued());
        assert!(!AssetKind::AutoExpense.is_valued());
        assert!(!AssetKind::Portfolio.is_valued());
        assert!(AssetKind::AutoExpense.is_asset());
        assert!(!AssetKind::Payee.is_asset());
        assert!(!AssetKind::Payee.is_base_account());
        assert!(AssetKind::Security.is_base_account());
    }

    #[test]
    fn test_ids() -> Result<(), Error> {
        for k in AssetKind::ALL {
            assert_eq!(AssetKind::from_id(k.id())?, k);
            assert_eq!(k.name().parse::<AssetKind>()?, k);
        }
        assert!(matches!(
            AssetKind::from_id(0),
            Err(Error::UnknownId { id: 0, .. })
        ));
        assert!("autoexpense".parse::<AssetKind>().is_ok());
        assert!("savings".parse::<AssetKind>().is_err());
        Ok(())
    }
}
