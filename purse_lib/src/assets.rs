/// The accounts that can appear on either side of a transaction.
///
/// All variants share a small set of capabilities (kind, closed, hidden,
/// currency,...) which is all the validation rules need.  Some rules also
/// look at the finer-grained class of a specific variant (whether a loan is
/// a credit card, whether a payee is an employer,...).
use crate::asset_classes::{
    CashCategoryClass, DepositCategoryClass, LoanCategoryClass,
    PayeeTypeClass, PortfolioTypeClass, SecurityTypeClass,
};
use crate::asset_kinds::AssetKind;
use crate::currencies::CurrencyId;
use crate::deposit_info::DepositInfoClass;
use crate::info_sets::InfoSet;
use crate::security_info::SecurityInfoClass;

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub struct DepositId(pub u16);

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub struct CashId(pub u16);

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub struct LoanId(pub u16);

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub struct PortfolioId(pub u16);

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub struct SecurityId(pub u16);

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub struct PayeeId(pub u32);

/// The identity of an asset.  Two assets are the same account if and only
/// if their keys are equal, whatever their other fields contain.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum AssetKey {
    Deposit(DepositId),
    Cash(CashId),
    Loan(LoanId),
    Portfolio(PortfolioId),
    Security(SecurityId),
    SecurityHolding(PortfolioId, SecurityId),
    Payee(PayeeId),
}

/// Fields common to all accounts
#[derive(Debug, Clone, Default)]
pub struct AssetBase {
    // Short name as displayed to users
    pub name: String,

    pub closed: bool,

    // Hidden by the user, e.g. an account no longer in use
    pub hidden: bool,

    // None for payees
    pub currency: Option<CurrencyId>,
}

impl AssetBase {
    pub fn new(name: &str, currency: Option<CurrencyId>) -> Self {
        AssetBase {
            name: name.into(),
            currency,
            ..Default::default()
        }
    }

    pub fn set_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn set_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Deposit {
    pub id: DepositId,
    pub base: AssetBase,
    pub class: DepositCategoryClass,
    pub info: InfoSet<DepositInfoClass>,
}

impl Deposit {
    pub fn new(
        id: DepositId,
        base: AssetBase,
        class: DepositCategoryClass,
    ) -> Self {
        Deposit {
            id,
            base,
            class,
            info: InfoSet::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cash {
    pub id: CashId,
    pub base: AssetBase,
    pub class: CashCategoryClass,
}

impl Cash {
    pub fn new(id: CashId, base: AssetBase, class: CashCategoryClass) -> Self {
        Cash { id, base, class }
    }
}

#[derive(Debug, Clone)]
pub struct Loan {
    pub id: LoanId,
    pub base: AssetBase,
    pub class: LoanCategoryClass,
}

impl Loan {
    pub fn new(id: LoanId, base: AssetBase, class: LoanCategoryClass) -> Self {
        Loan { id, base, class }
    }
}

#[derive(Debug, Clone)]
pub struct Portfolio {
    pub id: PortfolioId,
    pub base: AssetBase,
    pub class: PortfolioTypeClass,
}

impl Portfolio {
    pub fn new(
        id: PortfolioId,
        base: AssetBase,
        class: PortfolioTypeClass,
    ) -> Self {
        Portfolio { id, base, class }
    }
}

#[derive(Debug, Clone)]
pub struct Security {
    pub id: SecurityId,
    pub base: AssetBase,
    pub class: SecurityTypeClass,
    pub info: InfoSet<SecurityInfoClass>,
}

impl Security {
    pub fn new(
        id: SecurityId,
        base: AssetBase,
        class: SecurityTypeClass,
    ) -> Self {
        Security {
            id,
            base,
            class,
            info: InfoSet::default(),
        }
    }
}

/// The position held on one security within one portfolio.
/// This is a snapshot of the relevant fields of both.
#[derive(Debug, Clone)]
pub struct SecurityHolding {
    pub portfolio: PortfolioId,
    pub security: SecurityId,
    pub base: AssetBase,
    pub class: SecurityTypeClass,
}

impl SecurityHolding {
    pub fn new(portfolio: &Portfolio, security: &Security) -> Self {
        SecurityHolding {
            portfolio: portfolio.id,
            security: security.id,
            base: AssetBase {
                name: format!("{}:{}", portfolio.base.name, security.base.name),
                closed: portfolio.base.closed || security.base.closed,
                hidden: portfolio.base.hidden || security.base.hidden,
                currency: security.base.currency,
            },
            class: security.class,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Payee {
    pub id: PayeeId,
    pub base: AssetBase,
    pub class: PayeeTypeClass,
}

impl Payee {
    pub fn new(id: PayeeId, name: &str, class: PayeeTypeClass) -> Self {
        Payee {
            id,
            base: AssetBase::new(name, None),
            class,
        }
    }
}

/// Any account usable as one side of a transaction
#[derive(Debug, Clone)]
pub enum TransactionAsset {
    Deposit(Deposit),
    Cash(Cash),
    Loan(Loan),
    Portfolio(Portfolio),
    Security(Security),
    SecurityHolding(SecurityHolding),
    Payee(Payee),
}

impl TransactionAsset {
    fn base(&self) -> &AssetBase {
        match self {
            TransactionAsset::Deposit(d) => &d.base,
            TransactionAsset::Cash(c) => &c.base,
            TransactionAsset::Loan(l) => &l.base,
            TransactionAsset::Portfolio(p) => &p.base,
            TransactionAsset::Security(s) => &s.base,
            TransactionAsset::SecurityHolding(h) => &h.base,
            TransactionAsset::Payee(p) => &p.base,
        }
    }

    #[must_use]
    pub fn key(&self) -> AssetKey {
        match self {
            TransactionAsset::Deposit(d) => AssetKey::Deposit(d.id),
            TransactionAsset::Cash(c) => AssetKey::Cash(c.id),
            TransactionAsset::Loan(l) => AssetKey::Loan(l.id),
            TransactionAsset::Portfolio(p) => AssetKey::Portfolio(p.id),
            TransactionAsset::Security(s) => AssetKey::Security(s.id),
            TransactionAsset::SecurityHolding(h) => {
                AssetKey::SecurityHolding(h.portfolio, h.security)
            }
            TransactionAsset::Payee(p) => AssetKey::Payee(p.id),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.base().name
    }

    #[must_use]
    pub fn asset_kind(&self) -> AssetKind {
        match self {
            TransactionAsset::Deposit(_) => AssetKind::Deposit,
            TransactionAsset::Cash(c) => match c.class {
                CashCategoryClass::Cash => AssetKind::Cash,
                CashCategoryClass::AutoExpense => AssetKind::AutoExpense,
            },
            TransactionAsset::Loan(_) => AssetKind::Loan,
            TransactionAsset::Portfolio(_) => AssetKind::Portfolio,
            TransactionAsset::Security(_)
            | TransactionAsset::SecurityHolding(_) => AssetKind::Security,
            TransactionAsset::Payee(_) => AssetKind::Payee,
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.base().closed
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        match self {
            TransactionAsset::Payee(p) => {
                p.base.hidden || p.class.is_hidden_type()
            }
            TransactionAsset::Deposit(_)
            | TransactionAsset::Cash(_)
            | TransactionAsset::Loan(_)
            | TransactionAsset::Portfolio(_)
            | TransactionAsset::Security(_)
            | TransactionAsset::SecurityHolding(_) => self.base().hidden,
        }
    }

    #[must_use]
    pub fn is_capital(&self) -> bool {
        self.security_class().is_some_and(SecurityTypeClass::is_capital)
    }

    #[must_use]
    pub fn is_shares(&self) -> bool {
        self.security_class().is_some_and(SecurityTypeClass::is_shares)
    }

    #[must_use]
    pub fn is_auto_expense(&self) -> bool {
        self.asset_kind().is_auto_expense()
    }

    #[must_use]
    pub fn currency(&self) -> Option<CurrencyId> {
        self.base().currency
    }

    #[must_use]
    pub fn is_security_holding(&self) -> bool {
        matches!(self, TransactionAsset::SecurityHolding(_))
    }

    #[must_use]
    pub fn is_portfolio(&self) -> bool {
        matches!(self, TransactionAsset::Portfolio(_))
    }

    /// The class of the security, for securities and holdings
    #[must_use]
    pub fn security_class(&self) -> Option<SecurityTypeClass> {
        match self {
            TransactionAsset::Security(s) => Some(s.class),
            TransactionAsset::SecurityHolding(h) => Some(h.class),
            TransactionAsset::Deposit(_)
            | TransactionAsset::Cash(_)
            | TransactionAsset::Loan(_)
            | TransactionAsset::Portfolio(_)
            | TransactionAsset::Payee(_) => None,
        }
    }

    #[must_use]
    pub fn loan_class(&self) -> Option<LoanCategoryClass> {
        match self {
            TransactionAsset::Loan(l) => Some(l.class),
            TransactionAsset::Deposit(_)
            | TransactionAsset::Cash(_)
            | TransactionAsset::Portfolio(_)
            | TransactionAsset::Security(_)
            | TransactionAsset::SecurityHolding(_)
            | TransactionAsset::Payee(_) => None,
        }
    }

    #[must_use]
    pub fn payee_class(&self) -> Option<PayeeTypeClass> {
        match self {
            TransactionAsset::Payee(p) => Some(p.class),
            TransactionAsset::Deposit(_)
            | TransactionAsset::Cash(_)
            | TransactionAsset::Loan(_)
            | TransactionAsset::Portfolio(_)
            | TransactionAsset::Security(_)
            | TransactionAsset::SecurityHolding(_) => None,
        }
    }
}

impl std::fmt::Display for TransactionAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.asset_kind())
    }
}

#[cfg(test)]
mod test {
    use crate::asset_classes::{
        CashCategoryClass, PayeeTypeClass, PortfolioTypeClass,
        SecurityTypeClass,
    };
    use crate::asset_kinds::AssetKind;
    use crate::assets::{
        AssetBase, AssetKey, Cash, CashId, Payee, PayeeId, Portfolio,
        PortfolioId, Security, SecurityHolding, SecurityId, TransactionAsset,
    };
    use crate::currencies::CurrencyId;

    #[test]
    fn test_capabilities() {
        let eur = Some(CurrencyId(1));
        let wallet = TransactionAsset::Cash(Cash::new(
            CashId(1),
            AssetBase::new("Wallet", eur),
            CashCategoryClass::AutoExpense,
        ));
        assert_eq!(wallet.asset_kind(), AssetKind::AutoExpense);
        assert!(wallet.is_auto_expense());
        assert!(!wallet.is_capital());

        let market = TransactionAsset::Payee(Payee::new(
            PayeeId(1),
            "Market",
            PayeeTypeClass::Market,
        ));
        assert!(market.is_hidden());
        assert_eq!(market.currency(), None);

        let broker = Portfolio::new(
            PortfolioId(1),
            AssetBase::new("Broker", eur),
            PortfolioTypeClass::Standard,
        );
        let aapl = Security::new(
            SecurityId(3),
            AssetBase::new("AAPL", eur).set_closed(true),
            SecurityTypeClass::Shares,
        );
        let holding =
            TransactionAsset::SecurityHolding(SecurityHolding::new(&broker, &aapl));
        assert_eq!(holding.asset_kind(), AssetKind::Security);
        assert_eq!(
            holding.key(),
            AssetKey::SecurityHolding(PortfolioId(1), SecurityId(3))
        );
        assert_eq!(holding.name(), "Broker:AAPL");
        assert!(holding.is_closed());
        assert!(holding.is_shares());
        assert!(holding.is_capital());
        assert!(holding.is_security_holding());
        assert!(!TransactionAsset::Security(aapl).is_security_holding());
    }

    #[test]
    fn test_identity() {
        // Same fields, different accounts
        let a = TransactionAsset::Cash(Cash::new(
            CashId(1),
            AssetBase::new("Wallet", None),
            CashCategoryClass::Cash,
        ));
        let b = TransactionAsset::Cash(Cash::new(
            CashId(2),
            AssetBase::new("Wallet", None),
            CashCategoryClass::Cash,
        ));
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), a.clone().key());
    }
}
