/// Loading a set of accounts, tax years and candidate transactions from a
/// JSON file, and checking them all.
///
/// The file refers to currencies by their ISO code and to accounts by
/// their name (case-insensitive), so that it can be written by hand.
use crate::asset_classes::{
    CashCategoryClass, DepositCategoryClass, LoanCategoryClass,
    PayeeTypeClass, PortfolioTypeClass, SecurityTypeClass,
};
use crate::assets::{
    AssetBase, Cash, CashId, Deposit, DepositId, Loan, LoanId,
    Payee, PayeeId, Portfolio, PortfolioId, Security, SecurityHolding,
    SecurityId, TransactionAsset,
};
use crate::categories::{TransactionCategory, TransactionCategoryKind};
use crate::currencies::{Currency, CurrencyCollection, CurrencyId};
use crate::directions::AssetDirection;
use crate::errors::Error;
use crate::field_errors::{FieldErrors, Problem};
use crate::info_sets::{InfoClass, InfoSet, InfoValue, LinkedSecurity};
use crate::money::Money;
use crate::tax_year_info::{TaxRegime, TaxYear};
use crate::transaction_kinds::TransactionKind;
use crate::validator::{CandidateTransaction, TransactionField};
use case_insensitive_hashmap::CaseInsensitiveHashMap;
use chrono::NaiveDate;
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Deserialize)]
struct RawCurrency {
    code: String,
    #[serde(default)]
    symbol: String,
    #[serde(default = "default_precision")]
    precision: u8,
}

fn default_precision() -> u8 {
    2
}

#[derive(Deserialize)]
enum RawInfoValue {
    Date(NaiveDate),
    Money { amount: Decimal, currency: String },
    Rate(Decimal),
    Text(String),

    // Name of the linked security
    Security(String),
}

type RawInfo = BTreeMap<String, RawInfoValue>;

#[derive(Deserialize)]
struct RawBase {
    id: u16,
    name: String,
    currency: String,
    #[serde(default)]
    closed: bool,
    #[serde(default)]
    hidden: bool,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawAsset {
    Deposit {
        #[serde(flatten)]
        base: RawBase,
        class: DepositCategoryClass,
        #[serde(default)]
        info: RawInfo,
    },
    Cash {
        #[serde(flatten)]
        base: RawBase,
        class: CashCategoryClass,
    },
    Loan {
        #[serde(flatten)]
        base: RawBase,
        class: LoanCategoryClass,
    },
    Portfolio {
        #[serde(flatten)]
        base: RawBase,
        class: PortfolioTypeClass,
    },
    Security {
        #[serde(flatten)]
        base: RawBase,
        class: SecurityTypeClass,
        #[serde(default)]
        info: RawInfo,
    },
    SecurityHolding {
        portfolio: String,
        security: String,
    },
    Payee {
        id: u32,
        name: String,
        class: PayeeTypeClass,
        #[serde(default)]
        hidden: bool,
    },
}

#[derive(Deserialize)]
struct RawTaxYear {
    year: i32,
    regime: TaxRegime,
    currency: String,
    #[serde(default)]
    info: RawInfo,
}

#[derive(Deserialize)]
struct RawTransaction {
    account: String,
    partner: String,

    // Name of the category kind
    category: String,

    // Name of the user category, defaults to the kind's name
    #[serde(default)]
    label: Option<String>,

    direction: AssetDirection,
}

#[derive(Deserialize)]
struct RawScenario {
    #[serde(default)]
    currencies: Vec<RawCurrency>,
    #[serde(default)]
    assets: Vec<RawAsset>,
    #[serde(default)]
    tax_years: Vec<RawTaxYear>,
    #[serde(default)]
    transactions: Vec<RawTransaction>,
}

/// A transaction read from the file, with its accounts resolved
pub struct ScenarioTransaction {
    pub account: TransactionAsset,
    pub partner: TransactionAsset,
    pub category: TransactionCategory,
    pub direction: AssetDirection,
}

impl ScenarioTransaction {
    #[must_use]
    pub fn candidate(&self) -> CandidateTransaction<'_> {
        CandidateTransaction::new(
            &self.account,
            &self.category,
            &self.partner,
            self.direction,
        )
    }
}

#[derive(Default)]
pub struct Scenario {
    pub currencies: CurrencyCollection,
    pub assets: Vec<TransactionAsset>,
    pub tax_years: Vec<TaxYear>,
    pub transactions: Vec<ScenarioTransaction>,
}

/// The outcome of checking one transaction
pub struct TransactionReport {
    pub account: String,
    pub partner: String,
    pub category: String,
    pub direction: AssetDirection,
    pub kind: TransactionKind,
    pub errors: FieldErrors<TransactionField>,
}

impl TransactionReport {
    #[must_use]
    pub fn describe_errors(&self) -> String {
        self.errors
            .iter()
            .map(|(field, problem)| format!("{field:?}: {problem}"))
            .join(", ")
    }
}

/// The outcome of checking the info fields of one owner
pub struct OwnerReport {
    // e.g. "Deposit Savings" or "Tax year 2024"
    pub owner: String,

    pub problems: Vec<(&'static str, Problem)>,
}

impl OwnerReport {
    fn new<C: InfoClass>(owner: String, errors: FieldErrors<C>) -> Self {
        OwnerReport {
            owner,
            problems: errors
                .iter()
                .map(|(class, problem)| (class.name(), problem.clone()))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }

    #[must_use]
    pub fn describe_errors(&self) -> String {
        self.problems
            .iter()
            .map(|(class, problem)| format!("{class}: {problem}"))
            .join(", ")
    }
}

#[derive(Default)]
pub struct ScenarioReport {
    pub transactions: Vec<TransactionReport>,
    pub owners: Vec<OwnerReport>,
}

impl ScenarioReport {
    /// Number of transactions and owners that failed their checks
    #[must_use]
    pub fn failures(&self) -> usize {
        self.transactions
            .iter()
            .filter(|t| !t.errors.is_empty())
            .count()
            + self.owners.iter().filter(|o| !o.is_ok()).count()
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures() == 0
    }
}

/// State used while resolving names from the file
struct Resolver {
    currencies: CurrencyCollection,
    securities: CaseInsensitiveHashMap<LinkedSecurity>,
}

impl Resolver {
    fn currency(&self, code: &str) -> Result<CurrencyId, Error> {
        self.currencies.find(code).ok_or_else(|| Error::UnknownName {
            kind: "currency",
            name: code.to_string(),
        })
    }

    fn base(&self, raw: &RawBase) -> Result<AssetBase, Error> {
        Ok(AssetBase::new(&raw.name, Some(self.currency(&raw.currency)?))
            .set_closed(raw.closed)
            .set_hidden(raw.hidden))
    }

    fn info<C: InfoClass>(&self, raw: &RawInfo) -> Result<InfoSet<C>, Error> {
        let mut info = InfoSet::default();
        for (name, value) in raw {
            let class = C::from_name(name)?;
            let value = match value {
                RawInfoValue::Date(d) => InfoValue::Date(*d),
                RawInfoValue::Money { amount, currency } => {
                    InfoValue::Money(Money::new(*amount, self.currency(currency)?))
                }
                RawInfoValue::Rate(r) => InfoValue::Rate(*r),
                RawInfoValue::Text(t) => InfoValue::Text(t.clone()),
                RawInfoValue::Security(s) => InfoValue::Security(
                    self.securities.get(s.clone()).copied().ok_or_else(|| {
                        Error::UnknownName {
                            kind: "security",
                            name: s.clone(),
                        }
                    })?,
                ),
            };
            if info.set(class, value).is_some() {
                return Err(Error::Str(format!("Duplicate info field {name}")));
            }
        }
        Ok(info)
    }
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        log::info!("Loading scenario {}", path.display());
        let file = std::fs::File::open(path)?;
        Scenario::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, Error> {
        let raw: RawScenario = serde_json::from_reader(reader)?;
        Scenario::from_raw(raw)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Scenario::from_reader(json.as_bytes())
    }

    fn from_raw(raw: RawScenario) -> Result<Self, Error> {
        let mut resolver = Resolver {
            currencies: CurrencyCollection::default(),
            securities: CaseInsensitiveHashMap::new(),
        };
        for c in &raw.currencies {
            if resolver.currencies.find(&c.code).is_some() {
                return Err(Error::Str(format!("Duplicate currency {}", c.code)));
            }
            resolver
                .currencies
                .add(Currency::new(&c.code, &c.symbol, c.precision));
        }

        // Securities can be linked to before they are declared
        for a in &raw.assets {
            if let RawAsset::Security { base, class, .. } = a {
                resolver.securities.insert(
                    base.name.clone(),
                    LinkedSecurity {
                        id: SecurityId(base.id),
                        class: *class,
                    },
                );
            }
        }

        let mut portfolios = CaseInsensitiveHashMap::<Portfolio>::new();
        let mut securities = CaseInsensitiveHashMap::<Security>::new();
        let mut assets = Vec::new();
        let mut holdings = Vec::new();

        for a in &raw.assets {
            let asset = match a {
                RawAsset::Deposit { base, class, info } => {
                    let mut d = Deposit::new(
                        DepositId(base.id),
                        resolver.base(base)?,
                        *class,
                    );
                    d.info = resolver.info(info)?;
                    TransactionAsset::Deposit(d)
                }
                RawAsset::Cash { base, class } => TransactionAsset::Cash(
                    Cash::new(CashId(base.id), resolver.base(base)?, *class),
                ),
                RawAsset::Loan { base, class } => TransactionAsset::Loan(
                    Loan::new(LoanId(base.id), resolver.base(base)?, *class),
                ),
                RawAsset::Portfolio { base, class } => {
                    let p = Portfolio::new(
                        PortfolioId(base.id),
                        resolver.base(base)?,
                        *class,
                    );
                    portfolios.insert(base.name.clone(), p.clone());
                    TransactionAsset::Portfolio(p)
                }
                RawAsset::Security { base, class, info } => {
                    let mut s = Security::new(
                        SecurityId(base.id),
                        resolver.base(base)?,
                        *class,
                    );
                    s.info = resolver.info(info)?;
                    securities.insert(base.name.clone(), s.clone());
                    TransactionAsset::Security(s)
                }
                RawAsset::SecurityHolding {
                    portfolio,
                    security,
                } => {
                    // Resolved once all portfolios and securities are known
                    holdings.push((portfolio, security));
                    continue;
                }
                RawAsset::Payee {
                    id,
                    name,
                    class,
                    hidden,
                } => {
                    let mut p = Payee::new(PayeeId(*id), name, *class);
                    p.base.hidden = *hidden;
                    TransactionAsset::Payee(p)
                }
            };
            assets.push(asset);
        }

        for (portfolio, security) in holdings {
            let p = portfolios.get(portfolio.clone()).ok_or_else(|| {
                Error::UnknownName {
                    kind: "portfolio",
                    name: portfolio.clone(),
                }
            })?;
            let s = securities.get(security.clone()).ok_or_else(|| {
                Error::UnknownName {
                    kind: "security",
                    name: security.clone(),
                }
            })?;
            assets.push(TransactionAsset::SecurityHolding(SecurityHolding::new(
                p, s,
            )));
        }

        let mut by_name = CaseInsensitiveHashMap::<usize>::new();
        let mut keys = HashSet::new();
        for (idx, a) in assets.iter().enumerate() {
            if !keys.insert(a.key()) {
                return Err(Error::Str(format!("Duplicate id for {a}")));
            }
            if by_name.insert(a.name().to_string(), idx).is_some() {
                return Err(Error::Str(format!(
                    "Duplicate asset name {}",
                    a.name()
                )));
            }
        }

        let find_asset = |name: &String| -> Result<TransactionAsset, Error> {
            by_name
                .get(name.clone())
                .and_then(|idx| assets.get(*idx))
                .cloned()
                .ok_or_else(|| Error::UnknownName {
                    kind: "account",
                    name: name.clone(),
                })
        };

        let mut transactions = Vec::new();
        for t in &raw.transactions {
            let kind: TransactionCategoryKind = t.category.parse()?;
            transactions.push(ScenarioTransaction {
                account: find_asset(&t.account)?,
                partner: find_asset(&t.partner)?,
                category: match &t.label {
                    None => TransactionCategory::of_kind(kind),
                    Some(label) => TransactionCategory::new(label, kind),
                },
                direction: t.direction,
            });
        }

        let mut tax_years = Vec::new();
        for y in &raw.tax_years {
            let mut year =
                TaxYear::new(y.year, y.regime, resolver.currency(&y.currency)?);
            year.info = resolver.info(&y.info)?;
            tax_years.push(year);
        }

        log::debug!(
            "Loaded {} currencies, {} assets, {} tax years, {} transactions",
            raw.currencies.len(),
            assets.len(),
            tax_years.len(),
            transactions.len(),
        );

        Ok(Scenario {
            currencies: resolver.currencies,
            assets,
            tax_years,
            transactions,
        })
    }

    /// Raise the age allowances of all tax years where needed
    pub fn auto_correct(&mut self) {
        for y in &mut self.tax_years {
            y.auto_correct();
        }
    }

    /// Check every transaction and every set of info fields, and report
    /// regularly on progress.
    pub fn check(&self, report_progress: impl Fn(u64, u64)) -> ScenarioReport {
        let max = (self.transactions.len()
            + self.assets.len()
            + self.tax_years.len()) as u64;
        let mut current = 0;
        let mut report = ScenarioReport::default();

        for t in &self.transactions {
            let candidate = t.candidate();
            let errors = candidate.validate();
            if !errors.is_empty() {
                log::debug!(
                    "{} / {} / {}: {} errors",
                    t.account,
                    t.category.name,
                    t.partner,
                    errors.len()
                );
            }
            report.transactions.push(TransactionReport {
                account: t.account.name().to_string(),
                partner: t.partner.name().to_string(),
                category: t.category.name.clone(),
                direction: t.direction,
                kind: candidate.derive_kind(),
                errors,
            });
            current += 1;
            report_progress(current, max);
        }

        for a in &self.assets {
            match a {
                TransactionAsset::Deposit(d) => {
                    report.owners.push(OwnerReport::new(
                        format!("Deposit {}", d.base.name),
                        d.validate(),
                    ));
                }
                TransactionAsset::Security(s) => {
                    report.owners.push(OwnerReport::new(
                        format!("Security {}", s.base.name),
                        s.validate(),
                    ));
                }
                TransactionAsset::Cash(_)
                | TransactionAsset::Loan(_)
                | TransactionAsset::Portfolio(_)
                | TransactionAsset::SecurityHolding(_)
                | TransactionAsset::Payee(_) => {}
            }
            current += 1;
            report_progress(current, max);
        }

        for y in &self.tax_years {
            report.owners.push(OwnerReport::new(
                format!("Tax year {}", y.year),
                y.validate(),
            ));
            current += 1;
            report_progress(current, max);
        }

        log::info!("{} checks failed", report.failures());
        report
    }
}

#[cfg(test)]
mod test {
    use crate::assets::TransactionAsset;
    use crate::deposit_info::DepositInfoClass;
    use crate::errors::Error;
    use crate::field_errors::Problem;
    use crate::info_sets::InfoValue;
    use crate::scenarios::Scenario;
    use crate::security_info::SecurityInfoClass;
    use crate::transaction_kinds::TransactionKind;
    use crate::validator::TransactionField;
    use std::cell::Cell;

    const SCENARIO: &str = r#"{
        "currencies": [{"code": "gbp", "symbol": "£", "precision": 2}],
        "assets": [
            {"type": "Deposit", "id": 1, "name": "Current", "currency": "GBP",
             "class": "Checking",
             "info": {"SortCode": {"Text": "12-34-56"},
                      "OpeningBalance": {"Money": {"amount": "100.50",
                                                   "currency": "GBP"}}}},
            {"type": "Deposit", "id": 2, "name": "Bond", "currency": "GBP",
             "class": "Bond"},
            {"type": "Cash", "id": 1, "name": "Wallet", "currency": "GBP",
             "class": "AutoExpense"},
            {"type": "Loan", "id": 1, "name": "Visa", "currency": "GBP",
             "class": "CreditCard"},
            {"type": "SecurityHolding", "portfolio": "ISA", "security": "Acme"},
            {"type": "Portfolio", "id": 1, "name": "ISA", "currency": "GBP",
             "class": "TaxFree"},
            {"type": "Security", "id": 1, "name": "Acme", "currency": "GBP",
             "class": "Shares",
             "info": {"Symbol": {"Text": "ACME"}, "Region": {"Text": "UK"}}},
            {"type": "Security", "id": 2, "name": "Acme Option",
             "currency": "GBP", "class": "StockOption",
             "info": {"UnderlyingStock": {"Security": "acme"},
                      "OptionPrice": {"Money": {"amount": "1.25",
                                                "currency": "GBP"}}}},
            {"type": "Payee", "id": 1, "name": "Employer", "class": "Employer"},
            {"type": "Payee", "id": 2, "name": "Shop", "class": "Payee"}
        ],
        "tax_years": [
            {"year": 2024, "regime": "Standard", "currency": "GBP",
             "info": {"Allowance": {"Money": {"amount": "12570",
                                              "currency": "GBP"}},
                      "LoAgeAllowance": {"Money": {"amount": "10000",
                                                   "currency": "GBP"}}}}
        ],
        "transactions": [
            {"account": "current", "partner": "Employer",
             "category": "TaxedIncome", "label": "Salary",
             "direction": "From"},
            {"account": "Current", "partner": "Shop",
             "category": "Expense", "direction": "To"},
            {"account": "Current", "partner": "Current",
             "category": "Transfer", "direction": "To"},
            {"account": "Current", "partner": "Wallet",
             "category": "Transfer", "direction": "To"},
            {"account": "ISA:Acme", "partner": "Current",
             "category": "Interest", "direction": "To"}
        ]
    }"#;

    #[test]
    fn test_load() -> Result<(), Error> {
        let s = Scenario::from_json(SCENARIO)?;
        assert_eq!(s.currencies.code(crate::currencies::CurrencyId(1)), "GBP");
        assert_eq!(s.assets.len(), 10);
        assert_eq!(s.transactions.len(), 5);

        // Holdings are added after all other assets
        let holding = s.assets.last();
        assert!(matches!(
            holding,
            Some(TransactionAsset::SecurityHolding(h)) if h.base.name == "ISA:Acme"
        ));

        let current = s.assets.first();
        match current {
            Some(TransactionAsset::Deposit(d)) => {
                assert_eq!(
                    d.info.get_text(DepositInfoClass::SortCode),
                    Some("12-34-56")
                );
            }
            _ => panic!("expected a deposit"),
        }

        let option = s.assets.iter().find(|a| a.name() == "Acme Option");
        match option {
            Some(TransactionAsset::Security(sec)) => {
                assert!(matches!(
                    sec.info.get(SecurityInfoClass::UnderlyingStock),
                    Some(InfoValue::Security(link))
                        if link.id == crate::assets::SecurityId(1)
                ));
            }
            _ => panic!("expected a security"),
        }

        let first = s.transactions.first().map(|t| t.category.name.clone());
        assert_eq!(first.as_deref(), Some("Salary"));
        Ok(())
    }

    #[test]
    fn test_check() -> Result<(), Error> {
        let mut s = Scenario::from_json(SCENARIO)?;
        let calls = Cell::new(0);
        let report = s.check(|current, max| {
            calls.set(calls.get() + 1);
            assert!(current <= max);
        });
        assert_eq!(calls.get(), 5 + 10 + 1);

        let kinds: Vec<TransactionKind> =
            report.transactions.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::Income,
                TransactionKind::Expense,
                TransactionKind::Transfer,
                TransactionKind::CashWithdrawal,
                TransactionKind::Transfer,
            ]
        );

        let ok: Vec<bool> = report
            .transactions
            .iter()
            .map(|t| t.errors.is_empty())
            .collect();
        assert_eq!(ok, vec![true, true, false, true, false]);

        let self_transfer = report.transactions.get(2);
        assert!(self_transfer
            .is_some_and(|t| t.errors.has_error(TransactionField::Partner)));
        let holding_interest = report.transactions.get(4);
        assert!(holding_interest
            .is_some_and(|t| t.errors.has_error(TransactionField::Category)));

        // The bond has no maturity, and the age allowance is too low
        let failed: Vec<&str> = report
            .owners
            .iter()
            .filter(|o| !o.is_ok())
            .map(|o| o.owner.as_str())
            .collect();
        assert_eq!(failed, vec!["Deposit Bond", "Tax year 2024"]);
        assert_eq!(report.failures(), 4);

        let tax_year = report.owners.last();
        assert!(tax_year.is_some_and(|o| o
            .problems
            .contains(&("LoAgeAllowance", Problem::BelowAllowance))));

        // Other fields are still missing from the tax year
        s.auto_correct();
        let report = s.check(|_, _| {});
        assert_eq!(report.failures(), 4);
        let tax_year = report.owners.last();
        assert!(tax_year.is_some_and(|o| !o
            .problems
            .iter()
            .any(|(_, p)| *p == Problem::BelowAllowance)));
        Ok(())
    }

    #[test]
    fn test_unknown_names() {
        let unknown_account = r#"{
            "transactions": [{"account": "Nowhere", "partner": "Shop",
                              "category": "Expense", "direction": "To"}]
        }"#;
        assert!(matches!(
            Scenario::from_json(unknown_account),
            Err(Error::UnknownName { kind: "account", .. })
        ));

        let unknown_currency = r#"{
            "assets": [{"type": "Cash", "id": 1, "name": "Wallet",
                        "currency": "EUR", "class": "Cash"}]
        }"#;
        assert!(matches!(
            Scenario::from_json(unknown_currency),
            Err(Error::UnknownName { kind: "currency", .. })
        ));

        let unknown_info = r#"{
            "currencies": [{"code": "EUR"}],
            "assets": [{"type": "Deposit", "id": 1, "name": "Current",
                        "currency": "EUR", "class": "Checking",
                        "info": {"Colour": {"Text": "blue"}}}]
        }"#;
        assert!(matches!(
            Scenario::from_json(unknown_info),
            Err(Error::UnknownName { kind: "info class", .. })
        ));

        let duplicate = r#"{
            "assets": [{"type": "Payee", "id": 1, "name": "Shop", "class": "Payee"},
                       {"type": "Payee", "id": 2, "name": "SHOP", "class": "Payee"}]
        }"#;
        assert!(matches!(Scenario::from_json(duplicate), Err(Error::Str(_))));

        // Info keys are case-insensitive, so these name the same field
        let duplicate_info = r#"{
            "currencies": [{"code": "GBP"}],
            "assets": [{"type": "Deposit", "id": 1, "name": "Current",
                        "currency": "GBP", "class": "Checking",
                        "info": {"SortCode": {"Text": "12-34-56"},
                                 "sortcode": {"Text": "65-43-21"}}}]
        }"#;
        assert!(matches!(
            Scenario::from_json(duplicate_info),
            Err(Error::Str(_))
        ));

        assert!(matches!(
            Scenario::from_json("{ not json"),
            Err(Error::Json(_))
        ));
    }
}
