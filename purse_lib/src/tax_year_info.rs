/// Tax parameters for one tax year.  Which parameters exist depends on the
/// tax regime in force that year.
use crate::currencies::CurrencyId;
use crate::field_errors::{FieldErrors, Problem};
use crate::info_sets::{
    check_not_negative, check_rate, FieldRequired, InfoClass, InfoDataType,
    InfoOwner, InfoSet, InfoValue,
};
use crate::money::Money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum TaxRegime {
    // Before the low salary band was removed, capital gains were taxed as
    // income
    Archive,
    Standard,
    LoSalaryBand,
    AdditionalBand,
}

impl TaxRegime {
    #[must_use]
    pub const fn has_lo_salary_band(self) -> bool {
        match self {
            TaxRegime::Archive
            | TaxRegime::LoSalaryBand
            | TaxRegime::AdditionalBand => true,
            TaxRegime::Standard => false,
        }
    }

    #[must_use]
    pub const fn has_additional_tax_band(self) -> bool {
        matches!(self, TaxRegime::AdditionalBand)
    }

    #[must_use]
    pub const fn has_capital_gains_as_income(self) -> bool {
        matches!(self, TaxRegime::Archive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaxYearInfoClass {
    Allowance,
    RentalAllowance,
    CapitalAllowance,
    LoAgeAllowance,
    HiAgeAllowance,
    AgeAllowanceLimit,
    LoTaxBand,
    BasicTaxBand,
    AdditionalAllowanceLimit,
    AdditionalIncomeThreshold,
    LoTaxRate,
    BasicTaxRate,
    HiTaxRate,
    InterestTaxRate,
    DividendTaxRate,
    HiDividendTaxRate,
    AdditionalTaxRate,
    AdditionalDividendTaxRate,
    CapitalTaxRate,
    HiCapitalTaxRate,
}

impl InfoClass for TaxYearInfoClass {
    const ALL: &'static [Self] = &[
        TaxYearInfoClass::Allowance,
        TaxYearInfoClass::RentalAllowance,
        TaxYearInfoClass::CapitalAllowance,
        TaxYearInfoClass::LoAgeAllowance,
        TaxYearInfoClass::HiAgeAllowance,
        TaxYearInfoClass::AgeAllowanceLimit,
        TaxYearInfoClass::LoTaxBand,
        TaxYearInfoClass::BasicTaxBand,
        TaxYearInfoClass::AdditionalAllowanceLimit,
        TaxYearInfoClass::AdditionalIncomeThreshold,
        TaxYearInfoClass::LoTaxRate,
        TaxYearInfoClass::BasicTaxRate,
        TaxYearInfoClass::HiTaxRate,
        TaxYearInfoClass::InterestTaxRate,
        TaxYearInfoClass::DividendTaxRate,
        TaxYearInfoClass::HiDividendTaxRate,
        TaxYearInfoClass::AdditionalTaxRate,
        TaxYearInfoClass::AdditionalDividendTaxRate,
        TaxYearInfoClass::CapitalTaxRate,
        TaxYearInfoClass::HiCapitalTaxRate,
    ];

    fn name(self) -> &'static str {
        match self {
            TaxYearInfoClass::Allowance => "Allowance",
            TaxYearInfoClass::RentalAllowance => "RentalAllowance",
            TaxYearInfoClass::CapitalAllowance => "CapitalAllowance",
            TaxYearInfoClass::LoAgeAllowance => "LoAgeAllowance",
            TaxYearInfoClass::HiAgeAllowance => "HiAgeAllowance",
            TaxYearInfoClass::AgeAllowanceLimit => "AgeAllowanceLimit",
            TaxYearInfoClass::LoTaxBand => "LoTaxBand",
            TaxYearInfoClass::BasicTaxBand => "BasicTaxBand",
            TaxYearInfoClass::AdditionalAllowanceLimit => {
                "AdditionalAllowanceLimit"
            }
            TaxYearInfoClass::AdditionalIncomeThreshold => {
                "AdditionalIncomeThreshold"
            }
            TaxYearInfoClass::LoTaxRate => "LoTaxRate",
            TaxYearInfoClass::BasicTaxRate => "BasicTaxRate",
            TaxYearInfoClass::HiTaxRate => "HiTaxRate",
            TaxYearInfoClass::InterestTaxRate => "InterestTaxRate",
            TaxYearInfoClass::DividendTaxRate => "DividendTaxRate",
            TaxYearInfoClass::HiDividendTaxRate => "HiDividendTaxRate",
            TaxYearInfoClass::AdditionalTaxRate => "AdditionalTaxRate",
            TaxYearInfoClass::AdditionalDividendTaxRate => {
                "AdditionalDividendTaxRate"
            }
            TaxYearInfoClass::CapitalTaxRate => "CapitalTaxRate",
            TaxYearInfoClass::HiCapitalTaxRate => "HiCapitalTaxRate",
        }
    }

    fn data_type(self) -> InfoDataType {
        match self {
            TaxYearInfoClass::Allowance
            | TaxYearInfoClass::RentalAllowance
            | TaxYearInfoClass::CapitalAllowance
            | TaxYearInfoClass::LoAgeAllowance
            | TaxYearInfoClass::HiAgeAllowance
            | TaxYearInfoClass::AgeAllowanceLimit
            | TaxYearInfoClass::LoTaxBand
            | TaxYearInfoClass::BasicTaxBand
            | TaxYearInfoClass::AdditionalAllowanceLimit
            | TaxYearInfoClass::AdditionalIncomeThreshold => InfoDataType::Money,
            TaxYearInfoClass::LoTaxRate
            | TaxYearInfoClass::BasicTaxRate
            | TaxYearInfoClass::HiTaxRate
            | TaxYearInfoClass::InterestTaxRate
            | TaxYearInfoClass::DividendTaxRate
            | TaxYearInfoClass::HiDividendTaxRate
            | TaxYearInfoClass::AdditionalTaxRate
            | TaxYearInfoClass::AdditionalDividendTaxRate
            | TaxYearInfoClass::CapitalTaxRate
            | TaxYearInfoClass::HiCapitalTaxRate => InfoDataType::Rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaxYear {
    // The calendar year in which the tax year ends
    pub year: i32,

    pub regime: TaxRegime,
    pub currency: CurrencyId,
    pub info: InfoSet<TaxYearInfoClass>,
}

impl TaxYear {
    pub fn new(year: i32, regime: TaxRegime, currency: CurrencyId) -> Self {
        TaxYear {
            year,
            regime,
            currency,
            info: InfoSet::default(),
        }
    }

    /// Last day of the tax year (tax years end on April 5th)
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 4, 5)
    }

    /// First day of the tax year
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year - 1, 4, 6)
    }

    fn money(&self, class: TaxYearInfoClass) -> Option<Money> {
        self.info.get_money(class)
    }

    /// Check the tax parameters.  Age allowances lower than the allowance
    /// they extend are reported as errors.
    #[must_use]
    pub fn validate(&self) -> FieldErrors<TaxYearInfoClass> {
        let mut errors = self.validate_info();

        let allowance = self.money(TaxYearInfoClass::Allowance);
        let lo_age = self.money(TaxYearInfoClass::LoAgeAllowance);
        let hi_age = self.money(TaxYearInfoClass::HiAgeAllowance);

        if let (Some(base), Some(lo)) = (allowance, lo_age) {
            if lo < base {
                errors.add(
                    TaxYearInfoClass::LoAgeAllowance,
                    Problem::BelowAllowance,
                );
            }
        }
        if let (Some(lo), Some(hi)) = (lo_age, hi_age) {
            if hi < lo {
                errors.add(
                    TaxYearInfoClass::HiAgeAllowance,
                    Problem::BelowAllowance,
                );
            }
        }
        errors
    }

    /// Raise an allowance to at least `floor`, and express it in the tax
    /// year's currency.  Returns the new amount.
    fn raise_to(
        &mut self,
        class: TaxYearInfoClass,
        floor: Option<Decimal>,
    ) -> Option<Decimal> {
        let current = self.money(class)?;
        let amount = floor.map_or(current.amount, |f| current.amount.max(f));
        if amount != current.amount || current.currency != self.currency {
            log::info!(
                "{}: setting {} from {} to {}",
                self.year,
                class.name(),
                current.amount,
                amount
            );
            self.info.set(
                class,
                InfoValue::Money(Money::new(amount, self.currency)),
            );
        }
        Some(amount)
    }

    /// Raise the age allowances so that they are never lower than the
    /// allowance they extend.  Afterwards, whichever of them are set,
    ///    HiAgeAllowance >= LoAgeAllowance >= Allowance
    /// and both age allowances are in the tax year's currency.
    pub fn auto_correct(&mut self) {
        let base = self.money(TaxYearInfoClass::Allowance).map(|m| m.amount);
        let lo = self.raise_to(TaxYearInfoClass::LoAgeAllowance, base);
        let _ = self.raise_to(TaxYearInfoClass::HiAgeAllowance, lo.or(base));
    }
}

impl InfoOwner for TaxYear {
    type Class = TaxYearInfoClass;

    fn info_set(&self) -> &InfoSet<TaxYearInfoClass> {
        &self.info
    }

    fn is_class_required(&self, class: TaxYearInfoClass) -> FieldRequired {
        let required = |b: bool| {
            if b {
                FieldRequired::MustExist
            } else {
                FieldRequired::NotAllowed
            }
        };

        match class {
            TaxYearInfoClass::LoTaxBand | TaxYearInfoClass::LoTaxRate => {
                required(self.regime.has_lo_salary_band())
            }
            TaxYearInfoClass::AdditionalAllowanceLimit
            | TaxYearInfoClass::AdditionalIncomeThreshold
            | TaxYearInfoClass::AdditionalTaxRate
            | TaxYearInfoClass::AdditionalDividendTaxRate => {
                required(self.regime.has_additional_tax_band())
            }
            TaxYearInfoClass::CapitalTaxRate
            | TaxYearInfoClass::HiCapitalTaxRate => {
                required(!self.regime.has_capital_gains_as_income())
            }
            TaxYearInfoClass::Allowance
            | TaxYearInfoClass::RentalAllowance
            | TaxYearInfoClass::CapitalAllowance
            | TaxYearInfoClass::LoAgeAllowance
            | TaxYearInfoClass::HiAgeAllowance
            | TaxYearInfoClass::AgeAllowanceLimit
            | TaxYearInfoClass::BasicTaxBand
            | TaxYearInfoClass::BasicTaxRate
            | TaxYearInfoClass::HiTaxRate
            | TaxYearInfoClass::InterestTaxRate
            | TaxYearInfoClass::DividendTaxRate
            | TaxYearInfoClass::HiDividendTaxRate => FieldRequired::MustExist,
        }
    }

    fn validate_value(
        &self,
        class: TaxYearInfoClass,
        value: &InfoValue,
        errors: &mut FieldErrors<TaxYearInfoClass>,
    ) {
        check_not_negative(class, value, errors);
        check_rate(class, value, errors);
        if let InfoValue::Money(m) = value {
            if m.currency != self.currency {
                errors.add(class, Problem::CurrencyMismatch);
            }
        }
    }
}
