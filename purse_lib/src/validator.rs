/// Rules deciding which combinations of account, category, partner and
/// direction make up a legal transaction.
///
/// The four predicates are independent of each other and have no side
/// effects, so they can be called in any order.  A candidate transaction is
/// legal only when all four accept it.
use crate::asset_classes::{LoanCategoryClass, PayeeTypeClass};
use crate::asset_kinds::AssetKind;
use crate::assets::TransactionAsset;
use crate::categories::{TransactionCategory, TransactionCategoryKind};
use crate::directions::AssetDirection;
use crate::field_errors::{FieldErrors, Problem};
use crate::transaction_kinds::TransactionKind;

pub struct TransactionValidator;

impl TransactionValidator {
    /// Whether the account can be the base account of a transaction
    #[must_use]
    pub fn is_valid_account(account: &TransactionAsset) -> bool {
        let valid = account.asset_kind().is_base_account() && !account.is_hidden();
        if !valid {
            log::trace!("{account} cannot be the base of a transaction");
        }
        valid
    }

    /// Whether the category can apply to transactions on the account
    #[must_use]
    pub fn is_valid_category(
        account: &TransactionAsset,
        category: &TransactionCategory,
    ) -> bool {
        if category.is_hidden() {
            log::trace!("category {} is internal", category.name);
            return false;
        }

        let kind = account.asset_kind();
        let valid = match category.kind {
            TransactionCategoryKind::TaxedIncome
            | TransactionCategoryKind::OtherIncome => kind.is_valued(),

            TransactionCategoryKind::GrantIncome
            | TransactionCategoryKind::BenefitIncome => kind.is_deposit(),

            TransactionCategoryKind::GiftedIncome
            | TransactionCategoryKind::Inherited => kind.is_asset(),

            TransactionCategoryKind::Interest => {
                matches!(kind, AssetKind::Deposit | AssetKind::Portfolio)
            }

            TransactionCategoryKind::Dividend => account.is_security_holding(),

            TransactionCategoryKind::CashBack => {
                account.loan_class() == Some(LoanCategoryClass::CreditCard)
            }

            TransactionCategoryKind::LoyaltyBonus => account.is_portfolio(),

            TransactionCategoryKind::RentalIncome
            | TransactionCategoryKind::RoomRentalIncome => {
                account.is_security_holding()
                    && account.security_class().is_some_and(|c| c.is_property())
            }

            TransactionCategoryKind::UnitsAdjust => account.is_capital(),

            TransactionCategoryKind::StockSplit
            | TransactionCategoryKind::SecurityReplace
            | TransactionCategoryKind::StockTakeover
            | TransactionCategoryKind::StockDemerger
            | TransactionCategoryKind::StockRightsTaken
            | TransactionCategoryKind::StockRightsWaived => account.is_shares(),

            TransactionCategoryKind::WriteOff
            | TransactionCategoryKind::LoanInterestEarned
            | TransactionCategoryKind::LoanInterestCharged
            | TransactionCategoryKind::TaxRelief => kind.is_loan(),

            TransactionCategoryKind::Expense
            | TransactionCategoryKind::LocalTaxes
            | TransactionCategoryKind::TaxSettlement
            | TransactionCategoryKind::CharityDonation => {
                kind.is_valued() || kind.is_auto_expense()
            }

            TransactionCategoryKind::PortfolioTransfer => {
                account.is_security_holding() || account.is_portfolio()
            }

            TransactionCategoryKind::Transfer => true,

            TransactionCategoryKind::OptionsGrant
            | TransactionCategoryKind::OptionsVest
            | TransactionCategoryKind::OptionsExercise
            | TransactionCategoryKind::TaxableGain
            | TransactionCategoryKind::CapitalGain
            | TransactionCategoryKind::MarketGrowth
            | TransactionCategoryKind::CurrencyFluctuation
            | TransactionCategoryKind::TaxCredit
            | TransactionCategoryKind::NatInsurance
            | TransactionCategoryKind::DeemedBenefit
            | TransactionCategoryKind::IncomeTotals
            | TransactionCategoryKind::ExpenseTotals
            | TransactionCategoryKind::Totals => false,
        };

        if !valid {
            log::trace!("category {} not valid for {account}", category.kind);
        }
        valid
    }

    /// Whether the direction is allowed for the category.
    /// These rules are stricter than they need to be, and might be relaxed
    /// in the future.
    #[must_use]
    pub fn is_valid_direction(
        account: &TransactionAsset,
        category: &TransactionCategory,
        direction: AssetDirection,
    ) -> bool {
        let required = Self::required_direction(category.kind);
        let valid = required.map_or(true, |d| d == direction);
        if !valid {
            log::trace!(
                "category {} on {account} cannot use direction {direction}",
                category.kind,
            );
        }
        valid
    }

    /// The only direction allowed for a category, or None when both are
    #[must_use]
    pub const fn required_direction(
        category: TransactionCategoryKind,
    ) -> Option<AssetDirection> {
        match category {
            TransactionCategoryKind::TaxedIncome
            | TransactionCategoryKind::GrantIncome
            | TransactionCategoryKind::BenefitIncome
            | TransactionCategoryKind::GiftedIncome
            | TransactionCategoryKind::Inherited
            | TransactionCategoryKind::LoanInterestEarned
            | TransactionCategoryKind::StockRightsTaken => {
                Some(AssetDirection::From)
            }

            TransactionCategoryKind::RentalIncome
            | TransactionCategoryKind::RoomRentalIncome
            | TransactionCategoryKind::Interest
            | TransactionCategoryKind::Dividend
            | TransactionCategoryKind::LoyaltyBonus
            | TransactionCategoryKind::WriteOff
            | TransactionCategoryKind::LoanInterestCharged
            | TransactionCategoryKind::UnitsAdjust
            | TransactionCategoryKind::StockSplit
            | TransactionCategoryKind::StockDemerger
            | TransactionCategoryKind::StockTakeover
            | TransactionCategoryKind::SecurityReplace
            | TransactionCategoryKind::StockRightsWaived
            | TransactionCategoryKind::PortfolioTransfer => {
                Some(AssetDirection::To)
            }

            TransactionCategoryKind::CashBack
            | TransactionCategoryKind::OtherIncome
            | TransactionCategoryKind::OptionsGrant
            | TransactionCategoryKind::OptionsVest
            | TransactionCategoryKind::OptionsExercise
            | TransactionCategoryKind::TaxableGain
            | TransactionCategoryKind::CapitalGain
            | TransactionCategoryKind::MarketGrowth
            | TransactionCategoryKind::CurrencyFluctuation
            | TransactionCategoryKind::Transfer
            | TransactionCategoryKind::Expense
            | TransactionCategoryKind::LocalTaxes
            | TransactionCategoryKind::TaxRelief
            | TransactionCategoryKind::TaxSettlement
            | TransactionCategoryKind::CharityDonation
            | TransactionCategoryKind::TaxCredit
            | TransactionCategoryKind::NatInsurance
            | TransactionCategoryKind::DeemedBenefit
            | TransactionCategoryKind::IncomeTotals
            | TransactionCategoryKind::ExpenseTotals
            | TransactionCategoryKind::Totals => None,
        }
    }

    /// Whether the partner is a valid counter-party for the account and
    /// category
    #[must_use]
    pub fn is_valid_partner(
        account: &TransactionAsset,
        category: &TransactionCategory,
        partner: &TransactionAsset,
    ) -> bool {
        if partner.is_hidden() {
            log::trace!("partner {partner} is hidden");
            return false;
        }

        let is_recursive = account.key() == partner.key();
        let account_kind = account.asset_kind();
        let partner_kind = partner.asset_kind();
        let payee = partner.payee_class();

        let valid = if account_kind.is_auto_expense()
            || partner_kind.is_auto_expense()
        {
            // Cash-basis accounts can only be topped up from, or spent to
            match category.kind {
                TransactionCategoryKind::Transfer => {
                    if account_kind.is_auto_expense() {
                        partner_kind.is_valued()
                    } else {
                        account_kind.is_valued()
                    }
                }
                TransactionCategoryKind::Expense => partner_kind.is_payee(),
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
                | TransactionCategoryKind::CurrencyFluctuation
                | TransactionCategoryKind::UnitsAdjust
                | TransactionCategoryKind::StockSplit
                | TransactionCategoryKind::SecurityReplace
                | TransactionCategoryKind::StockTakeover
                | TransactionCategoryKind::StockDemerger
                | TransactionCategoryKind::StockRightsTaken
                | TransactionCategoryKind::StockRightsWaived
                | TransactionCategoryKind::PortfolioTransfer
                | TransactionCategoryKind::WriteOff
                | TransactionCategoryKind::LocalTaxes
                | TransactionCategoryKind::TaxRelief
                | TransactionCategoryKind::TaxSettlement
                | TransactionCategoryKind::LoanInterestCharged
                | TransactionCategoryKind::CharityDonation
                | TransactionCategoryKind::TaxCredit
                | TransactionCategoryKind::NatInsurance
                | TransactionCategoryKind::DeemedBenefit
                | TransactionCategoryKind::IncomeTotals
                | TransactionCategoryKind::ExpenseTotals
                | TransactionCategoryKind::Totals => false,
            }
        } else {
            match category.kind {
                TransactionCategoryKind::TaxedIncome => {
                    payee == Some(PayeeTypeClass::Employer)
                }
                TransactionCategoryKind::OtherIncome => partner_kind.is_payee(),
                TransactionCategoryKind::GrantIncome => {
                    payee.is_some_and(PayeeTypeClass::can_grant)
                }
                TransactionCategoryKind::BenefitIncome
                | TransactionCategoryKind::LocalTaxes => {
                    payee == Some(PayeeTypeClass::Government)
                }
                TransactionCategoryKind::GiftedIncome
                | TransactionCategoryKind::Inherited => {
                    payee == Some(PayeeTypeClass::Individual)
                }
                TransactionCategoryKind::RentalIncome
                | TransactionCategoryKind::RoomRentalIncome => {
                    partner_kind.is_loan()
                }
                TransactionCategoryKind::WriteOff
                | TransactionCategoryKind::LoanInterestEarned
                | TransactionCategoryKind::LoanInterestCharged => is_recursive,
                TransactionCategoryKind::Interest
                | TransactionCategoryKind::CashBack => partner_kind.is_valued(),
                TransactionCategoryKind::Dividend => {
                    is_recursive || partner_kind.is_valued()
                }
                TransactionCategoryKind::LoyaltyBonus => {
                    partner.is_security_holding() || partner.is_portfolio()
                }
                TransactionCategoryKind::UnitsAdjust
                | TransactionCategoryKind::StockSplit => is_recursive,
                TransactionCategoryKind::SecurityReplace
                | TransactionCategoryKind::StockTakeover
                | TransactionCategoryKind::StockDemerger => {
                    !is_recursive && partner.is_shares()
                }
                TransactionCategoryKind::StockRightsTaken
                | TransactionCategoryKind::StockRightsWaived => {
                    partner_kind.is_valued()
                }
                TransactionCategoryKind::Transfer => {
                    !is_recursive && partner_kind.is_asset()
                }
                TransactionCategoryKind::Expense
                | TransactionCategoryKind::CharityDonation => {
                    partner_kind.is_payee()
                }
                TransactionCategoryKind::TaxSettlement
                | TransactionCategoryKind::TaxRelief => {
                    payee == Some(PayeeTypeClass::TaxMan)
                }
                TransactionCategoryKind::PortfolioTransfer => {
                    !is_recursive && partner.is_portfolio()
                }
                TransactionCategoryKind::OptionsGrant
                | TransactionCategoryKind::OptionsVest
                | TransactionCategoryKind::OptionsExercise
                | TransactionCategoryKind::TaxableGain
                | TransactionCategoryKind::CapitalGain
                | TransactionCategoryKind::MarketGrowth
                | TransactionCategoryKind::CurrencyFluctuation
                | TransactionCategoryKind::TaxCredit
                | TransactionCategoryKind::NatInsurance
                | TransactionCategoryKind::DeemedBenefit
                | TransactionCategoryKind::IncomeTotals
                | TransactionCategoryKind::ExpenseTotals
                | TransactionCategoryKind::Totals => false,
            }
        };

        if !valid {
            log::trace!(
                "partner {partner} not valid for {account} and category {}",
                category.kind
            );
        }
        valid
    }
}

/// The fields of a transaction that the rules apply to
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum TransactionField {
    Account,
    Category,
    Partner,
    Direction,
}

/// A prospective transaction, checked before it is recorded
pub struct CandidateTransaction<'a> {
    pub account: &'a TransactionAsset,
    pub category: &'a TransactionCategory,
    pub partner: &'a TransactionAsset,
    pub direction: AssetDirection,
}

impl<'a> CandidateTransaction<'a> {
    pub fn new(
        account: &'a TransactionAsset,
        category: &'a TransactionCategory,
        partner: &'a TransactionAsset,
        direction: AssetDirection,
    ) -> Self {
        CandidateTransaction {
            account,
            category,
            partner,
            direction,
        }
    }

    /// Run all the rules, and report every failure
    #[must_use]
    pub fn validate(&self) -> FieldErrors<TransactionField> {
        let mut errors = FieldErrors::default();
        if !TransactionValidator::is_valid_account(self.account) {
            errors.add(TransactionField::Account, Problem::InvalidAccount);
        }
        if !TransactionValidator::is_valid_category(self.account, self.category)
        {
            errors.add(TransactionField::Category, Problem::InvalidCategory);
        }
        if !TransactionValidator::is_valid_direction(
            self.account,
            self.category,
            self.direction,
        ) {
            errors.add(TransactionField::Direction, Problem::InvalidDirection);
        }
        if !TransactionValidator::is_valid_partner(
            self.account,
            self.category,
            self.partner,
        ) {
            errors.add(TransactionField::Partner, Problem::InvalidPartner);
        }
        errors
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The kind of the transaction, given how money flows between the two
    /// accounts.
    #[must_use]
    pub fn derive_kind(&self) -> TransactionKind {
        let account = self.account.asset_kind();
        let partner = self.partner.asset_kind();
        match self.direction {
            AssetDirection::To => account.classify(partner),
            AssetDirection::From => partner.classify(account),
        }
    }
}
