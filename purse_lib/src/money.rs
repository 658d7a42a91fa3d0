use crate::currencies::CurrencyId;
use rust_decimal::Decimal;

/// An amount of money in a given currency.  We never convert between
/// currencies, so only values in the same currency can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money {
    pub amount: Decimal,
    pub currency: CurrencyId,
}

impl Money {
    pub fn new(amount: Decimal, currency: CurrencyId) -> Self {
        Money { amount, currency }
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    #[must_use]
    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }
}

impl PartialOrd for Money {
    /// Only values in the same currency can be compared
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self.same_currency(other) {
            self.amount.partial_cmp(&other.amount)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use crate::currencies::CurrencyId;
    use crate::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compare() {
        let a = Money::new(dec!(10.5), CurrencyId(1));
        let b = Money::new(dec!(12), CurrencyId(1));
        let c = Money::new(dec!(12), CurrencyId(2));
        assert!(a < b);
        assert_eq!(b.partial_cmp(&c), None);
        assert!(!(b < c) && !(b >= c));
        assert!(Money::new(dec!(-0.01), CurrencyId(1)).is_negative());
        assert!(!a.is_negative() && a.is_positive());
        assert!(!Money::new(dec!(0), CurrencyId(1)).is_positive());
    }
}
