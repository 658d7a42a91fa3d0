use case_insensitive_hashmap::CaseInsensitiveHashMap;

#[derive(
    Debug, Eq, PartialEq, Hash, Clone, Copy, Default, PartialOrd, Ord,
)]
pub struct CurrencyId(pub u16);

/// A currency in which accounts are held.  Conversion between currencies
/// is not handled here, we only need to know whether two values are
/// expressed in the same currency.
#[derive(Debug, Clone)]
pub struct Currency {
    /// ISO code, e.g. "EUR"
    pub code: String,

    // Symbol used for display, e.g. "€"
    pub symbol: String,

    /// Number of digits in the fractional part
    pub precision: u8,
}

impl Currency {
    pub fn new(code: &str, symbol: &str, precision: u8) -> Self {
        Currency {
            code: code.trim().to_uppercase(),
            symbol: symbol.trim().to_string(),
            precision,
        }
    }
}

pub struct CurrencyCollection {
    currencies: Vec<Currency>,
    by_code: CaseInsensitiveHashMap<CurrencyId>,
}

impl Default for CurrencyCollection {
    fn default() -> Self {
        CurrencyCollection {
            currencies: Vec::new(),
            by_code: CaseInsensitiveHashMap::new(),
        }
    }
}

impl CurrencyCollection {
    pub fn add(&mut self, currency: Currency) -> CurrencyId {
        self.currencies.push(currency);
        let id = CurrencyId(self.currencies.len() as u16);
        if let Some(c) = self.currencies.last() {
            self.by_code.insert(c.code.clone(), id);
        }
        id
    }

    #[must_use]
    pub fn get(&self, id: CurrencyId) -> Option<&Currency> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|idx| self.currencies.get(idx))
    }

    #[must_use]
    pub fn find(&self, code: &str) -> Option<CurrencyId> {
        self.by_code.get(code.trim().to_string()).copied()
    }

    #[must_use]
    pub fn code(&self, id: CurrencyId) -> &str {
        self.get(id).map_or("???", |c| c.code.as_str())
    }

    pub fn iter_currencies(
        &self,
    ) -> impl Iterator<Item = (CurrencyId, &Currency)> {
        self.currencies
            .iter()
            .enumerate()
            .map(|(idx, c)| (CurrencyId(idx as u16 + 1), c))
    }
}
