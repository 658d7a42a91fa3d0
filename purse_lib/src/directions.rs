use serde::{Deserialize, Serialize};

/// Which side of the transaction the base account occupies.
///    From:  money flows from the partner into the account
///    To:    money flows from the account to the partner
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum AssetDirection {
    From,
    To,
}

impl AssetDirection {
    #[must_use]
    pub const fn is_from(self) -> bool {
        matches!(self, AssetDirection::From)
    }
    #[must_use]
    pub const fn is_to(self) -> bool {
        matches!(self, AssetDirection::To)
    }

    #[must_use]
    pub const fn reverse(self) -> AssetDirection {
        match self {
            AssetDirection::From => AssetDirection::To,
            AssetDirection::To => AssetDirection::From,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AssetDirection::From => "From",
            AssetDirection::To => "To",
        }
    }
}

impl std::fmt::Display for AssetDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use crate::directions::AssetDirection;

    #[test]
    fn test_reverse() {
        assert_eq!(AssetDirection::From.reverse(), AssetDirection::To);
        assert_eq!(AssetDirection::To.reverse().reverse(), AssetDirection::To);
        assert!(AssetDirection::To.is_to());
        assert!(!AssetDirection::To.is_from());
    }
}
