pub mod asset_classes;
pub mod asset_kinds;
pub mod assets;
pub mod categories;
pub mod currencies;
pub mod deposit_info;
pub mod directions;
pub mod errors;
pub mod field_errors;
pub mod info_sets;
pub mod money;
pub mod scenarios;
pub mod security_info;
pub mod tax_year_info;
pub mod transaction_kinds;
pub mod validator;
