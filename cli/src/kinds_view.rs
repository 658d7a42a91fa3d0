use crate::global_settings::GlobalSettings;
use crate::tables::{Align, Column, Table, Width};
use purse_lib::{
    categories::TransactionCategoryKind,
    transaction_kinds::TransactionKind,
    validator::TransactionValidator,
};

#[derive(Clone, Copy)]
enum KindColumn {
    Id,
    Category,
    Transaction,
    Hidden,
    Direction,
}

fn cell(kind: &TransactionCategoryKind, col: &KindColumn) -> String {
    match col {
        KindColumn::Id => kind.id().to_string(),
        KindColumn::Category => kind.name().to_string(),
        KindColumn::Transaction => {
            TransactionKind::derive_from_category(*kind).to_string()
        }
        KindColumn::Hidden => {
            let hidden = if kind.is_hidden_type() { "hidden" } else { "" };
            hidden.to_string()
        }
        KindColumn::Direction => TransactionValidator::required_direction(*kind)
            .map_or_else(|| "any".to_string(), |d| d.to_string()),
    }
}

/// A table of all category kinds
pub fn kinds_view(settings: &GlobalSettings) -> String {
    let columns = vec![
        Column::new(KindColumn::Id, &cell)
            .with_title("Id")
            .with_align(Align::Right),
        Column::new(KindColumn::Category, &cell)
            .with_title("Category")
            .with_width(Width::ExpandWithMin(8)),
        Column::new(KindColumn::Transaction, &cell).with_title("Transaction"),
        Column::new(KindColumn::Hidden, &cell).with_title("Hidden"),
        Column::new(KindColumn::Direction, &cell).with_title("Direction"),
    ];
    let mut table = Table::new(columns, &settings.table)
        .with_title("Category kinds")
        .with_col_headers();
    table.add_rows(TransactionCategoryKind::ALL.iter());
    table.to_string(settings.width)
}
