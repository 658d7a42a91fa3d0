use crate::global_settings::GlobalSettings;
use crate::tables::{Column, Table, Truncate, Width};
use purse_lib::scenarios::{OwnerReport, ScenarioReport, TransactionReport};

#[derive(Clone, Copy)]
enum TxColumn {
    Account,
    Category,
    Partner,
    Direction,
    Kind,
    Status,
}

fn tx_cell(t: &TransactionReport, col: &TxColumn) -> String {
    match col {
        TxColumn::Account => t.account.clone(),
        TxColumn::Category => t.category.clone(),
        TxColumn::Partner => t.partner.clone(),
        TxColumn::Direction => t.direction.to_string(),
        TxColumn::Kind => t.kind.to_string(),
        TxColumn::Status => {
            if t.errors.is_empty() {
                "ok".to_string()
            } else {
                t.describe_errors()
            }
        }
    }
}

#[derive(Clone, Copy)]
enum OwnerColumn {
    Owner,
    Status,
}

fn owner_cell(o: &OwnerReport, col: &OwnerColumn) -> String {
    match col {
        OwnerColumn::Owner => o.owner.clone(),
        OwnerColumn::Status => {
            if o.is_ok() {
                "ok".to_string()
            } else {
                o.describe_errors()
            }
        }
    }
}

pub fn check_view(report: &ScenarioReport, settings: &GlobalSettings) -> String {
    let mut output = String::new();

    if !report.transactions.is_empty() {
        let mut table = Table::new(
            vec![
                Column::new(TxColumn::Account, &tx_cell)
                    .with_title("Account")
                    .with_width(Width::ExpandWithMin(8))
                    .with_truncate(Truncate::Left),
                Column::new(TxColumn::Category, &tx_cell).with_title("Category"),
                Column::new(TxColumn::Partner, &tx_cell)
                    .with_title("Partner")
                    .with_width(Width::ExpandWithMin(8))
                    .with_truncate(Truncate::Left),
                Column::new(TxColumn::Direction, &tx_cell).with_title("Dir"),
                Column::new(TxColumn::Kind, &tx_cell).with_title("Kind"),
                Column::new(TxColumn::Status, &tx_cell)
                    .with_title("Status")
                    .with_width(Width::ExpandWithMin(10)),
            ],
            &settings.table,
        )
        .with_title("Transactions")
        .with_col_headers();
        table.add_rows(&report.transactions);
        output.push_str(&table.to_string(settings.width));
    }

    if !report.owners.is_empty() {
        let mut table = Table::new(
            vec![
                Column::new(OwnerColumn::Owner, &owner_cell).with_title("Owner"),
                Column::new(OwnerColumn::Status, &owner_cell)
                    .with_title("Status")
                    .with_width(Width::ExpandWithMin(10)),
            ],
            &settings.table,
        )
        .with_title("Info fields")
        .with_col_headers();
        table.add_rows(&report.owners);
        output.push_str(&table.to_string(settings.width));
    }

    output.push_str(&format!("{} checks failed\n", report.failures()));
    output
}
