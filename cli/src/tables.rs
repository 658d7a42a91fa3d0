#[derive(Clone, Copy)]
pub enum Width {
    Auto,
    ExpandWithMin(usize),
}
#[derive(Clone, Copy)]
pub enum Align {
    Left,
    Center,
    Right,
}
#[derive(Clone, Copy)]
pub enum Truncate {
    Left,  //  Remove left-most characters
    Right, //  Remove right-most characters
}

pub struct Column<'a, TRow, TCol> {
    align: Align,
    truncate: Truncate,
    width: Width,
    title: Option<String>,
    data: TCol,
    get_content: &'a dyn Fn(&TRow, &TCol) -> String,

    min_width: usize,
    computed_width: usize,
}
impl<'a, TRow, TCol> Column<'a, TRow, TCol> {
    pub fn new(
        data: TCol,
        get_content: &'a dyn Fn(&TRow, &TCol) -> String,
    ) -> Self {
        Self {
            align: Align::Left,
            truncate: Truncate::Right,
            width: Width::Auto,
            title: None,
            computed_width: 0,
            min_width: 0,
            data,
            get_content,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_truncate(mut self, truncate: Truncate) -> Self {
        self.truncate = truncate;
        self
    }

    pub fn with_width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    fn content(&self, row: &TRow) -> String {
        (self.get_content)(row, &self.data)
    }

    fn title_width(&self) -> usize {
        self.title.as_ref().map_or(0, |t| t.chars().count())
    }
}

#[derive(Debug)]
enum RowData {
    Separator,
    Cells(Vec<String>),
    Headers,
}

#[derive(Clone)]
pub struct Settings {
    pub colsep: String,
}
impl Default for Settings {
    fn default() -> Self {
        Settings {
            colsep: "│".to_string(),
        }
    }
}

pub struct Table<'a, TRow, TCol> {
    columns: Vec<Column<'a, TRow, TCol>>,
    rows: Vec<RowData>,
    title: Option<String>,
    settings: Settings,
}
impl<'a, TRow, TCol> Table<'a, TRow, TCol> {
    pub fn new(
        columns: Vec<Column<'a, TRow, TCol>>,
        settings: &Settings,
    ) -> Self {
        Self {
            rows: Vec::new(),
            columns,
            title: None,
            settings: settings.clone(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_col_headers(mut self) -> Self {
        self.rows.push(RowData::Headers);
        self.rows.push(RowData::Separator);
        self
    }

    pub fn add_rows<'b>(&mut self, rows: impl IntoIterator<Item = &'b TRow>)
    where
        TRow: 'b,
    {
        for row in rows {
            self.add_row(row);
        }
    }

    pub fn add_row(&mut self, row: &TRow) {
        self.rows.push(RowData::Cells(
            self.columns.iter().map(|col| col.content(row)).collect(),
        ));
    }

    /// Width of the widest cell in a column
    fn natural_width(&self, colidx: usize) -> usize {
        self.rows
            .iter()
            .map(|row| match row {
                RowData::Separator => 0,
                RowData::Headers => self
                    .columns
                    .get(colidx)
                    .map_or(0, Column::title_width),
                RowData::Cells(cells) => {
                    cells.get(colidx).map_or(0, |c| c.chars().count())
                }
            })
            .max()
            .unwrap_or(0)
    }

    /// Compute the size allocated for each column.
    /// max_width should not include the space for column separators.
    fn compute_widths(&mut self, max_width: usize) {
        let natural: Vec<usize> =
            (0..self.columns.len()).map(|c| self.natural_width(c)).collect();
        let mut expandable_count: usize = 0;
        let mut expandable_width: usize = 0;
        let mut fixed_width: usize = 0; // minimal requested width

        for (col, w) in self.columns.iter_mut().zip(natural) {
            col.computed_width = w;
            match col.width {
                Width::Auto => {
                    col.min_width = w;
                    fixed_width += w;
                }
                Width::ExpandWithMin(min) => {
                    col.min_width = min.min(w);
                    expandable_width += w;
                    expandable_count += 1;
                    fixed_width += col.min_width;
                }
            }
        }

        if expandable_width + fixed_width > max_width {
            if fixed_width > max_width {
                // Screen is too narrow, so all expandable columns get their
                // minimal size, and rows will wrap.  Too bad.
                for col in &mut self.columns {
                    match col.width {
                        Width::Auto => {}
                        Width::ExpandWithMin(_) => {
                            col.computed_width = col.min_width;
                        }
                    }
                }
            } else {
                // Divide the extra space amongst all expandable columns
                let adjust = (max_width - fixed_width) / expandable_count.max(1);
                for col in &mut self.columns {
                    if let Width::ExpandWithMin(_) = col.width {
                        col.computed_width =
                            col.computed_width.min(col.min_width + adjust);
                    }
                }
            }
        }
    }

    pub fn to_string(&mut self, max_width: usize) -> String {
        let seps = self.columns.len().saturating_sub(1)
            * self.settings.colsep.chars().count();
        self.compute_widths(max_width.saturating_sub(seps));
        let mut result = String::new();

        if let Some(title) = &self.title {
            let total = self
                .columns
                .iter()
                .map(|c| c.computed_width)
                .sum::<usize>()
                + seps;
            push_sep(&mut result, total);
            result.push('\n');
            push_align(&mut result, title, total, Align::Center);
            result.push('\n');
            push_sep(&mut result, total);
            result.push('\n');
        }

        for row in &self.rows {
            for (colidx, col) in self.columns.iter().enumerate() {
                if colidx > 0 {
                    result.push_str(&self.settings.colsep);
                }
                match row {
                    RowData::Separator => {
                        push_sep(&mut result, col.computed_width);
                    }
                    RowData::Headers => {
                        push_align(
                            &mut result,
                            truncate(
                                col.title.as_deref().unwrap_or(""),
                                col.truncate,
                                col.computed_width,
                            ),
                            col.computed_width,
                            Align::Center,
                        );
                    }
                    RowData::Cells(cells) => {
                        push_align(
                            &mut result,
                            truncate(
                                cells.get(colidx).map_or("", String::as_str),
                                col.truncate,
                                col.computed_width,
                            ),
                            col.computed_width,
                            col.align,
                        );
                    }
                }
            }
            result.push('\n');
        }

        result
    }
}

fn trunc_keep_last(s: &str, max_width: usize) -> &str {
    if max_width == 0 {
        return "";
    }
    s.char_indices()
        .rev()
        .nth(max_width - 1)
        .and_then(|(i, _)| s.get(i..))
        .unwrap_or(s)
}
fn trunc_keep_first(s: &str, max_width: usize) -> &str {
    s.char_indices()
        .nth(max_width)
        .and_then(|(i, _)| s.get(..i))
        .unwrap_or(s)
}
fn push_sep(into: &mut String, width: usize) {
    into.push_str(&"─".repeat(width));
}
fn push_align(into: &mut String, value: &str, width: usize, align: Align) {
    match align {
        Align::Left => into.push_str(&format!("{:<width$}", value)),
        Align::Center => into.push_str(&format!("{:^width$}", value)),
        Align::Right => into.push_str(&format!("{:>width$}", value)),
    }
}

/// Truncate the string if necessary
fn truncate(val: &str, truncate: Truncate, width: usize) -> &str {
    if val.chars().count() <= width {
        val
    } else {
        match truncate {
            Truncate::Right => trunc_keep_first(val, width),
            Truncate::Left => trunc_keep_last(val, width),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::tables::{Align, Column, Table, Truncate, Width};

    #[test]
    fn test_table() {
        let image = |row: &[&str; 2], idx: &usize| {
            row.get(*idx).map_or(String::new(), |s| s.to_string())
        };

        let columns = vec![
            Column::new(0, &image)
                .with_width(Width::ExpandWithMin(3))
                .with_truncate(Truncate::Left),
            Column::new(1, &image)
                .with_width(Width::Auto)
                .with_truncate(Truncate::Left),
        ];
        let mut table =
            Table::new(columns, &crate::tables::Settings::default());

        table.add_row(&["abcdefghijklmnopqrstuvwxyz", "123"]);
        table.add_row(&["abcdefghijklmn", "123456789"]);

        // We have plenty of space to display the columns
        assert_eq!(
            table.to_string(40),
            "abcdefghijklmnopqrstuvwxyz│123      \n\
             abcdefghijklmn            │123456789\n"
        );

        // But we can adapt to shorter widths
        assert_eq!(
            table.to_string(20),
            "qrstuvwxyz│123      \n\
             efghijklmn│123456789\n"
        );

        // until the screen is just too narrow.  First column wants 3 chars,
        // plus separator, plus 9 chars for second column.  So threshold is 13.
        assert_eq!(
            table.to_string(13),
            "xyz│123      \n\
             lmn│123456789\n"
        );

        // If really too short, too bad.
        assert_eq!(
            table.to_string(1),
            "xyz│123      \n\
             lmn│123456789\n"
        );
    }

    #[test]
    fn test_headers() {
        let image = |row: &(u32, &str), idx: &usize| match idx {
            0 => row.0.to_string(),
            _ => row.1.to_string(),
        };
        let mut table = Table::new(
            vec![
                Column::new(0, &image).with_title("Id").with_align(Align::Right),
                Column::new(1, &image).with_title("Name"),
            ],
            &crate::tables::Settings::default(),
        )
        .with_title("Kinds")
        .with_col_headers();
        table.add_rows(&[(1, "Deposit"), (12, "Loan")]);

        assert_eq!(
            table.to_string(80),
            "──────────\n\
             \x20 Kinds   \n\
             ──────────\n\
             Id│ Name  \n\
             ──│───────\n\
             \x201│Deposit\n\
             12│Loan   \n"
        );
    }
}
