/// Explicit field-to-column mapping. Every model declares its table layout as
/// a `COLUMNS` table of `ColumnDef`s, repositories derive their projections
/// and insert statements from it instead of hand-listing columns per query.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub field: &'static str,
    pub column: &'static str,
    pub indexed: bool,
    pub unique: bool,
    /// Sensitive columns are withheld from the default projection. Reading
    /// them requires the explicit with-credentials projection.
    pub sensitive: bool,
}

impl ColumnDef {
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            column,
            indexed: false,
            unique: false,
            sensitive: false,
        }
    }

    pub const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Comma separated column list for a SELECT. The default projection
/// (`include_sensitive = false`) leaves sensitive columns out entirely, they
/// never reach the row mapper.
pub fn select_columns(columns: &[ColumnDef], include_sensitive: bool) -> String {
    columns
        .iter()
        .filter(|col| include_sensitive || !col.sensitive)
        .map(|col| col.column)
        .collect::<Vec<&str>>()
        .join(", ")
}

/// Full INSERT statement with one positional bind per column, in table order.
/// Callers bind values in the same order as the `COLUMNS` table.
pub fn insert_statement(table_name: &str, columns: &[ColumnDef]) -> String {
    let cols = columns
        .iter()
        .map(|col| col.column)
        .collect::<Vec<&str>>()
        .join(", ");
    let binds = (1..=columns.len())
        .map(|idx| format!("${}", idx))
        .collect::<Vec<String>>()
        .join(", ");
    format!("INSERT INTO {} ({}) VALUES ({})", table_name, cols, binds)
}
