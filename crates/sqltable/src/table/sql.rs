use sqltable_core::schema::TableSchema;

/// Quotes an identifier for use in SQL. Dotted names quote each part, so
/// `main.seqs` becomes `"main"."seqs"`.
pub(crate) fn quote_ident(name: &str) -> String {
    name.split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// SQL text for the statements a table issues, rendered once at open.
#[derive(Debug)]
pub(super) struct Statements {
    table: String,
    pk: String,
    columns: String,

    pub(super) count: String,
    pub(super) contains: String,
    pub(super) key: String,
    pub(super) get: String,
    pub(super) keys: String,
    pub(super) values: String,
    pub(super) delete: String,
    pub(super) rekey: String,
}

impl Statements {
    pub(super) fn new(schema: &TableSchema) -> Statements {
        let table = quote_ident(&schema.name);
        let pk = quote_ident(&schema.primary_key().name);
        let columns = schema
            .columns
            .iter()
            .map(|column| quote_ident(&column.name))
            .collect::<Vec<_>>()
            .join(", ");

        Statements {
            count: format!("SELECT COUNT(*) FROM {table}"),
            contains: format!("SELECT 1 FROM {table} WHERE {pk} = ? LIMIT 1"),
            key: format!("SELECT {pk} FROM {table} WHERE {pk} = ?"),
            get: format!("SELECT {columns} FROM {table} WHERE {pk} = ?"),
            keys: format!("SELECT {pk} FROM {table} ORDER BY {pk}"),
            values: format!("SELECT {columns} FROM {table} ORDER BY {pk}"),
            delete: format!("DELETE FROM {table} WHERE {pk} = ?"),
            rekey: format!("UPDATE {table} SET {pk} = ? WHERE {pk} = ?"),
            table,
            pk,
            columns,
        }
    }

    /// Selects the rows whose keys are bound to `n` placeholders.
    pub(super) fn get_many(&self, n: usize) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} IN ({})",
            self.columns,
            self.table,
            self.pk,
            placeholders(n)
        )
    }

    /// Updates one column of the row bound to the second placeholder.
    pub(super) fn update_column(&self, column: &str) -> String {
        format!(
            "UPDATE {} SET {} = ? WHERE {} = ?",
            self.table,
            quote_ident(column),
            self.pk
        )
    }

    /// Inserts one row supplying the named columns.
    pub(super) fn insert<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> String {
        let columns = columns.into_iter().map(quote_ident).collect::<Vec<_>>();

        if columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", self.table)
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table,
                columns.join(", "),
                placeholders(columns.len())
            )
        }
    }
}
