#[derive(Debug)]
pub struct Capability {
    /// Keyword that makes an integer primary key auto-generated. Substituted
    /// for `{AUTO_INCREMENT}` in setup DDL.
    pub auto_increment: &'static str,

    /// Maximum number of bind parameters in a single statement.
    pub max_bind_params: usize,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        // `INTEGER PRIMARY KEY` is already an alias for the rowid.
        auto_increment: "AUTOINCREMENT",

        // SQLITE_MAX_VARIABLE_NUMBER defaults to 32766 since 3.32.0.
        max_bind_params: 32_766,
    };
}
