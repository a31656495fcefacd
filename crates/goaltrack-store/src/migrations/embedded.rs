/// Migration metadata
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations in order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_registry",
            sql: include_str!("../../migrations/001_registry.sql"),
        },
        Migration {
            id: "002_completion_ledger",
            sql: include_str!("../../migrations/002_completion_ledger.sql"),
        },
    ]
}
