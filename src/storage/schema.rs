//! Database schema definitions

/// SQL to create the parameters table
pub const CREATE_PARAMETERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS parameters (
    key TEXT PRIMARY KEY,
    value TEXT
)
"#;

/// Insert a parameter, replacing any row with the same key
pub const UPSERT_PARAMETER: &str =
    "INSERT OR REPLACE INTO parameters (key, value) VALUES (?1, ?2)";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_PARAMETERS_TABLE]
}
