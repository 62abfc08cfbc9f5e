pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS sales (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    amount   REAL NOT NULL,
    date     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sales_category ON sales(category);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Rows inserted by `salesboard init` into an empty store.
pub(crate) const EXAMPLE_ROWS: &[(&str, i64, &str)] = &[
    ("Electronica", 5000, "2024-02-01"),
    ("Ropa", 2000, "2024-02-02"),
    ("Alimentos", 3000, "2024-02-03"),
    ("Juguetes", 1500, "2024-02-04"),
    ("Electronica", 6000, "2024-02-05"),
    ("Ropa", 2500, "2024-02-06"),
    ("Alimentos", 4000, "2024-02-07"),
    ("Juguetes", 1800, "2024-02-08"),
];
