use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SalesRecord {
    pub(crate) id: Option<i64>,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    /// Format: "YYYY-MM-DD", not validated
    pub(crate) date: String,
}

impl SalesRecord {
    pub(crate) fn new(category: String, amount: Decimal, date: String) -> Self {
        Self {
            id: None,
            category,
            amount,
            date,
        }
    }

    /// Amount without trailing zeros, e.g. `5000.00` → `"5000"`.
    pub(crate) fn amount_display(&self) -> String {
        self.amount.normalize().to_string()
    }

    /// One line of the printed report: `"<category> - <amount> - <date>"`.
    pub(crate) fn report_line(&self) -> String {
        format!("{} - {} - {}", self.category, self.amount_display(), self.date)
    }
}

impl std::fmt::Display for SalesRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.report_line())
    }
}
