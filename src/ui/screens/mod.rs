pub(crate) mod dashboard;
pub(crate) mod sales_table;
