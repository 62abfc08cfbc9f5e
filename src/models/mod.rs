mod sales_record;
mod sales_table;

pub(crate) use sales_record::SalesRecord;
pub(crate) use sales_table::{SalesTable, FIELDS, PLACEHOLDER_CATEGORY};
