use super::SalesRecord;

/// Column names of the `sales` relation, in record field order.
pub(crate) const FIELDS: [&str; 3] = ["category", "amount", "date"];

/// Selector label used when there is nothing to select.
pub(crate) const PLACEHOLDER_CATEGORY: &str = "N/A";

/// Immutable in-memory snapshot of the `sales` relation.
///
/// Records keep the order the store returned them in. A table is never
/// mutated after construction; filtering produces a new table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    pub(crate) fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Declared schema. Always three fields, even for an empty table.
    pub(crate) fn fields(&self) -> &'static [&'static str] {
        &FIELDS
    }

    pub(crate) fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique categories in first-seen order, or `["N/A"]` for an empty table.
    pub(crate) fn distinct_categories(&self) -> Vec<String> {
        if self.records.is_empty() {
            return vec![PLACEHOLDER_CATEGORY.to_string()];
        }
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.category.as_str()))
            .map(|r| r.category.clone())
            .collect()
    }

    /// Records whose category equals `category` exactly.
    ///
    /// An empty table comes back unfiltered, which is also empty.
    pub(crate) fn filter_by_category(&self, category: &str) -> SalesTable {
        if self.records.is_empty() {
            return self.clone();
        }
        Self::new(
            self.records
                .iter()
                .filter(|r| r.category == category)
                .cloned()
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a SalesTable {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
