use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{SalesRecord, SalesTable};

/// One slice of the category distribution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryShare {
    pub(crate) category: String,
    pub(crate) total: Decimal,
    /// Percentage of the grand total, 0 when the grand total is not positive.
    pub(crate) percent: f64,
}

/// Series behind the four dashboard charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Figures {
    /// Bar chart: selected category, amounts summed per date label, in date order.
    pub(crate) sales_by_date: Vec<(String, Decimal)>,
    /// Line chart: selected category, (day number, amount) sorted by date.
    pub(crate) trend: Vec<(f64, f64)>,
    /// Pie chart: every category of the full table.
    pub(crate) category_share: Vec<CategoryShare>,
    /// Scatter plot: every record of the full table.
    pub(crate) scatter: Vec<(f64, f64)>,
}

/// What the dashboard shows for one selected category.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DashboardView {
    pub(crate) category: String,
    pub(crate) filtered: SalesTable,
    pub(crate) figures: Figures,
}

impl DashboardView {
    /// Filter `table` by `category` and recompute every chart series.
    ///
    /// Bars and the trend line follow the selection; the distribution and the
    /// scatter plot always cover the whole table.
    ///
    /// Fails when a total no longer fits a `Decimal`.
    pub(crate) fn build(table: &SalesTable, category: &str) -> Result<Self> {
        let filtered = table.filter_by_category(category);
        tracing::debug!(category, records = filtered.len(), "rebuilt dashboard view");
        let figures = Figures {
            sales_by_date: sales_by_date(&filtered)?,
            trend: dated_points(&filtered),
            category_share: category_shares(table)?,
            scatter: dated_points(table),
        };
        Ok(Self {
            category: category.to_string(),
            filtered,
            figures,
        })
    }
}

pub(crate) fn sales_by_date(table: &SalesTable) -> Result<Vec<(String, Decimal)>> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for record in table {
        match totals.iter_mut().find(|(date, _)| *date == record.date) {
            Some((_, total)) => *total = checked_total(*total, record.amount)?,
            None => totals.push((record.date.clone(), record.amount)),
        }
    }
    // ISO dates sort lexically
    totals.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(totals)
}

/// Totals per category in first-seen order.
pub(crate) fn category_shares(table: &SalesTable) -> Result<Vec<CategoryShare>> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for record in table {
        match totals.iter_mut().find(|(cat, _)| *cat == record.category) {
            Some((_, total)) => *total = checked_total(*total, record.amount)?,
            None => totals.push((record.category.clone(), record.amount)),
        }
    }
    let grand = grand_total(totals.iter().map(|(_, t)| *t))?;
    totals
        .into_iter()
        .map(|(category, total)| {
            let percent = if grand > Decimal::ZERO {
                total
                    .checked_div(grand)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .ok_or_else(|| anyhow::anyhow!("Share of {category} is out of range"))?
                    .to_f64()
                    .unwrap_or_default()
            } else {
                0.0
            };
            Ok(CategoryShare {
                category,
                total,
                percent,
            })
        })
        .collect()
}

/// Sum of `amounts`, or an error instead of an overflow panic.
pub(crate) fn grand_total(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, checked_total)
}

fn checked_total(total: Decimal, amount: Decimal) -> Result<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| anyhow::anyhow!("Sales total overflowed adding {amount} to {total}"))
}

/// (day number, amount) for every record whose date parses, sorted by day.
pub(crate) fn dated_points(table: &SalesTable) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = table
        .iter()
        .filter_map(|record| {
            let point = record_point(record);
            if point.is_none() {
                tracing::debug!(date = %record.date, "skipping record with unparsable date");
            }
            point
        })
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}

fn record_point(record: &SalesRecord) -> Option<(f64, f64)> {
    let day = parse_date(&record.date)?;
    let amount = record.amount.to_f64()?;
    Some((f64::from(day.num_days_from_ce()), amount))
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Inverse of the x coordinate used by `dated_points`, for axis labels.
pub(crate) fn day_label(day: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(day.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Axis bounds that always span a non-zero range.
pub(crate) fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if min == max {
        return [min - 1.0, max + 1.0];
    }
    [min, max]
}
