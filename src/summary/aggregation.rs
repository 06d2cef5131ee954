//! Aggregation of transactions into totals, category breakdowns and
//! month-over-month growth.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use time::Date;

use crate::transaction::{Category, Transaction};

/// Statistics over the whole spending history.
///
/// Transactions without a numeric amount, as left behind by older versions of
/// the gateway, are left out of every figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    /// The sum of all amounts.
    pub total: f64,
    /// The number of transactions.
    pub count: usize,
    /// The mean amount, zero when there are no transactions.
    pub average: f64,
    /// The largest single amount.
    pub largest: Option<f64>,
    /// Totals per category, largest first.
    pub by_category: Vec<CategoryTotal>,
    /// Totals per calendar month, oldest first.
    pub monthly: Vec<MonthTotal>,
    /// Percent change from the calendar month before the last month to the
    /// last month, `None` when that earlier month has no spending.
    pub month_over_month_growth: Option<f64>,
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category label.
    pub category: Category,
    /// The sum of amounts in the category.
    pub total: f64,
}

/// The total spent in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    /// The month formatted as `YYYY-MM`.
    pub month: String,
    /// The sum of amounts in the month.
    pub total: f64,
}

/// Compute the [SpendingSummary] for `transactions`.
pub fn summarize(transactions: &[Transaction]) -> SpendingSummary {
    let transactions: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| transaction.amount.is_finite())
        .collect();
    let transactions = transactions.as_slice();

    let total: f64 = transactions.iter().map(|transaction| transaction.amount).sum();
    let count = transactions.len();
    let average = if count == 0 { 0.0 } else { total / count as f64 };
    let largest = transactions
        .iter()
        .map(|transaction| transaction.amount)
        .reduce(f64::max);

    let monthly_totals = aggregate_by_month(transactions);
    let month_over_month_growth = month_over_month_growth(&monthly_totals);
    let monthly = monthly_totals
        .into_iter()
        .map(|((year, month), total)| MonthTotal {
            month: format!("{year:04}-{month:02}"),
            total,
        })
        .collect();

    SpendingSummary {
        total,
        count,
        average,
        largest,
        by_category: aggregate_by_category(transactions),
        monthly,
        month_over_month_growth,
    }
}

/// Sums transaction amounts per calendar month, in chronological order.
fn aggregate_by_month(transactions: &[&Transaction]) -> BTreeMap<(i32, u8), f64> {
    let mut totals = BTreeMap::new();

    for transaction in transactions {
        *totals.entry(month_key(transaction.date)).or_insert(0.0) += transaction.amount;
    }

    totals
}

fn month_key(date: Date) -> (i32, u8) {
    (date.year(), u8::from(date.month()))
}

/// Sums transaction amounts per category, largest total first.
///
/// Ties are broken by category name so the order is stable.
fn aggregate_by_category(transactions: &[&Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&Category, f64> = HashMap::new();

    for transaction in transactions {
        *totals.entry(&transaction.category).or_insert(0.0) += transaction.amount;
    }

    let mut totals: Vec<_> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.clone(),
            total,
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    totals
}

/// Percent change from the calendar month before the last month with spending
/// to that last month.
///
/// Returns `None` when the earlier month is missing or its total is zero.
fn month_over_month_growth(monthly_totals: &BTreeMap<(i32, u8), f64>) -> Option<f64> {
    let (&(year, month), &last) = monthly_totals.last_key_value()?;
    let previous_key = if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    };
    let previous = *monthly_totals.get(&previous_key)?;

    if previous == 0.0 {
        return None;
    }

    Some((last - previous) / previous * 100.0)
}
