use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{AccountLine, FinancialDataset, OperationalDataset};

// ---------------------------------------------------------------------------
// Filter snapshots
// ---------------------------------------------------------------------------

/// Nationality label of the domestic carriers.
pub const DOMESTIC_NATIONALITY: &str = "BRASILEIRA";

/// Companies preselected whenever the domestic nationality is active.
pub const DEFAULT_CARRIERS: [&str; 3] = ["AZU", "GLO", "TAM"];

/// Operational filter snapshot. Equality of two snapshots means the
/// derived operational view is identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpsFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nationalities: BTreeSet<String>,
    pub companies: BTreeSet<String>,
}

/// Financial filter snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinFilter {
    pub period: String,
    pub companies: BTreeSet<String>,
    pub line: AccountLine,
}

/// Company selection applied after a nationality change: the fixed
/// default carriers when the domestic flag is selected, empty otherwise.
pub fn default_company_selection(nationalities: &BTreeSet<String>) -> BTreeSet<String> {
    if nationalities.contains(DOMESTIC_NATIONALITY) {
        DEFAULT_CARRIERS.iter().map(|c| c.to_string()).collect()
    } else {
        BTreeSet::new()
    }
}

// ---------------------------------------------------------------------------
// Row filters
// ---------------------------------------------------------------------------

/// Indices of operational rows inside the date range with a selected
/// company. An empty company set selects nothing.
pub fn operational_indices(dataset: &OperationalDataset, filter: &OpsFilter) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            r.date >= filter.start
                && r.date <= filter.end
                && filter.companies.contains(&r.company)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Indices of financial rows for the selected companies.
pub fn financial_indices(dataset: &FinancialDataset, companies: &BTreeSet<String>) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| companies.contains(&r.company))
        .map(|(i, _)| i)
        .collect()
}
