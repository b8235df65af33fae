use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::model::{
    AccountLine, FinancialDataset, OperationalDataset, Quarter, PERIOD_START_BALANCE,
};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load factor in percent; zero capacity reports zero instead of dividing.
pub fn load_factor(rpk: f64, ask: f64) -> f64 {
    if ask == 0.0 {
        0.0
    } else {
        rpk / ask * 100.0
    }
}

// ---------------------------------------------------------------------------
// Operational summary KPIs
// ---------------------------------------------------------------------------

/// Headline sums over the filtered operational rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpsSummary {
    pub ask: f64,
    pub rpk: f64,
    pub passengers: f64,
    pub takeoffs: f64,
    pub destinations: usize,
}

impl OpsSummary {
    pub fn load_factor(&self) -> f64 {
        load_factor(self.rpk, self.ask)
    }
}

/// Sum the headline KPIs over the given row indices.
pub fn ops_summary(dataset: &OperationalDataset, indices: &[usize]) -> OpsSummary {
    let mut summary = OpsSummary::default();
    let mut destinations: BTreeSet<&str> = BTreeSet::new();

    for &i in indices {
        let r = &dataset.records[i];
        summary.ask += r.ask.unwrap_or(0.0);
        summary.rpk += r.rpk.unwrap_or(0.0);
        summary.passengers += r.passengers();
        summary.takeoffs += r.takeoffs.unwrap_or(0.0);
        if let Some(dest) = r.destination.as_deref() {
            destinations.insert(dest);
        }
    }

    summary.destinations = destinations.len();
    summary
}

// ---------------------------------------------------------------------------
// Daily traffic series
// ---------------------------------------------------------------------------

/// Per-date RPK/ASK sums for the traffic chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTraffic {
    pub date: NaiveDate,
    pub rpk: f64,
    pub ask: f64,
}

impl DailyTraffic {
    pub fn load_factor(&self) -> f64 {
        load_factor(self.rpk, self.ask)
    }
}

/// Group the filtered rows by reference date, sorted chronologically.
pub fn daily_traffic(dataset: &OperationalDataset, indices: &[usize]) -> Vec<DailyTraffic> {
    let mut by_date: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

    for &i in indices {
        let r = &dataset.records[i];
        let entry = by_date.entry(r.date).or_insert((0.0, 0.0));
        entry.0 += r.rpk.unwrap_or(0.0);
        entry.1 += r.ask.unwrap_or(0.0);
    }

    by_date
        .into_iter()
        .map(|(date, (rpk, ask))| DailyTraffic { date, rpk, ask })
        .collect()
}

// ---------------------------------------------------------------------------
// Quarterly per-company groups
// ---------------------------------------------------------------------------

/// Per-quarter sums for one company.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuarterStats {
    pub passengers: f64,
    pub takeoffs: f64,
    pub destinations: usize,
}

/// Group the filtered rows by (company, calendar quarter).
///
/// Every row lands in exactly one bucket, so the per-quarter sums
/// partition the headline totals.
pub fn quarterly_by_company(
    dataset: &OperationalDataset,
    indices: &[usize],
) -> BTreeMap<String, BTreeMap<Quarter, QuarterStats>> {
    struct Acc<'a> {
        passengers: f64,
        takeoffs: f64,
        destinations: BTreeSet<&'a str>,
    }

    let mut groups: BTreeMap<(String, Quarter), Acc<'_>> = BTreeMap::new();

    for &i in indices {
        let r = &dataset.records[i];
        let key = (r.company.clone(), Quarter::from_date(r.date));
        let acc = groups.entry(key).or_insert(Acc {
            passengers: 0.0,
            takeoffs: 0.0,
            destinations: BTreeSet::new(),
        });
        acc.passengers += r.passengers();
        acc.takeoffs += r.takeoffs.unwrap_or(0.0);
        if let Some(dest) = r.destination.as_deref() {
            acc.destinations.insert(dest);
        }
    }

    let mut result: BTreeMap<String, BTreeMap<Quarter, QuarterStats>> = BTreeMap::new();
    for ((company, quarter), acc) in groups {
        result.entry(company).or_default().insert(
            quarter,
            QuarterStats {
                passengers: acc.passengers,
                takeoffs: acc.takeoffs,
                destinations: acc.destinations.len(),
            },
        );
    }
    result
}

// ---------------------------------------------------------------------------
// Financial balances
// ---------------------------------------------------------------------------

/// Sum of period-start balances for one period and account line over the
/// filtered rows. The cost line is negated so costs display as positive
/// magnitudes.
pub fn account_balance(
    dataset: &FinancialDataset,
    indices: &[usize],
    period: &str,
    line: AccountLine,
) -> f64 {
    let sum: f64 = indices
        .iter()
        .map(|&i| &dataset.records[i])
        .filter(|r| {
            r.period == period
                && r.balance_kind == PERIOD_START_BALANCE
                && r.account == line.label()
        })
        .map(|r| r.value.unwrap_or(0.0))
        .sum();

    if line.inverts_sign() {
        -sum
    } else {
        sum
    }
}

/// Per-company period series for one account line, periods sorted
/// ascending. Same balance-type restriction and sign rule as the KPI.
pub fn balance_by_company(
    dataset: &FinancialDataset,
    indices: &[usize],
    line: AccountLine,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut result: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    for &i in indices {
        let r = &dataset.records[i];
        if r.balance_kind != PERIOD_START_BALANCE || r.account != line.label() {
            continue;
        }
        let mut value = r.value.unwrap_or(0.0);
        if line.inverts_sign() {
            value = -value;
        }
        *result
            .entry(r.company.clone())
            .or_default()
            .entry(r.period.clone())
            .or_insert(0.0) += value;
    }

    result
}
