use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::data::agg::{
    account_balance, balance_by_company, daily_traffic, ops_summary, quarterly_by_company,
    DailyTraffic, OpsSummary, QuarterStats,
};
use crate::data::filter::{
    default_company_selection, financial_indices, operational_indices, FinFilter, OpsFilter,
    DOMESTIC_NATIONALITY,
};
use crate::data::model::{AccountLine, Datasets, Quarter};

// ---------------------------------------------------------------------------
// Memoized derived values
// ---------------------------------------------------------------------------

/// Single-slot memo keyed by input equality.
///
/// The derived views are pure functions of their filter snapshot, so a
/// snapshot equal to the cached one returns the cached value untouched.
#[derive(Debug)]
pub struct Memo<I: PartialEq, O> {
    slot: Option<(I, O)>,
}

impl<I: PartialEq, O> Default for Memo<I, O> {
    fn default() -> Self {
        Memo { slot: None }
    }
}

impl<I: PartialEq, O> Memo<I, O> {
    pub fn get(&mut self, input: I, compute: impl FnOnce(&I) -> O) -> &O {
        let stale = match &self.slot {
            Some((cached, _)) => cached != &input,
            None => true,
        };
        if stale {
            let value = compute(&input);
            self.slot = Some((input, value));
        }
        match &self.slot {
            Some((_, value)) => value,
            None => unreachable!("memo slot filled above"),
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Everything the operational page renders, derived from one filter
/// snapshot.
#[derive(Debug, Clone)]
pub struct OpsView {
    pub summary: OpsSummary,
    pub daily: Vec<DailyTraffic>,
    pub quarterly: BTreeMap<String, BTreeMap<Quarter, QuarterStats>>,
}

/// Everything the financial page renders.
#[derive(Debug, Clone)]
pub struct FinView {
    /// Balances of all four account lines for the selected period,
    /// in `AccountLine::ALL` order.
    pub balances: Vec<(AccountLine, f64)>,
    /// Per-company period series for the selected account line.
    pub series: BTreeMap<String, BTreeMap<String, f64>>,
}

fn compute_ops_view(datasets: &Datasets, filter: &OpsFilter) -> OpsView {
    let ds = &datasets.operational;
    let indices = operational_indices(ds, filter);
    log::debug!(
        "operational view: {} of {} rows pass the filter",
        indices.len(),
        ds.len()
    );
    OpsView {
        summary: ops_summary(ds, &indices),
        daily: daily_traffic(ds, &indices),
        quarterly: quarterly_by_company(ds, &indices),
    }
}

fn compute_fin_view(datasets: &Datasets, filter: &FinFilter) -> FinView {
    let ds = &datasets.financial;
    let indices = financial_indices(ds, &filter.companies);
    let balances = AccountLine::ALL
        .iter()
        .map(|&line| (line, account_balance(ds, &indices, &filter.period, line)))
        .collect();
    FinView {
        balances,
        series: balance_by_company(ds, &indices, filter.line),
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Operational,
    Financial,
}

/// The full session state, independent of rendering: shared read-only
/// datasets, the two filter snapshots, and the memoized derived views.
pub struct AppState {
    pub datasets: Arc<Datasets>,
    pub tab: Tab,

    pub ops_filter: OpsFilter,
    pub fin_filter: FinFilter,

    /// Eligible companies for the current nationality selection.
    pub company_choices: Vec<String>,

    ops_view: Memo<OpsFilter, OpsView>,
    fin_view: Memo<FinFilter, FinView>,
}

impl AppState {
    pub fn new(datasets: Arc<Datasets>) -> Self {
        let ops = &datasets.operational;
        let fin = &datasets.financial;

        let nationalities: BTreeSet<String> =
            [DOMESTIC_NATIONALITY.to_string()].into_iter().collect();
        let company_choices = ops.companies_for(&nationalities);
        let companies = default_company_selection(&nationalities);

        let ops_filter = OpsFilter {
            start: ops.date_min,
            end: ops.date_max,
            nationalities,
            companies,
        };
        let fin_filter = FinFilter {
            period: fin.periods.first().cloned().unwrap_or_default(),
            companies: fin.companies.iter().cloned().collect(),
            line: AccountLine::NetOperatingRevenue,
        };

        AppState {
            datasets,
            tab: Tab::Operational,
            ops_filter,
            fin_filter,
            company_choices,
            ops_view: Memo::default(),
            fin_view: Memo::default(),
        }
    }

    // -- Derived views --------------------------------------------------

    pub fn ops_view(&mut self) -> &OpsView {
        let datasets = Arc::clone(&self.datasets);
        self.ops_view
            .get(self.ops_filter.clone(), |f| compute_ops_view(&datasets, f))
    }

    pub fn fin_view(&mut self) -> &FinView {
        let datasets = Arc::clone(&self.datasets);
        self.fin_view
            .get(self.fin_filter.clone(), |f| compute_fin_view(&datasets, f))
    }

    // -- Operational filters --------------------------------------------

    /// Set the date range, clamped to the dataset bounds. If the start is
    /// dragged past the end, the end snaps to the start.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let ds = &self.datasets.operational;
        let start = start.clamp(ds.date_min, ds.date_max);
        let end = end.clamp(ds.date_min, ds.date_max).max(start);
        self.ops_filter.start = start;
        self.ops_filter.end = end;
    }

    /// Toggle a nationality and reapply the company-selection rule.
    pub fn toggle_nationality(&mut self, nationality: &str) {
        let set = &mut self.ops_filter.nationalities;
        if !set.remove(nationality) {
            set.insert(nationality.to_string());
        }
        self.company_choices = self
            .datasets
            .operational
            .companies_for(&self.ops_filter.nationalities);
        self.ops_filter.companies = default_company_selection(&self.ops_filter.nationalities);
    }

    pub fn toggle_company(&mut self, company: &str) {
        let set = &mut self.ops_filter.companies;
        if !set.remove(company) {
            set.insert(company.to_string());
        }
    }

    pub fn select_all_companies(&mut self) {
        self.ops_filter.companies = self.company_choices.iter().cloned().collect();
    }

    pub fn select_no_companies(&mut self) {
        self.ops_filter.companies.clear();
    }

    // -- Financial filters ----------------------------------------------

    pub fn set_period(&mut self, period: String) {
        self.fin_filter.period = period;
    }

    pub fn set_account_line(&mut self, line: AccountLine) {
        self.fin_filter.line = line;
    }

    pub fn toggle_fin_company(&mut self, company: &str) {
        let set = &mut self.fin_filter.companies;
        if !set.remove(company) {
            set.insert(company.to_string());
        }
    }

    pub fn select_all_fin_companies(&mut self) {
        self.fin_filter.companies = self.datasets.financial.companies.iter().cloned().collect();
    }

    pub fn select_no_fin_companies(&mut self) {
        self.fin_filter.companies.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::data::model::{
        FinancialDataset, FinancialRecord, OperationalDataset, OperationalRecord,
        PERIOD_START_BALANCE,
    };

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn op(company: &str, nationality: &str, day: NaiveDate) -> OperationalRecord {
        OperationalRecord {
            date: day,
            company: company.to_string(),
            nationality: nationality.to_string(),
            ask: Some(100.0),
            rpk: Some(80.0),
            paid_passengers: Some(10.0),
            free_passengers: Some(1.0),
            takeoffs: Some(2.0),
            destination: Some("GRU".to_string()),
        }
    }

    fn datasets() -> Arc<Datasets> {
        let operational = OperationalDataset::from_records(vec![
            op("AZU", "BRASILEIRA", date(2023, 1, 1)),
            op("GLO", "BRASILEIRA", date(2023, 2, 1)),
            op("TAM", "BRASILEIRA", date(2023, 3, 1)),
            op("AAL", "ESTRANGEIRA", date(2023, 4, 1)),
        ])
        .expect("non-empty");

        let financial = FinancialDataset::from_records(vec![FinancialRecord {
            period: "2023 T1".to_string(),
            company: "AZU".to_string(),
            balance_kind: PERIOD_START_BALANCE.to_string(),
            account: AccountLine::NetOperatingRevenue.label().to_string(),
            value: Some(1.0e9),
        }])
        .expect("non-empty");

        Arc::new(Datasets {
            operational,
            financial,
        })
    }

    #[test]
    fn memo_recomputes_only_on_input_change() {
        let mut memo: Memo<u32, u32> = Memo::default();
        let mut calls = 0;

        assert_eq!(*memo.get(1, |&i| { calls += 1; i * 10 }), 10);
        assert_eq!(*memo.get(1, |&i| { calls += 1; i * 10 }), 10);
        assert_eq!(calls, 1);

        assert_eq!(*memo.get(2, |&i| { calls += 1; i * 10 }), 20);
        assert_eq!(calls, 2);
    }

    #[test]
    fn session_defaults() {
        let state = AppState::new(datasets());
        assert_eq!(state.tab, Tab::Operational);
        assert_eq!(state.ops_filter.start, date(2023, 1, 1));
        assert_eq!(state.ops_filter.end, date(2023, 4, 1));
        assert!(state.ops_filter.nationalities.contains(DOMESTIC_NATIONALITY));
        assert_eq!(state.company_choices, vec!["AZU", "GLO", "TAM"]);
        assert_eq!(
            state.ops_filter.companies,
            ["AZU", "GLO", "TAM"]
                .iter()
                .map(|c| c.to_string())
                .collect::<BTreeSet<String>>()
        );
        assert_eq!(state.fin_filter.period, "2023 T1");
        assert_eq!(state.fin_filter.line, AccountLine::NetOperatingRevenue);
    }

    #[test]
    fn removing_domestic_flag_empties_company_selection() {
        let mut state = AppState::new(datasets());
        state.toggle_nationality(DOMESTIC_NATIONALITY);
        assert!(state.ops_filter.companies.is_empty());
        assert!(state.company_choices.is_empty());

        state.toggle_nationality(DOMESTIC_NATIONALITY);
        assert_eq!(
            state.ops_filter.companies,
            ["AZU", "GLO", "TAM"]
                .iter()
                .map(|c| c.to_string())
                .collect::<BTreeSet<String>>()
        );
    }

    #[test]
    fn foreign_only_selection_offers_foreign_carriers_without_defaults() {
        let mut state = AppState::new(datasets());
        state.toggle_nationality(DOMESTIC_NATIONALITY);
        state.toggle_nationality("ESTRANGEIRA");
        assert_eq!(state.company_choices, vec!["AAL"]);
        assert!(state.ops_filter.companies.is_empty());
    }

    #[test]
    fn date_range_clamps_to_dataset_bounds() {
        let mut state = AppState::new(datasets());
        state.set_date_range(date(2020, 1, 1), date(2030, 1, 1));
        assert_eq!(state.ops_filter.start, date(2023, 1, 1));
        assert_eq!(state.ops_filter.end, date(2023, 4, 1));

        // Start dragged past end: end follows.
        state.set_date_range(date(2023, 3, 1), date(2023, 2, 1));
        assert_eq!(state.ops_filter.start, date(2023, 3, 1));
        assert_eq!(state.ops_filter.end, date(2023, 3, 1));
    }

    #[test]
    fn ops_view_tracks_filter_changes() {
        let mut state = AppState::new(datasets());
        let ask = state.ops_view().summary.ask;
        assert_eq!(ask, 300.0); // AZU + GLO + TAM

        state.select_no_companies();
        let ask = state.ops_view().summary.ask;
        assert_eq!(ask, 0.0);

        state.select_all_companies();
        let ask = state.ops_view().summary.ask;
        assert_eq!(ask, 300.0);
    }

    #[test]
    fn fin_view_reports_all_four_lines() {
        let mut state = AppState::new(datasets());
        let view = state.fin_view();
        assert_eq!(view.balances.len(), 4);
        assert_eq!(
            view.balances[0],
            (AccountLine::NetOperatingRevenue, 1.0e9)
        );
        // Lines with no rows sum to zero.
        assert_eq!(view.balances[2], (AccountLine::GrossProfit, 0.0));
    }
}
