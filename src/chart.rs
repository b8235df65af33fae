use std::collections::BTreeMap;

use eframe::egui::Color32;

use crate::color;
use crate::data::agg::{DailyTraffic, QuarterStats};
use crate::data::model::Quarter;
use crate::format::{format_number, format_percent};

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Bar,
    Line,
}

/// One plotted series. `labels` holds the preformatted hover text for
/// each value, aligned with `values` and the spec's `x_labels`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub color: Color32,
    pub values: Vec<f64>,
    pub labels: Vec<String>,
    /// Percent series are drawn against the secondary percent axis.
    pub percent: bool,
}

/// A renderer-agnostic chart: categorical x axis plus bar/line series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub x_labels: Vec<String>,
    pub value_axis: String,
    pub percent_axis: Option<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() || self.x_labels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Traffic chart: RPK + ASK bars with a load-factor line
// ---------------------------------------------------------------------------

pub fn traffic_chart(daily: &[DailyTraffic]) -> ChartSpec {
    let x_labels: Vec<String> = daily.iter().map(|d| d.date.to_string()).collect();

    let rpk: Vec<f64> = daily.iter().map(|d| d.rpk).collect();
    let ask: Vec<f64> = daily.iter().map(|d| d.ask).collect();
    let lf: Vec<f64> = daily.iter().map(|d| d.load_factor()).collect();

    let series = vec![
        Series {
            name: "RPK".to_string(),
            kind: SeriesKind::Bar,
            color: color::RPK_BAR,
            labels: rpk.iter().map(|&v| format_number(v)).collect(),
            values: rpk,
            percent: false,
        },
        Series {
            name: "ASK".to_string(),
            kind: SeriesKind::Bar,
            color: color::ASK_BAR,
            labels: ask.iter().map(|&v| format_number(v)).collect(),
            values: ask,
            percent: false,
        },
        Series {
            name: "Load Factor".to_string(),
            kind: SeriesKind::Line,
            color: color::LOAD_FACTOR_LINE,
            labels: lf.iter().map(|&v| format_percent(v)).collect(),
            values: lf,
            percent: true,
        },
    ];

    ChartSpec {
        x_labels,
        value_axis: "RPK / ASK".to_string(),
        percent_axis: Some("Load Factor (%)".to_string()),
        series,
    }
}

// ---------------------------------------------------------------------------
// Quarterly per-company bar charts
// ---------------------------------------------------------------------------

fn quarterly_chart(
    grouped: &BTreeMap<String, BTreeMap<Quarter, QuarterStats>>,
    value_axis: &str,
    value: impl Fn(&QuarterStats) -> f64,
) -> ChartSpec {
    // X axis is the sorted union of quarters across companies; a company
    // without data in a quarter gets a zero-height bar.
    let quarters: Vec<Quarter> = {
        let mut all: Vec<Quarter> = grouped
            .values()
            .flat_map(|by_quarter| by_quarter.keys().copied())
            .collect();
        all.sort();
        all.dedup();
        all
    };

    let series = grouped
        .iter()
        .map(|(company, by_quarter)| {
            let values: Vec<f64> = quarters
                .iter()
                .map(|q| by_quarter.get(q).map(&value).unwrap_or(0.0))
                .collect();
            Series {
                name: company.clone(),
                kind: SeriesKind::Bar,
                color: color::company_color(company),
                labels: values.iter().map(|&v| format_number(v)).collect(),
                values,
                percent: false,
            }
        })
        .collect();

    ChartSpec {
        x_labels: quarters.iter().map(Quarter::to_string).collect(),
        value_axis: value_axis.to_string(),
        percent_axis: None,
        series,
    }
}

pub fn passengers_chart(
    grouped: &BTreeMap<String, BTreeMap<Quarter, QuarterStats>>,
) -> ChartSpec {
    quarterly_chart(grouped, "Passengers", |stats| stats.passengers)
}

pub fn takeoffs_chart(grouped: &BTreeMap<String, BTreeMap<Quarter, QuarterStats>>) -> ChartSpec {
    quarterly_chart(grouped, "Takeoffs", |stats| stats.takeoffs)
}

pub fn destinations_chart(
    grouped: &BTreeMap<String, BTreeMap<Quarter, QuarterStats>>,
) -> ChartSpec {
    quarterly_chart(grouped, "Destinations", |stats| stats.destinations as f64)
}

// ---------------------------------------------------------------------------
// Financial chart: per-company bars across periods
// ---------------------------------------------------------------------------

pub fn financial_chart(by_company: &BTreeMap<String, BTreeMap<String, f64>>) -> ChartSpec {
    let periods: Vec<String> = {
        let mut all: Vec<String> = by_company
            .values()
            .flat_map(|by_period| by_period.keys().cloned())
            .collect();
        all.sort();
        all.dedup();
        all
    };

    let series = by_company
        .iter()
        .map(|(company, by_period)| {
            let values: Vec<f64> = periods
                .iter()
                .map(|p| by_period.get(p).copied().unwrap_or(0.0))
                .collect();
            Series {
                name: company.clone(),
                kind: SeriesKind::Bar,
                color: color::company_color(company),
                labels: values.iter().map(|&v| format_number(v)).collect(),
                values,
                percent: false,
            }
        })
        .collect();

    ChartSpec {
        x_labels: periods,
        value_axis: "Balance".to_string(),
        percent_axis: None,
        series,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn traffic_chart_has_bars_and_percent_line() {
        let daily = vec![
            DailyTraffic { date: date(2023, 1, 1), rpk: 200.0, ask: 300.0 },
            DailyTraffic { date: date(2023, 1, 2), rpk: 150.0, ask: 200.0 },
        ];
        let spec = traffic_chart(&daily);

        assert_eq!(spec.x_labels, vec!["2023-01-01", "2023-01-02"]);
        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.series[0].kind, SeriesKind::Bar);
        assert_eq!(spec.series[2].kind, SeriesKind::Line);
        assert!(spec.series[2].percent);
        assert_eq!(spec.series[2].labels[0], "66.67%");
        assert_eq!(spec.series[0].labels[0], "200");
        assert!(spec.percent_axis.is_some());
    }

    #[test]
    fn quarterly_chart_aligns_companies_on_the_quarter_axis() {
        let mut grouped: BTreeMap<String, BTreeMap<Quarter, QuarterStats>> = BTreeMap::new();
        grouped.entry("AZU".to_string()).or_default().insert(
            Quarter { year: 2023, quarter: 1 },
            QuarterStats { passengers: 1_500.0, takeoffs: 10.0, destinations: 2 },
        );
        grouped.entry("GLO".to_string()).or_default().insert(
            Quarter { year: 2023, quarter: 2 },
            QuarterStats { passengers: 2_000.0, takeoffs: 12.0, destinations: 3 },
        );

        let spec = passengers_chart(&grouped);
        assert_eq!(spec.x_labels, vec!["2023Q1", "2023Q2"]);

        let azu = &spec.series[0];
        assert_eq!(azu.name, "AZU");
        assert_eq!(azu.color, color::company_color("AZU"));
        assert_eq!(azu.values, vec![1_500.0, 0.0]);
        assert_eq!(azu.labels, vec!["1.5K", "0"]);

        let glo = &spec.series[1];
        assert_eq!(glo.values, vec![0.0, 2_000.0]);
    }

    #[test]
    fn unknown_company_series_is_neutral() {
        let mut grouped: BTreeMap<String, BTreeMap<Quarter, QuarterStats>> = BTreeMap::new();
        grouped.entry("AAL".to_string()).or_default().insert(
            Quarter { year: 2023, quarter: 1 },
            QuarterStats::default(),
        );
        let spec = takeoffs_chart(&grouped);
        assert_eq!(spec.series[0].color, color::NEUTRAL);
    }

    #[test]
    fn financial_chart_sorts_periods_and_formats_labels() {
        let mut by_company: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        let azu = by_company.entry("AZU".to_string()).or_default();
        azu.insert("2023 T1".to_string(), 2_300_000.0);
        azu.insert("2022 T4".to_string(), 1_000_000.0);

        let spec = financial_chart(&by_company);
        assert_eq!(spec.x_labels, vec!["2022 T4", "2023 T1"]);
        assert_eq!(spec.series[0].labels, vec!["1.0M", "2.3M"]);
    }

    #[test]
    fn empty_views_make_empty_specs() {
        let spec = passengers_chart(&BTreeMap::new());
        assert!(spec.is_empty());
        let spec = traffic_chart(&[]);
        assert!(spec.is_empty());
    }
}
