use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OperationalRecord – one row of the ANAC statistics table
// ---------------------------------------------------------------------------

/// One company/date/route entry of the operational dataset.
///
/// Numeric fields are optional in the source extract; a missing value
/// counts as zero downstream. Field names follow the published ANAC
/// column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalRecord {
    #[serde(rename = "dt_referencia")]
    pub date: NaiveDate,
    #[serde(rename = "EMPRESA (SIGLA)")]
    pub company: String,
    #[serde(rename = "EMPRESA (NACIONALIDADE)")]
    pub nationality: String,
    #[serde(rename = "ASK")]
    pub ask: Option<f64>,
    #[serde(rename = "RPK")]
    pub rpk: Option<f64>,
    #[serde(rename = "PASSAGEIROS PAGOS")]
    pub paid_passengers: Option<f64>,
    #[serde(rename = "PASSAGEIROS GRÁTIS")]
    pub free_passengers: Option<f64>,
    #[serde(rename = "DECOLAGENS")]
    pub takeoffs: Option<f64>,
    #[serde(rename = "AEROPORTO DE DESTINO (SIGLA)")]
    pub destination: Option<String>,
}

impl OperationalRecord {
    /// Paid + free passengers, missing values counting as zero.
    pub fn passengers(&self) -> f64 {
        self.paid_passengers.unwrap_or(0.0) + self.free_passengers.unwrap_or(0.0)
    }
}

// ---------------------------------------------------------------------------
// FinancialRecord – one row of the quarterly statements table
// ---------------------------------------------------------------------------

/// Balance type carrying the period-start snapshot used by every KPI.
pub const PERIOD_START_BALANCE: &str = "saldo_inicio_periodo";

/// One company/period/account-line entry of the financial dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "tipo_saldo")]
    pub balance_kind: String,
    #[serde(rename = "descricao_conta")]
    pub account: String,
    #[serde(rename = "valor_saldo")]
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// AccountLine – the four statement lines surfaced by the dashboard
// ---------------------------------------------------------------------------

/// The income-statement lines exposed as financial KPIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccountLine {
    NetOperatingRevenue,
    CostOfServices,
    GrossProfit,
    NetResult,
}

impl AccountLine {
    pub const ALL: [AccountLine; 4] = [
        AccountLine::NetOperatingRevenue,
        AccountLine::CostOfServices,
        AccountLine::GrossProfit,
        AccountLine::NetResult,
    ];

    /// Exact `descricao_conta` label this line matches in the dataset.
    pub fn label(&self) -> &'static str {
        match self {
            AccountLine::NetOperatingRevenue => "(=) Receita Operacional Líquida",
            AccountLine::CostOfServices => "(-) Custos dos Serviços Prestados",
            AccountLine::GrossProfit => "(=) Lucro Bruto",
            AccountLine::NetResult => "(=) Resultado Líquido do Período",
        }
    }

    /// Display title for the KPI value box.
    pub fn title(&self) -> &'static str {
        match self {
            AccountLine::NetOperatingRevenue => "Net Operating Revenue",
            AccountLine::CostOfServices => "Cost of Services",
            AccountLine::GrossProfit => "Gross Profit",
            AccountLine::NetResult => "Net Result",
        }
    }

    /// Costs are stored with their accounting sign; the dashboard shows
    /// them as positive magnitudes.
    pub fn inverts_sign(&self) -> bool {
        matches!(self, AccountLine::CostOfServices)
    }
}

impl fmt::Display for AccountLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Quarter – calendar bucketing key for the grouped charts
// ---------------------------------------------------------------------------

/// Calendar quarter, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quarter {
    pub year: i32,
    pub quarter: u8,
}

impl Quarter {
    pub fn from_date(date: NaiveDate) -> Self {
        Quarter {
            year: date.year(),
            quarter: (date.month0() / 3 + 1) as u8,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

// ---------------------------------------------------------------------------
// Datasets – the two tables with their precomputed indices
// ---------------------------------------------------------------------------

/// The operational table plus the bounds and choice lists the filter
/// widgets need.
#[derive(Debug, Clone)]
pub struct OperationalDataset {
    pub records: Vec<OperationalRecord>,
    /// Earliest reference date in the table.
    pub date_min: NaiveDate,
    /// Latest reference date in the table.
    pub date_max: NaiveDate,
    /// Sorted unique nationality labels.
    pub nationalities: Vec<String>,
}

impl OperationalDataset {
    /// Build the precomputed indices from loaded records.
    ///
    /// Returns `None` for an empty table: the date bounds that seed the
    /// filter state would not exist.
    pub fn from_records(records: Vec<OperationalRecord>) -> Option<Self> {
        let date_min = records.iter().map(|r| r.date).min()?;
        let date_max = records.iter().map(|r| r.date).max()?;

        let nationalities: Vec<String> = records
            .iter()
            .map(|r| r.nationality.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Some(OperationalDataset {
            records,
            date_min,
            date_max,
            nationalities,
        })
    }

    /// Sorted unique company codes whose nationality is in the given set.
    pub fn companies_for(&self, nationalities: &BTreeSet<String>) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| nationalities.contains(&r.nationality))
            .map(|r| r.company.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The financial table plus its choice lists.
#[derive(Debug, Clone)]
pub struct FinancialDataset {
    pub records: Vec<FinancialRecord>,
    /// Period labels sorted descending, newest first.
    pub periods: Vec<String>,
    /// Sorted unique company codes.
    pub companies: Vec<String>,
}

impl FinancialDataset {
    pub fn from_records(records: Vec<FinancialRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut periods: Vec<String> = records
            .iter()
            .map(|r| r.period.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        periods.reverse();

        let companies: Vec<String> = records
            .iter()
            .map(|r| r.company.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Some(FinancialDataset {
            records,
            periods,
            companies,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Both tables, loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub operational: OperationalDataset,
    pub financial: FinancialDataset,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn op(company: &str, nationality: &str, day: NaiveDate) -> OperationalRecord {
        OperationalRecord {
            date: day,
            company: company.to_string(),
            nationality: nationality.to_string(),
            ask: Some(1.0),
            rpk: Some(1.0),
            paid_passengers: Some(10.0),
            free_passengers: None,
            takeoffs: Some(1.0),
            destination: Some("GRU".to_string()),
        }
    }

    #[test]
    fn quarter_boundaries() {
        assert_eq!(Quarter::from_date(date(2023, 1, 1)).to_string(), "2023Q1");
        assert_eq!(Quarter::from_date(date(2023, 3, 31)).to_string(), "2023Q1");
        assert_eq!(Quarter::from_date(date(2023, 4, 1)).to_string(), "2023Q2");
        assert_eq!(Quarter::from_date(date(2023, 12, 31)).to_string(), "2023Q4");
    }

    #[test]
    fn quarters_order_chronologically() {
        let q4_2022 = Quarter::from_date(date(2022, 11, 15));
        let q1_2023 = Quarter::from_date(date(2023, 2, 15));
        assert!(q4_2022 < q1_2023);
    }

    #[test]
    fn account_line_labels_match_statement_rows() {
        assert_eq!(
            AccountLine::NetOperatingRevenue.label(),
            "(=) Receita Operacional Líquida"
        );
        assert_eq!(
            AccountLine::CostOfServices.label(),
            "(-) Custos dos Serviços Prestados"
        );
        assert!(AccountLine::CostOfServices.inverts_sign());
        assert!(!AccountLine::GrossProfit.inverts_sign());
    }

    #[test]
    fn operational_dataset_precomputes_bounds_and_choices() {
        let ds = OperationalDataset::from_records(vec![
            op("GLO", "BRASILEIRA", date(2023, 3, 1)),
            op("AZU", "BRASILEIRA", date(2023, 1, 1)),
            op("AAL", "ESTRANGEIRA", date(2023, 2, 1)),
        ])
        .expect("non-empty");

        assert_eq!(ds.date_min, date(2023, 1, 1));
        assert_eq!(ds.date_max, date(2023, 3, 1));
        assert_eq!(ds.nationalities, vec!["BRASILEIRA", "ESTRANGEIRA"]);

        let domestic: BTreeSet<String> = ["BRASILEIRA".to_string()].into_iter().collect();
        assert_eq!(ds.companies_for(&domestic), vec!["AZU", "GLO"]);
    }

    #[test]
    fn empty_tables_are_rejected() {
        assert!(OperationalDataset::from_records(Vec::new()).is_none());
        assert!(FinancialDataset::from_records(Vec::new()).is_none());
    }

    #[test]
    fn financial_periods_sort_newest_first() {
        let rec = |period: &str, company: &str| FinancialRecord {
            period: period.to_string(),
            company: company.to_string(),
            balance_kind: PERIOD_START_BALANCE.to_string(),
            account: AccountLine::GrossProfit.label().to_string(),
            value: Some(1.0),
        };
        let ds = FinancialDataset::from_records(vec![
            rec("2023 T1", "GLO"),
            rec("2023 T2", "AZU"),
            rec("2022 T4", "AZU"),
        ])
        .expect("non-empty");

        assert_eq!(ds.periods, vec!["2023 T2", "2023 T1", "2022 T4"]);
        assert_eq!(ds.companies, vec!["AZU", "GLO"]);
    }
}
