use std::collections::BTreeSet;
use std::io::Cursor;

use chrono::NaiveDate;

use aeroboard::data::agg::{ops_summary, quarterly_by_company};
use aeroboard::data::filter::{operational_indices, OpsFilter};
use aeroboard::data::loader::read_operational;
use aeroboard::format::{format_load_factor, format_number};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn companies(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

#[test]
fn two_row_scenario_end_to_end() {
    let input = "\
dt_referencia,EMPRESA (SIGLA),EMPRESA (NACIONALIDADE),ASK,RPK,PASSAGEIROS PAGOS,PASSAGEIROS GRÁTIS,DECOLAGENS,AEROPORTO DE DESTINO (SIGLA)
2023-01-01,AZU,BRASILEIRA,100,50,10,0,1,GRU
2023-01-02,GLO,BRASILEIRA,200,150,20,2,2,GIG
";
    let ds = read_operational(Cursor::new(input)).expect("read operational");

    let filter = OpsFilter {
        start: date(2023, 1, 1),
        end: date(2023, 1, 2),
        nationalities: companies(&["BRASILEIRA"]),
        companies: companies(&["AZU", "GLO"]),
    };
    let indices = operational_indices(&ds, &filter);
    let summary = ops_summary(&ds, &indices);

    assert_eq!(format_number(summary.ask), "300");
    assert_eq!(format_number(summary.rpk), "200");
    assert_eq!(format_load_factor(summary.rpk, summary.ask), "66.67%");
}

#[test]
fn quarterly_grouping_reconciles_with_headline_totals() {
    let input = "\
dt_referencia,EMPRESA (SIGLA),EMPRESA (NACIONALIDADE),ASK,RPK,PASSAGEIROS PAGOS,PASSAGEIROS GRÁTIS,DECOLAGENS,AEROPORTO DE DESTINO (SIGLA)
2023-01-01,AZU,BRASILEIRA,100,50,100,10,5,GRU
2023-03-31,AZU,BRASILEIRA,100,60,110,5,5,REC
2023-04-01,AZU,BRASILEIRA,100,70,120,0,6,GRU
2023-07-01,GLO,BRASILEIRA,200,150,200,20,8,GIG
2023-12-31,GLO,BRASILEIRA,200,160,210,15,8,SSA
";
    let ds = read_operational(Cursor::new(input)).expect("read operational");

    let filter = OpsFilter {
        start: ds.date_min,
        end: ds.date_max,
        nationalities: companies(&["BRASILEIRA"]),
        companies: companies(&["AZU", "GLO"]),
    };
    let indices = operational_indices(&ds, &filter);

    let total = ops_summary(&ds, &indices).passengers;
    let grouped: f64 = quarterly_by_company(&ds, &indices)
        .values()
        .flat_map(|by_quarter| by_quarter.values())
        .map(|stats| stats.passengers)
        .sum();

    assert_eq!(grouped, total);
    assert_eq!(total, 790.0);
}

#[test]
fn date_range_restriction_composes_with_company_selection() {
    let input = "\
dt_referencia,EMPRESA (SIGLA),EMPRESA (NACIONALIDADE),ASK,RPK,PASSAGEIROS PAGOS,PASSAGEIROS GRÁTIS,DECOLAGENS,AEROPORTO DE DESTINO (SIGLA)
2023-01-01,AZU,BRASILEIRA,100,50,10,0,1,GRU
2023-02-01,AZU,BRASILEIRA,100,50,10,0,1,GRU
2023-01-01,GLO,BRASILEIRA,200,150,20,2,2,GIG
";
    let ds = read_operational(Cursor::new(input)).expect("read operational");

    let january_only = OpsFilter {
        start: date(2023, 1, 1),
        end: date(2023, 1, 31),
        nationalities: companies(&["BRASILEIRA"]),
        companies: companies(&["AZU", "GLO"]),
    };
    let summary = ops_summary(&ds, &operational_indices(&ds, &january_only));
    assert_eq!(summary.ask, 300.0);

    let azu_only = OpsFilter {
        companies: companies(&["AZU"]),
        ..january_only
    };
    let summary = ops_summary(&ds, &operational_indices(&ds, &azu_only));
    assert_eq!(summary.ask, 100.0);
}
