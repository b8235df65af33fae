use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use aeroboard::data::loader::{FINANCIAL_FILE, OPERATIONAL_FILE};
use aeroboard::data::model::{AccountLine, FinancialRecord, OperationalRecord};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform multiplier in `1 ± spread`.
    fn wobble(&mut self, spread: f64) -> f64 {
        1.0 + (self.next_f64() - 0.5) * 2.0 * spread
    }
}

struct Carrier {
    code: &'static str,
    nationality: &'static str,
    monthly_ask: f64,
    destinations: &'static [&'static str],
}

const CARRIERS: [Carrier; 5] = [
    Carrier {
        code: "AZU",
        nationality: "BRASILEIRA",
        monthly_ask: 2.1e9,
        destinations: &["GRU", "VCP", "REC", "CNF", "SSA", "POA"],
    },
    Carrier {
        code: "GLO",
        nationality: "BRASILEIRA",
        monthly_ask: 1.9e9,
        destinations: &["GRU", "CGH", "BSB", "GIG", "SSA"],
    },
    Carrier {
        code: "TAM",
        nationality: "BRASILEIRA",
        monthly_ask: 2.4e9,
        destinations: &["GRU", "CGH", "BSB", "GIG", "CWB", "FOR"],
    },
    Carrier {
        code: "AAL",
        nationality: "ESTRANGEIRA",
        monthly_ask: 0.6e9,
        destinations: &["GRU", "MIA", "JFK"],
    },
    Carrier {
        code: "AFR",
        nationality: "ESTRANGEIRA",
        monthly_ask: 0.4e9,
        destinations: &["GRU", "CDG"],
    },
];

fn write_operational(path: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut rows = 0;

    for year in 2022..=2024 {
        for month in 1..=12u32 {
            let date = NaiveDate::from_ymd_opt(year, month, 1)
                .context("building reference date")?;
            // Southern-hemisphere seasonality: peaks in January and July.
            let seasonal = 1.0
                + 0.15 * ((month as f64 - 1.0) * std::f64::consts::PI / 6.0).cos().abs();

            for carrier in &CARRIERS {
                for destination in carrier.destinations {
                    let ask = carrier.monthly_ask / carrier.destinations.len() as f64
                        * seasonal
                        * rng.wobble(0.08);
                    let load = 0.78 + rng.next_f64() * 0.09;
                    let rpk = ask * load;
                    let paid = (rpk / 1_100.0).round();
                    let free = (paid * 0.02).round();
                    let takeoffs = (paid / 150.0).round();

                    writer.serialize(OperationalRecord {
                        date,
                        company: carrier.code.to_string(),
                        nationality: carrier.nationality.to_string(),
                        ask: Some(ask.round()),
                        rpk: Some(rpk.round()),
                        paid_passengers: Some(paid),
                        free_passengers: Some(free),
                        takeoffs: Some(takeoffs),
                        destination: Some(destination.to_string()),
                    })?;
                    rows += 1;
                }
            }
        }
    }

    writer.flush()?;
    Ok(rows)
}

fn write_financial(path: &Path, rng: &mut SimpleRng) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut rows = 0;

    let revenue_base = [("AZU", 4.2e9), ("GLO", 3.8e9), ("TAM", 5.1e9)];

    let mut quarter_index = 0;
    for year in 2022..=2024 {
        for quarter in 1..=4 {
            let period = format!("{year} T{quarter}");
            let growth = 1.0 + 0.02 * quarter_index as f64;
            quarter_index += 1;

            for (company, base) in revenue_base {
                let revenue = base * growth * rng.wobble(0.05);
                // Costs carry their accounting sign in the source data.
                let costs = -revenue * (0.70 + rng.next_f64() * 0.06);
                let gross = revenue + costs;
                let net = gross - revenue * (0.04 + rng.next_f64() * 0.04);

                let lines = [
                    (AccountLine::NetOperatingRevenue, revenue),
                    (AccountLine::CostOfServices, costs),
                    (AccountLine::GrossProfit, gross),
                    (AccountLine::NetResult, net),
                ];

                for balance_kind in ["saldo_inicio_periodo", "saldo_fim_periodo"] {
                    for (line, value) in lines {
                        writer.serialize(FinancialRecord {
                            period: period.clone(),
                            company: company.to_string(),
                            balance_kind: balance_kind.to_string(),
                            account: line.label().to_string(),
                            value: Some(value.round()),
                        })?;
                        rows += 1;
                    }
                }
            }
        }
    }

    writer.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let data_dir = Path::new("data");
    std::fs::create_dir_all(data_dir).context("creating data directory")?;

    let operational_path = data_dir.join(OPERATIONAL_FILE);
    let n_operational = write_operational(&operational_path, &mut rng)?;
    println!(
        "Wrote {n_operational} operational rows to {}",
        operational_path.display()
    );

    let financial_path = data_dir.join(FINANCIAL_FILE);
    let n_financial = write_financial(&financial_path, &mut rng)?;
    println!(
        "Wrote {n_financial} financial rows to {}",
        financial_path.display()
    );

    Ok(())
}
