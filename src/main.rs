use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use eframe::egui;

use aeroboard::app::DashboardApp;
use aeroboard::data::loader::{self, FINANCIAL_FILE, OPERATIONAL_FILE};
use aeroboard::data::model::Datasets;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let data_dir = Path::new("data");
    let operational = loader::load_operational(&data_dir.join(OPERATIONAL_FILE))
        .with_context(|| format!("loading {OPERATIONAL_FILE}"))?;
    let financial = loader::load_financial(&data_dir.join(FINANCIAL_FILE))
        .with_context(|| format!("loading {FINANCIAL_FILE}"))?;
    log::info!(
        "loaded {} operational rows ({} to {}), {} financial rows ({} periods)",
        operational.len(),
        operational.date_min,
        operational.date_max,
        financial.len(),
        financial.periods.len()
    );

    let datasets = Arc::new(Datasets {
        operational,
        financial,
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Aeroboard – Airline KPIs",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(datasets)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
