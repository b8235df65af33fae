use std::sync::Arc;

use eframe::egui;

use crate::chart;
use crate::data::model::Datasets;
use crate::format::{format_load_factor, format_number};
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(datasets: Arc<Datasets>) -> Self {
        DashboardApp {
            state: AppState::new(datasets),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: logo + tab navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters for the active tab ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| match self.state.tab {
                Tab::Operational => panels::operational_sidebar(ui, &mut self.state),
                Tab::Financial => panels::financial_sidebar(ui, &mut self.state),
            });

        // ---- Central panel: KPI boxes + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.state.tab {
                Tab::Operational => operational_page(ui, &mut self.state),
                Tab::Financial => financial_page(ui, &mut self.state),
            });
        });
    }
}

// ---------------------------------------------------------------------------
// Operational page
// ---------------------------------------------------------------------------

fn operational_page(ui: &mut egui::Ui, state: &mut AppState) {
    // Build everything from the memoized view first so the borrow ends
    // before any widget mutates state.
    let (summary, traffic, passengers, takeoffs, destinations) = {
        let view = state.ops_view();
        (
            view.summary.clone(),
            chart::traffic_chart(&view.daily),
            chart::passengers_chart(&view.quarterly),
            chart::takeoffs_chart(&view.quarterly),
            chart::destinations_chart(&view.quarterly),
        )
    };

    ui.columns(6, |cols| {
        panels::value_box(&mut cols[0], "ASK", &format_number(summary.ask));
        panels::value_box(&mut cols[1], "RPK", &format_number(summary.rpk));
        panels::value_box(
            &mut cols[2],
            "Load Factor",
            &format_load_factor(summary.rpk, summary.ask),
        );
        panels::value_box(&mut cols[3], "Passengers", &format_number(summary.passengers));
        panels::value_box(&mut cols[4], "Takeoffs", &format_number(summary.takeoffs));
        panels::value_box(
            &mut cols[5],
            "Destinations",
            &format_number(summary.destinations as f64),
        );
    });
    ui.add_space(8.0);

    ui.strong("RPK, ASK and Load Factor");
    plot::chart(ui, "traffic_chart", 280.0, &traffic);
    ui.add_space(8.0);

    ui.columns(3, |cols| {
        cols[0].strong("Passengers");
        plot::chart(&mut cols[0], "passengers_chart", 240.0, &passengers);
        cols[1].strong("Takeoffs");
        plot::chart(&mut cols[1], "takeoffs_chart", 240.0, &takeoffs);
        cols[2].strong("Destinations");
        plot::chart(&mut cols[2], "destinations_chart", 240.0, &destinations);
    });
}

// ---------------------------------------------------------------------------
// Financial page
// ---------------------------------------------------------------------------

fn financial_page(ui: &mut egui::Ui, state: &mut AppState) {
    let (balances, fin_chart) = {
        let view = state.fin_view();
        (view.balances.clone(), chart::financial_chart(&view.series))
    };

    ui.columns(4, |cols| {
        for (i, (line, value)) in balances.iter().enumerate() {
            panels::value_box(&mut cols[i], line.title(), &format_number(*value));
        }
    });
    ui.add_space(8.0);

    panels::account_line_selector(ui, state);
    plot::chart(ui, "financial_chart", 320.0, &fin_chart);
}
