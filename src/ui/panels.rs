use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::AccountLine;
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Top bar: logo, tab navigation, row counts
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let logo = egui::include_image!("../../assets/logo.png");
        ui.add(egui::Image::new(logo).max_height(28.0));
        ui.separator();

        if ui
            .selectable_label(state.tab == Tab::Operational, "Operational KPIs")
            .clicked()
        {
            state.tab = Tab::Operational;
        }
        if ui
            .selectable_label(state.tab == Tab::Financial, "Financial KPIs")
            .clicked()
        {
            state.tab = Tab::Financial;
        }

        ui.separator();
        ui.label(format!(
            "{} operational rows, {} financial rows",
            state.datasets.operational.len(),
            state.datasets.financial.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Operational sidebar
// ---------------------------------------------------------------------------

pub fn operational_sidebar(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Operational KPIs");
    ui.separator();

    // ---- Date range ----
    ui.strong("Period");
    let mut start = state.ops_filter.start;
    let mut end = state.ops_filter.end;
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        changed |= ui
            .add(DatePickerButton::new(&mut start).id_salt("date_start"))
            .changed();
        ui.label("to");
        changed |= ui
            .add(DatePickerButton::new(&mut end).id_salt("date_end"))
            .changed();
    });
    if changed {
        state.set_date_range(start, end);
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Nationality ----
            let nationalities = state.datasets.operational.nationalities.clone();
            let n_selected = state.ops_filter.nationalities.len();
            let header = format!("Nationality  ({n_selected}/{})", nationalities.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("nationality_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for nationality in &nationalities {
                        let mut checked = state.ops_filter.nationalities.contains(nationality);
                        if ui.checkbox(&mut checked, nationality).changed() {
                            state.toggle_nationality(nationality);
                        }
                    }
                });

            // ---- Company ----
            let choices = state.company_choices.clone();
            let n_selected = state.ops_filter.companies.len();
            let header = format!("Company  ({n_selected}/{})", choices.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("company_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_companies();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_companies();
                        }
                    });
                    for company in &choices {
                        let mut checked = state.ops_filter.companies.contains(company);
                        let text = RichText::new(company)
                            .color(crate::color::company_color(company));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_company(company);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Financial sidebar
// ---------------------------------------------------------------------------

pub fn financial_sidebar(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Financial KPIs");
    ui.separator();

    // ---- Period ----
    ui.strong("Period");
    let periods = state.datasets.financial.periods.clone();
    let current = state.fin_filter.period.clone();
    egui::ComboBox::from_id_salt("fin_period")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for period in &periods {
                if ui.selectable_label(current == *period, period).clicked() {
                    state.set_period(period.clone());
                }
            }
        });
    ui.separator();

    // ---- Company ----
    let companies = state.datasets.financial.companies.clone();
    let n_selected = state.fin_filter.companies.len();
    let header = format!("Company  ({n_selected}/{})", companies.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("fin_company_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_fin_companies();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_fin_companies();
                }
            });
            for company in &companies {
                let mut checked = state.fin_filter.companies.contains(company);
                let text =
                    RichText::new(company).color(crate::color::company_color(company));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_fin_company(company);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// KPI value boxes
// ---------------------------------------------------------------------------

/// One KPI value box: small title, big value.
pub fn value_box(ui: &mut Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(title).small());
            ui.heading(value);
        });
    });
}

// ---------------------------------------------------------------------------
// Account-line selector above the financial chart
// ---------------------------------------------------------------------------

pub fn account_line_selector(ui: &mut Ui, state: &mut AppState) {
    let current = state.fin_filter.line;
    egui::ComboBox::from_id_salt("fin_account_line")
        .width(320.0)
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for line in AccountLine::ALL {
                if ui.selectable_label(current == line, line.label()).clicked() {
                    state.set_account_line(line);
                }
            }
        });
}
