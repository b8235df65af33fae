/// UI layer: egui widgets for filters, KPI value boxes, and charts.

pub mod panels;
pub mod plot;
