use eframe::egui;

use tv_dashboard::state::DashboardState;

use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TvDashboardApp {
    pub state: DashboardState,
}

impl TvDashboardApp {
    pub fn new(state: DashboardState) -> Self {
        Self { state }
    }
}

impl eframe::App for TvDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: price histogram ----
        egui::TopBottomPanel::bottom("histogram_panel")
            .default_height(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                plot::price_histogram(ui, &self.state);
            });

        // ---- Central panel: scatter + box plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                plot::scatter_plot(&mut cols[0], &self.state);
                plot::brand_box_plot(&mut cols[1], &self.state);
            });
        });
    }
}
