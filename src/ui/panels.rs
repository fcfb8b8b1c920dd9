use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use tv_dashboard::data::filter::HdType;
use tv_dashboard::data::model::{Attribute, Brand};
use tv_dashboard::state::DashboardState;

use crate::color::highlight_color;

// ---------------------------------------------------------------------------
// Left side panel – control widgets
// ---------------------------------------------------------------------------

/// Render the left control panel. Widgets edit a copy of the controls; the
/// copy is applied once at the end so every frame triggers at most one
/// recomputation.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("Filters");
    ui.separator();

    if state.catalog.is_none() {
        ui.label("No catalog loaded.");
        return;
    }

    let mut controls = state.controls.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let c = &mut controls.criteria;
            slider(ui, &mut c.min_price, 0.0..=3_000_000.0, 10_000.0, "Minimum price");
            slider(ui, &mut c.max_price, 0.0..=3_000_000.0, 10_000.0, "Maximum price");
            slider(ui, &mut c.diag_min, 0.0..=218.0, 10.0, "Minimum length of diagonal");
            slider(ui, &mut c.vol_min, 0.0..=80.0, 5.0, "Minimum volume");
            slider(ui, &mut c.pix_min, 0.0..=8_200_000.0, 10_000.0, "Minimum number of pixels");
            slider(ui, &mut c.energy_max, 0.0..=420.0, 20.0, "Max energy consumed (kWh/year)");
            slider(ui, &mut c.weight_max, 0.0..=100.0, 5.0, "Max weight (kg)");
            slider(ui, &mut c.hdmi_min, 0.0..=4.0, 1.0, "Minimum number of HDMI ports");
            slider(ui, &mut c.usb_min, 0.0..=3.0, 1.0, "Minimum number of USB ports");
            ui.separator();

            ui.strong("Type of HD");
            egui::ComboBox::from_id_salt("hd_type")
                .selected_text(c.hd_type.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for t in HdType::ALL {
                        ui.selectable_value(&mut c.hd_type, t, t.label());
                    }
                });
            ui.checkbox(&mut c.require_3d, "3D TV only");
            ui.separator();

            ui.strong("Axes");
            axis_combo(ui, "x_axis", "X Axis", &mut controls.x_axis);
            axis_combo(ui, "y_axis", "Y Axis", &mut controls.y_axis);
            ui.separator();

            ui.strong("Highlight brands");
            for brand in Brand::SELECTABLE {
                let mut checked = controls.criteria.selected_brands.contains(&brand);
                if ui.checkbox(&mut checked, brand.label()).changed() {
                    controls.toggle_brand(brand);
                }
            }
            ui.separator();

            selection_table(ui, state);
        });

    state.apply_controls(controls);
}

fn slider(ui: &mut Ui, value: &mut f64, range: RangeInclusive<f64>, step: f64, label: &str) {
    ui.add(egui::Slider::new(value, range).step_by(step).text(label));
}

fn axis_combo(ui: &mut Ui, id: &str, label: &str, axis: &mut Attribute) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(axis.label())
            .show_ui(ui, |ui: &mut Ui| {
                for a in Attribute::ALL {
                    ui.selectable_value(axis, a, a.label());
                }
            });
    });
}

/// Compact list of the currently selected TVs.
fn selection_table(ui: &mut Ui, state: &DashboardState) {
    let Some(snapshot) = &state.snapshot else {
        return;
    };

    egui::CollapsingHeader::new(RichText::new(snapshot.title()).strong())
        .id_salt("selection_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::remainder())
                .column(Column::auto())
                .header(18.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Name");
                    });
                    header.col(|ui| {
                        ui.strong("Price");
                    });
                })
                .body(|body| {
                    body.rows(18.0, snapshot.scatter.len(), |mut row| {
                        let point = &snapshot.scatter[row.index()];
                        row.col(|ui| {
                            let c = highlight_color(point.color, point.opacity);
                            ui.label(RichText::new(&point.name).color(c));
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.0}", point.price));
                        });
                    });
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(catalog), Some(snapshot)) = (&state.catalog, &state.snapshot) {
            ui.label(format!(
                "{} TVs loaded, {}",
                catalog.len(),
                snapshot.title()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open TV catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match tv_dashboard::data::loader::load_file(&path) {
            Ok(catalog) => state.set_catalog(catalog),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
