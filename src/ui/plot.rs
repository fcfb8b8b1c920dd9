use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, Points};

use tv_dashboard::state::DashboardState;
use tv_dashboard::view::ViewSnapshot;

use crate::color::{generate_palette, highlight_color, ACCENT, OUTLIER};

/// Render `contents` with the current snapshot, or a hint when there is none.
fn with_snapshot(
    ui: &mut Ui,
    state: &DashboardState,
    contents: impl FnOnce(&mut Ui, &ViewSnapshot),
) {
    match &state.snapshot {
        Some(snapshot) => contents(ui, snapshot),
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a catalog to explore  (File → Open…)");
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, state: &DashboardState) {
    with_snapshot(ui, state, |ui, snap| {
        ui.heading(snap.title());

        // Tooltip: nearest TV to the hovered position.
        let tooltip_points = snap.scatter.clone();
        Plot::new("scatter_plot")
            .x_axis_label(snap.x_axis.label())
            .y_axis_label(snap.y_axis.label())
            .height(ui.available_height() * 0.95)
            .label_formatter(move |_name: &str, value: &PlotPoint| {
                tooltip_points
                    .iter()
                    .min_by(|a, b| {
                        let da = (a.x - value.x).powi(2) + (a.y - value.y).powi(2);
                        let db = (b.x - value.x).powi(2) + (b.y - value.y).powi(2);
                        da.total_cmp(&db)
                    })
                    .map(|p| format!("Name: {}\nPrice: {:.0}", p.name, p.price))
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for point in &snap.scatter {
                    plot_ui.points(
                        Points::new(vec![[point.x, point.y]])
                            .radius(3.5)
                            .color(highlight_color(point.color, point.opacity)),
                    );
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Price histogram
// ---------------------------------------------------------------------------

pub fn price_histogram(ui: &mut Ui, state: &DashboardState) {
    with_snapshot(ui, state, |ui, snap| {
        ui.heading("Histogram TV prices");

        let bars: Vec<Bar> = snap
            .histogram
            .bins()
            .map(|(left, right, count)| {
                Bar::new((left + right) / 2.0, count as f64)
                    .width(right - left)
                    .fill(ACCENT.gamma_multiply(0.9))
                    .stroke(Stroke::new(1.0, Color32::GRAY))
            })
            .collect();

        Plot::new("price_histogram")
            .x_axis_label("Price")
            .y_axis_label("Number of TVs")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Price"));
            });
    });
}

// ---------------------------------------------------------------------------
// Box plot of price per brand
// ---------------------------------------------------------------------------

pub fn brand_box_plot(ui: &mut Ui, state: &DashboardState) {
    with_snapshot(ui, state, |ui, snap| {
        ui.heading("Price by brand");

        let groups = &snap.box_plot.groups;
        let palette = generate_palette(groups.len());

        Plot::new("brand_box_plot")
            .legend(Legend::default())
            .y_axis_label("Price")
            .height(ui.available_height() * 0.95)
            .show(ui, |plot_ui| {
                for (i, (g, color)) in groups.iter().zip(&palette).enumerate() {
                    let label = g.group.to_string();
                    let elem = BoxElem::new(
                        i as f64,
                        BoxSpread::new(g.whisker_low, g.q1, g.q2, g.q3, g.whisker_high),
                    )
                    .name(&label)
                    .box_width(0.7)
                    .whisker_width(0.2)
                    .fill(color.gamma_multiply(0.6))
                    .stroke(Stroke::new(1.0, Color32::BLACK));
                    plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&label).color(*color));

                    let outliers: Vec<[f64; 2]> = snap
                        .box_plot
                        .outliers
                        .iter()
                        .filter(|o| o.group == g.group)
                        .map(|o| [i as f64, o.value])
                        .collect();
                    if !outliers.is_empty() {
                        plot_ui.points(
                            Points::new(outliers)
                                .radius(3.0)
                                .color(OUTLIER.gamma_multiply(0.5)),
                        );
                    }
                }
            });
    });
}
