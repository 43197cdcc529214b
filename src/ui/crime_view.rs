use egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use super::{DashboardApp, PALETTE_RED, PALETTE_YELLOW};

const CHART_HEIGHT: f32 = 320.;

impl DashboardApp<'_> {
    pub(crate) fn show_crime_page(&self, ui: &mut Ui) {
        ui.heading("Delitos en Bogotá");
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Delitos reportados: {}", self.kpis.total_crimes))
                    .size(16.)
                    .color(PALETTE_RED),
            );
            ui.separator();
            ui.label(
                RichText::new(format!(
                    "Atractivos turísticos: {}",
                    self.kpis.total_attractions
                ))
                .size(16.)
                .color(PALETTE_YELLOW),
            );
            if let Some(price) = self.kpis.average_price {
                ui.separator();
                ui.label(RichText::new(format!("Precio promedio: {:.1}", price)).size(16.));
            }
        });
        ui.separator();

        let bars = self
            .kpis
            .crimes_by_localidad
            .iter()
            .enumerate()
            .map(|(i, (localidad, total))| {
                Bar::new(i as f64, *total as f64)
                    .name(localidad)
                    .fill(PALETTE_RED)
            })
            .collect();
        let chart = BarChart::new("Delitos por localidad", bars).width(0.7);

        Plot::new("crimes_by_localidad")
            .height(CHART_HEIGHT)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .include_y(0.)
            .show_grid(false)
            .show(ui, |plot_ui| plot_ui.bar_chart(chart));

        ui.add_space(8.);
        ui.strong("Delitos por tipo");
        egui::Grid::new("crimes_by_type").striped(true).show(ui, |ui| {
            for (delito, total) in &self.kpis.crimes_by_type {
                ui.label(delito);
                ui.label(total.to_string());
                ui.end_row();
            }
        });
    }
}
