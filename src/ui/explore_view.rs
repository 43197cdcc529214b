use egui::{Color32, ComboBox, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use turismo_bogota::localidades::query_map;

use super::{DashboardApp, PALETTE_YELLOW};

const ROW_HEIGHT: f32 = 20.;

impl DashboardApp<'_> {
    pub(crate) fn show_explore_page(&mut self, ui: &mut Ui) {
        ui.heading("Explora localidades");
        self.show_explore_filters(ui);
        ui.separator();

        let data = self.data;
        let query = query_map(
            &data.points,
            &data.localidades,
            &self.explore.selection,
            &self.explore.selected_types,
        );

        ui.label(
            RichText::new(format!(
                "Centro del mapa: {:.3}, {:.3} (zoom {})",
                query.view.center.lat, query.view.center.lon, query.view.zoom
            ))
            .color(Color32::GRAY),
        );
        if let [localidad] = query.localidades.as_slice() {
            let kpi = self.kpis.for_localidad(localidad);
            ui.horizontal(|ui| {
                ui.label(format!("Atractivos turísticos: {}", kpi.attractions));
                ui.separator();
                ui.label(format!("Delitos reportados: {}", kpi.crimes));
                if let Some(price) = kpi.average_price {
                    ui.separator();
                    ui.label(format!("Precio promedio: {:.1}", price));
                }
            });
        }
        ui.label(format!("{} lugares", query.points.len()));

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(140.))
            .column(Column::auto().at_least(100.))
            .column(Column::remainder().at_least(200.))
            .column(Column::auto())
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("Localidad");
                });
                header.col(|ui| {
                    ui.strong("Tipo");
                });
                header.col(|ui| {
                    ui.strong("Nombre");
                });
                header.col(|ui| {
                    ui.strong("Precio");
                });
            })
            .body(|mut body| {
                for point in &query.points {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(&point.localidad);
                        });
                        row.col(|ui| {
                            ui.label(&point.point_type);
                        });
                        row.col(|ui| {
                            ui.label(&point.name)
                                .on_hover_text(point.hover_text());
                        });
                        row.col(|ui| {
                            if let Some(price) = point.price {
                                ui.label(format!("{:.0}", price));
                            }
                        });
                    });
                }
            });
    }

    fn show_explore_filters(&mut self, ui: &mut Ui) {
        let explore = &mut self.explore;
        ui.horizontal(|ui| {
            ui.checkbox(&mut explore.selection.show_all, "Todas las localidades");
            if explore.selection.picker_visible() {
                let selected_text = explore
                    .selection
                    .chosen
                    .clone()
                    .unwrap_or_else(|| "Elige una localidad".to_string());
                ComboBox::from_id_salt("localidad_picker")
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for localidad in &explore.localidades {
                            ui.selectable_value(
                                &mut explore.selection.chosen,
                                Some(localidad.clone()),
                                localidad,
                            );
                        }
                    });
            }
        });

        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Tipos:").color(PALETTE_YELLOW));
            for point_type in &explore.types {
                let mut enabled = explore.selected_types.contains(point_type);
                if ui.checkbox(&mut enabled, point_type).changed() {
                    if enabled {
                        explore.selected_types.push(point_type.clone());
                    } else {
                        explore.selected_types.retain(|t| t != point_type);
                    }
                }
            }
        });
    }
}
