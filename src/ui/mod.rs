mod crime_view;
mod explore_view;
mod questionnaire_view;

use egui::{Color32, RichText, Ui, Visuals, style::Widgets};
use log::{debug, error};
use turismo_bogota::{
    DashboardData, QuestionnaireSession, Route, ScoringModel,
    config::AppConfig,
    localidades::{DistrictSelection, KpiSummary, all_localidades, all_types},
    questionnaire::NUMERIC_COUNT,
    routing::SIDEBAR_LINKS,
};

pub(crate) const PALETTE_NIGHT: Color32 = Color32::from_rgb(18, 22, 28);
pub(crate) const PALETTE_SLATE: Color32 = Color32::from_rgb(38, 44, 54);
pub(crate) const PALETTE_YELLOW: Color32 = Color32::from_rgb(252, 209, 22);
pub(crate) const PALETTE_RED: Color32 = Color32::from_rgb(206, 17, 38);

const SIDEBAR_WIDTH: f32 = 220.;

/// Filters of the explore page.
pub(crate) struct ExploreState {
    selection: DistrictSelection,
    localidades: Vec<String>,
    types: Vec<String>,
    selected_types: Vec<String>,
}

/// Text buffers behind the questionnaire widgets.
pub(crate) struct QuestionnaireInputs {
    numbers: [String; NUMERIC_COUNT],
    number_errors: [Option<String>; NUMERIC_COUNT],
}

/// `DashboardApp` renders the sidebar and the page of the current route.
///
/// The loaded data set and the profile model are borrowed for the lifetime of
/// the window; per-visitor state lives in the questionnaire session.
pub struct DashboardApp<'a> {
    data: &'a DashboardData,
    app_config: AppConfig,
    route: Route,
    explore: ExploreState,
    session: QuestionnaireSession<'a, ScoringModel>,
    inputs: QuestionnaireInputs,
    kpis: KpiSummary,
}

impl<'a> DashboardApp<'a> {
    pub fn new(
        data: &'a DashboardData,
        model: &'a ScoringModel,
        app_config: AppConfig,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_YELLOW,
            faint_bg_color: PALETTE_SLATE,
            extreme_bg_color: PALETTE_SLATE,
            panel_fill: PALETTE_NIGHT,
            button_frame: true,
            widgets: Widgets::dark(),
            striped: true,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        let types = all_types(&data.points);
        let explore = ExploreState {
            selection: DistrictSelection::all(),
            localidades: all_localidades(&data.points),
            selected_types: types.clone(),
            types,
        };

        Self {
            data,
            route: app_config.last_route,
            app_config,
            explore,
            session: QuestionnaireSession::new(model, &data.recommendations),
            inputs: QuestionnaireInputs {
                numbers: Default::default(),
                number_errors: Default::default(),
            },
            kpis: KpiSummary::compute(&data.crime, &data.attractions, &data.points),
        }
    }

    fn show_sidebar(&mut self, ui: &mut Ui) {
        ui.add_space(8.);
        ui.heading(RichText::new("Turismo Bogotá").color(PALETTE_YELLOW));
        ui.label(RichText::new("Explora la ciudad a tu manera").color(Color32::GRAY));
        ui.separator();

        for link in SIDEBAR_LINKS {
            let target = link.route();
            if ui
                .selectable_label(self.route == target, link.label)
                .on_hover_text(link.href)
                .clicked()
            {
                debug!("Navigating to {}", link.href);
                self.route = target;
            }
        }
    }

    fn show_page_two(&self, ui: &mut Ui) {
        ui.label("Oh cool, this is page 2!");
    }

    fn show_not_found(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.);
            ui.heading(RichText::new("404: Not found").color(PALETTE_RED));
            ui.label("La página que buscas no existe.");
            if ui.button("Volver al inicio").clicked() {
                self.route = Route::Explore;
            }
        });
    }
}

impl eframe::App for DashboardApp<'_> {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.app_config.last_route = match self.route {
            Route::NotFound => Route::Explore,
            route => route,
        };
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(SIDEBAR_WIDTH)
            .show(ctx, |ui| self.show_sidebar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.route {
                Route::Explore => self.show_explore_page(ui),
                Route::Profile => self.show_profile_page(ui),
                Route::Crime => self.show_crime_page(ui),
                Route::PageTwo => self.show_page_two(ui),
                Route::NotFound => self.show_not_found(ui),
            });
        });
    }
}
