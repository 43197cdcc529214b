use egui::{Button, Color32, RichText, TextEdit, Ui};
use log::{debug, warn};
use turismo_bogota::questionnaire::{ChoiceQuestion, NumericQuestion, SessionPhase};

use super::{DashboardApp, PALETTE_RED, PALETTE_YELLOW};

impl DashboardApp<'_> {
    pub(crate) fn show_profile_page(&mut self, ui: &mut Ui) {
        ui.heading("Tu perfil de turista");
        if self.session.view().prompt_visibility.is_shown() {
            ui.label(
                RichText::new("Responde las preguntas y te diremos qué hacer en Bogotá")
                    .color(Color32::GRAY),
            );
        }
        ui.separator();

        let submitted = self.session.phase() == SessionPhase::Submitted;
        ui.add_enabled_ui(!submitted, |ui| {
            self.show_numeric_questions(ui);
            ui.separator();
            self.show_choice_questions(ui);
        });
        ui.separator();

        self.show_submit_row(ui);
        self.show_results(ui);
    }

    fn show_numeric_questions(&mut self, ui: &mut Ui) {
        egui::Grid::new("numeric_questions")
            .num_columns(2)
            .spacing([12., 6.])
            .show(ui, |ui| {
                for question in NumericQuestion::ALL {
                    let field = question.descriptor();
                    let i = question.index();
                    ui.label(field.prompt);
                    ui.vertical(|ui| {
                        let response = ui.add(
                            TextEdit::singleline(&mut self.inputs.numbers[i])
                                .hint_text(format!("{} - {}", field.min, field.max))
                                .desired_width(120.),
                        );
                        if response.changed() {
                            self.on_number_edited(question);
                        }
                        if let Some(message) = &self.inputs.number_errors[i] {
                            ui.label(RichText::new(message).small().color(PALETTE_RED));
                        }
                    });
                    ui.end_row();
                }
            });
    }

    fn on_number_edited(&mut self, question: NumericQuestion) {
        let i = question.index();
        let field = question.descriptor();
        let value = match field.parse_input(&self.inputs.numbers[i]) {
            Ok(value) => {
                self.inputs.number_errors[i] = None;
                value
            }
            Err(e) => {
                debug!("{}", e);
                self.inputs.number_errors[i] = Some(format!(
                    "Ingresa un número entre {} y {}",
                    field.min, field.max
                ));
                None
            }
        };
        if let Err(e) = self.session.set_number(question, value) {
            warn!("Rejected answer for {}: {}", field.id, e);
        }
    }

    fn show_choice_questions(&mut self, ui: &mut Ui) {
        for question in ChoiceQuestion::ALL {
            let field = question.descriptor();
            let current = self.session.form().choice(question);
            ui.label(RichText::new(field.prompt).strong());
            ui.horizontal_wrapped(|ui| {
                for (index, option) in field.options.iter().enumerate() {
                    let selected = current == Some(index);
                    if ui.radio(selected, option.label).clicked() && !selected {
                        if let Err(e) = self.session.set_choice(question, Some(index)) {
                            warn!("Rejected answer for {}: {}", field.id, e);
                        }
                    }
                }
            });
            ui.add_space(4.);
        }
    }

    fn show_submit_row(&mut self, ui: &mut Ui) {
        let view = self.session.view();
        let submit_shown = view.submit_visibility.is_shown();
        let submit_enabled = !view.submit_disabled;
        let progress = view.progress.clone();
        let error_message = view.error_message.clone();

        ui.horizontal(|ui| {
            if submit_shown
                && ui
                    .add_enabled(submit_enabled, Button::new("Enviar respuestas"))
                    .clicked()
            {
                self.session.submit();
            }
            ui.label(format!("Preguntas respondidas: {}", progress));
        });
        if !error_message.is_empty() {
            ui.label(RichText::new(error_message).color(PALETTE_RED));
        }
    }

    fn show_results(&self, ui: &mut Ui) {
        if !self.session.view().results_visibility.is_shown() {
            return;
        }

        ui.add_space(8.);
        if let Some(group) = self.session.group() {
            ui.heading(RichText::new(format!("Tu perfil: {}", group)).color(PALETTE_YELLOW));
        }
        let recommendations = &self.session.view().recommendations;
        if recommendations.is_empty() {
            ui.label("Todavía no tenemos recomendaciones para este perfil.");
        }
        for recommendation in recommendations {
            ui.horizontal_wrapped(|ui| {
                ui.label(
                    RichText::new(&recommendation.recommendation_type)
                        .strong()
                        .color(PALETTE_YELLOW),
                );
                ui.label(&recommendation.text);
            });
        }
    }
}
