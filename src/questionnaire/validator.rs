use log::{debug, info};
use serde::Serialize;

use crate::errors::TurismoError;
use crate::profile::{ProfileGroup, ProfileModel};
use crate::recommendations::{RecommendationTable, RenderedRecommendation};

use super::{ChoiceQuestion, FormState, NumericQuestion};

pub const INCOMPLETE_FORM_MESSAGE: &str =
    "Por favor responde todas las preguntas antes de enviar el formulario.";

/// Per-output change produced by a form handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Update<T> {
    /// Leave the displayed value as it is
    Unchanged,
    Set(T),
}

impl<T> Default for Update<T> {
    fn default() -> Self {
        Update::Unchanged
    }
}

impl<T> Update<T> {
    /// Overwrite `target` when this update carries a value.
    pub fn apply_to(self, target: &mut T) {
        if let Update::Set(value) = self {
            *target = value;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    pub fn is_shown(&self) -> bool {
        *self == Visibility::Shown
    }
}

/// Everything a form evaluation may change on screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SubmissionOutput {
    pub submit_disabled: Update<bool>,
    pub submit_visibility: Update<Visibility>,
    pub error_message: Update<String>,
    pub progress: Update<String>,
    pub results_visibility: Update<Visibility>,
    pub prompt_visibility: Update<Visibility>,
    pub recommendations: Update<Vec<RenderedRecommendation>>,
}

/// What the display layer currently shows for the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub submit_disabled: bool,
    pub submit_visibility: Visibility,
    pub error_message: String,
    pub progress: String,
    pub results_visibility: Visibility,
    pub prompt_visibility: Visibility,
    pub recommendations: Vec<RenderedRecommendation>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            submit_disabled: false,
            submit_visibility: Visibility::Shown,
            error_message: String::new(),
            progress: FormState::new().progress(),
            results_visibility: Visibility::Hidden,
            prompt_visibility: Visibility::Shown,
            recommendations: Vec::new(),
        }
    }
}

impl ViewState {
    pub fn apply(&mut self, output: SubmissionOutput) {
        output.submit_disabled.apply_to(&mut self.submit_disabled);
        output.submit_visibility.apply_to(&mut self.submit_visibility);
        output.error_message.apply_to(&mut self.error_message);
        output.progress.apply_to(&mut self.progress);
        output.results_visibility.apply_to(&mut self.results_visibility);
        output.prompt_visibility.apply_to(&mut self.prompt_visibility);
        output.recommendations.apply_to(&mut self.recommendations);
    }
}

/// Stateless form handler: evaluates the current answers and the submit click
/// count and says what should change on screen.
pub struct FormValidator<'a, M: ProfileModel> {
    model: &'a M,
    recommendations: &'a RecommendationTable,
}

/// Result of a form evaluation, with the group when classification ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub output: SubmissionOutput,
    pub group: Option<ProfileGroup>,
}

impl<'a, M: ProfileModel> FormValidator<'a, M> {
    pub fn new(model: &'a M, recommendations: &'a RecommendationTable) -> Self {
        Self {
            model,
            recommendations,
        }
    }

    /// Evaluate the form after an edit or a click.
    ///
    /// Classification only runs when every question is answered and the submit
    /// button has been clicked exactly once. An incomplete form never disables
    /// the submit button.
    pub fn evaluate(&self, form: &FormState, submit_clicks: u32) -> Evaluation {
        let progress = Update::Set(form.progress());

        let Some(answers) = form.complete() else {
            debug!("Form incomplete: {}", form.progress());
            return Evaluation {
                output: SubmissionOutput {
                    submit_disabled: Update::Set(false),
                    error_message: Update::Set(INCOMPLETE_FORM_MESSAGE.to_string()),
                    progress,
                    ..Default::default()
                },
                group: None,
            };
        };

        if submit_clicks != 1 {
            return Evaluation {
                output: SubmissionOutput {
                    progress,
                    ..Default::default()
                },
                group: None,
            };
        }

        let group = self.model.classify(&answers);
        let recommendations = self.recommendations.render(group);
        info!(
            "Visitor classified as group {} ({} recommendations)",
            group.label(),
            recommendations.len()
        );

        Evaluation {
            output: SubmissionOutput {
                submit_disabled: Update::Set(true),
                submit_visibility: Update::Set(Visibility::Hidden),
                error_message: Update::Set(String::new()),
                progress,
                results_visibility: Update::Set(Visibility::Shown),
                prompt_visibility: Update::Set(Visibility::Hidden),
                recommendations: Update::Set(recommendations),
            },
            group: Some(group),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Incomplete,
    /// Every question answered, not submitted yet
    Ready,
    /// Recommendations shown; terminal
    Submitted,
}

/// One visitor's pass through the questionnaire.
///
/// Edits and clicks are applied in order. Once recommendations are shown the
/// session ignores every further edit and click.
pub struct QuestionnaireSession<'a, M: ProfileModel> {
    validator: FormValidator<'a, M>,
    form: FormState,
    submit_clicks: u32,
    view: ViewState,
    group: Option<ProfileGroup>,
}

impl<'a, M: ProfileModel> QuestionnaireSession<'a, M> {
    pub fn new(model: &'a M, recommendations: &'a RecommendationTable) -> Self {
        Self {
            validator: FormValidator::new(model, recommendations),
            form: FormState::new(),
            submit_clicks: 0,
            view: ViewState::default(),
            group: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.group.is_some() {
            SessionPhase::Submitted
        } else if self.form.is_complete() {
            SessionPhase::Ready
        } else {
            SessionPhase::Incomplete
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The profile group, once the questionnaire has been submitted.
    pub fn group(&self) -> Option<ProfileGroup> {
        self.group
    }

    pub fn submit_clicks(&self) -> u32 {
        self.submit_clicks
    }

    pub fn set_number(
        &mut self,
        question: NumericQuestion,
        value: Option<i64>,
    ) -> Result<&ViewState, TurismoError> {
        if self.phase() != SessionPhase::Submitted {
            self.form.set_number(question, value)?;
            self.refresh();
        }
        Ok(&self.view)
    }

    pub fn set_choice(
        &mut self,
        question: ChoiceQuestion,
        value: Option<usize>,
    ) -> Result<&ViewState, TurismoError> {
        if self.phase() != SessionPhase::Submitted {
            self.form.set_choice(question, value)?;
            self.refresh();
        }
        Ok(&self.view)
    }

    /// Register a click on the submit button.
    pub fn submit(&mut self) -> &ViewState {
        if self.phase() == SessionPhase::Submitted {
            debug!("Ignoring submit click on a submitted questionnaire");
            return &self.view;
        }
        self.submit_clicks = self.submit_clicks.saturating_add(1);
        self.refresh();
        &self.view
    }

    fn refresh(&mut self) {
        let evaluation = self.validator.evaluate(&self.form, self.submit_clicks);
        if evaluation.group.is_some() {
            self.group = evaluation.group;
        }
        self.view.apply(evaluation.output);
    }
}
