use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::TurismoError;
use crate::profile::ProfileModel;
use crate::questionnaire::{ChoiceQuestion, FormState, FormValidator, Update};
use crate::recommendations::RecommendationTable;

/// Answers supplied outside the GUI. Choices are named by option id and
/// `null` marks an unanswered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub numeric: Vec<Option<i64>>,
    pub choices: Vec<Option<String>>,
}

impl AnswerSheet {
    pub fn from_json_file(path: &Path) -> Result<Self, TurismoError> {
        let file = std::fs::File::open(path).map_err(|e| TurismoError::AnswerSheetIOError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_reader(file).map_err(|e| TurismoError::AnswerSheetParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn to_form(&self) -> Result<FormState, TurismoError> {
        let mut choices = Vec::with_capacity(self.choices.len());
        for (question, choice) in ChoiceQuestion::ALL.into_iter().zip(&self.choices) {
            let index = match choice {
                Some(id) => {
                    let descriptor = question.descriptor();
                    Some(descriptor.position(id).ok_or_else(|| {
                        TurismoError::InvalidUserInput {
                            field: descriptor.id.to_string(),
                            reason: format!("unknown option '{}'", id),
                        }
                    })?)
                }
                None => None,
            };
            choices.push(index);
        }
        // surplus choices still count towards the length check
        choices.extend(self.choices.iter().skip(ChoiceQuestion::ALL.len()).map(|_| None));
        FormState::from_inputs(&self.numeric, &choices)
    }
}

/// Outcome of classifying one answer sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// 1-based position of the sheet in its source
    pub line: usize,
    pub progress: Option<String>,
    /// Profile group label, when the sheet was complete
    pub group: Option<String>,
    pub error: Option<String>,
    pub recommendations: Vec<String>,
}

/// Run one sheet through the same path as a first submit click.
pub fn classify_sheet<M: ProfileModel>(
    line: usize,
    sheet: &AnswerSheet,
    validator: &FormValidator<'_, M>,
) -> BatchResult {
    let form = match sheet.to_form() {
        Ok(form) => form,
        Err(e) => {
            warn!("Answer sheet {} rejected: {}", line, e);
            return BatchResult {
                line,
                progress: None,
                group: None,
                error: Some(e.to_string()),
                recommendations: Vec::new(),
            };
        }
    };

    let evaluation = validator.evaluate(&form, 1);
    let error = match evaluation.output.error_message {
        Update::Set(message) if !message.is_empty() => Some(message),
        _ => None,
    };
    let recommendations = match evaluation.output.recommendations {
        Update::Set(items) => items.iter().map(ToString::to_string).collect(),
        Update::Unchanged => Vec::new(),
    };

    BatchResult {
        line,
        progress: Some(form.progress()),
        group: evaluation.group.map(|g| g.label().to_string()),
        error,
        recommendations,
    }
}

/// Classify every answer sheet of a JSON-lines file and write one result per line.
/// Returns the number of sheets processed.
pub fn classify_batch<M: ProfileModel>(
    input: &Path,
    output: &Path,
    model: &M,
    recommendations: &RecommendationTable,
) -> Result<usize, TurismoError> {
    let validator = FormValidator::new(model, recommendations);
    let sheets = serde_jsonlines::json_lines::<AnswerSheet, _>(input).map_err(|e| {
        TurismoError::AnswerSheetIOError {
            path: input.to_path_buf(),
            source: e,
        }
    })?;

    let mut results = Vec::new();
    for (i, sheet) in sheets.enumerate() {
        let sheet = sheet.map_err(|e| TurismoError::AnswerSheetIOError {
            path: input.to_path_buf(),
            source: e,
        })?;
        results.push(classify_sheet(i + 1, &sheet, &validator));
    }
    debug!("Classified {} answer sheets from {:?}", results.len(), input);

    let count = results.len();
    serde_jsonlines::write_json_lines(output, &results)
        .map_err(|e| TurismoError::WriterError { source: e })?;
    Ok(count)
}
