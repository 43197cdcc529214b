// Integration tests for the visitor questionnaire against the shipped data set
//
// This test suite walks the whole flow:
// 1. Load the data set from data-cleaned/
// 2. Fill the questionnaire through a session, as the dashboard does
// 3. Submit and check what the view shows
// 4. Run the same answers through the batch writer

use std::path::Path;

use tempfile::TempDir;
use turismo_bogota::{
    ChoiceQuestion, DashboardData, DataPaths, FormState, FormValidator, NumericQuestion,
    ProfileGroup, QuestionnaireSession, RecommendationTable, ScoringModel,
    questionnaire::{INCOMPLETE_FORM_MESSAGE, SessionPhase, Update, Visibility},
    recommendations::RecommendationEntry,
    writer::{AnswerSheet, BatchResult, classify_batch},
};

const NATURE_NUMBERS: [i64; 5] = [24, 14, 100, 1, 0];
const NATURE_PICKS: [&str; 10] = [
    "ocio",
    "naturaleza",
    "solo",
    "hostal",
    "bicicleta",
    "manana",
    "intenso",
    "bajo",
    "disfruta",
    "baja",
];

fn shipped_data() -> DashboardData {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data-cleaned");
    DashboardData::load(&DataPaths::in_dir(&dir)).expect("shipped data set should load")
}

fn fill_nature_answers(session: &mut QuestionnaireSession<'_, ScoringModel>) {
    for (question, value) in NumericQuestion::ALL.into_iter().zip(NATURE_NUMBERS) {
        session.set_number(question, Some(value)).unwrap();
    }
    for (question, pick) in ChoiceQuestion::ALL.into_iter().zip(NATURE_PICKS) {
        let index = question.descriptor().position(pick).unwrap();
        session.set_choice(question, Some(index)).unwrap();
    }
}

fn nature_form() -> FormState {
    let mut form = FormState::new();
    for (question, value) in NumericQuestion::ALL.into_iter().zip(NATURE_NUMBERS) {
        form.set_number(question, Some(value)).unwrap();
    }
    for (question, pick) in ChoiceQuestion::ALL.into_iter().zip(NATURE_PICKS) {
        form.set_choice_by_id(question, pick).unwrap();
    }
    form
}

#[test]
fn test_incomplete_form_shows_message_and_keeps_submit_enabled() {
    let data = shipped_data();
    let model = ScoringModel::new();
    let mut session = QuestionnaireSession::new(&model, &data.recommendations);

    fill_nature_answers(&mut session);
    session.set_number(NumericQuestion::GroupSize, None).unwrap();
    let view = session.submit();

    assert_eq!(view.progress, "14/15");
    assert_eq!(view.error_message, INCOMPLETE_FORM_MESSAGE);
    assert!(!view.submit_disabled);
    assert_eq!(view.results_visibility, Visibility::Hidden);
    assert_eq!(session.phase(), SessionPhase::Incomplete);
    assert_eq!(session.group(), None);
}

#[test]
fn test_first_click_on_complete_form_shows_recommendations() {
    let data = shipped_data();
    let model = ScoringModel::new();
    let mut session = QuestionnaireSession::new(&model, &data.recommendations);

    fill_nature_answers(&mut session);
    assert_eq!(session.phase(), SessionPhase::Ready);
    let view = session.submit().clone();

    assert_eq!(session.group(), Some(ProfileGroup::NatureAdventure));
    assert!(view.submit_disabled);
    assert_eq!(view.submit_visibility, Visibility::Hidden);
    assert_eq!(view.error_message, "");
    assert_eq!(view.results_visibility, Visibility::Shown);
    assert_eq!(view.prompt_visibility, Visibility::Hidden);
    let texts: Vec<_> = view.recommendations.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Sube a Monserrate a pie temprano en la mañana",
            "Recorre el Parque Simón Bolívar en bicicleta",
            "Visita el Humedal La Conejera y observa aves",
        ]
    );
}

#[test]
fn test_second_click_does_not_classify_again() {
    let data = shipped_data();
    let model = ScoringModel::new();
    let validator = FormValidator::new(&model, &data.recommendations);
    let form = nature_form();

    let second = validator.evaluate(&form, 2);
    assert_eq!(second.group, None);
    assert_eq!(second.output.progress, Update::Set("15/15".to_string()));
    assert_eq!(second.output.recommendations, Update::Unchanged);
    assert_eq!(second.output.submit_disabled, Update::Unchanged);

    let mut session = QuestionnaireSession::new(&model, &data.recommendations);
    fill_nature_answers(&mut session);
    let first = session.submit().clone();
    let again = session.submit().clone();
    assert_eq!(first, again);
    assert_eq!(session.phase(), SessionPhase::Submitted);
}

#[test]
fn test_group_without_rows_shows_empty_list() {
    let table = RecommendationTable::from_entries(vec![RecommendationEntry {
        group: ProfileGroup::CulturalExplorer,
        recommendation_type: "Museo".to_string(),
        text: "Museo Nacional".to_string(),
    }]);
    assert!(table.validate().is_err());

    let model = ScoringModel::new();
    let validator = FormValidator::new(&model, &table);
    let evaluation = validator.evaluate(&nature_form(), 1);
    assert_eq!(evaluation.group, Some(ProfileGroup::NatureAdventure));
    assert_eq!(evaluation.output.recommendations, Update::Set(Vec::new()));
}

#[test]
fn test_batch_over_shipped_recommendations() {
    let data = shipped_data();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("answers.jsonl");
    let output = dir.path().join("results.jsonl");

    let sheet = AnswerSheet {
        numeric: NATURE_NUMBERS.iter().map(|n| Some(*n)).collect(),
        choices: NATURE_PICKS.iter().map(|c| Some(c.to_string())).collect(),
    };
    let mut partial = sheet.clone();
    partial.numeric[0] = None;
    serde_jsonlines::write_json_lines(&input, [sheet, partial]).unwrap();

    let count = classify_batch(&input, &output, &ScoringModel::new(), &data.recommendations)
        .unwrap();
    assert_eq!(count, 2);

    let results: Vec<BatchResult> = serde_jsonlines::json_lines(&output)
        .unwrap()
        .collect::<std::io::Result<_>>()
        .unwrap();
    assert_eq!(results[0].group.as_deref(), Some("B"));
    assert_eq!(results[0].recommendations.len(), 3);
    assert_eq!(results[1].group, None);
    assert_eq!(results[1].progress.as_deref(), Some("14/15"));
    assert_eq!(results[1].error.as_deref(), Some(INCOMPLETE_FORM_MESSAGE));
}
