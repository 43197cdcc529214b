use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::path::Path;
use std::time::Duration;
use turismo_bogota::localidades::{DistrictSelection, KpiSummary, all_types, query_map};
use turismo_bogota::{
    ChoiceQuestion, DashboardData, DataPaths, FormState, FormValidator, NumericQuestion,
    ProfileModel, ScoringModel,
};

fn load_data() -> DashboardData {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data-cleaned");
    DashboardData::load(&DataPaths::in_dir(&dir)).expect("shipped data set")
}

fn create_sample_form(seed: usize) -> FormState {
    let mut form = FormState::new();
    for question in NumericQuestion::ALL {
        let field = question.descriptor();
        let span = (field.max - field.min + 1) as usize;
        let value = field.min + ((seed * 7 + question.index() * 13) % span) as i64;
        form.set_number(question, Some(value)).unwrap();
    }
    for question in ChoiceQuestion::ALL {
        let options = question.descriptor().options.len();
        form.set_choice(question, Some((seed + question.index()) % options))
            .unwrap();
    }
    form
}

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    let model = ScoringModel::new();
    let answers = create_sample_form(3).complete().unwrap();

    group.bench_function("classify", |b| {
        b.iter(|| black_box(model.classify(black_box(&answers))));
    });

    group.bench_function("classify_100_visitors", |b| {
        let forms: Vec<_> = (0..100)
            .map(|seed| create_sample_form(seed).complete().unwrap())
            .collect();
        b.iter(|| {
            for answers in &forms {
                black_box(model.classify(answers));
            }
        });
    });

    group.finish();
}

fn bench_form_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("form_evaluation");
    group.measurement_time(Duration::from_secs(5));

    let data = load_data();
    let model = ScoringModel::new();
    let validator = FormValidator::new(&model, &data.recommendations);
    let complete = create_sample_form(1);
    let mut incomplete = complete.clone();
    incomplete.set_choice(ChoiceQuestion::Pace, None).unwrap();

    group.bench_function("evaluate_incomplete", |b| {
        b.iter(|| black_box(validator.evaluate(black_box(&incomplete), 1)));
    });

    group.bench_function("evaluate_first_submit", |b| {
        b.iter(|| black_box(validator.evaluate(black_box(&complete), 1)));
    });

    group.bench_function("evaluate_repeat_submit", |b| {
        b.iter(|| black_box(validator.evaluate(black_box(&complete), 2)));
    });

    group.finish();
}

fn bench_dashboard_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard_queries");
    let data = load_data();
    let types = all_types(&data.points);

    group.bench_function("query_map_all", |b| {
        let selection = DistrictSelection::all();
        b.iter(|| {
            black_box(query_map(
                &data.points,
                &data.localidades,
                &selection,
                &types,
            ))
        });
    });

    group.bench_function("kpi_summary", |b| {
        b.iter(|| {
            black_box(KpiSummary::compute(
                &data.crime,
                &data.attractions,
                &data.points,
            ))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_classifier,
    bench_form_evaluation,
    bench_dashboard_queries
);
criterion_main!(benches);
