use criterion::{black_box, criterion_group, criterion_main, Criterion};

use synthscore_core::document::compose_blocks;
use synthscore_core::layout::{layout, wrap_text, LayoutConfig};
use synthscore_core::model::{AnswerStatus, EvaluationResult, QuestionOutcome};
use synthscore_core::statistics::{aggregate, ThresholdTable};

const LOGIC: &str = "Student confused rolling with sliding. Balls roll, they do not slide. \
    Objects that slide include books and boxes, which keep a flat face on the surface.";

fn make_result(questions: u32) -> EvaluationResult {
    let questions = (1..=questions)
        .map(|id| QuestionOutcome {
            id,
            status: if id % 3 == 0 {
                AnswerStatus::Incorrect
            } else {
                AnswerStatus::Correct
            },
            master_key: "Objects that slide include books and boxes".into(),
            student_answer: if id % 7 == 0 { String::new() } else { "Ball".into() },
            logic: LOGIC.repeat((id % 4 + 1) as usize),
            category: ["Motion", "Arithmetic", "Geometry"][(id % 3) as usize].into(),
        })
        .collect();
    EvaluationResult::new("Bench Student", "STU-BENCH", questions)
}

fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap_text");
    let long = LOGIC.repeat(20);

    group.bench_function("short", |b| {
        b.iter(|| wrap_text(black_box(LOGIC), black_box(170.0), black_box(1.8)))
    });

    group.bench_function("long", |b| {
        b.iter(|| wrap_text(black_box(&long), black_box(170.0), black_box(1.8)))
    });

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    let thresholds = ThresholdTable::default();

    for size in [6u32, 60, 600] {
        let result = make_result(size);
        let summary = aggregate(&result, &thresholds).unwrap();
        group.bench_function(format!("questions={size}"), |b| {
            b.iter(|| {
                let blocks = compose_blocks(black_box(&result), &summary, &config);
                layout(&result.student_id, blocks, &config).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_wrap, bench_layout);
criterion_main!(benches);
