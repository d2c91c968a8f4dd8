use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use seqalign::align::{self, AlignmentMode, AlignmentTable, ScoringMatrix};
use seqalign::spell::SpellChecker;
use seqalign::stats::{random_sequence, NullModel};
use seqalign::util::alphabet::{AMINO_ACIDS, DNA, LOWERCASE};

fn make_sequence(alphabet: &[u8], len: usize, seed: u64) -> Vec<u8> {
    random_sequence(alphabet, len, &mut StdRng::seed_from_u64(seed))
}

fn bench_table_fill(c: &mut Criterion) {
    let matrix = ScoringMatrix::build(DNA, 2, -1, -2);
    let x = make_sequence(DNA, 500, 1);
    let y = make_sequence(DNA, 500, 2);

    c.bench_function("table_global_500x500", |b| {
        b.iter(|| {
            black_box(AlignmentTable::compute(black_box(&x), black_box(&y), &matrix, AlignmentMode::Global).unwrap());
        })
    });
}

fn bench_traceback(c: &mut Criterion) {
    let matrix = ScoringMatrix::build(AMINO_ACIDS, 5, -1, -4);
    let x = make_sequence(AMINO_ACIDS, 300, 3);
    let y = make_sequence(AMINO_ACIDS, 300, 4);
    let global = AlignmentTable::compute(&x, &y, &matrix, AlignmentMode::Global).unwrap();
    let local = AlignmentTable::compute(&x, &y, &matrix, AlignmentMode::Local).unwrap();

    c.bench_function("traceback_global_300", |b| {
        b.iter(|| black_box(align::global_alignment(&x, &y, &matrix, black_box(&global)).unwrap()))
    });
    c.bench_function("traceback_local_300", |b| {
        b.iter(|| black_box(align::local_alignment(&x, &y, &matrix, black_box(&local)).unwrap()))
    });
}

fn bench_null_model(c: &mut Criterion) {
    let matrix = ScoringMatrix::build(AMINO_ACIDS, 5, -1, -4);
    let x = make_sequence(AMINO_ACIDS, 120, 5);
    let y = make_sequence(AMINO_ACIDS, 120, 6);
    let model = NullModel::new(&matrix).seed(Some(7));

    c.bench_function("null_model_100_trials", |b| {
        b.iter(|| black_box(model.generate(&x, &y, 100).unwrap()))
    });
}

fn bench_spelling(c: &mut Criterion) {
    let checker = SpellChecker::default();
    let words: Vec<String> = (0..2_000)
        .map(|i| String::from_utf8_lossy(&make_sequence(LOWERCASE, 4 + i % 6, i as u64)).into_owned())
        .collect();

    c.bench_function("spell_2000_words", |b| {
        b.iter(|| black_box(checker.check(black_box("firefly"), 2, &words).unwrap()))
    });
}

criterion_group!(benches, bench_table_fill, bench_traceback, bench_null_model, bench_spelling);
criterion_main!(benches);
