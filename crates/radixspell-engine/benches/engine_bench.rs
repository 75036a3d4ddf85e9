// Criterion benchmarks for radixspell-engine.
//
// Builds a synthetic dictionary of a few thousand stems with a plural class,
// so the benchmarks need no external data.
//
// Run:
//   cargo bench -p radixspell-engine

use criterion::{Criterion, criterion_group, criterion_main};
use radixspell_engine::dictionary::{AffixRuleSpec, DictionaryData, DictionaryEntry};
use radixspell_engine::{AffixKind, SpellEngine, SuggestOptions};

// ---------------------------------------------------------------------------
// Synthetic dictionary
// ---------------------------------------------------------------------------

const SYLLABLES: &[&str] = &[
    "ka", "lo", "mi", "ne", "ru", "sa", "to", "vi", "pe", "da", "go", "hu",
];

fn stems(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let mut word = String::new();
            let mut n = i + SYLLABLES.len();
            while n > 0 {
                word.push_str(SYLLABLES[n % SYLLABLES.len()]);
                n /= SYLLABLES.len();
            }
            word
        })
        .collect()
}

fn build_data() -> DictionaryData {
    DictionaryData {
        words: stems(5000)
            .into_iter()
            .map(|stem| DictionaryEntry::new(stem, &[1]))
            .collect(),
        affixes: vec![
            AffixRuleSpec {
                kind: AffixKind::Suffix,
                class: 1,
                strip: String::new(),
                append: "s".into(),
                condition: "[aeiou]".into(),
                flag: None,
                combinable: false,
            },
            AffixRuleSpec {
                kind: AffixKind::Suffix,
                class: 1,
                strip: "a".into(),
                append: "en".into(),
                condition: "[^e]a".into(),
                flag: None,
                combinable: false,
            },
        ],
        ..DictionaryData::default()
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_build(c: &mut Criterion) {
    let data = build_data();
    c.bench_function("build_5000_stems", |b| {
        b.iter(|| std::hint::black_box(SpellEngine::build(&data)));
    });
}

fn bench_spell(c: &mut Criterion) {
    let Ok(engine) = SpellEngine::build(&build_data()) else {
        eprintln!("[bench_spell] dictionary build failed");
        return;
    };
    let words: Vec<String> = stems(500)
        .into_iter()
        .flat_map(|w| [format!("{w}s"), format!("{w}x"), w])
        .collect();

    c.bench_function("spell_1500_words", |b| {
        b.iter(|| {
            for word in &words {
                std::hint::black_box(engine.is_valid(word));
            }
        });
    });
}

fn bench_suggest(c: &mut Criterion) {
    let Ok(engine) = SpellEngine::build(&build_data()) else {
        eprintln!("[bench_suggest] dictionary build failed");
        return;
    };
    let opts = SuggestOptions::default();

    c.bench_function("suggest_full_search", |b| {
        b.iter(|| std::hint::black_box(engine.suggest_all("kalomix", &opts)));
    });

    let bounded = SuggestOptions {
        max_distance: Some(1),
        ..SuggestOptions::default()
    };
    c.bench_function("suggest_max_distance_1", |b| {
        b.iter(|| std::hint::black_box(engine.suggest_all("kalomix", &bounded)));
    });
}

criterion_group!(benches, bench_build, bench_spell, bench_suggest);
criterion_main!(benches);
