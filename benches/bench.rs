// Criterion benchmarks for the Faith Finder matching pipeline

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use faithfinder_match::core::prompt::render_user_prompt;
use faithfinder_match::core::{reconcile, validate_selection};
use faithfinder_match::models::{
    Church, ChurchSize, MatchRequest, MatchSelection, SelectionEntry,
};

fn create_church(id: usize) -> Church {
    let size = match id % 3 {
        0 => ChurchSize::Small,
        1 => ChurchSize::Medium,
        _ => ChurchSize::Large,
    };

    Church {
        id: format!("church-{}", id),
        name: format!("Church {}", id),
        denomination: if id % 2 == 0 { "Methodist" } else { "Baptist" }.to_string(),
        size,
        location: "State College".to_string(),
        address: format!("{} College Ave", 100 + id),
        latitude: Some(40.79 + (id as f64) * 0.001),
        longitude: Some(-77.86 - (id as f64) * 0.001),
        phone: None,
        website: Some(format!("https://church{}.example.org", id)),
        description: Some("A welcoming congregation with weekly services and small groups.".repeat(3)),
        created_at: None,
        updated_at: None,
    }
}

fn create_request(candidate_count: usize) -> MatchRequest {
    MatchRequest {
        denomination: "no-preference".to_string(),
        size: "medium".to_string(),
        location: "State College".to_string(),
        worship_style: Some("Contemporary".to_string()),
        distance: None,
        priorities: vec!["youth programs".to_string(), "music".to_string()],
        additional_info: None,
        churches: (0..candidate_count).map(create_church).collect(),
    }
}

fn create_selection() -> MatchSelection {
    MatchSelection {
        best_match: SelectionEntry {
            church_id: "church-0".to_string(),
            reason: "Best match because: it fits".to_string(),
        },
        runner_ups: vec![
            SelectionEntry {
                church_id: "church-1".to_string(),
                reason: "Close second.".to_string(),
            },
            SelectionEntry {
                church_id: "church-2".to_string(),
                reason: "Also nearby.".to_string(),
            },
        ],
    }
}

fn bench_prompt_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("prompt_rendering");

    for candidate_count in [10, 50, 100, 200].iter() {
        let request = create_request(*candidate_count);

        group.bench_with_input(
            BenchmarkId::new("render_user_prompt", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| render_user_prompt(black_box(&request)));
            },
        );
    }

    group.finish();
}

fn bench_selection_validation(c: &mut Criterion) {
    let candidates: Vec<Church> = (0..200).map(create_church).collect();
    let selection = create_selection();

    c.bench_function("validate_selection_200_candidates", |b| {
        b.iter(|| validate_selection(black_box(&selection), black_box(&candidates)));
    });
}

fn bench_reconciliation(c: &mut Criterion) {
    let candidates: Vec<Church> = (0..200).map(create_church).collect();
    let selection = create_selection();

    c.bench_function("reconcile_200_candidates", |b| {
        b.iter(|| reconcile(black_box(&candidates), black_box(&selection)));
    });
}

criterion_group!(
    benches,
    bench_prompt_rendering,
    bench_selection_validation,
    bench_reconciliation
);

criterion_main!(benches);
