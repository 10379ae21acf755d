use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use tether::{Algorithm, Canvas, CanvasBounds, GlobalOptions, Graph, RelationshipDataset};

fn build_social_graph(people: usize, links_per_person: usize) -> Graph {
    let mut dataset = RelationshipDataset::new("me");
    for i in 0..people {
        dataset = dataset.item(format!("p{i}"), ((i * 13) % 17 + 1) as f64);
    }
    for i in 0..people {
        for k in 1..=links_per_person {
            let j = (i + k * 7) % people;
            if j != i {
                dataset = dataset.link(format!("p{i}"), format!("p{j}"), ((i + k) % 5 + 1) as f64);
            }
        }
    }
    dataset.to_graph()
}

fn bench_global_stress(c: &mut Criterion) {
    let mut group = c.benchmark_group("global_stress");
    group.measurement_time(Duration::from_secs(10));

    let canvas = Canvas::new(CanvasBounds::new(1200.0, 900.0), 24.0);
    let algorithm = Algorithm::Global(GlobalOptions {
        random_seed: 7,
        ..GlobalOptions::default()
    });

    let cases = [("social_25", 25usize, 2usize), ("social_100", 100, 3), ("social_200", 200, 3)];
    for (name, people, links) in cases {
        let graph = build_social_graph(people, links);
        group.bench_with_input(BenchmarkId::new("layout", name), &graph, |b, graph| {
            b.iter(|| {
                let result = tether::layout(black_box(graph), canvas, &algorithm);
                black_box(result.map(|r| r.len()).unwrap_or(0));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_global_stress);
criterion_main!(benches);
