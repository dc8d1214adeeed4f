use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::{Farm, Farmer, Harvest};
use service::farmer::{repository::mock::MockFarmerRepository, service::FarmerService};
use service::pagination::PaginationParams;

fn farmer_with_farms(n: usize) -> Farmer {
    let farms = (0..n)
        .map(|i| {
            Farm::new(format!("farm-{i}"), "Campinas", "SP", 100.0, 60.0, 40.0)
                .with_harvests(vec![Harvest::new(2023, "Soja"), Harvest::new(2024, "Milho")])
        })
        .collect();
    Farmer::new("Bench", "12345678901").with_farms(farms)
}

fn bench_validate(c: &mut Criterion) {
    let farmer = farmer_with_farms(50);
    c.bench_function("farmer_validate_50_farms", |b| {
        b.iter(|| farmer.validate().unwrap());
    });
}

fn bench_list(c: &mut Criterion) {
    let svc = FarmerService::new(Arc::new(MockFarmerRepository::default()));

    // pre-create farmers outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    for i in 0..200 {
        let f = Farmer::new(format!("farmer-{i}"), format!("{:011}", i)).with_farms(farmer_with_farms(3).farms);
        rt.block_on(svc.create(f)).unwrap();
    }

    c.bench_function("farmer_list_page", |b| {
        b.iter(|| rt.block_on(svc.get_all(PaginationParams::new(5, 20))).unwrap());
    });
}

criterion_group!(benches, bench_validate, bench_list);
criterion_main!(benches);
