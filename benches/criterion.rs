use criterion::{black_box, criterion_group, criterion_main, Criterion};
use item_store::feature::item::{
    item_model::{Item, ItemUpdate},
    item_repository::ItemRow,
};

fn row() -> ItemRow {
    ItemRow {
        id: 1,
        name: "Test Item".to_string(),
        price: Some(99.9),
        description: Some("This is a test item".to_string()),
    }
}

fn item_benchmark(c: &mut Criterion) {
    let update = r#"{"name": "Updated", "price": null}"#;
    c.bench_function("parse update", |b| {
        b.iter(|| serde_json::from_str::<ItemUpdate>(black_box(update)).unwrap())
    });
    c.bench_function("row to item", |b| b.iter(|| Item::from(black_box(row()))));
}

criterion_group!(benches, item_benchmark);
criterion_main!(benches);
