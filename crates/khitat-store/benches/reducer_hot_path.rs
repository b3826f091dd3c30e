// SPDX-License-Identifier: Apache-2.0

use criterion::{criterion_group, criterion_main, Criterion};
use khitat_model::{CartState, DonationLineItem, ProjectId};
use khitat_store::{encode_persisted, reduce, CartAction};

fn benchmark_reducer(c: &mut Criterion) {
    let mut items = Vec::new();
    for i in 0..200_u32 {
        let mut item = DonationLineItem::new(
            ProjectId::new(format!("p{}", i % 40)),
            "water-well",
            "Water Well",
            "https://cdn.example/w.jpg",
            50 + u64::from(i % 7) * 50,
            "USD",
        );
        if i % 3 == 0 {
            item = item.with_label(format!("Addon {i}"));
        }
        items.push(item);
    }
    let cart = CartState::from_items(items);
    let merge = CartAction::AddItem(DonationLineItem::new(
        ProjectId::new("p39"),
        "water-well",
        "Water Well",
        "https://cdn.example/w.jpg",
        300,
        "USD",
    ));

    c.bench_function("cart_add_item_merge_200", |b| {
        b.iter(|| {
            let next = reduce(&cart, &merge);
            assert_eq!(next.len(), cart.len());
        });
    });
    c.bench_function("cart_encode_persisted_200", |b| {
        b.iter(|| {
            let doc = encode_persisted(&cart).expect("encode");
            assert!(doc.starts_with("{\"items\""));
        });
    });
}

criterion_group!(benches, benchmark_reducer);
criterion_main!(benches);
