// SPDX-License-Identifier: Apache-2.0

use khitat_model::{CartPhase, CartState, DonationLineItem, LineKey, ProjectId};
use khitat_store::{reduce, CartAction, CartStore};

fn item(project: &str, amount: u64) -> DonationLineItem {
    DonationLineItem::new(
        ProjectId::new(project),
        format!("{project}-slug"),
        format!("{project} title"),
        format!("https://cdn.example/{project}.jpg"),
        amount,
        "USD",
    )
}

fn base_count(state: &CartState, project: &str) -> usize {
    let key = LineKey::Base(ProjectId::new(project));
    state.iter().filter(|i| key.matches(i)).count()
}

#[test]
fn repeated_base_adds_keep_one_entry_with_latest_amount() {
    let mut store = CartStore::new();
    for amount in [50, 100, 200, 75] {
        store.add_item(item("p1", amount));
    }
    let cart = store.snapshot();
    assert_eq!(cart.len(), 1);
    assert_eq!(base_count(cart, "p1"), 1);
    assert_eq!(cart.items[0].amount, 75);
}

#[test]
fn repeated_addon_adds_keep_one_entry_per_label() {
    let mut store = CartStore::new();
    store.add_item(item("p1", 80).with_label("Waleemah"));
    store.add_item(item("p1", 90).with_label("Waleemah"));
    store.add_item(item("p1", 30).with_label("Shipping"));
    let cart = store.snapshot();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.items[0].amount, 90);
    assert_eq!(cart.items[1].label.as_deref(), Some("Shipping"));
}

#[test]
fn base_and_addon_for_same_project_are_distinct() {
    let mut store = CartStore::new();
    store.add_item(item("p1", 50));
    store.add_item(item("p1", 80).with_label("Waleemah"));
    assert_eq!(store.snapshot().len(), 2);
}

#[test]
fn same_label_on_different_projects_does_not_merge() {
    let mut store = CartStore::new();
    store.add_item(item("p1", 80).with_label("Waleemah"));
    store.add_item(item("p2", 80).with_label("Waleemah"));
    assert_eq!(store.snapshot().len(), 2);
}

#[test]
fn remove_item_purges_base_and_addons_and_is_idempotent() {
    let mut store = CartStore::new();
    store.add_item(item("p1", 50));
    store.add_item(item("p2", 100));
    store.add_item(item("p1", 80).with_label("Waleemah"));
    store.add_item(item("p1", 20).with_label("Delivery"));

    store.remove_item(ProjectId::new("p1"));
    let once = store.snapshot().clone();
    store.remove_item(ProjectId::new("p1"));
    assert_eq!(store.snapshot(), &once);
    assert_eq!(once.len(), 1);
    assert_eq!(once.items[0].project_id.as_str(), "p2");
}

#[test]
fn remove_by_index_removes_exactly_one_entry() {
    let mut store = CartStore::new();
    store.add_item(item("p1", 50));
    store.add_item(item("p1", 80).with_label("Waleemah"));
    store.add_item(item("p2", 100));

    store.remove_item_by_index(1);
    let ids: Vec<(&str, Option<&str>)> = store
        .snapshot()
        .iter()
        .map(|i| (i.project_id.as_str(), i.label.as_deref()))
        .collect();
    assert_eq!(ids, vec![("p1", None), ("p2", None)]);
}

#[test]
fn remove_by_out_of_range_index_leaves_cart_unchanged() {
    let state = CartState::from_items(vec![item("p1", 50), item("p2", 60)]);
    for index in [2, 3, usize::MAX] {
        assert_eq!(reduce(&state, &CartAction::RemoveItemByIndex(index)), state);
    }
    let empty = CartState::default();
    assert_eq!(reduce(&empty, &CartAction::RemoveItemByIndex(0)), empty);
}

#[test]
fn clear_cart_always_empties() {
    let full = CartState::from_items(vec![item("p1", 50), item("p2", 60)]);
    assert_eq!(reduce(&full, &CartAction::ClearCart).phase(), CartPhase::Empty);
    let empty = CartState::default();
    assert_eq!(reduce(&empty, &CartAction::ClearCart), empty);
}

#[test]
fn update_amount_for_unknown_project_is_a_no_op() {
    let state = CartState::from_items(vec![item("p1", 50)]);
    let next = reduce(
        &state,
        &CartAction::UpdateItemAmount {
            project_id: ProjectId::new("missing"),
            amount: 999,
        },
    );
    assert_eq!(next, state);
}

// updateItemAmount ignores labels: it hits the first entry for the project in
// insertion order, even when that entry is an add-on. Pinned on purpose.
#[test]
fn update_amount_hits_first_inserted_entry_regardless_of_label() {
    let mut store = CartStore::new();
    store.add_item(item("p1", 50));
    store.add_item(item("p1", 80).with_label("Waleemah"));
    store.update_item_amount(ProjectId::new("p1"), 200);
    assert_eq!(store.snapshot().items[0].amount, 200);
    assert_eq!(store.snapshot().items[1].amount, 80);

    let mut addon_first = CartStore::new();
    addon_first.add_item(item("p1", 80).with_label("Waleemah"));
    addon_first.add_item(item("p1", 50));
    addon_first.update_item_amount(ProjectId::new("p1"), 200);
    assert_eq!(addon_first.snapshot().items[0].label.as_deref(), Some("Waleemah"));
    assert_eq!(addon_first.snapshot().items[0].amount, 200);
    assert_eq!(addon_first.snapshot().items[1].amount, 50);
}

#[test]
fn add_then_merge_then_addon_then_remove_scenario() {
    let mut store = CartStore::new();
    assert_eq!(store.snapshot().phase(), CartPhase::Empty);

    store.add_item(item("p1", 50));
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(store.snapshot().items[0].amount, 50);
    assert_eq!(store.snapshot().items[0].currency, "USD");
    assert_eq!(store.snapshot().items[0].label, None);

    store.add_item(item("p1", 100));
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(store.snapshot().items[0].amount, 100);

    store.add_item(item("p1", 80).with_label("Waleemah"));
    assert_eq!(store.snapshot().len(), 2);

    store.remove_item(ProjectId::new("p1"));
    assert!(store.snapshot().is_empty());
}
