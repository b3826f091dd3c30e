// SPDX-License-Identifier: Apache-2.0

use crate::persist::{persistence_observer, CartPersistence};
use crate::reducer::{reduce, CartAction};
use khitat_model::{CartState, DonationLineItem, ProjectId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&CartAction, &CartState)>;

/// Single-writer cart owned by whoever drives the UI.
///
/// There is no global instance; callers construct one and pass it where it is
/// needed. Observers run synchronously after each dispatch, in subscription
/// order, and see the state that dispatch produced.
pub struct CartStore {
    state: CartState,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::with_state(CartState::default())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(state: CartState) -> Self {
        Self {
            state,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Rehydrates from `persistence` and saves after every later dispatch.
    #[must_use]
    pub fn with_persistence(persistence: CartPersistence) -> Self {
        let mut store = Self::with_state(persistence.load());
        store.subscribe(persistence_observer(persistence));
        store
    }

    #[must_use]
    pub fn snapshot(&self) -> &CartState {
        &self.state
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&CartAction, &CartState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn dispatch(&mut self, action: CartAction) {
        let next = reduce(&self.state, &action);
        tracing::debug!(
            action = action.kind(),
            items = next.len(),
            total = next.total_amount(),
            "cart action applied"
        );
        self.state = next;
        for (_, observer) in &mut self.observers {
            observer(&action, &self.state);
        }
    }

    pub fn add_item(&mut self, item: DonationLineItem) {
        self.dispatch(CartAction::AddItem(item));
    }

    pub fn remove_item(&mut self, project_id: ProjectId) {
        self.dispatch(CartAction::RemoveItem(project_id));
    }

    pub fn remove_item_by_index(&mut self, index: usize) {
        self.dispatch(CartAction::RemoveItemByIndex(index));
    }

    pub fn update_item_amount(&mut self, project_id: ProjectId, amount: u64) {
        self.dispatch(CartAction::UpdateItemAmount { project_id, amount });
    }

    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::ClearCart);
    }
}
