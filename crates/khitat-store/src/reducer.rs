// SPDX-License-Identifier: Apache-2.0

use khitat_model::{CartState, DonationLineItem, ProjectId};

/// Every mutation the cart accepts. Nothing here can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Merge by `LineKey`: overwrite the amount of a matching entry, else append.
    AddItem(DonationLineItem),
    /// Drop every entry for the project, base and add-ons alike.
    RemoveItem(ProjectId),
    /// Drop the entry at this position; out of range removes nothing.
    RemoveItemByIndex(usize),
    /// Set the amount of the first entry with this project id, label ignored.
    UpdateItemAmount { project_id: ProjectId, amount: u64 },
    ClearCart,
}

impl CartAction {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "add_item",
            Self::RemoveItem(_) => "remove_item",
            Self::RemoveItemByIndex(_) => "remove_item_by_index",
            Self::UpdateItemAmount { .. } => "update_item_amount",
            Self::ClearCart => "clear_cart",
        }
    }
}

/// Pure transition function. Persistence and notification live in `CartStore`.
#[must_use]
pub fn reduce(state: &CartState, action: &CartAction) -> CartState {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn apply(state: &mut CartState, action: &CartAction) {
    match action {
        CartAction::AddItem(item) => match state.position_of(&item.key()) {
            Some(index) => state.items[index].amount = item.amount,
            None => state.items.push(item.clone()),
        },
        CartAction::RemoveItem(project_id) => {
            state.items.retain(|item| item.project_id != *project_id);
        }
        CartAction::RemoveItemByIndex(index) => {
            if *index < state.items.len() {
                state.items.remove(*index);
            }
        }
        CartAction::UpdateItemAmount { project_id, amount } => {
            if let Some(item) = state
                .items
                .iter_mut()
                .find(|item| item.project_id == *project_id)
            {
                item.amount = *amount;
            }
        }
        CartAction::ClearCart => state.items.clear(),
    }
}
