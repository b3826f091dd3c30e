// SPDX-License-Identifier: Apache-2.0

use crate::line_item::{DonationLineItem, LineKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPhase {
    Empty,
    NonEmpty,
}

impl CartPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::NonEmpty => "non_empty",
        }
    }
}

/// Ordered pending donations. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartState {
    #[serde(default)]
    pub items: Vec<DonationLineItem>,
}

impl CartState {
    #[must_use]
    pub fn from_items(items: Vec<DonationLineItem>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn phase(&self) -> CartPhase {
        if self.items.is_empty() {
            CartPhase::Empty
        } else {
            CartPhase::NonEmpty
        }
    }

    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |sum, item| sum.saturating_add(item.amount))
    }

    #[must_use]
    pub fn position_of(&self, key: &LineKey) -> Option<usize> {
        self.items.iter().position(|item| key.matches(item))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DonationLineItem> {
        self.items.iter()
    }
}
