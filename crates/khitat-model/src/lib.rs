// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Donation model SSOT.
//!
//! Every type that crosses a crate boundary (cart items, persisted cart
//! documents, checkout orders) is defined here so the serialized shape has a
//! single owner.

mod addon;
mod cart;
mod checkout;
mod ids;
mod line_item;
mod money;
mod project;
mod serde_helpers;

pub use addon::{
    addon_offers_for, find_addon_offer, AddonOffer, ADDON_OFFERS, ADDON_PROJECT_SLUGS,
};
pub use cart::{CartPhase, CartState};
pub use checkout::{CheckoutCode, CheckoutMethod, CheckoutOrder, CHECKOUT_CODE_PREFIX};
pub use ids::{ProjectId, ValidationError, PROJECT_ID_MAX_LEN};
pub use line_item::{DonationLineItem, LineKey};
pub use money::{
    aud_to_usd, stepped_down, stepped_up, AMOUNT_STEP, DEFAULT_CURRENCY, MIN_STEPPED_AMOUNT,
};
pub use project::{default_prices, Locale, Price, Project};

pub const CRATE_NAME: &str = "khitat-model";
