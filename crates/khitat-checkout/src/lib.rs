// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Checkout for the donation cart.
//!
//! A [`CheckoutFlow`] walks the donor through choosing a transfer method and
//! confirming, then hands a [`khitat_model::CheckoutOrder`] to an
//! [`OrderSink`]. The cart is cleared only after the sink accepts the order.

mod code;
mod error;
mod flow;
mod instructions;
mod sink;

pub use code::{generate_at, generate_checkout_code, to_base36, CODE_SUFFIX_LEN};
pub use error::{CheckoutError, CheckoutErrorCode, SubmitError, SubmitErrorCode};
pub use flow::{CheckoutFlow, CheckoutReceipt, CheckoutStep, THANK_YOU_ROUTE};
pub use instructions::{payment_instructions, InstructionRow, PaymentInstructions};
pub use sink::{FailingOrderSink, JsonDirOrderSink, MemoryOrderSink, OrderSink};

pub const CRATE_NAME: &str = "khitat-checkout";
