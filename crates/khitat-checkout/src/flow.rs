// SPDX-License-Identifier: Apache-2.0

use crate::code::generate_checkout_code;
use crate::error::{CheckoutError, CheckoutErrorCode, SubmitError};
use crate::sink::OrderSink;
use khitat_model::{CheckoutCode, CheckoutMethod, CheckoutOrder};
use khitat_store::CartStore;
use serde::Serialize;

pub const THANK_YOU_ROUTE: &str = "/thank-you";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    SelectMethod,
    Confirm { method: CheckoutMethod },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub code: CheckoutCode,
    pub method: CheckoutMethod,
    pub total_amount: u64,
    pub currency: String,
    pub redirect: &'static str,
}

/// Two-step checkout wizard.
///
/// The transfer code is fixed for the lifetime of the flow, so going back,
/// switching method or retrying after a failed submission all reuse it.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    code: CheckoutCode,
    step: CheckoutStep,
    last_error: Option<SubmitError>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::with_code(generate_checkout_code())
    }

    #[must_use]
    pub fn with_code(code: CheckoutCode) -> Self {
        Self {
            code,
            step: CheckoutStep::SelectMethod,
            last_error: None,
        }
    }

    #[must_use]
    pub fn code(&self) -> &CheckoutCode {
        &self.code
    }

    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub fn method(&self) -> Option<CheckoutMethod> {
        match self.step {
            CheckoutStep::SelectMethod => None,
            CheckoutStep::Confirm { method } => Some(method),
        }
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&SubmitError> {
        self.last_error.as_ref()
    }

    pub fn select_method(&mut self, method: CheckoutMethod) {
        self.step = CheckoutStep::Confirm { method };
    }

    pub fn back(&mut self) {
        self.step = CheckoutStep::SelectMethod;
    }

    /// Sends the current cart to `sink` and clears it once accepted.
    ///
    /// A rejected order leaves the cart untouched and is remembered in
    /// `last_error` until the next attempt.
    pub fn submit(
        &mut self,
        store: &mut CartStore,
        sink: &dyn OrderSink,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let Some(method) = self.method() else {
            return Err(CheckoutError::new(
                CheckoutErrorCode::MethodNotSelected,
                "choose a transfer method before submitting",
            ));
        };
        if store.snapshot().is_empty() {
            return Err(CheckoutError::new(
                CheckoutErrorCode::EmptyCart,
                "cart is empty; nothing to submit",
            ));
        }
        self.last_error = None;
        let order = CheckoutOrder::assemble(self.code.clone(), method, store.snapshot());
        match sink.submit(&order) {
            Ok(()) => {
                tracing::info!(
                    code = %order.code,
                    method = method.as_str(),
                    items = order.items.len(),
                    total = order.total_amount,
                    "checkout submitted"
                );
                store.clear_cart();
                Ok(CheckoutReceipt {
                    code: order.code,
                    method,
                    total_amount: order.total_amount,
                    currency: order.currency,
                    redirect: THANK_YOU_ROUTE,
                })
            }
            Err(err) => {
                tracing::info!(
                    code = %order.code,
                    method = method.as_str(),
                    error = %err,
                    "checkout submission failed; cart kept"
                );
                self.last_error = Some(err.clone());
                Err(err.into())
            }
        }
    }
}
