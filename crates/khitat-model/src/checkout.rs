// SPDX-License-Identifier: Apache-2.0

use crate::cart::CartState;
use crate::ids::ValidationError;
use crate::line_item::DonationLineItem;
use crate::money::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const CHECKOUT_CODE_PREFIX: &str = "KHC";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMethod {
    WesternUnion,
    Wise,
}

impl CheckoutMethod {
    pub const ALL: [Self; 2] = [Self::WesternUnion, Self::Wise];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WesternUnion => "western_union",
            Self::Wise => "wise",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::WesternUnion => "Western Union",
            Self::Wise => "Wise",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim() {
            "western_union" | "western-union" => Ok(Self::WesternUnion),
            "wise" => Ok(Self::Wise),
            other => Err(ValidationError(format!(
                "unknown checkout method `{other}` (expected western_union or wise)"
            ))),
        }
    }
}

impl Display for CheckoutMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference the donor quotes on the bank transfer, e.g. `KHC-LZ3K9Q1A-7F2C`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutCode(String);

impl CheckoutCode {
    /// Wraps an already generated code without checking its shape.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let mut parts = input.split('-');
        let prefix = parts.next().unwrap_or_default();
        let stamp = parts.next().unwrap_or_default();
        let suffix = parts.next().unwrap_or_default();
        if prefix != CHECKOUT_CODE_PREFIX || parts.next().is_some() {
            return Err(ValidationError(format!(
                "checkout code must look like {CHECKOUT_CODE_PREFIX}-<TIME>-<SUFFIX>"
            )));
        }
        let is_segment = |s: &str| {
            !s.is_empty()
                && s
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        };
        if !is_segment(stamp) || !is_segment(suffix) {
            return Err(ValidationError(
                "checkout code segments must be upper-case base-36".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CheckoutCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order record handed to the hosted database on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckoutOrder {
    pub code: CheckoutCode,
    pub method: CheckoutMethod,
    pub items: Vec<DonationLineItem>,
    pub total_amount: u64,
    pub currency: String,
}

impl CheckoutOrder {
    #[must_use]
    pub fn assemble(code: CheckoutCode, method: CheckoutMethod, cart: &CartState) -> Self {
        Self {
            code,
            method,
            items: cart.items.clone(),
            total_amount: cart.total_amount(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}
