// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SubmitErrorCode {
    Conflict,
    Io,
    Encode,
    Rejected,
}

impl SubmitErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conflict => "order_conflict",
            Self::Io => "io_error",
            Self::Encode => "encode_error",
            Self::Rejected => "order_rejected",
        }
    }
}

/// Failure reported by an `OrderSink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    pub code: SubmitErrorCode,
    pub message: String,
}

impl SubmitError {
    #[must_use]
    pub fn new(code: SubmitErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for SubmitError {}

impl From<serde_json::Error> for SubmitError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(SubmitErrorCode::Encode, value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CheckoutErrorCode {
    MethodNotSelected,
    EmptyCart,
    Submission,
}

impl CheckoutErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MethodNotSelected => "method_not_selected",
            Self::EmptyCart => "empty_cart",
            Self::Submission => "submission_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutError {
    pub code: CheckoutErrorCode,
    pub message: String,
}

impl CheckoutError {
    #[must_use]
    pub fn new(code: CheckoutErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for CheckoutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CheckoutError {}

impl From<SubmitError> for CheckoutError {
    fn from(value: SubmitError) -> Self {
        Self::new(CheckoutErrorCode::Submission, value.to_string())
    }
}
