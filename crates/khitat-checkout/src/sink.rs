// SPDX-License-Identifier: Apache-2.0

use crate::error::{SubmitError, SubmitErrorCode};
use khitat_model::{CheckoutCode, CheckoutOrder};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Downstream that takes ownership of a submitted order.
pub trait OrderSink {
    fn submit(&self, order: &CheckoutOrder) -> Result<(), SubmitError>;
}

/// Writes each order to `<root>/checkouts/<CODE>.json`.
///
/// An order file is never replaced: a second submission with the same code
/// fails with `Conflict`.
#[derive(Debug, Clone)]
pub struct JsonDirOrderSink {
    pub root: PathBuf,
}

impl JsonDirOrderSink {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn checkouts_dir(&self) -> PathBuf {
        self.root.join("checkouts")
    }

    #[must_use]
    pub fn order_path(&self, code: &CheckoutCode) -> PathBuf {
        self.checkouts_dir().join(format!("{}.json", code.as_str()))
    }
}

fn io_err(err: std::io::Error) -> SubmitError {
    SubmitError::new(SubmitErrorCode::Io, err.to_string())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), SubmitError> {
    let mut f = fs::File::create(path).map_err(io_err)?;
    f.write_all(bytes).map_err(io_err)?;
    f.sync_all().map_err(io_err)
}

impl OrderSink for JsonDirOrderSink {
    fn submit(&self, order: &CheckoutOrder) -> Result<(), SubmitError> {
        CheckoutCode::parse(order.code.as_str())
            .map_err(|e| SubmitError::new(SubmitErrorCode::Rejected, e.to_string()))?;
        let dir = self.checkouts_dir();
        fs::create_dir_all(&dir).map_err(io_err)?;
        let path = self.order_path(&order.code);
        let bytes = serde_json::to_vec_pretty(order)?;
        let tmp = dir.join(format!("{}.json.tmp", order.code.as_str()));
        write_and_sync(&tmp, &bytes)?;
        // hard_link refuses an existing target, unlike rename.
        let published = fs::hard_link(&tmp, &path);
        let _ = fs::remove_file(&tmp);
        match published {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Err(SubmitError::new(
                SubmitErrorCode::Conflict,
                format!("order {} already recorded", order.code),
            )),
            Err(e) => Err(io_err(e)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryOrderSink {
    orders: Mutex<Vec<CheckoutOrder>>,
}

impl MemoryOrderSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders accepted so far, in submission order.
    #[must_use]
    pub fn orders(&self) -> Vec<CheckoutOrder> {
        self.orders
            .lock()
            .map(|orders| orders.clone())
            .unwrap_or_default()
    }
}

impl OrderSink for MemoryOrderSink {
    fn submit(&self, order: &CheckoutOrder) -> Result<(), SubmitError> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| SubmitError::new(SubmitErrorCode::Io, "order sink lock poisoned"))?;
        if orders.iter().any(|existing| existing.code == order.code) {
            return Err(SubmitError::new(
                SubmitErrorCode::Conflict,
                format!("order {} already recorded", order.code),
            ));
        }
        orders.push(order.clone());
        Ok(())
    }
}

/// Rejects every order. Used to exercise the retry path.
#[derive(Debug, Clone)]
pub struct FailingOrderSink {
    pub message: String,
}

impl FailingOrderSink {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl OrderSink for FailingOrderSink {
    fn submit(&self, _order: &CheckoutOrder) -> Result<(), SubmitError> {
        Err(SubmitError::new(SubmitErrorCode::Rejected, self.message.clone()))
    }
}
