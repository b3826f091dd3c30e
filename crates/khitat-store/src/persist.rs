// SPDX-License-Identifier: Apache-2.0

use crate::error::{StoreError, StoreErrorCode};
use crate::reducer::CartAction;
use crate::storage::{KeyValueStorage, StorageKind};
use khitat_model::CartState;
use serde_json::{Map, Value};

pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Top-level cart fields that are written to and read back from storage.
/// Anything else is session-transient and dropped on both paths.
pub const PERSIST_ALLOW_LIST: &[&str] = &["items"];

fn retain_allowed(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(field, _)| PERSIST_ALLOW_LIST.contains(&field.as_str()))
            .collect()),
        other => Err(StoreError::new(
            StoreErrorCode::Decode,
            format!("persisted cart must be a JSON object, found {other}"),
        )),
    }
}

pub fn encode_persisted(state: &CartState) -> Result<String, StoreError> {
    let allowed = retain_allowed(serde_json::to_value(state)?)?;
    Ok(serde_json::to_string(&Value::Object(allowed))?)
}

pub fn decode_persisted(raw: &str) -> Result<CartState, StoreError> {
    let value: Value = serde_json::from_str(raw)?;
    let allowed = retain_allowed(value)?;
    Ok(serde_json::from_value(Value::Object(allowed))?)
}

/// Mirrors the cart into a key-value slot.
///
/// `load` and `save` never fail: the in-memory cart stays authoritative for the
/// process lifetime, so storage errors are logged and dropped here.
pub struct CartPersistence {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl CartPersistence {
    #[must_use]
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn storage_kind(&self) -> StorageKind {
        self.storage.kind()
    }

    pub fn try_load(&self) -> Result<CartState, StoreError> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => decode_persisted(&raw),
            None => Ok(CartState::default()),
        }
    }

    #[must_use]
    pub fn load(&self) -> CartState {
        match self.try_load() {
            Ok(state) => {
                tracing::debug!(
                    backend = self.storage.kind().as_str(),
                    key = %self.key,
                    items = state.len(),
                    "cart rehydrated"
                );
                state
            }
            Err(err) => {
                tracing::warn!(
                    backend = self.storage.kind().as_str(),
                    key = %self.key,
                    error = %err,
                    "discarding unreadable persisted cart"
                );
                CartState::default()
            }
        }
    }

    pub fn try_save(&self, state: &CartState) -> Result<(), StoreError> {
        let document = encode_persisted(state)?;
        self.storage.set_item(&self.key, &document)
    }

    pub fn save(&self, state: &CartState) {
        if let Err(err) = self.try_save(state) {
            tracing::warn!(
                backend = self.storage.kind().as_str(),
                key = %self.key,
                error = %err,
                "cart persistence failed; keeping in-memory state"
            );
        }
    }

    pub fn purge(&self) -> Result<(), StoreError> {
        self.storage.remove_item(&self.key)
    }
}

/// Store observer that saves the new state after every dispatch.
pub fn persistence_observer(persistence: CartPersistence) -> impl FnMut(&CartAction, &CartState) {
    move |_action, state| persistence.save(state)
}
