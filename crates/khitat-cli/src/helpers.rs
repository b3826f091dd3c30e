// SPDX-License-Identifier: Apache-2.0

use crate::config::CartConfig;
use crate::OutputMode;
use khitat_model::{CartState, Project};
use khitat_store::{detect_storage, CartPersistence, CartStore};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

pub(crate) fn emit_ok(output_mode: OutputMode, payload: Value) -> Result<(), String> {
    if output_mode.json {
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).map_err(|e| e.to_string())?
        );
    }
    Ok(())
}

pub(crate) fn open_store(config: &CartConfig) -> CartStore {
    let persistence = CartPersistence::new(detect_storage(Some(&config.data_dir)))
        .with_key(config.storage_key.clone());
    CartStore::with_persistence(persistence)
}

pub(crate) fn cart_payload(cart: &CartState) -> Value {
    json!({
        "items": cart.items,
        "count": cart.len(),
        "total_amount": cart.total_amount(),
        "currency": khitat_model::DEFAULT_CURRENCY,
        "phase": cart.phase().as_str(),
    })
}

/// Reads a JSON array of catalog projects.
pub(crate) fn load_catalog(path: &Path) -> Result<Vec<Project>, String> {
    let raw = fs::read(path).map_err(|e| format!("failed to read catalog {}: {e}", path.display()))?;
    serde_json::from_slice(&raw).map_err(|e| format!("invalid catalog {}: {e}", path.display()))
}

pub(crate) fn find_project<'a>(catalog: &'a [Project], slug: &str) -> Option<&'a Project> {
    catalog.iter().find(|project| project.slug == slug)
}
