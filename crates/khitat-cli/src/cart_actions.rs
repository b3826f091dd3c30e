// SPDX-License-Identifier: Apache-2.0

use crate::config::CartConfig;
use crate::helpers::{cart_payload, emit_ok, find_project, load_catalog, open_store};
use crate::{CartCommand, CliError, OutputMode};
use khitat_model::{
    addon_offers_for, find_addon_offer, stepped_down, stepped_up, DonationLineItem, Project,
    ProjectId, MIN_STEPPED_AMOUNT,
};
use khitat_store::CartStore;
use serde_json::json;
use std::path::Path;

pub(crate) fn run_cart_command(
    command: CartCommand,
    config: &CartConfig,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let mut store = open_store(config);
    let name = match command {
        CartCommand::List => "cart list",
        CartCommand::Add {
            project_id,
            slug,
            title,
            image_url,
            amount,
            currency,
            label,
            description,
        } => {
            let project_id = ProjectId::parse(&project_id)
                .map_err(|e| CliError::validation("validation_error", e.to_string()))?;
            let mut item = DonationLineItem::new(
                project_id,
                slug,
                title,
                image_url,
                positive_amount(amount)?,
                currency,
            );
            item.label = label;
            item.description = description;
            store.add_item(item);
            "cart add"
        }
        CartCommand::Donate {
            catalog,
            slug,
            price,
        } => {
            let projects = load_catalog(&catalog).map_err(CliError::config)?;
            let project = lookup(&projects, &slug, &catalog)?;
            let price = project.price_at(price).ok_or_else(|| {
                CliError::validation(
                    "validation_error",
                    format!("project `{slug}` offers no prices"),
                )
            })?;
            positive_amount(price.amount)?;
            store.add_item(DonationLineItem::base_for(project, &price));
            "cart donate"
        }
        CartCommand::Addon {
            catalog,
            slug,
            offer,
            locale,
            amount,
            label,
            description,
        } => {
            let projects = load_catalog(&catalog).map_err(CliError::config)?;
            let project = lookup(&projects, &slug, &catalog)?;
            let item = match offer {
                Some(key) => find_addon_offer(project, &key)
                    .map_err(|e| CliError::validation("addon_unavailable", e.to_string()))?
                    .line_item(project, locale),
                None => custom_addon(project, amount, label, description)?,
            };
            store.add_item(item);
            "cart addon"
        }
        CartCommand::Offers { catalog, slug } => {
            return emit_offers(&catalog, &slug, output_mode);
        }
        CartCommand::Remove { project_id } => {
            store.remove_item(project_id);
            "cart remove"
        }
        CartCommand::RemoveAt { index } => {
            store.remove_item_by_index(index);
            "cart remove-at"
        }
        CartCommand::Update { project_id, amount } => {
            store.update_item_amount(project_id, positive_amount(amount)?);
            "cart update"
        }
        CartCommand::Increase { project_id } => {
            let current = current_amount(&store, &project_id)?;
            store.update_item_amount(project_id, stepped_up(current, config.amount_step));
            "cart increase"
        }
        CartCommand::Decrease { project_id } => {
            let current = current_amount(&store, &project_id)?;
            let next = stepped_down(current, config.amount_step).ok_or_else(|| {
                CliError::validation(
                    "amount_at_minimum",
                    format!("amount {current} cannot go below {MIN_STEPPED_AMOUNT}"),
                )
            })?;
            store.update_item_amount(project_id, next);
            "cart decrease"
        }
        CartCommand::Clear => {
            store.clear_cart();
            "cart clear"
        }
    };
    emit_ok(
        output_mode,
        json!({"command": name, "cart": cart_payload(store.snapshot())}),
    )
    .map_err(CliError::internal)
}

fn emit_offers(catalog: &Path, slug: &str, output_mode: OutputMode) -> Result<(), CliError> {
    let projects = load_catalog(catalog).map_err(CliError::config)?;
    let project = lookup(&projects, slug, catalog)?;
    emit_ok(
        output_mode,
        json!({
            "command": "cart offers",
            "slug": project.slug,
            "offers": addon_offers_for(project),
        }),
    )
    .map_err(CliError::internal)
}

/// Cart amounts are whole dollars above zero; the store itself does not check.
fn positive_amount(amount: u64) -> Result<u64, CliError> {
    if amount == 0 {
        return Err(CliError::validation(
            "validation_error",
            "amount must be a positive whole number".to_string(),
        ));
    }
    Ok(amount)
}

fn custom_addon(
    project: &Project,
    amount: Option<u64>,
    label: Option<String>,
    description: Option<String>,
) -> Result<DonationLineItem, CliError> {
    let label = label
        .filter(|label| !label.trim().is_empty())
        .ok_or_else(|| {
            CliError::validation(
                "validation_error",
                "add-on label must not be empty".to_string(),
            )
        })?;
    let amount = amount.ok_or_else(|| {
        CliError::validation(
            "validation_error",
            "add-on needs --amount or --offer".to_string(),
        )
    })?;
    Ok(DonationLineItem::addon_for(
        project,
        positive_amount(amount)?,
        label,
        description,
    ))
}

fn lookup<'a>(
    projects: &'a [Project],
    slug: &str,
    catalog: &Path,
) -> Result<&'a Project, CliError> {
    find_project(projects, slug).ok_or_else(|| {
        CliError::validation(
            "project_not_found",
            format!("no project `{slug}` in {}", catalog.display()),
        )
    })
}

/// Amount of the entry `update` would touch: the first one for the project.
fn current_amount(store: &CartStore, project_id: &ProjectId) -> Result<u64, CliError> {
    store
        .snapshot()
        .iter()
        .find(|item| item.project_id == *project_id)
        .map(|item| item.amount)
        .ok_or_else(|| {
            CliError::validation(
                "item_not_found",
                format!("project {project_id} is not in the cart"),
            )
        })
}
