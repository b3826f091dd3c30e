// SPDX-License-Identifier: Apache-2.0

use crate::ids::ProjectId;
use crate::money::DEFAULT_CURRENCY;
use crate::project::{Price, Project};
use serde::{Deserialize, Serialize};

/// One donation pledge waiting in the cart.
///
/// Slug, title and image are a snapshot of the project at the time the item
/// was added so the cart renders without refetching the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationLineItem {
    pub project_id: ProjectId,
    pub project_slug: String,
    pub project_title: String,
    pub project_image_url: String,
    pub amount: u64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DonationLineItem {
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        project_slug: impl Into<String>,
        project_title: impl Into<String>,
        project_image_url: impl Into<String>,
        amount: u64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            project_slug: project_slug.into(),
            project_title: project_title.into(),
            project_image_url: project_image_url.into(),
            amount,
            currency: currency.into(),
            label: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Base donation for `project` at the chosen price.
    ///
    /// Label and description stay unset so the cart merges it with any
    /// earlier base donation for the same project.
    #[must_use]
    pub fn base_for(project: &Project, price: &Price) -> Self {
        Self::new(
            project.id.clone(),
            project.slug.clone(),
            project.title.clone(),
            project.image_url.clone(),
            price.amount,
            price.currency.as_deref().unwrap_or(DEFAULT_CURRENCY),
        )
    }

    #[must_use]
    pub fn addon_for(
        project: &Project,
        amount: u64,
        label: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        let mut item = Self::new(
            project.id.clone(),
            project.slug.clone(),
            project.title.clone(),
            project.image_url.clone(),
            amount,
            DEFAULT_CURRENCY,
        )
        .with_label(label);
        item.description = description;
        item
    }

    /// The label, treating an empty string the same as no label.
    #[must_use]
    pub fn effective_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    #[must_use]
    pub fn is_addon(&self) -> bool {
        self.effective_label().is_some()
    }

    #[must_use]
    pub fn key(&self) -> LineKey {
        match self.effective_label() {
            Some(label) => LineKey::Addon(self.project_id.clone(), label.to_string()),
            None => LineKey::Base(self.project_id.clone()),
        }
    }
}

/// Merge identity of a line item.
///
/// Adding an item whose key is already present overwrites that entry's amount.
/// `updateItemAmount` deliberately does not use this key: it matches the first
/// entry with the project id whatever its label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LineKey {
    Base(ProjectId),
    Addon(ProjectId, String),
}

impl LineKey {
    #[must_use]
    pub fn project_id(&self) -> &ProjectId {
        match self {
            Self::Base(id) | Self::Addon(id, _) => id,
        }
    }

    #[must_use]
    pub fn matches(&self, item: &DonationLineItem) -> bool {
        match self {
            Self::Base(id) => item.project_id == *id && item.effective_label().is_none(),
            Self::Addon(id, label) => {
                item.project_id == *id && item.effective_label() == Some(label.as_str())
            }
        }
    }
}
