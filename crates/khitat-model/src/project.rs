// SPDX-License-Identifier: Apache-2.0

use crate::ids::{ProjectId, ValidationError};
use crate::money::DEFAULT_CURRENCY;
use crate::serde_helpers::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            other => Err(ValidationError(format!(
                "unsupported locale `{other}` (expected en or ar)"
            ))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Ar)
    }
}

/// One selectable donation amount on a project page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Price {
    #[must_use]
    pub fn usd(amount: u64) -> Self {
        Self {
            amount,
            currency: Some(DEFAULT_CURRENCY.to_string()),
            label: None,
            description: None,
        }
    }
}

/// Amount ladder offered when a project has no price list of its own.
#[must_use]
pub fn default_prices() -> Vec<Price> {
    [50, 100, 200, 300].into_iter().map(Price::usd).collect()
}

/// Catalog row for a donation campaign, as stored by the hosted database.
///
/// Rows come from more than one schema generation, so both Arabic column
/// pairs are kept and nullable columns decode to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arabic_title: Option<String>,
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub brief_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_description_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arabic_desc: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub upsell_text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub prices: Vec<Price>,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub updated_at: String,
}

fn first_non_empty<'a>(candidates: [Option<&'a str>; 2]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

impl Project {
    #[must_use]
    pub fn effective_prices(&self) -> Vec<Price> {
        if self.prices.is_empty() {
            default_prices()
        } else {
            self.prices.clone()
        }
    }

    /// Price at `index`, falling back to the first price like the donation sidebar.
    #[must_use]
    pub fn price_at(&self, index: usize) -> Option<Price> {
        let prices = self.effective_prices();
        prices
            .get(index)
            .or_else(|| prices.first())
            .cloned()
    }

    /// `title_ar`, then `arabic_title`, then the English title.
    #[must_use]
    pub fn title_for(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => {
                first_non_empty([self.title_ar.as_deref(), self.arabic_title.as_deref()])
                    .unwrap_or(&self.title)
            }
            Locale::En => &self.title,
        }
    }

    #[must_use]
    pub fn brief_for(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => first_non_empty([
                self.brief_description_ar.as_deref(),
                self.arabic_desc.as_deref(),
            ])
            .unwrap_or(&self.brief_description),
            Locale::En => &self.brief_description,
        }
    }
}
