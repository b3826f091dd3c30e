// SPDX-License-Identifier: Apache-2.0

use crate::ids::ValidationError;
use crate::line_item::DonationLineItem;
use crate::project::{Locale, Project};
use serde::Serialize;

/// Projects whose page offers the fixed add-ons. Waleemah is only arranged
/// together with a sacrifice.
pub const ADDON_PROJECT_SLUGS: &[&str] = &["sadaqah-sacrifice", "aqeeqah"];

/// Fixed add-on sold alongside a sacrifice donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddonOffer {
    pub key: &'static str,
    pub amount: u64,
    pub label_en: &'static str,
    pub label_ar: &'static str,
    pub description_en: &'static str,
    pub description_ar: &'static str,
}

pub const ADDON_OFFERS: &[AddonOffer] = &[
    AddonOffer {
        key: "waleemah",
        amount: 80,
        label_en: "Waleemah",
        label_ar: "وليمة",
        description_en: "Community Feast - Feeds 100 people",
        description_ar: "وليمة مجتمعية - تكفي 100 شخص",
    },
    AddonOffer {
        key: "rice-25kg",
        amount: 39,
        label_en: "25 kg Rice",
        label_ar: "25 كجم أرز",
        description_en: "Optional add-on",
        description_ar: "إضافة اختيارية",
    },
];

impl AddonOffer {
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.label_en,
            Locale::Ar => self.label_ar,
        }
    }

    #[must_use]
    pub const fn description(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.description_en,
            Locale::Ar => self.description_ar,
        }
    }

    /// Cart entry for this offer. The label is localized, so the same offer
    /// added under both locales yields two entries.
    #[must_use]
    pub fn line_item(&self, project: &Project, locale: Locale) -> DonationLineItem {
        DonationLineItem::addon_for(
            project,
            self.amount,
            self.label(locale),
            Some(self.description(locale).to_string()),
        )
    }
}

/// Offers shown on `project`'s page; empty for most projects.
#[must_use]
pub fn addon_offers_for(project: &Project) -> &'static [AddonOffer] {
    if ADDON_PROJECT_SLUGS.contains(&project.slug.as_str()) {
        ADDON_OFFERS
    } else {
        &[]
    }
}

pub fn find_addon_offer(project: &Project, key: &str) -> Result<AddonOffer, ValidationError> {
    let offers = addon_offers_for(project);
    if offers.is_empty() {
        return Err(ValidationError(format!(
            "project `{}` has no add-on offers",
            project.slug
        )));
    }
    offers
        .iter()
        .find(|offer| offer.key == key.trim())
        .copied()
        .ok_or_else(|| {
            let known: Vec<&str> = offers.iter().map(|offer| offer.key).collect();
            ValidationError(format!(
                "unknown add-on `{key}` (expected one of {})",
                known.join(", ")
            ))
        })
}
