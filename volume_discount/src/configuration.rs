//! The volume discount configuration stored in the discount's metafield.
//!
//! The admin app writes it as
//!
//! ```json
//! {
//!   "quantity": { "tier01": 5, "tier02": "10" },
//!   "percentage": { "tier01": 10, "tier02": "20" },
//!   "productId": ["gid://shopify/Product/1"]
//! }
//! ```
//!
//! Values arrive either as numbers or as numeric strings, depending on which
//! version of the form saved them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};
use shopify_rust_function::scalars::ID;
use thiserror::Error;

use crate::eligibility::Eligibility;
use crate::tiers::{Tier, TierError, TierTable};

pub const METAFIELD_NAMESPACE: &str = "$app:volume-discount";
pub const METAFIELD_KEY: &str = "function-configuration";
pub const METAFIELD_TYPE: &str = "json";

const TIER_KEY_PREFIX: &str = "tier";

/// Why a stored configuration cannot produce any discount.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("discount has no configuration metafield")]
    Missing,

    #[error("configuration is not valid JSON: {0}")]
    Malformed(String),

    #[error("configuration has no quantity tiers")]
    NoQuantities,

    #[error("configuration has no percentage tiers")]
    NoPercentages,
}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub quantity: BTreeMap<String, Value>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub percentage: BTreeMap<String, Value>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub product_id: Vec<ID>,
}

/// A usable configuration: the tier table, who it applies to, and the tiers
/// that had to be dropped on the way.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscountRules {
    pub tiers: TierTable,
    pub eligibility: Eligibility,
    pub skipped: Vec<TierError>,
}

impl Configuration {
    /// Parses the metafield value. Blank values are the empty configuration.
    pub fn from_metafield(value: &str) -> Result<Self, ConfigError> {
        shopify_rust_function::parse_config(Some(value))
            .map_err(|err| ConfigError::Malformed(err.to_string()))
    }

    pub fn to_metafield_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Adds `tierNN` with the given threshold and percentage.
    pub fn with_tier(
        mut self,
        index: usize,
        quantity: impl Into<Value>,
        percentage: impl Into<Value>,
    ) -> Self {
        let key = tier_key(index);
        self.quantity.insert(key.clone(), quantity.into());
        self.percentage.insert(key, percentage.into());
        self
    }

    pub fn with_products<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ID>,
    {
        self.product_id.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Validates and coerces the stored maps into [`DiscountRules`].
    ///
    /// An empty `quantity` or `percentage` map disables the discount. Tiers
    /// that only appear on one side, or whose values don't coerce, are
    /// skipped and reported individually.
    pub fn rules(&self) -> Result<DiscountRules, ConfigError> {
        if self.quantity.is_empty() {
            return Err(ConfigError::NoQuantities);
        }
        if self.percentage.is_empty() {
            return Err(ConfigError::NoPercentages);
        }

        let mut tiers = Vec::new();
        let mut skipped = Vec::new();
        for (key, quantity) in tier_entries(&self.quantity) {
            let Some(percentage) = self.percentage.get(key) else {
                skipped.push(TierError::MissingPercentage { key: key.clone() });
                continue;
            };
            match Tier::from_values(key, quantity, percentage) {
                Ok(tier) => tiers.push(tier),
                Err(err) => skipped.push(err),
            }
        }
        skipped.extend(
            tier_entries(&self.percentage)
                .filter(|(key, _)| !self.quantity.contains_key(*key))
                .map(|(key, _)| TierError::MissingThreshold { key: key.clone() }),
        );

        Ok(DiscountRules {
            tiers: TierTable::new(tiers),
            eligibility: Eligibility::from_product_ids(&self.product_id),
            skipped,
        })
    }
}

/// `tierNN`, with the index zero-padded to two digits as the admin form does.
pub fn tier_key(index: usize) -> String {
    format!("{TIER_KEY_PREFIX}{index:02}")
}

fn tier_entries(map: &BTreeMap<String, Value>) -> impl Iterator<Item = (&String, &Value)> {
    map.iter()
        .filter(|(key, _)| key.starts_with(TIER_KEY_PREFIX))
}
