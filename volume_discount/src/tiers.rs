//! Quantity tiers and the highest-tier lookup.

use serde_json::Value;
use shopify_rust_function::scalars::{Decimal, Int};
use thiserror::Error;

/// Integers up to 2^53 are exactly representable as `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Why a single configured tier was left out of the table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TierError {
    #[error("{key} has a quantity but no percentage")]
    MissingPercentage { key: String },

    #[error("{key} has a percentage but no quantity")]
    MissingThreshold { key: String },

    #[error("{key} quantity {value} is not a positive integer")]
    InvalidThreshold { key: String, value: Value },

    #[error("{key} percentage {value} is not a number between 0 and 100")]
    InvalidPercentage { key: String, value: Value },
}

/// "Buy at least `threshold`, get `percentage` off."
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tier {
    pub threshold: Int,
    pub percentage: Decimal,
}

impl Tier {
    /// Coerces a stored `(quantity, percentage)` pair into a tier.
    pub fn from_values(
        key: &str,
        quantity: &Value,
        percentage: &Value,
    ) -> Result<Self, TierError> {
        let threshold = threshold_from(quantity).ok_or_else(|| TierError::InvalidThreshold {
            key: key.to_string(),
            value: quantity.clone(),
        })?;
        let percentage = percentage_from(percentage).ok_or_else(|| TierError::InvalidPercentage {
            key: key.to_string(),
            value: percentage.clone(),
        })?;
        Ok(Self {
            threshold,
            percentage,
        })
    }
}

/// Tiers ordered by threshold, highest first.
///
/// The sort is stable, so tiers sharing a threshold keep the order they were
/// given in and the earliest one wins a lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    pub fn new(tiers: impl IntoIterator<Item = Tier>) -> Self {
        let mut tiers: Vec<Tier> = tiers.into_iter().collect();
        tiers.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        Self { tiers }
    }

    /// Percentage of the highest tier whose threshold `quantity` reaches.
    pub fn resolve(&self, quantity: Int) -> Option<Decimal> {
        self.tiers
            .iter()
            .find(|tier| tier.threshold <= quantity)
            .map(|tier| tier.percentage)
    }

    #[cfg(test)]
    pub(crate) fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// A positive integer, given as a JSON number or a numeric string.
fn threshold_from(value: &Value) -> Option<Int> {
    let threshold = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<Int>()
                .ok()
                .or_else(|| Decimal::parse(text).ok().and_then(|d| integral(d.as_f64())))
        }
        _ => None,
    }?;
    (threshold >= 1).then_some(threshold)
}

fn integral(value: f64) -> Option<Int> {
    (value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER).then_some(value as Int)
}

/// A number in `0..=100`, given as a JSON number or a numeric string.
fn percentage_from(value: &Value) -> Option<Decimal> {
    let percentage = match value {
        Value::Number(number) => number.as_f64().and_then(|n| Decimal::finite(n).ok()),
        Value::String(text) => Decimal::parse(text).ok(),
        _ => None,
    }?;
    (0.0..=100.0).contains(&percentage.as_f64()).then_some(percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tier(threshold: Int, percentage: f64) -> Tier {
        Tier {
            threshold,
            percentage: Decimal(percentage),
        }
    }

    #[test]
    fn test_resolve_picks_highest_reached_threshold() {
        let table = TierTable::new([tier(5, 10.0), tier(10, 20.0), tier(20, 30.0)]);
        assert_eq!(table.resolve(4), None);
        assert_eq!(table.resolve(5), Some(Decimal(10.0)));
        assert_eq!(table.resolve(12), Some(Decimal(20.0)));
        assert_eq!(table.resolve(20), Some(Decimal(30.0)));
        assert_eq!(table.resolve(500), Some(Decimal(30.0)));
    }

    #[test]
    fn test_resolve_ignores_input_order() {
        let forward = TierTable::new([tier(10, 10.0), tier(5, 20.0)]);
        let backward = TierTable::new([tier(5, 20.0), tier(10, 10.0)]);
        assert_eq!(forward, backward);
        assert_eq!(forward.resolve(7), Some(Decimal(20.0)));
        assert_eq!(forward.resolve(10), Some(Decimal(10.0)));
    }

    #[test]
    fn test_duplicate_thresholds_keep_first() {
        let table = TierTable::new([tier(3, 15.0), tier(3, 25.0), tier(1, 5.0)]);
        assert_eq!(table.resolve(3), Some(Decimal(15.0)));
        assert_eq!(table.tiers()[0], tier(3, 15.0));
    }

    #[test]
    fn test_empty_table_never_matches() {
        let table = TierTable::default();
        assert!(table.is_empty());
        assert_eq!(table.resolve(Int::MAX), None);
    }

    #[test]
    fn test_threshold_coercion() {
        assert_eq!(threshold_from(&json!(5)), Some(5));
        assert_eq!(threshold_from(&json!("5")), Some(5));
        assert_eq!(threshold_from(&json!(" 12 ")), Some(12));
        assert_eq!(threshold_from(&json!(4.0)), Some(4));
        assert_eq!(threshold_from(&json!("4.0")), Some(4));
        assert_eq!(threshold_from(&json!(4.5)), None);
        assert_eq!(threshold_from(&json!(0)), None);
        assert_eq!(threshold_from(&json!(-3)), None);
        assert_eq!(threshold_from(&json!("")), None);
        assert_eq!(threshold_from(&json!("ten")), None);
        assert_eq!(threshold_from(&json!(null)), None);
        assert_eq!(threshold_from(&json!(true)), None);
    }

    #[test]
    fn test_percentage_coercion() {
        assert_eq!(percentage_from(&json!(10)), Some(Decimal(10.0)));
        assert_eq!(percentage_from(&json!("12.5")), Some(Decimal(12.5)));
        assert_eq!(percentage_from(&json!("NaN")), None);
        assert_eq!(percentage_from(&json!("Infinity")), None);
        assert_eq!(percentage_from(&json!("")), None);
        assert_eq!(percentage_from(&json!([10])), None);
        assert_eq!(percentage_from(&json!(0)), Some(Decimal(0.0)));
        assert_eq!(percentage_from(&json!("100")), Some(Decimal(100.0)));
        assert_eq!(percentage_from(&json!(-5)), None);
        assert_eq!(percentage_from(&json!("100.5")), None);
    }

    #[test]
    fn test_tier_from_values_reports_key() {
        assert_eq!(
            Tier::from_values("tier01", &json!("3"), &json!("15")),
            Ok(tier(3, 15.0))
        );
        assert_eq!(
            Tier::from_values("tier02", &json!("x"), &json!(15)),
            Err(TierError::InvalidThreshold {
                key: "tier02".to_string(),
                value: json!("x"),
            })
        );
        assert_eq!(
            Tier::from_values("tier03", &json!(3), &json!("x")),
            Err(TierError::InvalidPercentage {
                key: "tier03".to_string(),
                value: json!("x"),
            })
        );
    }
}
