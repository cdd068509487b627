use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::scalars::*;

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub struct Output {
    pub discounts: Vec<Discount>,
    pub discount_application_strategy: DiscountApplicationStrategy,
}

impl Output {
    /// The result for "nothing to discount": no entries, applied with `FIRST`.
    pub fn empty() -> Self {
        Self {
            discounts: vec![],
            discount_application_strategy: DiscountApplicationStrategy::First,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Deserialize)]
#[serde(rename_all(
    serialize = "SCREAMING_SNAKE_CASE",
    deserialize = "SCREAMING_SNAKE_CASE"
))]
pub enum DiscountApplicationStrategy {
    /// Only the first discount entry is applied.
    First,
    /// Every discount entry is applied.
    All,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
pub struct Discount {
    pub targets: Vec<Target>,
    pub value: Value,
    pub message: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub enum Value {
    Percentage(Percentage),
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
pub struct Percentage {
    pub value: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq, Deserialize)]
#[serde(rename_all(serialize = "camelCase", deserialize = "camelCase"))]
pub enum Target {
    CartLine { id: ID },
}

impl Discount {
    /// A percentage-off discount on a single cart line.
    pub fn cart_line_percentage(line_id: impl Into<ID>, percentage: Decimal) -> Self {
        Self {
            targets: vec![Target::CartLine { id: line_id.into() }],
            value: Value::Percentage(Percentage { value: percentage }),
            message: None,
        }
    }
}
