//! Function input, as selected by `input.graphql`.

use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};
use shopify_rust_function::scalars::*;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub cart: Cart,
    #[serde(default)]
    pub discount_node: DiscountNode,
}

impl Input {
    /// The stored configuration JSON, if the discount has one.
    pub fn configuration_value(&self) -> Option<&str> {
        self.discount_node
            .metafield
            .as_ref()
            .map(|metafield| metafield.value.as_str())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: ID,
    pub quantity: Int,
    pub merchandise: Merchandise,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "__typename")]
pub enum Merchandise {
    ProductVariant(ProductVariant),
    /// Any other merchandise kind, such as a custom product.
    #[serde(other)]
    Other,
}

impl Merchandise {
    pub fn product(&self) -> Option<&Product> {
        match self {
            Merchandise::ProductVariant(variant) => Some(&variant.product),
            Merchandise::Other => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ProductVariant {
    pub id: ID,
    pub product: Product,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ID,
    /// Whether the product belongs to the collection the discount targets.
    /// Missing or `null` means it doesn't.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub in_excluded_collection: Boolean,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DiscountNode {
    pub metafield: Option<Metafield>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Metafield {
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchandise_variants() {
        let line: CartLine = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/CartLine/0",
            "quantity": 2,
            "merchandise": {
                "__typename": "ProductVariant",
                "id": "gid://shopify/ProductVariant/0",
                "product": { "id": "gid://shopify/Product/0", "inExcludedCollection": true }
            }
        }))
        .unwrap();
        let product = line.merchandise.product().unwrap();
        assert_eq!(product.id, "gid://shopify/Product/0");
        assert!(product.in_excluded_collection);

        let line: CartLine = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/CartLine/1",
            "quantity": 1,
            "merchandise": { "__typename": "CustomProduct", "title": "Gift wrap" }
        }))
        .unwrap();
        assert_eq!(line.merchandise, Merchandise::Other);
        assert_eq!(line.merchandise.product(), None);
    }

    #[test]
    fn test_collection_flag_defaults_to_false() {
        let product: Product =
            serde_json::from_value(serde_json::json!({ "id": "gid://shopify/Product/1" })).unwrap();
        assert!(!product.in_excluded_collection);

        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/1",
            "inExcludedCollection": null
        }))
        .unwrap();
        assert!(!product.in_excluded_collection);
    }

    #[test]
    fn test_missing_discount_node_has_no_configuration() {
        let input: Input = serde_json::from_value(serde_json::json!({ "cart": { "lines": [] } }))
            .unwrap();
        assert_eq!(input.configuration_value(), None);

        let input: Input = serde_json::from_value(serde_json::json!({
            "cart": { "lines": [] },
            "discountNode": { "metafield": { "value": "{}" } }
        }))
        .unwrap();
        assert_eq!(input.configuration_value(), Some("{}"));
    }
}
