use std::collections::BTreeSet;

use shopify_rust_function::scalars::ID;

use crate::input::CartLine;

/// Which cart lines a volume discount may apply to.
///
/// A product allow-list takes precedence. Only when it is empty does
/// collection membership decide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Eligibility {
    /// Lines whose product id is listed.
    Products(BTreeSet<ID>),
    /// Lines whose product is in the targeted collection.
    Collection,
}

impl Eligibility {
    pub fn from_product_ids<'a>(ids: impl IntoIterator<Item = &'a ID>) -> Self {
        let ids: BTreeSet<ID> = ids.into_iter().cloned().collect();
        if ids.is_empty() {
            Eligibility::Collection
        } else {
            Eligibility::Products(ids)
        }
    }

    pub fn is_eligible(&self, line: &CartLine) -> bool {
        let Some(product) = line.merchandise.product() else {
            return false;
        };
        match self {
            Eligibility::Products(ids) => ids.contains(&product.id),
            Eligibility::Collection => product.in_excluded_collection,
        }
    }

    /// The eligible lines, in cart order.
    pub fn eligible_lines<'a>(
        &'a self,
        lines: &'a [CartLine],
    ) -> impl Iterator<Item = &'a CartLine> + 'a {
        lines.iter().filter(move |line| self.is_eligible(line))
    }
}
