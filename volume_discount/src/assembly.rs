use shopify_rust_function::prelude::*;

/// A cart line that passed eligibility and reached a tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedDiscount<'a> {
    pub line_id: &'a ID,
    pub percentage: Decimal,
}

/// One percentage discount per resolved line, applied with `ALL` so each line
/// keeps its own rate. Nothing resolved is the empty result.
pub fn assemble<'a>(resolved: impl IntoIterator<Item = ResolvedDiscount<'a>>) -> Output {
    let discounts: Vec<Discount> = resolved
        .into_iter()
        .map(|discount| {
            Discount::cart_line_percentage(discount.line_id.as_str(), discount.percentage)
        })
        .collect();

    if discounts.is_empty() {
        return Output::empty();
    }

    Output {
        discounts,
        discount_application_strategy: DiscountApplicationStrategy::All,
    }
}
