//! Volume discount Function: percentage off each eligible cart line, picked
//! from merchant-configured quantity tiers.

use shopify_rust_function::discounts::Output;
use thiserror::Error;

pub mod assembly;
pub mod configuration;
pub mod eligibility;
pub mod input;
pub mod tiers;

use assembly::ResolvedDiscount;
use configuration::{ConfigError, Configuration, DiscountRules};
use input::{Cart, Input};
use tiers::TierError;

/// Something worth logging about an evaluation. Never changes the result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("volume discount disabled: {0}")]
    Disabled(#[from] ConfigError),

    #[error("skipping tier: {0}")]
    TierSkipped(#[from] TierError),
}

/// Evaluates the discount for one cart. Problems with the stored
/// configuration degrade to [`Output::empty`] and are passed to `report`.
pub fn run(input: &Input, mut report: impl FnMut(Diagnostic)) -> Output {
    let rules = match rules_for(input) {
        Ok(rules) => rules,
        Err(err) => {
            report(err.into());
            return Output::empty();
        }
    };
    for skipped in &rules.skipped {
        report(skipped.clone().into());
    }
    apply(&input.cart, &rules)
}

fn rules_for(input: &Input) -> Result<DiscountRules, ConfigError> {
    let value = input.configuration_value().ok_or(ConfigError::Missing)?;
    Configuration::from_metafield(value)?.rules()
}

/// Eligible lines, each priced at its highest reached tier.
pub fn apply(cart: &Cart, rules: &DiscountRules) -> Output {
    let resolved = rules
        .eligibility
        .eligible_lines(&cart.lines)
        .filter_map(|line| {
            rules.tiers.resolve(line.quantity).map(|percentage| ResolvedDiscount {
                line_id: &line.id,
                percentage,
            })
        });
    assembly::assemble(resolved)
}
