use shopify_rust_function::prelude::*;
use shopify_rust_function::Result;
use volume_discount::input::Input;

#[shopify_function]
fn function(input: Input) -> Result<Output> {
    Ok(volume_discount::run(&input, |diagnostic| log!("{diagnostic}")))
}
