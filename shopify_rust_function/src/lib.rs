//! Crate to write Shopify discount Functions in Rust with `serde`.
//!
//! A Function is a binary that reads its input query result as JSON on STDIN
//! and writes its result as JSON to STDOUT. The `#[shopify_function]`
//! attribute generates that `main` around a plain Rust function:
//!
//! ```ignore
//! use shopify_rust_function::{discounts::Output, shopify_function, Result};
//!
//! #[shopify_function]
//! fn function(input: Input) -> Result<Output> {
//!     /* ... */
//! }
//! ```

use std::io::{BufReader, Read, Write};

pub use anyhow;
pub use serde;
pub use serde_json;
pub use shopify_rust_function_macro::shopify_function;

pub mod discounts;
pub mod scalars;

pub mod prelude {
    pub use crate::discounts::*;
    pub use crate::log;
    pub use crate::scalars::*;
    pub use shopify_rust_function_macro::shopify_function;
}

pub type Result<T> = anyhow::Result<T>;

/// Writes a diagnostic line to STDERR, which the function runner collects as
/// the Function's logs. Failing to write is ignored.
#[macro_export]
macro_rules! log {
    ($($args:tt)*) => {
        {
            use std::io::Write;
            let _ = writeln!(std::io::stderr().lock(), $($args)*);
        }
    };
}

/// Parses a JSON configuration value. An absent or blank value is
/// `T::default()`; anything else must be valid JSON for `T`.
pub fn parse_config<T: serde::de::DeserializeOwned + Default>(
    config: Option<&str>,
) -> std::result::Result<T, serde_json::Error> {
    match config.filter(|s| !s.trim().is_empty()) {
        Some(raw) => serde_json::from_str(raw),
        None => Ok(T::default()),
    }
}

/// Decodes the Function input from `reader`, invokes `f` and encodes its
/// output into `writer`. This is what the generated `main` calls.
pub fn run_function<F, I, O, R, W>(f: F, reader: R, mut writer: W) -> Result<()>
where
    F: FnOnce(I) -> Result<O>,
    I: serde::de::DeserializeOwned,
    O: serde::Serialize,
    R: Read,
    W: Write,
{
    let input: I = serde_json::from_reader(BufReader::new(reader))?;
    let output = f(input)?;
    serde_json::to_writer(&mut writer, &output)?;
    writer.flush()?;
    Ok(())
}

/// Runs the given function `f` with the invocation payload, returning the
/// typed output. This function is provided as a helper when writing tests.
pub fn run_function_with_input<F, I, O>(f: F, payload: &str) -> Result<O>
where
    F: FnOnce(I) -> Result<O>,
    I: serde::de::DeserializeOwned,
{
    let input: I = serde_json::from_str(payload)?;
    f(input)
}
