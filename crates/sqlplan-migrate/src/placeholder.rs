//! Placeholder rewriting and parameter interpolation.
//!
//! Plans are rendered with `?` placeholders. Drivers that want numbered
//! parameters get them rewritten here, and logs get a copy of the query
//! with the arguments inlined.

use sqlplan_core::SqlValue;

/// Rewrites every `?` to `$1`, `$2`, ... in order of appearance.
///
/// Every `?` is a placeholder, including ones inside string literals;
/// literal question marks must be passed as arguments.
#[must_use]
pub fn translate_placeholders(query: &str) -> String {
    let mut out = String::with_capacity(query.len() + 8);
    let mut index = 0;
    for c in query.chars() {
        if c == '?' {
            index += 1;
            out.push('$');
            out.push_str(&index.to_string());
        } else {
            out.push(c);
        }
    }
    out
}

/// Renders `query` with each `?` replaced by its argument as a literal.
///
/// Only for logging. Surplus placeholders are kept as `?`.
#[must_use]
pub fn interpolate_params(query: &str, args: &[SqlValue]) -> String {
    let mut out = String::with_capacity(query.len());
    let mut args = args.iter();
    for c in query.chars() {
        if c != '?' {
            out.push(c);
            continue;
        }
        let Some(value) = args.next() else {
            out.push('?');
            continue;
        };
        out.push_str(&value.to_sql_inline());
    }
    out
}
