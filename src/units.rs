//! Engineering-notation values for command-line and table inputs.
//!
//! Accepts plain floats (`220e-6`, `3.3`) and SPICE-style suffixes
//! (`220u`, `4.7k`, `100n`).

use crate::error::{CamsimError, Result};

/// Parse a value with an optional SI suffix.
///
/// Returns `None` if the text is not a number.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = match text.chars().last() {
        Some(last) => {
            let mult = match last {
                'p' => 1e-12,
                'n' => 1e-9,
                'u' | 'µ' => 1e-6,
                'm' => 1e-3,
                'k' | 'K' => 1e3,
                'M' => 1e6,
                'G' => 1e9,
                _ => 1.0,
            };
            if mult != 1.0 {
                (&text[..text.len() - last.len_utf8()], mult)
            } else {
                (text, 1.0)
            }
        }
        None => (text, 1.0),
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

/// Parse a comma-separated list of values, e.g. `"100u,220u,470e-6"`.
pub fn parse_value_list(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(|item| {
            parse_value(item).ok_or_else(|| CamsimError::InvalidValue {
                text: item.trim().to_string(),
            })
        })
        .collect()
}
