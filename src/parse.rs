//! Parsing of `"<number> <unit>"` strings.

use crate::error::{UnitError, UnitResult};

/// Number format used when parsing scalar strings.
///
/// ```
/// use metrum::ParseOptions;
///
/// let opts = ParseOptions::comma_decimal();
/// assert_eq!(opts.decimal_separator, ',');
/// assert_eq!(opts.grouping_separator, Some('.'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Character separating the integer from the fractional part.
    pub decimal_separator: char,
    /// Thousands separator to ignore, if any.
    pub grouping_separator: Option<char>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: None,
        }
    }
}

impl ParseOptions {
    /// `1.234,5` style numbers.
    pub fn comma_decimal() -> Self {
        Self {
            decimal_separator: ',',
            grouping_separator: Some('.'),
        }
    }
}

/// Split `text` into its numeric value and the (trimmed) unit token.
pub(crate) fn split_value<'a>(text: &'a str, options: &ParseOptions) -> UnitResult<(f64, &'a str)> {
    let text = text.trim();
    if text.is_empty() {
        return Err(UnitError::IllegalArgument("empty quantity string".to_string()));
    }

    let end = number_end(text, options);
    if end == 0 {
        return Err(UnitError::invalid_format(text, "no leading number"));
    }
    let (number, token) = text.split_at(end);

    let mut normalized = String::with_capacity(number.len());
    for c in number.chars() {
        if Some(c) == options.grouping_separator {
            continue;
        }
        normalized.push(if c == options.decimal_separator { '.' } else { c });
    }
    let value = normalized
        .parse::<f64>()
        .map_err(|e| UnitError::invalid_format(text, e.to_string()))?;
    Ok((value, token.trim()))
}

/// Byte offset where the number ends. An exponent marker only counts when
/// digits follow it, so `3eV` reads as three electronvolts.
fn number_end(text: &str, options: &ParseOptions) -> usize {
    let bytes: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;
    let mut seen_digit = false;
    while i < bytes.len() {
        let c = bytes[i].1;
        let numeric = c.is_ascii_digit()
            || c == options.decimal_separator
            || Some(c) == options.grouping_separator
            || ((c == '+' || c == '-') && i == 0);
        if numeric {
            seen_digit |= c.is_ascii_digit();
            i += 1;
            continue;
        }
        if (c == 'e' || c == 'E') && seen_digit {
            let mut j = i + 1;
            if j < bytes.len() && matches!(bytes[j].1, '+' | '-') {
                j += 1;
            }
            if j < bytes.len() && bytes[j].1.is_ascii_digit() {
                i = j;
                continue;
            }
        }
        break;
    }
    bytes.get(i).map_or(text.len(), |&(offset, _)| offset)
}
