//! Text form of a pack-size set and quantity input validation.

use thiserror::Error;

pub const PACK_SIZE_DELIMITER: char = ',';
const PACK_SIZE_SEPARATOR: &str = ", ";

/// Renders sizes in the given order, e.g. `[500, 250]` -> `"500, 250"`.
pub fn format_pack_sizes<I>(sizes: I) -> String
where
    I: IntoIterator<Item = u64>,
{
    sizes
        .into_iter()
        .map(|size| size.to_string())
        .collect::<Vec<_>>()
        .join(PACK_SIZE_SEPARATOR)
}

/// Parses a user-edited size list.
///
/// Tokens are split on `,` and trimmed. Empty tokens, tokens without a leading
/// integer, and values `<= 0` are dropped. Surviving values keep the order the
/// user typed them in; duplicates are left for the server to judge.
pub fn parse_pack_sizes(text: &str) -> Vec<u64> {
    text.split(PACK_SIZE_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(leading_positive_integer)
        .collect()
}

/// Reads an optional sign and the leading run of decimal digits, ignoring
/// whatever follows (`"12abc"` -> 12, `"1.5"` -> 1). Negative, zero and
/// overflowing values yield `None`.
fn leading_positive_integer(token: &str) -> Option<u64> {
    let (negative, rest) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value: u64 = rest[..digits_len].parse().ok()?;
    if negative || value == 0 {
        return None;
    }
    Some(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is required")]
    Missing,
    #[error("quantity must be a whole number")]
    NotANumber,
    #[error("quantity must be at least 1")]
    NotPositive,
}

/// Validates the quantity field before anything is sent.
pub fn parse_quantity(input: &str) -> Result<u64, QuantityError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(QuantityError::Missing);
    }
    if let Some(rest) = input.strip_prefix('-') {
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(QuantityError::NotPositive);
        }
        return Err(QuantityError::NotANumber);
    }
    match input.parse::<u64>() {
        Ok(0) => Err(QuantityError::NotPositive),
        Ok(quantity) => Ok(quantity),
        Err(_) => Err(QuantityError::NotANumber),
    }
}

#[cfg(test)]
#[path = "tests/pack_sizes_tests.rs"]
mod tests;
