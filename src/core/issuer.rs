use crate::domain::model::CardIssuer;

/// Identifies the card network from prefix and length.
///
/// Only the four accepted networks are recognized. Numbers that merely pass
/// the checksum (all zeros, repeated digits, sequential test strings) fall
/// through to `None` and are refused at checkout.
pub fn classify(digits: &str) -> Option<CardIssuer> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let len = digits.len();
    let prefix2: u32 = digits.get(..2).and_then(|p| p.parse().ok()).unwrap_or(0);

    if digits.starts_with('4') && (len == 13 || len == 16) {
        Some(CardIssuer::Visa)
    } else if (51..=55).contains(&prefix2) && len == 16 {
        Some(CardIssuer::Mastercard)
    } else if (prefix2 == 34 || prefix2 == 37) && len == 15 {
        Some(CardIssuer::Amex)
    } else if (digits.starts_with("6011") || prefix2 == 65) && len == 16 {
        Some(CardIssuer::Discover)
    } else {
        None
    }
}
