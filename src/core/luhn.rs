pub const MIN_CARD_LEN: usize = 13;
pub const MAX_CARD_LEN: usize = 19;

/// Mod-10 check over a digit-only string of 13 to 19 digits.
pub fn luhn_valid(digits: &str) -> bool {
    if digits.len() < MIN_CARD_LEN || digits.len() > MAX_CARD_LEN {
        return false;
    }

    let mut sum = 0u32;
    for (i, c) in digits.chars().rev().enumerate() {
        let Some(d) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 1 {
            let doubled = d * 2;
            if doubled > 9 {
                doubled - 9
            } else {
                doubled
            }
        } else {
            d
        };
    }

    sum % 10 == 0
}
