//! Keystroke normalizers for the booking form. Each takes whatever the input
//! widget currently holds and returns the canonical value to store.

pub const MAX_CARD_DIGITS: usize = 16;
pub const CVV_DIGITS: usize = 3;
const EXPIRY_DISPLAY_LEN: usize = 5;

fn digits_only(raw: &str) -> impl Iterator<Item = char> + '_ {
    raw.chars().filter(|c| c.is_ascii_digit())
}

/// Keeps at most 16 digits and groups them in runs of four.
pub fn format_card_number(raw: &str) -> String {
    let digits: Vec<char> = digits_only(raw).take(MAX_CARD_DIGITS).collect();
    digits
        .chunks(4)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical digits of a displayed card number.
pub fn card_digits(display: &str) -> String {
    digits_only(display).collect()
}

/// "MMYY" keystrokes become "MM/YY"; the slash appears once a third digit is typed.
pub fn format_expiry(raw: &str) -> String {
    let digits: String = digits_only(raw).collect();
    let mut formatted = if digits.len() >= 3 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    };
    formatted.truncate(EXPIRY_DISPLAY_LEN);
    formatted
}

pub fn format_cvv(raw: &str) -> String {
    digits_only(raw).take(CVV_DIGITS).collect()
}

pub fn format_card_holder(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect()
}

/// No clamping here; the range is enforced when the form is submitted.
pub fn parse_party_size(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub fn mask_card_number(digits: &str) -> String {
    let count = digits.chars().count();
    if count < 4 {
        return "****".to_string();
    }
    let last_four: String = digits.chars().skip(count - 4).collect();
    format!("**** {}", last_four)
}
