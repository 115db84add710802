//! Final gate before a booking is submitted. Rules run in a fixed order and
//! the first failure is the only one reported.

use crate::core::issuer::classify;
use crate::core::luhn::{luhn_valid, MIN_CARD_LEN};
use crate::core::normalize::{card_digits, CVV_DIGITS};
use crate::domain::model::{
    CardInput, CardIssuer, CustomerInput, FormState, ValidationFailure, ValidationResult,
};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_PARTY_SIZE: i32 = 1;
pub const MAX_PARTY_SIZE: i32 = 10;
pub const MIN_PHONE_LEN: usize = 6;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

type Check = Result<(), ValidationFailure>;

pub fn validate_form(form: &FormState, today: NaiveDate) -> ValidationResult {
    check_form(form, today).into()
}

pub fn check_form(form: &FormState, today: NaiveDate) -> Check {
    check_customer(&form.customer)?;
    check_card_number(&card_digits(&form.card.number))?;
    check_booking_date(form.selection.date, today)?;
    check_expiry(&form.card.expiry, today)?;
    check_cvv(&form.card.cvv)
}

pub fn check_customer(customer: &CustomerInput) -> Check {
    if customer.full_name.trim().is_empty() {
        return Err(ValidationFailure::MissingFullName);
    }
    if !EMAIL_SHAPE.is_match(&customer.email) {
        return Err(ValidationFailure::InvalidEmail);
    }
    if customer.phone.trim().chars().count() < MIN_PHONE_LEN {
        return Err(ValidationFailure::PhoneTooShort);
    }
    match customer.party_size {
        Some(size) if (MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&size) => Ok(()),
        _ => Err(ValidationFailure::PartySizeOutOfRange),
    }
}

/// Length, issuer, then checksum. Returns the issuer on success.
pub fn check_card_number(digits: &str) -> Result<CardIssuer, ValidationFailure> {
    if digits.len() < MIN_CARD_LEN {
        return Err(ValidationFailure::CardNumberTooShort);
    }
    let issuer = classify(digits).ok_or(ValidationFailure::UnsupportedIssuer)?;
    if !luhn_valid(digits) {
        return Err(ValidationFailure::ChecksumFailed);
    }
    Ok(issuer)
}

/// Day granularity: booking for today is allowed.
pub fn check_booking_date(date: Option<NaiveDate>, today: NaiveDate) -> Check {
    match date {
        None => Err(ValidationFailure::MissingDate),
        Some(date) if date < today => Err(ValidationFailure::DateInPast),
        Some(_) => Ok(()),
    }
}

/// Expects "MM/YY"; a card stays valid through the end of its expiry month.
pub fn check_expiry(expiry: &str, today: NaiveDate) -> Check {
    if expiry.len() != 5 || expiry.as_bytes()[2] != b'/' {
        return Err(ValidationFailure::MalformedExpiry);
    }

    let month: u32 = expiry
        .get(..2)
        .and_then(|m| m.parse().ok())
        .filter(|m| (1..=12).contains(m))
        .ok_or(ValidationFailure::InvalidExpiryMonth)?;
    let year: i32 = expiry
        .get(3..)
        .filter(|y| y.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|y| format!("20{}", y).parse().ok())
        .ok_or(ValidationFailure::MalformedExpiry)?;

    if year < today.year() || (year == today.year() && month < today.month()) {
        return Err(ValidationFailure::CardExpired);
    }
    Ok(())
}

pub fn check_cvv(cvv: &str) -> Check {
    if cvv.len() == CVV_DIGITS && cvv.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidCvv)
    }
}

/// Card-only subset of the checkout rules, for previewing a card before the
/// customer fills in everything else.
pub fn check_card(card: &CardInput, today: NaiveDate) -> Result<CardIssuer, ValidationFailure> {
    let issuer = check_card_number(&card_digits(&card.number))?;
    check_expiry(&card.expiry, today)?;
    check_cvv(&card.cvv)?;
    Ok(issuer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TimeSlot;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn valid_form() -> FormState {
        let mut form = FormState::default();
        form.selection.date = Some(today());
        form.selection.slot = Some(TimeSlot::Afternoon1600);
        form.customer = CustomerInput {
            full_name: "Giulia Bianchi".to_string(),
            email: "giulia@example.it".to_string(),
            phone: "+39 333 1234567".to_string(),
            party_size: Some(2),
        };
        form.card = CardInput {
            number: "4539 1488 0343 6467".to_string(),
            expiry: "09/27".to_string(),
            cvv: "123".to_string(),
            holder: "Giulia Bianchi".to_string(),
        };
        form
    }

    fn failure(form: &FormState) -> Option<ValidationFailure> {
        check_form(form, today()).err()
    }

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(validate_form(&valid_form(), today()), ValidationResult::Valid);
    }

    #[test]
    fn test_name_error_wins_over_email_error() {
        let mut form = valid_form();
        form.customer.full_name = "   ".to_string();
        form.customer.email = "not-an-email".to_string();
        assert_eq!(failure(&form), Some(ValidationFailure::MissingFullName));
    }

    #[test]
    fn test_email_shape() {
        let mut form = valid_form();
        for bad in ["", "a@b", "a b@c.d", "@example.com", "giulia@.", "giulia.example.com"] {
            form.customer.email = bad.to_string();
            assert_eq!(failure(&form), Some(ValidationFailure::InvalidEmail), "{}", bad);
        }
        form.customer.email = "a@b.c".to_string();
        assert_eq!(failure(&form), None);
    }

    #[test]
    fn test_phone_length() {
        let mut form = valid_form();
        form.customer.phone = "12345".to_string();
        assert_eq!(failure(&form), Some(ValidationFailure::PhoneTooShort));
        form.customer.phone = "123456".to_string();
        assert_eq!(failure(&form), None);
    }

    #[test]
    fn test_party_size_boundaries() {
        let mut form = valid_form();
        for (size, ok) in [(Some(0), false), (Some(1), true), (Some(10), true), (Some(11), false), (None, false)] {
            form.customer.party_size = size;
            let expected = if ok { None } else { Some(ValidationFailure::PartySizeOutOfRange) };
            assert_eq!(failure(&form), expected, "party size {:?}", size);
        }
    }

    #[test]
    fn test_card_number_rules_in_order() {
        let mut form = valid_form();
        form.card.number = "4539 1488 0343".to_string();
        assert_eq!(failure(&form), Some(ValidationFailure::CardNumberTooShort));

        form.card.number = "1234 5678 1234 5670".to_string();
        assert_eq!(failure(&form), Some(ValidationFailure::UnsupportedIssuer));

        form.card.number = "4539 1488 0343 6468".to_string();
        assert_eq!(failure(&form), Some(ValidationFailure::ChecksumFailed));
    }

    #[test]
    fn test_booking_date() {
        let mut form = valid_form();
        form.selection.date = today().pred_opt();
        assert_eq!(failure(&form), Some(ValidationFailure::DateInPast));

        form.selection.date = None;
        assert_eq!(failure(&form), Some(ValidationFailure::MissingDate));

        form.selection.date = today().succ_opt();
        assert_eq!(failure(&form), None);
    }

    #[test]
    fn test_expiry_boundaries() {
        assert_eq!(check_expiry("02/25", today()), Err(ValidationFailure::CardExpired));
        assert_eq!(check_expiry("03/25", today()), Ok(()));
        assert_eq!(check_expiry("04/25", today()), Ok(()));
        assert_eq!(check_expiry("12/24", today()), Err(ValidationFailure::CardExpired));
        assert_eq!(check_expiry("01/26", today()), Ok(()));
    }

    #[test]
    fn test_expiry_shape_and_month() {
        assert_eq!(check_expiry("03/2", today()), Err(ValidationFailure::MalformedExpiry));
        assert_eq!(check_expiry("", today()), Err(ValidationFailure::MalformedExpiry));
        assert_eq!(check_expiry("03x25", today()), Err(ValidationFailure::MalformedExpiry));
        assert_eq!(check_expiry("03525", today()), Err(ValidationFailure::MalformedExpiry));
        assert_eq!(check_expiry("00/27", today()), Err(ValidationFailure::InvalidExpiryMonth));
        assert_eq!(check_expiry("13/27", today()), Err(ValidationFailure::InvalidExpiryMonth));
        assert_eq!(check_expiry("ab/27", today()), Err(ValidationFailure::InvalidExpiryMonth));
        assert_eq!(check_expiry("05/2x", today()), Err(ValidationFailure::MalformedExpiry));
    }

    #[test]
    fn test_cvv() {
        let mut form = valid_form();
        form.card.cvv = "12".to_string();
        assert_eq!(failure(&form), Some(ValidationFailure::InvalidCvv));
        form.card.cvv = "12a".to_string();
        assert_eq!(failure(&form), Some(ValidationFailure::InvalidCvv));
    }

    #[test]
    fn test_check_card_reports_issuer() {
        let form = valid_form();
        assert_eq!(check_card(&form.card, today()), Ok(CardIssuer::Visa));
    }
}
