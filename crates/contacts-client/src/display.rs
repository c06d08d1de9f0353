//! Formatting helpers for rendering stored contacts.

use crate::form::digits_only;

/// Render a phone number as `(555) 123-4567`.
///
/// Anything that does not reduce to exactly ten digits is returned as
/// given.
///
/// # Examples
///
/// ```
/// use contacts_client::format_phone;
///
/// assert_eq!(format_phone("5551234567"), "(555) 123-4567");
/// assert_eq!(format_phone("12345"), "12345");
/// ```
#[must_use]
pub fn format_phone(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.len() != 10 {
        return phone.to_owned();
    }
    let mut formatted = String::with_capacity(14);
    for (position, digit) in digits.chars().enumerate() {
        match position {
            0 => formatted.push('('),
            3 => formatted.push_str(") "),
            6 => formatted.push('-'),
            _ => {}
        }
        formatted.push(digit);
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5551234567", "(555) 123-4567")]
    #[case("555-123-4567", "(555) 123-4567")]
    #[case("(555) 123 4567", "(555) 123-4567")]
    #[case("555123456", "555123456")]
    #[case("15551234567", "15551234567")]
    #[case("", "")]
    #[case("not a number", "not a number")]
    fn formats_ten_digit_numbers_only(#[case] phone: &str, #[case] expected: &str) {
        assert_eq!(format_phone(phone), expected);
    }
}
