//! US phone number helpers used by the contact, tour and enrollment forms.

/// Keep only ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Progressive `(XXX) XXX-XXXX` formatting as the user types.
///
/// Input with more than ten digits formats to an empty string.
pub fn format_phone_number(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() > 10 {
        return String::new();
    }

    let (area, rest) = digits.split_at(digits.len().min(3));
    let (prefix, line) = rest.split_at(rest.len().min(3));

    if prefix.is_empty() {
        area.to_string()
    } else if line.is_empty() {
        format!("({area}) {prefix}")
    } else {
        format!("({area}) {prefix}-{line}")
    }
}

/// Exactly ten digits once formatting characters are stripped.
pub fn is_valid_phone_number(value: &str) -> bool {
    digits_only(value).len() == 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_progressively() {
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("5"), "5");
        assert_eq!(format_phone_number("555"), "555");
        assert_eq!(format_phone_number("55512"), "(555) 12");
        assert_eq!(format_phone_number("555123"), "(555) 123");
        assert_eq!(format_phone_number("5551234"), "(555) 123-4");
        assert_eq!(format_phone_number("555-123-4567"), "(555) 123-4567");
    }

    #[test]
    fn too_many_digits_formats_empty() {
        assert_eq!(format_phone_number("15551234567"), "");
    }

    #[test]
    fn validity_ignores_punctuation() {
        assert!(is_valid_phone_number("(714) 555-0199"));
        assert!(!is_valid_phone_number("714-555-019"));
        assert!(!is_valid_phone_number("1 714 555 0199"));
    }
}
