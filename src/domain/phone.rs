//! Phone number plausibility checks

/// Check that a phone number looks dialable.
///
/// Counts ASCII digits, ignoring a leading `+` and any formatting
/// characters, and accepts 10 to 15 digits inclusive. This is a
/// plausibility heuristic, not an E.164 validator: it does not check
/// country-code assignment or number-plan structure, and callers rely on
/// its looseness (formatted inputs like `"+91 98765-43210"` pass).
pub fn validate_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (10..=15).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plus_prefixed_international_numbers() {
        assert!(validate_phone("+919876543210"));
        assert!(validate_phone("+1 (555) 010-4477"));
    }

    #[test]
    fn accepts_bare_ten_digit_numbers() {
        assert!(validate_phone("9876543210"));
    }

    #[test]
    fn rejects_too_short() {
        assert!(!validate_phone("12345"));
        assert!(!validate_phone("123456789"));
    }

    #[test]
    fn rejects_too_long() {
        assert!(!validate_phone("1234567890123456"));
    }

    #[test]
    fn rejects_empty_and_digitless() {
        assert!(!validate_phone(""));
        assert!(!validate_phone("+"));
        assert!(!validate_phone("call me maybe"));
    }

    #[test]
    fn boundary_digit_counts() {
        assert!(validate_phone("1234567890")); // 10 digits
        assert!(validate_phone("123456789012345")); // 15 digits
    }
}
