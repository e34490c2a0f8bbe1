//! Cambodian phone number validation and normalization.
//! Accepted input: +855 or a leading 0, followed by 8-9 digits.
//! Stored form is always the +855 international format.

pub fn validate_phone(phone: &str) -> bool {
    let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();

    let rest = if let Some(r) = cleaned.strip_prefix("+855") {
        r
    } else if let Some(r) = cleaned.strip_prefix('0') {
        r
    } else {
        return false;
    };

    if !(8..=9).contains(&rest.len()) {
        return false;
    }
    if !rest.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    // Local part never starts with 0.
    rest.as_bytes()[0] != b'0'
}

pub fn normalize_phone(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(rest) = cleaned.strip_prefix('0') {
        return format!("+855{}", rest);
    }
    if !cleaned.starts_with('+') {
        return format!("+855{}", cleaned);
    }
    cleaned
}
