//! Normalization of user-entered identifiers before comparison and storage.

/// Removes spaces, dashes and parentheses from a phone number.
///
/// `"+251 (911) 23-45"` and `"+2519112345"` normalize to the same value, which is what
/// per-organization uniqueness is checked against.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// Uppercases a vehicle plate and strips all whitespace.
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Trims a required text field, returning `None` when nothing is left.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trims an optional text field, mapping blank input to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_phone_punctuation() {
        assert_eq!(normalize_phone("+251 (911) 23-45 67"), "+251911234567");
        assert_eq!(normalize_phone("0911234567"), "0911234567");
    }

    #[test]
    fn uppercases_plates_without_whitespace() {
        assert_eq!(normalize_plate(" aa 3-12345 "), "AA3-12345");
    }

    #[test]
    fn blank_text_is_none() {
        assert_eq!(non_empty("   "), None);
        assert_eq!(optional_text(Some(" note ".to_string())), Some("note".to_string()));
        assert_eq!(optional_text(Some(String::new())), None);
    }
}
