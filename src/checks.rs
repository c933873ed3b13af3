use crate::model::LocalChecks;

pub const MIN_LENGTH: usize = 8;

/// Checks computable without the network. Length counts characters, not bytes.
pub fn evaluate(password: &str) -> LocalChecks {
    LocalChecks {
        length: password.chars().count() >= MIN_LENGTH,
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        number: password.chars().any(|c| c.is_ascii_digit()),
        special: password.chars().any(|c| !c.is_ascii_alphanumeric()),
    }
}
