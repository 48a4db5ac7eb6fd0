use once_cell::sync::Lazy;
use regex::Regex;

/// Longest email, name and password accepted anywhere in the API.
pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // RFC 5322 compliant email regex (simplified but robust)
    // Requires at least one dot after @ for TLD
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$"
    ).unwrap()
});

/// Validator struct with static methods for input validation
pub struct Validator;

impl Validator {
    /// Normalizes an email for storage and lookup: surrounding whitespace is
    /// dropped and the whole address is lowercased, so identity is
    /// case-insensitive.
    ///
    /// ```
    /// use user_api::security::Validator;
    ///
    /// assert_eq!(Validator::normalize_email("  Rest@API.com "), "rest@api.com");
    /// ```
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Validates email address format
    ///
    /// ```
    /// use user_api::security::Validator;
    ///
    /// assert!(Validator::validate_email("user@example.com"));
    /// assert!(!Validator::validate_email("invalid-email"));
    /// ```
    pub fn validate_email(email: &str) -> bool {
        if email.is_empty() || email.chars().count() > MAX_EMAIL_LENGTH {
            return false;
        }

        // Check for consecutive dots which are invalid
        if email.contains("..") {
            return false;
        }

        EMAIL_REGEX.is_match(email)
    }

    /// Checks a password against the length rules, returning every violation.
    ///
    /// Length is counted in characters, not bytes.
    pub fn validate_password(password: &str, min_length: usize) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let length = password.chars().count();

        if length < min_length {
            errors.push(format!(
                "This password is too short. It must contain at least {} characters.",
                min_length
            ));
        }

        if length > MAX_PASSWORD_LENGTH {
            errors.push(format!(
                "Ensure this field has no more than {} characters.",
                MAX_PASSWORD_LENGTH
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates string length is within specified bounds (inclusive, in characters)
    ///
    /// ```
    /// use user_api::security::Validator;
    ///
    /// assert!(Validator::validate_length("hello", 3, 10));
    /// assert!(!Validator::validate_length("hi", 3, 10));
    /// ```
    pub fn validate_length(input: &str, min: usize, max: usize) -> bool {
        let len = input.chars().count();
        len >= min && len <= max
    }
}
