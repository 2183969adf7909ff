use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ClientError;
use crate::models::NewContactMessage;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Raw contact-form input. `trap` is the hidden honeypot field; humans leave
/// it empty.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub trap: String,
}

impl ContactForm {
    /// Validate client-side and produce the insert payload. Rejection happens
    /// before any network call.
    pub fn validate(&self) -> Result<NewContactMessage, ClientError> {
        let email = self.email.trim();
        if !EMAIL_PATTERN.is_match(email) {
            return Err(ClientError::InvalidEmail { value: email.to_string() });
        }
        if !self.trap.trim().is_empty() {
            return Err(ClientError::Blocked);
        }
        Ok(NewContactMessage {
            name: self.name.trim().to_string(),
            email: email.to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str) -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: email.into(),
            message: "Hello there".into(),
            trap: String::new(),
        }
    }

    #[test]
    fn invalid_email_is_rejected_before_any_payload_exists() {
        let err = form("not-an-email").validate().unwrap_err();
        assert!(matches!(err, ClientError::InvalidEmail { .. }));
        assert!(err.is_validation());

        assert!(form("a b@c.d").validate().is_err());
        assert!(form("missing@tld").validate().is_err());
    }

    #[test]
    fn valid_submission_is_trimmed_into_the_payload() {
        let mut f = form("  ada@example.com ");
        f.name = "  Ada  ".into();
        let payload = f.validate().unwrap();
        assert_eq!(payload.email, "ada@example.com");
        assert_eq!(payload.name, "Ada");
    }

    #[test]
    fn filled_honeypot_blocks_the_submission() {
        let mut f = form("ada@example.com");
        f.trap = "bot".into();
        assert!(matches!(f.validate().unwrap_err(), ClientError::Blocked));
    }
}
