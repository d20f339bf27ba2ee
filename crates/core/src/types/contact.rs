//! Contact messages submitted from the storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::ContactMessageId;

/// A stored contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: Email,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Email,
    pub message: String,
}

impl NewContactMessage {
    /// Maximum accepted message body, in characters.
    pub const MAX_MESSAGE_LENGTH: usize = 5000;

    /// Validate raw form fields.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message if a field is missing, the email is
    /// malformed, or the message is too long.
    pub fn parse(name: &str, email: &str, message: &str) -> Result<Self, String> {
        let name = name.trim();
        let message = message.trim();
        if name.is_empty() || email.trim().is_empty() || message.is_empty() {
            return Err("All fields are required".to_owned());
        }
        if message.chars().count() > Self::MAX_MESSAGE_LENGTH {
            return Err(format!(
                "Message must be at most {} characters",
                Self::MAX_MESSAGE_LENGTH
            ));
        }
        let email = Email::parse(email).map_err(|e| format!("Invalid email address: {e}"))?;

        Ok(Self {
            name: name.to_owned(),
            email,
            message: message.to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_all_fields() {
        assert_eq!(
            NewContactMessage::parse("", "a@b.in", "hi"),
            Err("All fields are required".to_owned())
        );
        assert!(NewContactMessage::parse("Asha", "a@b.in", "   ").is_err());
    }

    #[test]
    fn test_parse_validates_email() {
        let err = NewContactMessage::parse("Asha", "asha-at-example", "Need a quote");
        assert!(err.is_err_and(|e| e.starts_with("Invalid email address")));
    }

    #[test]
    fn test_parse_trims() {
        let msg = NewContactMessage::parse(" Asha ", " asha@example.com ", " Bulk order? ");
        assert_eq!(
            msg,
            Ok(NewContactMessage {
                name: "Asha".to_owned(),
                email: Email::parse("asha@example.com").unwrap(),
                message: "Bulk order?".to_owned(),
            })
        );
    }
}
