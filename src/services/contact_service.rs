use std::sync::OnceLock;
use std::time::Duration;
use chrono::Utc;
use regex::Regex;
use tracing::info;
use crate::errors::ContactError;
use crate::models::{ContactInquiry, ContactReceipt};

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

pub fn validate(inquiry: &ContactInquiry) -> Result<(), ContactError> {
    if inquiry.name.trim().is_empty() {
        return Err(ContactError::MissingField("name"));
    }
    if inquiry.email.trim().is_empty() {
        return Err(ContactError::MissingField("email"));
    }
    if !email_pattern().is_match(inquiry.email.trim()) {
        return Err(ContactError::InvalidEmail(inquiry.email.clone()));
    }
    if inquiry.message.trim().is_empty() {
        return Err(ContactError::MissingField("message"));
    }
    Ok(())
}

/// Accept an inquiry after a fixed delay. Nothing is delivered anywhere.
pub async fn submit_inquiry(
    inquiry: ContactInquiry,
    delay: Duration,
) -> Result<ContactReceipt, ContactError> {
    validate(&inquiry)?;

    tokio::time::sleep(delay).await;
    info!(inquiry_type = ?inquiry.inquiry_type, "Contact inquiry received");

    Ok(ContactReceipt {
        status: "success".to_string(),
        inquiry_type: inquiry.inquiry_type,
        received_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InquiryType;

    fn inquiry() -> ContactInquiry {
        ContactInquiry {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Commission".to_string(),
            message: "Could you stitch a pillow?".to_string(),
            inquiry_type: InquiryType::Commission,
        }
    }

    #[test]
    fn required_fields_are_checked() {
        let mut missing_name = inquiry();
        missing_name.name = "  ".to_string();
        assert_eq!(validate(&missing_name), Err(ContactError::MissingField("name")));

        let mut missing_message = inquiry();
        missing_message.message = String::new();
        assert_eq!(validate(&missing_message), Err(ContactError::MissingField("message")));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut bad = inquiry();
        bad.email = "ada at example".to_string();
        assert!(matches!(validate(&bad), Err(ContactError::InvalidEmail(_))));
    }

    #[tokio::test]
    async fn valid_inquiry_succeeds() {
        let receipt = submit_inquiry(inquiry(), Duration::ZERO).await.unwrap();
        assert_eq!(receipt.status, "success");
        assert_eq!(receipt.inquiry_type, InquiryType::Commission);
    }
}
