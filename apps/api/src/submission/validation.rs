use thiserror::Error;

use crate::submission::models::RawSubmission;

/// The first required field that failed its check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required!")]
    MissingName,

    #[error("A valid email is required!")]
    InvalidEmail,

    #[error("A valid phone number is required!")]
    InvalidPhone,
}

impl ValidationError {
    /// Form field the message belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "name",
            ValidationError::InvalidEmail => "email",
            ValidationError::InvalidPhone => "phone",
        }
    }
}

/// Checks the required fields in fixed order: name, email, phone.
/// Stops at the first failure.
pub fn validate(raw: &RawSubmission) -> Result<(), ValidationError> {
    if raw.name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if raw.email.is_empty() || !raw.email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if raw.phone.is_empty() || !raw.phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RawSubmission {
        RawSubmission {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "5551234".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        let raw = valid();
        assert!(raw.skills.is_empty() && raw.projects.is_empty());
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn test_missing_name() {
        let raw = RawSubmission {
            name: String::new(),
            ..valid()
        };
        assert_eq!(validate(&raw), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_email_without_at_sign() {
        let raw = RawSubmission {
            email: "ada.example.com".into(),
            ..valid()
        };
        assert_eq!(validate(&raw), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_empty_email() {
        let raw = RawSubmission {
            email: String::new(),
            ..valid()
        };
        assert_eq!(validate(&raw), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_phone_with_separators_fails() {
        for phone in ["555-1234", "+15551234", "555 1234", "12a4"] {
            let raw = RawSubmission {
                phone: phone.into(),
                ..valid()
            };
            assert_eq!(
                validate(&raw),
                Err(ValidationError::InvalidPhone),
                "phone {phone:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_phone() {
        let raw = RawSubmission {
            phone: String::new(),
            ..valid()
        };
        assert_eq!(validate(&raw), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_first_failure_wins() {
        let raw = RawSubmission::default();
        assert_eq!(validate(&raw), Err(ValidationError::MissingName));

        let raw = RawSubmission {
            name: "Ada".into(),
            ..Default::default()
        };
        assert_eq!(validate(&raw), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_messages_are_distinct_per_field() {
        let errors = [
            ValidationError::MissingName,
            ValidationError::InvalidEmail,
            ValidationError::InvalidPhone,
        ];
        let messages: std::collections::HashSet<String> =
            errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(messages.len(), 3);
        assert_eq!(ValidationError::InvalidPhone.field(), "phone");
    }
}
