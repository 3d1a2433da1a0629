use validator::{Validate, ValidationErrors};

use crate::application::usecases::errors::{UseCaseError, UseCaseResult};

/// Validates request payloads before any store access. Constructed once at
/// startup and handed to every use case that accepts input.
#[derive(Debug, Default, Clone)]
pub struct PayloadValidator;

impl PayloadValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate<T: Validate>(&self, payload: &T) -> UseCaseResult<()> {
        payload
            .validate()
            .map_err(|errors| UseCaseError::Validation(describe(&errors)))
    }

    /// Listing limit: absent or zero means unlimited, negative is rejected.
    pub fn take(&self, take: Option<i64>) -> UseCaseResult<i64> {
        match take {
            None => Ok(0),
            Some(take) if take < 0 => Err(UseCaseError::Validation(
                "take must not be negative".to_string(),
            )),
            Some(take) => Ok(take),
        }
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                err.message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("invalid value for {}", field))
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{iam::CreateUserPayload, sites::CreateSitePayload};

    #[test]
    fn reports_every_invalid_field() {
        let validator = PayloadValidator::new();
        let payload = CreateUserPayload {
            id: "".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "not-an-email".to_string(),
            profile_image: None,
        };

        let err = validator.validate(&payload).unwrap_err();

        match err {
            UseCaseError::Validation(message) => {
                assert!(message.contains("id is required"));
                assert!(message.contains("invalid email address"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_site_payload() {
        let validator = PayloadValidator::new();
        let payload = CreateSitePayload {
            name: "Notes".to_string(),
            description: None,
            subdirectory: "notes".to_string(),
            image_url: Some("https://cdn.example.com/notes.png".to_string()),
        };

        assert!(validator.validate(&payload).is_ok());
    }

    #[test]
    fn negative_take_is_rejected() {
        let validator = PayloadValidator::new();

        assert_eq!(validator.take(None).unwrap(), 0);
        assert_eq!(validator.take(Some(5)).unwrap(), 5);
        assert!(matches!(
            validator.take(Some(-1)),
            Err(UseCaseError::Validation(_))
        ));
    }
}
