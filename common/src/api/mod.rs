use std::fmt::Debug;

use crate::error::{PortalError, PortalResult};

/// Validator for api requests that should have the request data verified before it is sent
pub trait ApiRequestValidator {
    /// Type of the error message that is returned by the [validate][ApiRequestValidator::validate]
    /// method. Must be able to converted to a [String].
    type ErrorMessage: Into<String>;
    /// Type of request this validator is processing. Must implement debug to convert into an
    /// [PortalError] type.
    type Request: Debug;
    /// Perform checks against the `request` to confirm it is well formed. Returns an
    /// [Err] of a type that can be converted into a [String] if the request is not valid. Otherwise
    /// [Ok] is returned.
    /// # Errors
    /// This function will return an error if the `request` cannot be validated
    fn validate(request: &Self::Request) -> Result<(), Self::ErrorMessage>;
    /// Performs the implemented validation against the `request`, mapping the error (if any) into a
    /// [PortalError::InvalidRequest]. If the validation succeeds, [Ok] is returned.
    /// # Errors
    /// This function will return an error if the `request` cannot be validated
    fn validate_request(request: &Self::Request) -> PortalResult<()> {
        if let Err(error) = Self::validate(request) {
            return Err(PortalError::InvalidRequest {
                request: format!("{request:?}"),
                reason: error.into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::ApiRequestValidator;
    use crate::error::PortalError;

    #[derive(Debug)]
    struct NameRequest {
        name: String,
    }

    struct NameRequestValidator;

    impl ApiRequestValidator for NameRequestValidator {
        type ErrorMessage = &'static str;
        type Request = NameRequest;

        fn validate(request: &Self::Request) -> Result<(), Self::ErrorMessage> {
            if request.name.trim().is_empty() {
                return Err("Request 'name' cannot be empty or whitespace");
            }
            Ok(())
        }
    }

    #[test]
    fn validate_request_should_succeed_when_valid() {
        let request = NameRequest {
            name: "test".to_owned(),
        };

        assert!(NameRequestValidator::validate_request(&request).is_ok());
    }

    #[test]
    fn validate_request_should_fail_with_invalid_request_when_invalid() {
        let request = NameRequest {
            name: "  ".to_owned(),
        };

        let Err(PortalError::InvalidRequest { request, reason }) =
            NameRequestValidator::validate_request(&request)
        else {
            panic!("Expected an InvalidRequest error");
        };
        assert_eq!(reason, "Request 'name' cannot be empty or whitespace");
        assert!(request.contains("NameRequest"));
    }
}
