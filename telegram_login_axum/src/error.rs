use http::StatusCode;
use telegram_login::CoordinationError;

/// Helper trait for converting flow errors to `(StatusCode, String)`.
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            let status = match e {
                CoordinationError::Authentication(_) => StatusCode::UNAUTHORIZED,
                CoordinationError::ChallengeNotFound => StatusCode::UNAUTHORIZED,
                CoordinationError::Validation(_) => StatusCode::BAD_REQUEST,
                CoordinationError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
                CoordinationError::SecondaryFactorRequired => StatusCode::PRECONDITION_REQUIRED,
                CoordinationError::AdminPrivilegeRequired => StatusCode::FORBIDDEN,
                CoordinationError::TargetUserNotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CoordinationError) -> StatusCode {
        let result: Result<(), _> = Err(err);
        result
            .into_response_error()
            .expect_err("error input must map to an error")
            .0
    }

    #[test]
    fn test_authentication_failures_are_401() {
        assert_eq!(
            status_of(CoordinationError::Authentication(
                "Telegram auth failed".to_string()
            )),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CoordinationError::ChallengeNotFound),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_validation_is_400() {
        assert_eq!(
            status_of(CoordinationError::Validation("phone empty".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_upstream_is_502() {
        assert_eq!(
            status_of(CoordinationError::UpstreamUnavailable(
                "relay down".to_string()
            )),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_second_factor_is_428() {
        assert_eq!(
            status_of(CoordinationError::SecondaryFactorRequired),
            StatusCode::PRECONDITION_REQUIRED
        );
    }

    #[test]
    fn test_admin_and_target_mappings() {
        assert_eq!(
            status_of(CoordinationError::AdminPrivilegeRequired),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(CoordinationError::TargetUserNotFound),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_database_is_500() {
        assert_eq!(
            status_of(CoordinationError::Database("db down".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_detail_is_the_error_display() {
        let result: Result<(), _> =
            Err(CoordinationError::Authentication("Invalid code".to_string()));
        let (_, detail) = result
            .into_response_error()
            .expect_err("error input must map to an error");
        assert_eq!(detail, "Invalid code");
    }

    #[test]
    fn test_ok_passes_through() {
        let result: Result<u32, CoordinationError> = Ok(7);
        assert_eq!(result.into_response_error(), Ok(7));
    }
}
