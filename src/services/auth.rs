use actix_web::{dev::Payload, http::StatusCode, web, FromRequest, HttpRequest, HttpResponse, ResponseError};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use thiserror::Error;
use crate::models::ErrorResponse;

/// Claims carried by portal access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string
    pub sub: String,
    /// Informational only. Authorization reads the role from the database.
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize,
    #[serde(rename = "type", default)]
    pub token_type: Option<String>,
}

/// Errors that can occur while authenticating a request
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Authorization header must be 'Bearer <token>'")]
    InvalidHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token subject is not a user id: {0}")]
    InvalidSubject(String),

    #[error("Refresh tokens cannot be used for API access")]
    WrongTokenType,

    #[error("Token verification is not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: "Unauthorized".to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// HS256 access token verifier
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a raw token and resolve the caller
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.token_type.as_deref() == Some("refresh") {
            return Err(AuthError::WrongTokenType);
        }

        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidSubject(claims.sub.clone()))?;

        Ok(AuthenticatedUser {
            user_id,
            role: claims.role,
        })
    }

    /// Pull the bearer token out of a request and verify it
    pub fn authenticate(&self, req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
        let header = req
            .headers()
            .get("Authorization")
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidHeader)?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::InvalidHeader)?;

        self.verify(token)
    }
}

/// Caller identity resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Option<String>,
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.app_data::<web::Data<JwtVerifier>>() {
            Some(verifier) => verifier.authenticate(req),
            None => Err(AuthError::NotConfigured),
        };

        if let Err(e) = &result {
            tracing::info!("Rejected request to {}: {}", req.path(), e);
        }

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token(sub: &str, role: Option<&str>, token_type: Option<&str>, exp_offset: i64) -> String {
        let exp = (chrono::Utc::now().timestamp() + exp_offset) as usize;
        let claims = serde_json::json!({
            "sub": sub,
            "role": role,
            "exp": exp,
            "type": token_type,
        });
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = JwtVerifier::new(SECRET, 0);
        let user = verifier.verify(&token("17", Some("employer"), Some("access"), 3600)).unwrap();

        assert_eq!(user.user_id, 17);
        assert_eq!(user.role.as_deref(), Some("employer"));
    }

    #[test]
    fn test_unknown_role_still_verifies() {
        let verifier = JwtVerifier::new(SECRET, 0);

        let admin = verifier.verify(&token("8", Some("admin"), None, 3600)).unwrap();
        assert_eq!(admin.user_id, 8);
        assert_eq!(admin.role.as_deref(), Some("admin"));

        let recruiter = verifier.verify(&token("9", Some("recruiter"), Some("access"), 3600)).unwrap();
        assert_eq!(recruiter.user_id, 9);
    }

    #[test]
    fn test_rejects_expired_token() {
        let verifier = JwtVerifier::new(SECRET, 0);
        let err = verifier.verify(&token("17", None, None, -3600)).unwrap_err();

        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let verifier = JwtVerifier::new("other-secret", 0);
        assert!(verifier.verify(&token("17", None, None, 3600)).is_err());
    }

    #[test]
    fn test_rejects_refresh_token_and_bad_subject() {
        let verifier = JwtVerifier::new(SECRET, 0);

        let refresh = verifier.verify(&token("17", None, Some("refresh"), 3600)).unwrap_err();
        assert!(matches!(refresh, AuthError::WrongTokenType));

        let subject = verifier.verify(&token("alice", None, None, 3600)).unwrap_err();
        assert!(matches!(subject, AuthError::InvalidSubject(_)));
    }

    #[test]
    fn test_header_parsing() {
        let verifier = JwtVerifier::new(SECRET, 0);

        let missing = TestRequest::default().to_http_request();
        assert!(matches!(verifier.authenticate(&missing), Err(AuthError::MissingToken)));

        let basic = TestRequest::default()
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();
        assert!(matches!(verifier.authenticate(&basic), Err(AuthError::InvalidHeader)));

        let bearer = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token("3", None, None, 60))))
            .to_http_request();
        assert_eq!(verifier.authenticate(&bearer).unwrap().user_id, 3);
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::NotConfigured.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
