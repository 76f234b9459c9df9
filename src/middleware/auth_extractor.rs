use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::models::user::JwtClaims;

/// The caller identity, extracted from a verified bearer token.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(ApiError::Unauthorized)?;

    let cfg = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or(ApiError::Unauthorized)?;

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| ApiError::Unauthorized)?;

    let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| ApiError::Unauthorized)?;

    Ok(AuthenticatedUser { user_id })
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<AuthenticatedUser, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn make_token(sub: &str, exp: i64, secret: &str) -> String {
        let claims = JwtClaims {
            sub: sub.to_string(),
            exp,
            email: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn request_with(token: Option<&str>) -> HttpRequest {
        let mut req = TestRequest::default().app_data(web::Data::new(AuthConfig {
            jwt_secret: SECRET.to_string(),
        }));
        if let Some(t) = token {
            req = req.insert_header(("Authorization", format!("Bearer {}", t)));
        }
        req.to_http_request()
    }

    #[test]
    fn valid_token_yields_subject() {
        let user_id = Uuid::new_v4();
        let exp = Utc::now().timestamp() + 3600;
        let token = make_token(&user_id.to_string(), exp, SECRET);

        let user = authenticate(&request_with(Some(&token))).unwrap();
        assert_eq!(user.user_id, user_id);
    }

    #[test]
    fn missing_header_is_unauthorized() {
        match authenticate(&request_with(None)) {
            Err(ApiError::Unauthorized) => {}
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let req = TestRequest::default()
            .app_data(web::Data::new(AuthConfig {
                jwt_secret: SECRET.to_string(),
            }))
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(authenticate(&req).is_err());
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        assert!(authenticate(&request_with(Some("not.a.jwt"))).is_err());
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let exp = Utc::now().timestamp() - 3600;
        let token = make_token(&Uuid::new_v4().to_string(), exp, SECRET);
        assert!(authenticate(&request_with(Some(&token))).is_err());
    }

    #[test]
    fn wrong_signature_is_unauthorized() {
        let exp = Utc::now().timestamp() + 3600;
        let token = make_token(&Uuid::new_v4().to_string(), exp, "other-secret");
        assert!(authenticate(&request_with(Some(&token))).is_err());
    }

    #[test]
    fn non_uuid_subject_is_unauthorized() {
        let exp = Utc::now().timestamp() + 3600;
        let token = make_token("admin", exp, SECRET);
        assert!(authenticate(&request_with(Some(&token))).is_err());
    }
}
