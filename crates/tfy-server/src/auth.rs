use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tfy_gate::{AuthError, Credentials};
use tfy_types::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller of a protected route.
///
/// Extracting it resolves the bearer token once per request; a missing,
/// malformed or stale token rejects the request with 401 before the
/// handler runs.
#[derive(Clone, Debug)]
pub struct Caller(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str())
            .transpose()
            .map_err(|_| AuthError::InvalidToken)?;
        let credentials = Credentials::from_header(header)?;
        let identity = state.board.authenticate(&credentials).await?;
        Ok(Self(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use tfy_board::{SignIn, SignUp};

    use crate::config::ServerConfig;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/threads");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn state() -> AppState {
        let mut config = ServerConfig::default();
        config.auth.bcrypt_cost = 4;
        AppState::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let state = state();
        let mut parts = parts_with(None);
        let err = Caller::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn wrong_scheme_is_unauthorized() {
        let state = state();
        let mut parts = parts_with(Some("Basic YTpi"));
        let err = Caller::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(err.status().as_u16(), 401);
    }

    #[tokio::test]
    async fn valid_token_resolves() {
        let state = state();
        let user = state
            .board
            .accounts
            .sign_up(SignUp {
                email: "a@x.com".into(),
                username: None,
                password: "pw".into(),
                password_confirmation: "pw".into(),
            })
            .await
            .unwrap();
        let signed_in = state
            .board
            .accounts
            .sign_in(SignIn {
                email: "a@x.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        let header = format!("Bearer {}", signed_in.token.unwrap().as_str());

        let mut parts = parts_with(Some(&header));
        let Caller(identity) = Caller::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(identity.id, user.id);
    }
}
