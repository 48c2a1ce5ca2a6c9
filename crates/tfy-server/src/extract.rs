use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tfy_board::{ChangePassword, NewComment, NewThread, SignIn, SignUp};
use tfy_types::ThreadPatch;

use crate::error::ApiError;

/// A JSON request payload that may arrive wrapped in a named envelope.
pub trait Payload: DeserializeOwned {
    /// Key of the envelope object, e.g. `"thread"` for `{"thread": {...}}`.
    const ENVELOPE: &'static str;
}

impl Payload for SignUp {
    const ENVELOPE: &'static str = "credentials";
}

impl Payload for SignIn {
    const ENVELOPE: &'static str = "credentials";
}

impl Payload for ChangePassword {
    const ENVELOPE: &'static str = "passwords";
}

impl Payload for NewThread {
    const ENVELOPE: &'static str = "thread";
}

impl Payload for ThreadPatch {
    const ENVELOPE: &'static str = "thread";
}

impl Payload for NewComment {
    const ENVELOPE: &'static str = "comment";
}

/// Decode a payload from either `{"<envelope>": {...}}` or the bare object.
pub fn decode<T: Payload>(body: &[u8]) -> Result<T, ApiError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::BadBody(e.to_string()))?;
    let value = match value {
        Value::Object(mut map)
            if map.len() == 1 && matches!(map.get(T::ENVELOPE), Some(Value::Object(_))) =>
        {
            map.remove(T::ENVELOPE).unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(value).map_err(|e| ApiError::BadBody(e.to_string()))
}

/// Extractor for [`Payload`] bodies. Malformed input is a 400 and a body
/// over the route's limit is a 413.
#[derive(Debug)]
pub struct Body<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Body<T>
where
    S: Send + Sync,
    T: Payload,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::BodyTooLarge
            } else {
                ApiError::BadBody(e.body_text())
            }
        })?;
        decode(&bytes).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_and_bare_are_equivalent() {
        let wrapped: NewThread = decode(br#"{"thread":{"text":"hi"}}"#).unwrap();
        let bare: NewThread = decode(br#"{"text":"hi"}"#).unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn credentials_envelope() {
        let parsed: SignIn =
            decode(br#"{"credentials":{"email":"a@x.com","password":"pw"}}"#).unwrap();
        assert_eq!(parsed.email, "a@x.com");
        assert_eq!(parsed.password, "pw");
    }

    #[test]
    fn other_envelope_is_not_unwrapped() {
        let parsed: NewThread = decode(br#"{"comment":{"text":"hi"}}"#).unwrap();
        assert_eq!(parsed.text, "");
    }

    #[test]
    fn patch_cannot_carry_owner() {
        let patch: ThreadPatch =
            decode(br#"{"thread":{"text":"x","owner_id":"0190a6e0-0000-7000-8000-000000000000"}}"#)
                .unwrap();
        assert_eq!(patch.text.as_deref(), Some("x"));
    }

    #[test]
    fn invalid_json_is_bad_body() {
        let err = decode::<NewThread>(b"{not json").unwrap_err();
        assert_eq!(err.status().as_u16(), 400);
        let err = decode::<NewThread>(br#"{"text": 5}"#).unwrap_err();
        assert_eq!(err.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn oversized_body_is_too_large() {
        // Past axum's default 2 MB buffer limit.
        let padded = vec![b' '; 3 * 1024 * 1024];
        let req = axum::http::Request::builder()
            .header("content-type", "application/json")
            .body(axum::body::Body::from(padded))
            .unwrap();
        let err = Body::<NewThread>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
