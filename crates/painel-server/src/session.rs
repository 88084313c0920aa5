//! Identity cookie handling.
//!
//! Two middlewares share the cookie parsing:
//! - [`resume_or_issue`] runs on the landing page only. A missing or unknown
//!   cookie is healed by issuing a fresh identity and setting the cookie.
//! - [`require_identity`] guards every `/view` route. A missing or unknown
//!   cookie fails the request with 401 and never issues anything.
//!
//! Both put a [`Session`] in the request extensions for handlers to extract.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use painel_shared::constants::IDENTITY_COOKIE;
use painel_shared::IdentityId;

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::error::ServerError;

/// The identity a request was authenticated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub identity: IdentityId,
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .copied()
            .ok_or(ServerError::Unauthorized)
    }
}

/// Value of the identity cookie, if the request carries one.
pub fn identity_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == IDENTITY_COOKIE)
        .map(|(_, value)| value.trim())
}

/// `Set-Cookie` value for a freshly issued identity.
pub fn identity_cookie(identity: &IdentityId, config: &ServerConfig) -> String {
    let mut cookie = format!("{IDENTITY_COOKIE}={identity}; Path=/; HttpOnly; SameSite=Lax");
    if let Some(max_age) = config.cookie_max_age {
        cookie.push_str(&format!("; Max-Age={}", max_age.as_secs()));
    }
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Landing-page session: resume a known identity or issue a new one.
pub async fn resume_or_issue(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let presented = identity_token(req.headers()).map(str::to_owned);
    let known = match presented.as_deref() {
        Some(token) => state.store.lookup(token).await.ok(),
        None => None,
    };

    if let Some(identity) = known {
        req.extensions_mut().insert(Session {
            identity: identity.id,
        });
        return next.run(req).await;
    }

    if presented.is_some() {
        debug!("Identity cookie not recognised, issuing a new identity");
    }

    let identity = state.store.issue().await;
    let cookie = match HeaderValue::from_str(&identity_cookie(&identity.id, &state.config)) {
        Ok(value) => value,
        Err(e) => {
            return ServerError::Internal(format!("Invalid identity cookie: {e}")).into_response()
        }
    };

    req.extensions_mut().insert(Session {
        identity: identity.id,
    });
    let mut response = next.run(req).await;
    if response.status().is_server_error() {
        debug!(identity = %identity.id, "Landing failed, identity cookie withheld");
        return response;
    }
    response.headers_mut().append(header::SET_COOKIE, cookie);
    response
}

/// Protected routes: the identity cookie must name a known identity.
pub async fn require_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(token) = identity_token(req.headers()).map(str::to_owned) else {
        debug!(path = %req.uri().path(), "Protected route without identity cookie");
        return Err(ServerError::Unauthorized);
    };

    let identity = state.store.lookup(&token).await?;

    req.extensions_mut().insert(Session {
        identity: identity.id,
    });
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for cookie in cookies {
            map.append(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        }
        map
    }

    #[test]
    fn test_identity_token_among_other_cookies() {
        let map = headers(&["theme=dark; user_id=abc ; lang=pt"]);
        assert_eq!(identity_token(&map), Some("abc"));
    }

    #[test]
    fn test_identity_token_across_headers() {
        let map = headers(&["theme=dark", "user_id=xyz"]);
        assert_eq!(identity_token(&map), Some("xyz"));
    }

    #[test]
    fn test_identity_token_missing() {
        assert_eq!(identity_token(&headers(&[])), None);
        assert_eq!(identity_token(&headers(&["user_idx=1; xuser_id=2"])), None);
    }

    #[test]
    fn test_identity_cookie_attributes() {
        let id = IdentityId::new();
        let config = ServerConfig {
            cookie_max_age: Some(Duration::from_secs(120)),
            cookie_secure: true,
            ..ServerConfig::default()
        };

        let cookie = identity_cookie(&id, &config);
        assert!(cookie.starts_with(&format!("user_id={id};")));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=120"));
        assert!(cookie.ends_with("; Secure"));
    }

    #[test]
    fn test_session_cookie_has_no_max_age() {
        let config = ServerConfig {
            cookie_max_age: None,
            ..ServerConfig::default()
        };
        let cookie = identity_cookie(&IdentityId::new(), &config);
        assert!(!cookie.contains("Max-Age"));
        assert!(!cookie.contains("Secure"));
    }
}
