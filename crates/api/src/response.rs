//! Writing envelopes onto the HTTP response.
//!
//! Building an envelope is pure (see [`envelope_core::ResponseBuilder`]);
//! putting it on the wire is the one side-effecting step and lives here.
//! [`emit`] consumes its [`ResponseChannel`], so a request can be answered at
//! most once.
//!
//! Two wire conventions are kept on purpose:
//!
//! - clients whose `User-Agent` contains `MSIE 9` get no `Content-Type`
//!   header (that browser offers JSON responses as a download)
//! - envelope code `10000` is sent with a `401 Unauthorized` status line

use std::convert::Infallible;

use axum::body::{Body, Bytes};
use axum::extract::FromRequestParts;
use axum::http::header::{CONTENT_TYPE, USER_AGENT};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use envelope_core::{ResponseBuilder, ResponseEnvelope};

use crate::error::AppResult;

/// User-agent fragment of the browser that must not receive a JSON
/// `Content-Type`.
pub const LEGACY_AGENT_MARKER: &str = "MSIE 9";

/// The transport primitives [`emit`] needs from an outgoing response.
pub trait ResponseChannel {
    type Output;

    /// Whether headers have already been committed on this channel.
    fn headers_sent(&self) -> bool;

    /// The caller's declared client identifier, if any.
    fn user_agent(&self) -> Option<&str>;

    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    fn set_status(&mut self, status: StatusCode);

    /// Write the body and complete the response.
    fn finish(self, body: Bytes) -> Self::Output;
}

/// Serialize `envelope` and write it as the final output of `channel`.
pub fn emit<C: ResponseChannel>(
    envelope: &ResponseEnvelope,
    mut channel: C,
) -> AppResult<C::Output> {
    let body = serde_json::to_vec(envelope)?;

    if !channel.headers_sent() {
        if is_legacy_agent(channel.user_agent()) {
            tracing::debug!("Legacy user agent, omitting Content-Type");
        } else {
            channel.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
    }

    if envelope.requires_auth() {
        channel.set_status(StatusCode::UNAUTHORIZED);
    }

    tracing::debug!(code = envelope.code(), bytes = body.len(), "Emitting envelope");
    Ok(channel.finish(Bytes::from(body)))
}

fn is_legacy_agent(agent: Option<&str>) -> bool {
    agent.is_some_and(|a| a.contains(LEGACY_AGENT_MARKER))
}

// ---------------------------------------------------------------------------
// Axum adapter
// ---------------------------------------------------------------------------

/// `User-Agent` of the current request. Missing or non-ASCII headers read as
/// no agent at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientAgent(Option<String>);

impl ClientAgent {
    pub fn new(agent: impl Into<String>) -> Self {
        Self(Some(agent.into()))
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Pair an envelope with this agent so it can be returned from a handler.
    pub fn reply(self, envelope: ResponseEnvelope) -> Reply {
        Reply {
            envelope,
            agent: self,
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientAgent {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Self(agent))
    }
}

/// Builds an [`axum::response::Response`]. Nothing is committed until
/// [`finish`](ResponseChannel::finish), so headers are never already sent.
#[derive(Debug, Default)]
pub struct AxumChannel {
    agent: ClientAgent,
    status: StatusCode,
    headers: HeaderMap,
}

impl AxumChannel {
    pub fn new(agent: ClientAgent) -> Self {
        Self {
            agent,
            ..Self::default()
        }
    }

    /// Start from `status` instead of `200 OK`. Code `10000` still
    /// overrides it with `401`.
    pub fn with_status(agent: ClientAgent, status: StatusCode) -> Self {
        Self {
            agent,
            status,
            ..Self::default()
        }
    }
}

impl ResponseChannel for AxumChannel {
    type Output = Response;

    fn headers_sent(&self) -> bool {
        false
    }

    fn user_agent(&self) -> Option<&str> {
        self.agent.as_deref()
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn finish(self, body: Bytes) -> Response {
        let mut response = Response::new(Body::from(body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// An envelope ready to be returned from a handler.
///
/// ```ignore
/// async fn handler(agent: ClientAgent, State(state): State<AppState>) -> Reply {
///     agent.reply(state.builder.error(1003))
/// }
/// ```
#[derive(Debug)]
pub struct Reply {
    envelope: ResponseEnvelope,
    agent: ClientAgent,
}

impl Reply {
    pub fn envelope(&self) -> &ResponseEnvelope {
        &self.envelope
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match emit(&self.envelope, AxumChannel::new(self.agent.clone())) {
            Ok(response) => response,
            Err(err) => err.render(&ResponseBuilder::default(), self.agent),
        }
    }
}
