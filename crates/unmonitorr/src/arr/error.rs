//! Gateway error types.

use std::fmt;

use reqwest::Method;
use thiserror::Error;

use super::ArrService;

/// Coarse failure classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client is missing its uri or api key; no request was made.
    Disabled,
    /// Connection, timeout or request construction failure.
    Transport,
    /// Upstream answered with a non-2xx status.
    Response,
    /// Upstream body was not the JSON we expected.
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Disabled => "disabled",
            ErrorKind::Transport => "transport",
            ErrorKind::Response => "response",
            ErrorKind::Decode => "decode",
        };
        f.write_str(s)
    }
}

/// Errors returned by arr gateway calls.
#[derive(Debug, Error)]
pub enum ArrError {
    #[error("{service} client is missing a uri or api key")]
    Disabled { service: ArrService },

    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} {reason} for {method} {url}")]
    Response {
        method: Method,
        url: String,
        status: u16,
        reason: String,
    },

    #[error("invalid response body from {method} {url}: {message}")]
    Decode {
        method: Method,
        url: String,
        message: String,
    },
}

impl ArrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArrError::Disabled { .. } => ErrorKind::Disabled,
            ArrError::InvalidUrl { .. } | ArrError::Transport(_) => ErrorKind::Transport,
            ArrError::Response { .. } => ErrorKind::Response,
            ArrError::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Upstream status code, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ArrError::Response { status, .. } => Some(*status),
            ArrError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short human reason, suitable for relaying to an admin client.
    pub fn reason(&self) -> String {
        match self {
            ArrError::Response { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
