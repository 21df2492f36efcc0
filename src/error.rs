// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for a sync run.

use reqwest::StatusCode;

/// Everything that can stop a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Request to {context} failed: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{context} returned HTTP {status}: {body}")]
    HttpStatus {
        context: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Refresh token file {path}: {source}")]
    TokenStore {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed heart rate sample {time:?}: {reason}")]
    MalformedSample { time: String, reason: String },

    #[error("No refresh token stored and FITBIT_REFRESH_CODE is not set; authorize at {authorize_url}")]
    MissingAuthorizationCode { authorize_url: String },

    #[error("InfluxDB write failed: {0}")]
    InfluxWrite(String),
}

impl SyncError {
    pub(crate) fn transport(context: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| SyncError::Transport { context, source }
    }

    /// True for failures talking to a remote endpoint (transport or status).
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            SyncError::Transport { .. } | SyncError::HttpStatus { .. }
        )
    }
}

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
