// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitbit Web API client.
//!
//! Handles:
//! - OAuth token exchange (refresh token and authorization code grants)
//! - Intraday heart rate fetch at 1-second resolution

use crate::config::FitbitConfig;
use crate::error::{Result, SyncError};
use crate::models::{HeartRateResponse, HeartRateSeries, TokenGrant, TokenResponse};
use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;

const AUTHORIZE_URL: &str = "https://www.fitbit.com/oauth2/authorize";

/// Idle connections are dropped after this long.
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);
const POOL_MAX_IDLE_PER_HOST: usize = 10;

const TOKEN_CONTEXT: &str = "Fitbit token endpoint";
const HEART_RATE_CONTEXT: &str = "Fitbit heart rate endpoint";

/// Fitbit API client.
#[derive(Clone)]
pub struct FitbitClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl FitbitClient {
    /// Create a new Fitbit client with OAuth credentials.
    pub fn new(config: &FitbitConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build()
            .map_err(SyncError::transport("HTTP client setup"))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    /// Override the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// URL the user visits once to obtain an authorization code.
    pub fn authorize_url(&self, redirect_uri: &str) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope=heartrate",
            AUTHORIZE_URL,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(redirect_uri),
        )
    }

    /// Exchange a grant for tokens.
    ///
    /// Parameters travel in the query string; the body is empty.
    pub async fn exchange_token(&self, grant: &TokenGrant) -> Result<TokenResponse> {
        tracing::info!(grant_type = grant.grant_type(), "Requesting Fitbit token");

        let response = self
            .http
            .post(format!("{}/oauth2/token", self.base_url))
            .query(&grant.query_params(&self.client_id))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await
            .map_err(SyncError::transport(TOKEN_CONTEXT))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Fitbit token exchange failed");
            return Err(SyncError::HttpStatus {
                context: TOKEN_CONTEXT,
                status,
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(SyncError::transport(TOKEN_CONTEXT))?;

        serde_json::from_slice(&body).map_err(|source| SyncError::Decode {
            context: TOKEN_CONTEXT,
            source,
        })
    }

    /// Fetch one full day of per-second heart rate samples.
    ///
    /// Only transport failures are errors. An undecodable body (including
    /// the body of an error status) yields an empty series.
    pub async fn fetch_heart_rate(
        &self,
        access_token: &str,
        date: NaiveDate,
    ) -> Result<HeartRateSeries> {
        let url = format!(
            "{}/1/user/-/activities/heart/date/{}/1d/1sec/time/00:00/23:59.json",
            self.base_url,
            date.format("%Y-%m-%d")
        );

        tracing::info!(%date, "Fetching heart rate data");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(SyncError::transport(HEART_RATE_CONTEXT))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Heart rate request returned non-success status");
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read heart rate response body");
                Default::default()
            }
        };

        Ok(parse_heart_rate_body(&body))
    }
}

/// Decode an intraday heart rate body, falling back to an empty series.
pub fn parse_heart_rate_body(body: &[u8]) -> HeartRateSeries {
    match serde_json::from_slice::<HeartRateResponse>(body) {
        Ok(response) => response.into_series(),
        Err(e) => {
            tracing::warn!(error = %e, "Heart rate response did not decode, using empty series");
            HeartRateSeries::new()
        }
    }
}
