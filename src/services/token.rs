// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token acquisition.
//!
//! Uses the stored refresh token when there is one, otherwise the one-time
//! authorization code. Whatever refresh token Fitbit hands back replaces
//! the stored one, on both paths.

use crate::config::FitbitConfig;
use crate::error::{Result, SyncError};
use crate::models::TokenGrant;
use crate::services::{FitbitClient, RefreshTokenStore};

/// Produces a fresh access token for one run.
#[derive(Clone)]
pub struct TokenProvider {
    client: FitbitClient,
    store: RefreshTokenStore,
    callback_url: String,
    authorization_code: Option<String>,
}

impl TokenProvider {
    pub fn new(client: FitbitClient, store: RefreshTokenStore, config: &FitbitConfig) -> Self {
        Self {
            client,
            store,
            callback_url: config.callback_url.clone(),
            authorization_code: config.authorization_code.clone(),
        }
    }

    /// Decide which grant to use from the stored state.
    pub async fn grant(&self) -> Result<TokenGrant> {
        if let Some(refresh_token) = self.store.load().await? {
            return Ok(TokenGrant::RefreshToken(refresh_token));
        }

        tracing::info!(
            path = %self.store.path().display(),
            "No stored refresh token, using authorization code"
        );

        match &self.authorization_code {
            Some(code) => Ok(TokenGrant::AuthorizationCode {
                code: code.clone(),
                redirect_uri: self.callback_url.clone(),
            }),
            None => Err(SyncError::MissingAuthorizationCode {
                authorize_url: self.client.authorize_url(&self.callback_url),
            }),
        }
    }

    /// Exchange the grant, persist the returned refresh token, and return
    /// the access token.
    pub async fn fetch_token(&self) -> Result<String> {
        let grant = self.grant().await?;
        let response = self.client.exchange_token(&grant).await?;

        self.store.save(&response.refresh_token).await?;

        tracing::info!(
            grant_type = grant.grant_type(),
            expires_in = response.expires_in,
            user_id = response.user_id.as_deref().unwrap_or("-"),
            "Fitbit token obtained"
        );

        Ok(response.access_token)
    }
}
