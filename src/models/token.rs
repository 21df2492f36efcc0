// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth token exchange types.

use serde::Deserialize;

/// How to obtain an access token from the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenGrant {
    /// Exchange a stored refresh token.
    RefreshToken(String),
    /// First run: exchange the one-time authorization code.
    AuthorizationCode { code: String, redirect_uri: String },
}

impl TokenGrant {
    pub fn grant_type(&self) -> &'static str {
        match self {
            TokenGrant::RefreshToken(_) => "refresh_token",
            TokenGrant::AuthorizationCode { .. } => "authorization_code",
        }
    }

    /// Query parameters for the token request, in wire order.
    pub fn query_params<'a>(&'a self, client_id: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("client_id", client_id), ("grant_type", self.grant_type())];
        match self {
            TokenGrant::RefreshToken(token) => params.push(("refresh_token", token.as_str())),
            TokenGrant::AuthorizationCode { code, redirect_uri } => {
                params.push(("redirect_uri", redirect_uri.as_str()));
                params.push(("code", code.as_str()));
            }
        }
        params
    }
}

/// Token response from Fitbit.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}
