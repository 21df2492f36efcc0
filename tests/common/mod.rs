// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fitbit_hr_sync::config::Config;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::MockServer;

#[allow(dead_code)]
pub const HEART_RATE_FIXTURE: &str = include_str!("../fixtures/heart_rate_2024-03-01.json");

/// Path of the intraday endpoint for a date.
#[allow(dead_code)]
pub fn heart_rate_path(date: &str) -> String {
    format!("/1/user/-/activities/heart/date/{date}/1d/1sec/time/00:00/23:59.json")
}

/// Mock Fitbit and InfluxDB servers plus a scratch directory for the
/// refresh token file.
#[allow(dead_code)]
pub struct TestEnv {
    pub fitbit: MockServer,
    pub influx: MockServer,
    pub dir: TempDir,
    pub config: Config,
}

#[allow(dead_code)]
impl TestEnv {
    pub async fn start() -> Self {
        let fitbit = MockServer::start().await;
        let influx = MockServer::start().await;
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = Config::test_default();
        config.fitbit.api_url = fitbit.uri();
        config.fitbit.refresh_token_file = dir.path().join("refreshToken.txt");
        config.influx.url = influx.uri();

        Self {
            fitbit,
            influx,
            dir,
            config,
        }
    }

    pub fn token_file(&self) -> PathBuf {
        self.config.fitbit.refresh_token_file.clone()
    }

    pub fn seed_refresh_token(&self, token: &str) {
        std::fs::write(self.token_file(), token).expect("Failed to seed refresh token");
    }

    pub fn stored_refresh_token(&self) -> Option<String> {
        std::fs::read_to_string(self.token_file()).ok()
    }
}

/// Successful token endpoint body.
#[allow(dead_code)]
pub fn token_body(access_token: &str, refresh_token: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": access_token,
        "expires_in": 28800,
        "refresh_token": refresh_token,
        "scope": "heartrate",
        "token_type": "Bearer",
        "user_id": "26FWFL"
    })
}
