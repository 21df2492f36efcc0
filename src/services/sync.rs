// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The daily sync job.
//!
//! Handles the whole run, in order:
//! 1. Obtain an access token (and rotate the stored refresh token)
//! 2. Fetch the day's intraday heart rate series
//! 3. Write one InfluxDB point per sample

use crate::config::Config;
use crate::error::Result;
use crate::services::{FitbitClient, HeartRateWriter, RefreshTokenStore, TokenProvider};
use chrono::NaiveDate;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub date: NaiveDate,
    pub samples: usize,
    pub points_written: usize,
}

/// Wires token provider, fetcher and writer together.
pub struct HeartRateSync {
    tokens: TokenProvider,
    fitbit: FitbitClient,
    writer: HeartRateWriter,
}

impl HeartRateSync {
    pub fn new(tokens: TokenProvider, fitbit: FitbitClient, writer: HeartRateWriter) -> Self {
        Self {
            tokens,
            fitbit,
            writer,
        }
    }

    /// Build every component from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fitbit = FitbitClient::new(&config.fitbit)?;
        let store = RefreshTokenStore::new(&config.fitbit.refresh_token_file);
        let tokens = TokenProvider::new(fitbit.clone(), store, &config.fitbit);
        let writer = HeartRateWriter::from_config(&config.influx)?;
        Ok(Self::new(tokens, fitbit, writer))
    }

    /// Sync one calendar day. Any failure stops the run; nothing is retried.
    pub async fn run(&self, date: NaiveDate) -> Result<SyncReport> {
        tracing::info!(%date, "Starting heart rate sync");

        let access_token = self.tokens.fetch_token().await?;

        let series = self.fitbit.fetch_heart_rate(&access_token, date).await?;
        tracing::info!(%date, samples = series.len(), "Heart rate data fetched");

        let points_written = self.writer.write(date, &series).await?;

        Ok(SyncReport {
            date,
            samples: series.len(),
            points_written,
        })
    }
}
