// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitbit intraday heart rate model.

use serde::{Deserialize, Serialize};

/// One heart rate reading as returned by the intraday endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateSample {
    /// Local time of day, "HH:MM:SS"
    pub time: String,
    /// Beats per minute
    pub value: i64,
}

impl HeartRateSample {
    pub fn new(time: impl Into<String>, value: i64) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }
}

/// A day of samples, in the order the API returned them.
pub type HeartRateSeries = Vec<HeartRateSample>;

/// Top-level intraday heart rate response.
///
/// Only the intraday block is kept; the daily summary is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeartRateResponse {
    #[serde(rename = "activities-heart-intraday", default)]
    pub intraday: HeartRateIntraday,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateIntraday {
    #[serde(default)]
    pub dataset: Vec<HeartRateSample>,
    /// Sampling interval (1 for per-second data)
    #[serde(default)]
    pub dataset_interval: Option<u32>,
    /// "second" or "minute"
    #[serde(default)]
    pub dataset_type: Option<String>,
}

impl HeartRateResponse {
    pub fn into_series(self) -> HeartRateSeries {
        self.intraday.dataset
    }
}
