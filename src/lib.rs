// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitbit heart rate sync: pulls yesterday's per-second heart rate from the
//! Fitbit Web API and writes it into an InfluxDB v2 bucket.
//!
//! The crate is a library plus a thin binary so each step can be exercised
//! against mock servers.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use error::{Result, SyncError};
pub use services::{HeartRateSync, SyncReport};
