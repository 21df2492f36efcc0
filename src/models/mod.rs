// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod heart_rate;
pub mod point;
pub mod token;

pub use heart_rate::{HeartRateResponse, HeartRateSample, HeartRateSeries};
pub use point::{FieldValue, Point};
pub use token::{TokenGrant, TokenResponse};
