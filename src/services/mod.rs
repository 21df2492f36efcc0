// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the three sync steps and the job that runs them.

pub mod fitbit;
pub mod influx;
pub mod sync;
pub mod token;
pub mod token_store;

pub use fitbit::FitbitClient;
pub use influx::{HeartRateWriter, InfluxClient, WriteApi};
pub use sync::{HeartRateSync, SyncReport};
pub use token::TokenProvider;
pub use token_store::RefreshTokenStore;
