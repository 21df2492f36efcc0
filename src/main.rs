// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitbit heart rate sync job.
//!
//! Meant to run once a day from a scheduler. Syncs the previous calendar
//! day and exits non-zero on any failure.

use anyhow::Context;
use chrono::Local;
use fitbit_hr_sync::{config::Config, time_utils::previous_day, HeartRateSync, SyncReport};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured JSON logging
    init_logging();

    match run().await {
        Ok(report) => {
            tracing::info!(
                date = %report.date,
                samples = report.samples,
                points = report.points_written,
                "Heart rate sync complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Heart rate sync failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<SyncReport> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let sync = HeartRateSync::from_config(&config).context("Failed to initialize clients")?;

    let today = Local::now().date_naive();
    let date = previous_day(today).with_context(|| format!("No calendar day before {}", today))?;
    Ok(sync.run(date).await?)
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,fitbit_hr_sync=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
