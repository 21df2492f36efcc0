// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! InfluxDB v2 writer.
//!
//! Points are queued onto a channel and a background task batches them
//! into line protocol POSTs against `/api/v2/write`. `flush` waits for
//! everything queued so far to be sent; `close` flushes and stops the task.

use crate::config::InfluxConfig;
use crate::error::{Result, SyncError};
use crate::models::{HeartRateSample, Point};
use crate::time_utils::{format_utc_rfc3339, sample_timestamp};
use chrono::NaiveDate;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Points per HTTP write.
pub const DEFAULT_BATCH_SIZE: usize = 5_000;

/// Queue depth between callers and the batching task.
const CHANNEL_CAPACITY: usize = 1_024;

const WRITE_CONTEXT: &str = "InfluxDB write endpoint";

/// InfluxDB client: base URL plus API token.
#[derive(Clone)]
pub struct InfluxClient {
    http: reqwest::Client,
    url: String,
    token: String,
    batch_size: usize,
}

impl InfluxClient {
    pub fn new(url: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(SyncError::transport("HTTP client setup"))?;

        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Override the number of points sent per request.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Open a buffered write path into `org`/`bucket`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn write_api(&self, org: &str, bucket: &str) -> WriteApi {
        let batcher = Batcher {
            http: self.http.clone(),
            endpoint: format!("{}/api/v2/write", self.url),
            org: org.to_string(),
            bucket: bucket.to_string(),
            auth: format!("Token {}", self.token),
            batch_size: self.batch_size,
            buffer: Vec::with_capacity(self.batch_size.min(CHANNEL_CAPACITY)),
            first_error: None,
        };

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let task = tokio::spawn(batcher.run(rx));

        WriteApi { tx, task }
    }
}

enum Command {
    Write(Point),
    Flush(oneshot::Sender<Result<()>>),
}

/// Non-blocking write handle returned by [`InfluxClient::write_api`].
///
/// Dropping the handle without `close` still sends whatever is buffered,
/// but any error is only logged.
pub struct WriteApi {
    tx: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

impl WriteApi {
    /// Queue a point. Sending happens in the background.
    pub async fn write_point(&self, point: Point) -> Result<()> {
        self.tx
            .send(Command::Write(point))
            .await
            .map_err(|_| SyncError::InfluxWrite("write path is closed".to_string()))
    }

    /// Send everything queued so far. Returns the first write error seen
    /// since the previous flush.
    pub async fn flush(&self) -> Result<()> {
        let (reply, done) = oneshot::channel();
        self.tx
            .send(Command::Flush(reply))
            .await
            .map_err(|_| SyncError::InfluxWrite("write path is closed".to_string()))?;
        done.await
            .map_err(|_| SyncError::InfluxWrite("write task stopped before flush".to_string()))?
    }

    /// Flush and shut down the background task.
    pub async fn close(self) -> Result<()> {
        let flushed = self.flush().await;

        let WriteApi { tx, task } = self;
        drop(tx);
        if let Err(e) = task.await {
            tracing::error!(error = %e, "InfluxDB write task panicked");
            return flushed.and(Err(SyncError::InfluxWrite(format!(
                "write task failed: {}",
                e
            ))));
        }

        flushed
    }
}

/// Background side of the write path.
struct Batcher {
    http: reqwest::Client,
    endpoint: String,
    org: String,
    bucket: String,
    auth: String,
    batch_size: usize,
    buffer: Vec<Point>,
    first_error: Option<SyncError>,
}

impl Batcher {
    async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        while let Some(command) = rx.recv().await {
            match command {
                Command::Write(point) => {
                    self.buffer.push(point);
                    if self.buffer.len() >= self.batch_size {
                        self.send_buffer().await;
                    }
                }
                Command::Flush(reply) => {
                    self.send_buffer().await;
                    let _ = reply.send(self.first_error.take().map_or(Ok(()), Err));
                }
            }
        }

        // Handle dropped without close.
        self.send_buffer().await;
        if let Some(e) = self.first_error.take() {
            tracing::error!(error = %e, "Unreported InfluxDB write error");
        }
    }

    async fn send_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let batch = std::mem::take(&mut self.buffer);
        let mut body = String::with_capacity(batch.len() * 48);
        for point in &batch {
            point.write_line_protocol(&mut body);
        }

        match self.post(body).await {
            Ok(()) => {
                let (first, last) = batch_span(&batch);
                tracing::debug!(points = batch.len(), %first, %last, "InfluxDB batch written");
            }
            Err(e) => {
                tracing::error!(error = %e, points = batch.len(), "InfluxDB batch failed");
                self.first_error.get_or_insert(e);
            }
        }
    }

    async fn post(&self, body: String) -> Result<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[
                ("org", self.org.as_str()),
                ("bucket", self.bucket.as_str()),
                ("precision", "s"),
            ])
            .header(AUTHORIZATION, &self.auth)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(SyncError::transport(WRITE_CONTEXT))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(SyncError::InfluxWrite(format!("HTTP {}: {}", status, body)))
    }
}

/// RFC3339 timestamps of the first and last point in a non-empty batch.
fn batch_span(batch: &[Point]) -> (String, String) {
    let first = batch.first().map(|p| format_utc_rfc3339(p.timestamp));
    let last = batch.last().map(|p| format_utc_rfc3339(p.timestamp));
    (first.unwrap_or_default(), last.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// HeartRateWriter - heart rate samples to points
// ─────────────────────────────────────────────────────────────────────────────

pub const MEASUREMENT: &str = "activity";

/// Build the point for one sample on `date`.
///
/// `activity,unit=bpm count=<value>i <date + time of day, UTC>`
pub fn heart_rate_point(date: NaiveDate, sample: &HeartRateSample) -> Result<Point> {
    let timestamp = sample_timestamp(date, &sample.time)?;
    Ok(Point::new(MEASUREMENT, timestamp)
        .tag("unit", "bpm")
        .field("count", sample.value))
}

/// Writes a day of heart rate samples into one bucket.
#[derive(Clone)]
pub struct HeartRateWriter {
    client: InfluxClient,
    org: String,
    bucket: String,
}

impl HeartRateWriter {
    pub fn new(client: InfluxClient, org: &str, bucket: &str) -> Self {
        Self {
            client,
            org: org.to_string(),
            bucket: bucket.to_string(),
        }
    }

    pub fn from_config(config: &InfluxConfig) -> Result<Self> {
        let client = InfluxClient::new(&config.url, &config.token)?;
        Ok(Self::new(client, &config.org, &config.bucket))
    }

    /// Write one point per sample, in order, then flush and close.
    ///
    /// The write path is closed even when a sample is malformed; points
    /// queued before the bad sample are still sent.
    pub async fn write(&self, date: NaiveDate, samples: &[HeartRateSample]) -> Result<usize> {
        tracing::info!(%date, count = samples.len(), "Writing heart rate data");

        let write_api = self.client.write_api(&self.org, &self.bucket);
        let queued = queue_samples(&write_api, date, samples).await;
        let closed = write_api.close().await;

        let written = queued?;
        closed?;

        tracing::info!(%date, points = written, bucket = %self.bucket, "Heart rate data written");
        Ok(written)
    }
}

async fn queue_samples(
    write_api: &WriteApi,
    date: NaiveDate,
    samples: &[HeartRateSample],
) -> Result<usize> {
    for sample in samples {
        write_api.write_point(heart_rate_point(date, sample)?).await?;
    }
    Ok(samples.len())
}
