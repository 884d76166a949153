// Copyright 2025-Present New Relic, Inc. https://newrelic.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

mod config;

use config::ForwarderConfig;
use newrelic_logs::config::{IntakeConfig, ProxyConfig};
use newrelic_logs::intake::IntakeClient;
use newrelic_logs::payload::LogRecord;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const FLUSH_INTERVAL: u64 = 5;
const RECORD_CHANNEL_CAPACITY: usize = 1024;

#[tokio::main]
pub async fn main() {
    let config = match ForwarderConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error reading forwarder configuration: {err}");
            return;
        }
    };

    let env_filter = format!("h2=off,hyper=off,rustls=off,{}", config.log_level);

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let credentials = match config.credentials() {
        Some(credentials) => credentials,
        None => {
            error!("No intake credential configured, shutting down");
            return;
        }
    };

    let client = match IntakeClient::new(
        IntakeConfig::new(config.endpoint.clone(), credentials),
        ProxyConfig {
            url: config.proxy.clone(),
            accept_invalid_certs: false,
        },
    ) {
        Ok(client) => client,
        Err(err) => {
            error!("Error creating intake client on forwarder startup: {err}");
            return;
        }
    };

    info!("Forwarding log records from stdin to {}", config.endpoint);

    let (tx, mut rx) = mpsc::channel::<LogRecord>(RECORD_CHANNEL_CAPACITY);
    tokio::spawn(read_records(tx));

    let mut batch: Vec<LogRecord> = Vec::new();
    let mut flush_interval = interval(Duration::from_secs(FLUSH_INTERVAL));
    flush_interval.tick().await; // discard first tick, which is instantaneous

    loop {
        tokio::select! {
            record = rx.recv() => match record {
                Some(record) => batch.push(record),
                None => {
                    // stdin closed: flush what is left and exit.
                    flush(&client, &mut batch).await;
                    return;
                }
            },
            _ = flush_interval.tick() => flush(&client, &mut batch).await,
        }
    }
}

/// Ships the accumulated batch. A failed send is logged and the batch is
/// dropped; delivery is at-most-once and re-attempting is left to the
/// operator.
async fn flush(client: &IntakeClient, batch: &mut Vec<LogRecord>) {
    if batch.is_empty() {
        return;
    }
    debug!("Flushing {} log records", batch.len());
    let records = std::mem::take(batch);
    if let Err(err) = client.send(&records).await {
        error!("Error shipping log records: {err}");
    }
}

/// Reads newline-delimited JSON objects from stdin and feeds them into the
/// batching loop. Lines that are not JSON objects are logged and skipped.
async fn read_records(tx: mpsc::Sender<LogRecord>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<LogRecord>(&line) {
                    Ok(record) => {
                        if tx.send(record).await.is_err() {
                            return;
                        }
                    }
                    Err(err) => error!("Skipping malformed input line: {err}"),
                }
            }
            Ok(None) => return,
            Err(err) => {
                error!("Error reading from stdin: {err}");
                return;
            }
        }
    }
}
