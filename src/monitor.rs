// src/monitor.rs
//! Reads NMEA sentences from a receiver and encodes each fix

use crate::{
    diagnostic::{DiagnosticSink, TracingSink},
    error::{CodecError, Result},
    gps::sentence,
    report::PositionReport,
};
use std::{
    io::ErrorKind,
    path::PathBuf,
    sync::{Arc, RwLock},
    time::Duration,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_serial::SerialPortBuilderExt;
use tokio_util::sync::CancellationToken;

/// Where NMEA sentences come from
#[derive(Debug, Clone)]
pub enum FeedSource {
    Serial { port: String, baudrate: u32 },
    File(PathBuf),
    Stdin,
}

impl FeedSource {
    fn label(&self) -> String {
        match self {
            FeedSource::Serial { port, .. } => port.clone(),
            FeedSource::File(path) => path.display().to_string(),
            FeedSource::Stdin => "stdin".to_string(),
        }
    }
}

/// Turns a stream of NMEA sentences into position reports
pub struct PositionMonitor {
    ambiguity: u8,
    sink: Arc<dyn DiagnosticSink>,
    latest: Arc<RwLock<Option<PositionReport>>>,
    shutdown: CancellationToken,
}

impl PositionMonitor {
    /// Create a monitor that logs advisories through `tracing`
    pub fn new(ambiguity: u8) -> Self {
        Self::with_sink(ambiguity, Arc::new(TracingSink))
    }

    pub fn with_sink(ambiguity: u8, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            ambiguity,
            sink,
            latest: Arc::new(RwLock::new(None)),
            shutdown: CancellationToken::new(),
        }
    }

    /// Read from `source` until it ends or the monitor is stopped.
    ///
    /// `on_report` is called once per valid fix. Returns how many reports
    /// were produced.
    pub async fn run<F>(&self, source: FeedSource, mut on_report: F) -> Result<usize>
    where
        F: FnMut(&PositionReport),
    {
        let label = source.label();
        tracing::info!(source = %label, "Reading NMEA sentences");

        match source {
            FeedSource::Serial { port, baudrate } => {
                let serial = tokio_serial::new(&port, baudrate)
                    .timeout(Duration::from_millis(1000))
                    .open_native_async()
                    .map_err(|e| {
                        tracing::error!(port = %port, "Failed to open serial port: {}", e);
                        CodecError::from(e)
                    })?;
                tracing::info!(port = %port, baudrate, "Connected to serial port");
                self.pump(BufReader::new(serial), &label, &mut on_report).await
            }
            FeedSource::File(path) => {
                let file = tokio::fs::File::open(&path).await?;
                self.pump(BufReader::new(file), &label, &mut on_report).await
            }
            FeedSource::Stdin => {
                self.pump(BufReader::new(tokio::io::stdin()), &label, &mut on_report)
                    .await
            }
        }
    }

    async fn pump<R, F>(&self, mut reader: R, label: &str, on_report: &mut F) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        F: FnMut(&PositionReport),
    {
        let mut line = String::new();
        let mut produced = 0;

        while self.is_running() {
            line.clear();
            let read = tokio::select! {
                result = reader.read_line(&mut line) => result,
                _ = self.shutdown.cancelled() => break,
            };
            match read {
                Ok(0) => break, // EOF
                Ok(_) => {
                    if let Some(report) = self.handle_line(&line, label) {
                        on_report(&report);
                        produced += 1;
                    }
                }
                Err(e) if e.kind() == ErrorKind::TimedOut => continue,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    tracing::warn!(source = %label, "Skipping line that is not UTF-8");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::debug!(source = %label, produced, "NMEA feed finished");
        Ok(produced)
    }

    /// Parse one line and encode it if it carries a valid fix
    pub fn handle_line(&self, line: &str, label: &str) -> Option<PositionReport> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut parsed = sentence::parse_sentence(line)?;
        parsed.fix.set_source(label);

        for diagnostic in &parsed.diagnostics {
            self.sink.report(diagnostic);
        }

        if !parsed.fix.has_fix() {
            tracing::debug!(kind = %parsed.fix.kind, "Ignoring sentence without a valid fix");
            return None;
        }

        let report = PositionReport::from_fix(&parsed.fix, self.ambiguity);
        for diagnostic in &report.diagnostics {
            self.sink.report(diagnostic);
        }

        if let Ok(mut latest) = self.latest.write() {
            *latest = Some(report.clone());
        }
        Some(report)
    }

    /// Stop the monitor, waking a pending read
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    /// Check if the monitor is running
    pub fn is_running(&self) -> bool {
        !self.shutdown.is_cancelled()
    }

    /// Token that stops the monitor when cancelled from another task
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Most recent report, if any
    pub fn latest(&self) -> Option<PositionReport> {
        self.latest.read().ok().and_then(|guard| guard.clone())
    }
}
