//! Batch normalization
//!
//! [`cast_to_object_list`] assembles a batch sequentially. [`BatchPipeline`]
//! does the same with a pool of tokio workers fed through an mpsc channel:
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Payload   │     │  Assembler  │     │   Result    │
//! │  Producer   │────▶│   Workers   │────▶│  Collector  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                   mpsc channel      mpsc channel
//! ```
//!
//! Records are independent, so workers share nothing but the assembler and
//! the stats counters. Output keeps input order. A rejected payload is logged
//! and skipped; the batch always completes.
//!
//! # Example
//!
//! ```no_run
//! use rabota::assembler::VacancyAssembler;
//! use rabota::config::PipelineConfig;
//! use rabota::pipeline::BatchPipeline;
//! use serde_json::json;
//!
//! # async fn example() -> rabota::error::Result<()> {
//! let pipeline = BatchPipeline::new(VacancyAssembler::default(), PipelineConfig::default());
//! let outcome = pipeline.run(vec![json!({"name": "Dev"}), json!("junk")]).await?;
//!
//! assert_eq!(outcome.vacancies.len(), 1);
//! assert_eq!(outcome.stats.rejected, 1);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::assembler::VacancyAssembler;
use crate::config::PipelineConfig;
use crate::error::{Error, InvalidPayloadError, Result};
use crate::models::Vacancy;

/// Envelope keys that wrap a payload list in provider responses
const ENVELOPE_KEYS: &[&str] = &["items", "objects"];

// ============================================================================
// Sequential cast
// ============================================================================

/// Assemble every payload, skipping (and logging) the ones that are rejected
pub fn cast_to_object_list(assembler: &VacancyAssembler, payloads: &[Value]) -> Vec<Vacancy> {
    payloads
        .iter()
        .enumerate()
        .filter_map(|(index, payload)| match assembler.from_dict(payload) {
            Ok(vacancy) => Some(vacancy),
            Err(err) => {
                log_rejection(index as u64, &err);
                None
            }
        })
        .collect()
}

fn log_rejection(index: u64, err: &InvalidPayloadError) {
    tracing::warn!(index, kind = err.kind, payload = %err.payload, "Skipping invalid vacancy payload");
}

// ============================================================================
// Message Types
// ============================================================================

/// Payload handed to a worker
#[derive(Debug)]
struct AssembleJob {
    index: u64,
    payload: Value,
}

/// Outcome of one job
#[derive(Debug)]
enum JobResult {
    Assembled { index: u64, vacancy: Box<Vacancy> },
    Rejected { index: u64, error: InvalidPayloadError },
}

// ============================================================================
// Pipeline Statistics
// ============================================================================

/// Batch statistics (thread-safe)
#[derive(Debug, Default)]
pub struct PipelineStats {
    pub total: AtomicU64,
    pub assembled: AtomicU64,
    pub rejected: AtomicU64,
}

impl PipelineStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Start counting a new batch
    pub fn reset(&self, total: u64) {
        self.total.store(total, Ordering::Relaxed);
        self.assembled.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
    }

    pub fn record_assembled(&self) {
        self.assembled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            assembled: self.assembled.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of batch statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct StatsSnapshot {
    pub total: u64,
    pub assembled: u64,
    pub rejected: u64,
}

impl StatsSnapshot {
    /// Share of assembled records (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        let done = self.assembled + self.rejected;
        if done == 0 {
            return 1.0;
        }
        self.assembled as f64 / done as f64
    }
}

/// Vacancies of a batch, in input order, plus its statistics
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub vacancies: Vec<Vacancy>,
    pub stats: StatsSnapshot,
}

// ============================================================================
// Pipeline Implementation
// ============================================================================

/// Concurrent batch normalizer
pub struct BatchPipeline {
    assembler: VacancyAssembler,
    config: PipelineConfig,
    stats: Arc<PipelineStats>,
}

impl BatchPipeline {
    pub fn new(assembler: VacancyAssembler, config: PipelineConfig) -> Self {
        Self {
            assembler,
            config,
            stats: PipelineStats::new(),
        }
    }

    /// Counters of the current (or last) run
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Normalize a batch with the configured number of workers
    pub async fn run(&self, payloads: Vec<Value>) -> Result<BatchOutcome> {
        let total = payloads.len();
        self.stats.reset(total as u64);

        let workers = self.config.workers.max(1);
        let buffer = self.config.channel_buffer_size.max(1);
        tracing::info!(total, workers, "Starting batch normalization");

        let (job_tx, job_rx) = mpsc::channel::<AssembleJob>(buffer);
        let (result_tx, mut result_rx) = mpsc::channel::<JobResult>(buffer);

        let worker_handles = self.spawn_workers(workers, job_rx, result_tx);

        // Collector runs alongside the producer so neither channel fills up
        let stats = Arc::clone(&self.stats);
        let collector: JoinHandle<Vec<Option<Vacancy>>> = tokio::spawn(async move {
            let mut slots: Vec<Option<Vacancy>> = Vec::new();
            slots.resize_with(total, || None);

            while let Some(result) = result_rx.recv().await {
                match result {
                    JobResult::Assembled { index, vacancy } => {
                        stats.record_assembled();
                        tracing::debug!(index, vacancy_id = vacancy.id(), "Vacancy assembled");
                        if let Some(slot) = slots.get_mut(index as usize) {
                            *slot = Some(*vacancy);
                        }
                    }
                    JobResult::Rejected { index, error } => {
                        stats.record_rejected();
                        log_rejection(index, &error);
                    }
                }
            }
            slots
        });

        for (index, payload) in payloads.into_iter().enumerate() {
            let job = AssembleJob {
                index: index as u64,
                payload,
            };
            if job_tx.send(job).await.is_err() {
                tracing::error!("Failed to send assemble job - channel closed");
                break;
            }
        }

        // Close job channel to signal completion
        drop(job_tx);

        for handle in worker_handles {
            handle
                .await
                .map_err(|e| Error::with_source("Normalization worker failed", e))?;
        }

        let slots = collector
            .await
            .map_err(|e| Error::with_source("Result collector failed", e))?;

        let snapshot = self.stats.snapshot();
        tracing::info!(
            total = snapshot.total,
            assembled = snapshot.assembled,
            rejected = snapshot.rejected,
            "Batch normalization completed"
        );

        Ok(BatchOutcome {
            vacancies: slots.into_iter().flatten().collect(),
            stats: snapshot,
        })
    }

    /// Spawn assembler worker tasks sharing one job receiver
    fn spawn_workers(
        &self,
        workers: usize,
        job_rx: mpsc::Receiver<AssembleJob>,
        result_tx: mpsc::Sender<JobResult>,
    ) -> Vec<JoinHandle<()>> {
        let job_rx = Arc::new(tokio::sync::Mutex::new(job_rx));
        let mut handles = Vec::with_capacity(workers);

        for worker_id in 0..workers {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let assembler = self.assembler.clone();

            let handle = tokio::spawn(async move {
                loop {
                    let job = {
                        let mut rx = job_rx.lock().await;
                        rx.recv().await
                    };

                    let Some(AssembleJob { index, payload }) = job else {
                        break;
                    };

                    let result = match assembler.from_dict(&payload) {
                        Ok(vacancy) => JobResult::Assembled {
                            index,
                            vacancy: Box::new(vacancy),
                        },
                        Err(error) => JobResult::Rejected { index, error },
                    };

                    if result_tx.send(result).await.is_err() {
                        tracing::error!(worker_id, "Result channel closed");
                        break;
                    }
                }

                tracing::debug!(worker_id, "Normalization worker finished");
            });

            handles.push(handle);
        }

        handles
    }
}

// ============================================================================
// Payload loading
// ============================================================================

/// Read a payload file
///
/// Accepts a JSON array, a provider envelope (`{"items": [...]}`,
/// `{"objects": [...]}`, `{"data": {"items" | "objects": [...]}}`) or a
/// single value.
pub async fn load_payloads(path: &Path) -> Result<Vec<Value>> {
    let content = tokio::fs::read_to_string(path).await?;
    let document: Value = serde_json::from_str(&content)?;
    Ok(unwrap_envelope(document))
}

/// Extract the payload list from a decoded document
pub fn unwrap_envelope(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ENVELOPE_KEYS {
                if matches!(map.get(*key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove(*key) {
                        return items;
                    }
                }
            }
            if let Some(Value::Object(data)) = map.get("data") {
                for key in ENVELOPE_KEYS {
                    if let Some(Value::Array(items)) = data.get(*key) {
                        return items.clone();
                    }
                }
            }
            vec![Value::Object(map)]
        }
        other => vec![other],
    }
}
