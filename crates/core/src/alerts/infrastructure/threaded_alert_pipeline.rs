use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::Local;
use crossbeam_channel::{Receiver, RecvTimeoutError, SendTimeoutError, Sender};
use serde::{Deserialize, Serialize};

use crate::alerts::domain::alert_notifier::AlertNotifier;
use crate::alerts::domain::alert_queue::{AlertPipelineError, AlertQueue};
use crate::alerts::domain::alert_record::AlertRecord;
use crate::alerts::domain::alert_sink::AlertSink;
use crate::alerts::domain::deduplicator::AlertDeduplicator;
use crate::alerts::domain::priority::Priority;
use crate::alerts::domain::statistics::AlertStatistics;
use crate::shared::alert::Alert;
use crate::shared::constants::{
    DEFAULT_DEDUP_WINDOW_SECS, DEFAULT_ENQUEUE_TIMEOUT_SECS, DEFAULT_GLOBAL_COOLDOWN_SECS,
    DEFAULT_LOG_DIR, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_STOP_TIMEOUT_SECS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPipelineConfig {
    pub queue_capacity: usize,
    pub enqueue_timeout_secs: f64,
    /// How often an idle worker wakes to check for a stop request.
    pub poll_interval_secs: f64,
    pub stop_timeout_secs: f64,
    pub dedup_window_secs: f64,
    pub crowd_cooldown_secs: f64,
    pub log_dir: PathBuf,
}

impl Default for AlertPipelineConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            enqueue_timeout_secs: DEFAULT_ENQUEUE_TIMEOUT_SECS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            stop_timeout_secs: DEFAULT_STOP_TIMEOUT_SECS,
            dedup_window_secs: DEFAULT_DEDUP_WINDOW_SECS,
            crowd_cooldown_secs: DEFAULT_GLOBAL_COOLDOWN_SECS,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

enum QueueItem {
    Alert(Alert),
    Shutdown,
}

/// Everything the worker thread owns while it runs. Handed back on join so
/// the pipeline can be restarted without losing dedup state.
struct WorkerState {
    sink: Box<dyn AlertSink>,
    notifier: Box<dyn AlertNotifier>,
    dedup: AlertDeduplicator,
}

struct Worker {
    handle: JoinHandle<WorkerState>,
    /// Disconnects when the worker thread exits, normally or by panic.
    done_rx: Receiver<()>,
}

/// Bounded alert queue drained by one background worker.
///
/// Layout: `producers → bounded queue → worker [dedup/stats/notify/persist]`
///
/// Producers never wait longer than the enqueue timeout; alerts that do not
/// fit are dropped and counted. Stopping is two-phase: clear the running
/// flag, then enqueue a sentinel behind any pending alerts so the worker
/// drains them before exiting.
pub struct ThreadedAlertPipeline {
    config: AlertPipelineConfig,
    tx: Sender<QueueItem>,
    rx: Receiver<QueueItem>,
    running: Arc<AtomicBool>,
    stats: Arc<Mutex<AlertStatistics>>,
    idle_state: Option<WorkerState>,
    worker: Option<Worker>,
}

impl ThreadedAlertPipeline {
    pub fn new(
        config: AlertPipelineConfig,
        sink: Box<dyn AlertSink>,
        notifier: Box<dyn AlertNotifier>,
    ) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(config.queue_capacity.max(1));
        let dedup = AlertDeduplicator::new(config.dedup_window_secs, config.crowd_cooldown_secs);
        Self {
            config,
            tx,
            rx,
            running: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(Mutex::new(AlertStatistics::default())),
            idle_state: Some(WorkerState {
                sink,
                notifier,
                dedup,
            }),
            worker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn start(&mut self) -> Result<(), AlertPipelineError> {
        if self.worker.is_some() {
            return Err(AlertPipelineError::AlreadyRunning);
        }
        let Some(state) = self.idle_state.take() else {
            return Err(AlertPipelineError::WorkerPanicked);
        };

        self.running.store(true, Ordering::SeqCst);
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);
        let rx = self.rx.clone();
        let running = self.running.clone();
        let stats = self.stats.clone();
        let poll = secs(self.config.poll_interval_secs);

        let handle = std::thread::Builder::new()
            .name("alert-worker".to_string())
            .spawn(move || {
                let state = run_worker(rx, running, stats, state, poll);
                drop(done_tx);
                state
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                AlertPipelineError::Spawn(e)
            })?;

        self.worker = Some(Worker { handle, done_rx });
        log::info!("Alert pipeline started");
        Ok(())
    }

    /// Stops the worker after it drains queued alerts. Waits at most the
    /// configured stop timeout; on timeout the worker is left running and
    /// a later `stop` may wait for it again.
    pub fn stop(&mut self) -> Result<(), AlertPipelineError> {
        self.running.store(false, Ordering::SeqCst);
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        let timeout = secs(self.config.stop_timeout_secs);
        if self.tx.send_timeout(QueueItem::Shutdown, timeout).is_err() {
            log::warn!("Alert queue full at shutdown; worker will exit once drained");
        }

        match worker.done_rx.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => {
                self.worker = Some(worker);
                Err(AlertPipelineError::StopTimeout(self.config.stop_timeout_secs))
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let state = worker
                    .handle
                    .join()
                    .map_err(|_| AlertPipelineError::WorkerPanicked)?;
                self.idle_state = Some(state);
                log::info!("Alert pipeline stopped");
                Ok(())
            }
        }
    }

    fn record_drop(&self, reason: &str) {
        lock(&self.stats).record_dropped();
        log::warn!("Alert dropped: {reason}");
    }
}

impl AlertQueue for ThreadedAlertPipeline {
    fn log_alert(&self, alert: Alert) -> bool {
        if !self.is_running() {
            self.record_drop("pipeline is not running");
            return false;
        }

        let timeout = secs(self.config.enqueue_timeout_secs);
        match self.tx.send_timeout(QueueItem::Alert(alert), timeout) {
            Ok(()) => true,
            Err(SendTimeoutError::Timeout(_)) => {
                self.record_drop("queue full");
                false
            }
            Err(SendTimeoutError::Disconnected(_)) => {
                self.record_drop("queue closed");
                false
            }
        }
    }

    fn statistics(&self) -> AlertStatistics {
        *lock(&self.stats)
    }

    fn shutdown(&mut self) -> Result<(), AlertPipelineError> {
        self.stop()
    }
}

impl Drop for ThreadedAlertPipeline {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("Alert pipeline shutdown: {e}");
        }
    }
}

fn run_worker(
    rx: Receiver<QueueItem>,
    running: Arc<AtomicBool>,
    stats: Arc<Mutex<AlertStatistics>>,
    mut state: WorkerState,
    poll: Duration,
) -> WorkerState {
    loop {
        match rx.recv_timeout(poll) {
            Ok(QueueItem::Alert(alert)) => process_alert(&alert, &mut state, &stats),
            // A sentinel left over from an earlier stop must not end a
            // restarted worker.
            Ok(QueueItem::Shutdown) | Err(RecvTimeoutError::Timeout) => {
                if !running.load(Ordering::SeqCst) {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    state
}

fn process_alert(alert: &Alert, state: &mut WorkerState, stats: &Mutex<AlertStatistics>) {
    let decision = state.dedup.check(alert);
    if !decision.admitted {
        lock(stats).record_duplicate();
        log::debug!(
            "Duplicate {} for person {:?} filtered (occurrence {})",
            alert.kind,
            alert.person_id,
            decision.occurrence
        );
        return;
    }

    let priority = Priority::for_kind(&alert.kind);
    lock(stats).record_admitted(priority);
    state.notifier.notify(alert, priority, decision.occurrence);

    let record = AlertRecord::new(alert, priority, decision.occurrence, Local::now());
    if let Err(e) = state.sink.append(&record) {
        log::error!("Failed to persist {} alert: {e}", alert.kind);
    }
}

fn lock(stats: &Mutex<AlertStatistics>) -> MutexGuard<'_, AlertStatistics> {
    stats.lock().unwrap_or_else(PoisonError::into_inner)
}

fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
