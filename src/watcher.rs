//! File watcher for interactive development sessions
//!
//! Runs a full aggregation pass, then watches the lookup tree with:
//! - Debouncing (100ms)
//! - Content-hash filtering of no-op saves
//! - Recomputation when a tracked fragment is deleted
//! - Per-language incremental updates
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::Config;
use crate::engine::Aggregator;
use crate::error::{CollectorError, CollectorResult};
use crate::updater::{UpdateOutcome, Updater};

/// Debounce duration in milliseconds
const DEBOUNCE_MS: u64 = 100;

/// Startup cooldown: drain the initial event burst notify sometimes emits
/// for existing files when a watch is first registered
const STARTUP_COOLDOWN_MS: u64 = 500;

/// Watch event types for NDJSON output
#[derive(Debug, Clone)]
pub enum WatchEvent {
    Started { lookup_dir: String },
    AggregationComplete { outputs: usize },
    FileChanged { path: String },
    Updated { language: String, output: String },
    Error { message: String },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        match self {
            WatchEvent::Started { lookup_dir } => {
                format!(r#"{{"event":"started","lookup_dir":{}}}"#, json_str(lookup_dir))
            }
            WatchEvent::AggregationComplete { outputs } => {
                format!(r#"{{"event":"aggregation_complete","outputs":{}}}"#, outputs)
            }
            WatchEvent::FileChanged { path } => {
                format!(r#"{{"event":"file_changed","path":{}}}"#, json_str(path))
            }
            WatchEvent::Updated { language, output } => {
                format!(
                    r#"{{"event":"updated","language":{},"output":{}}}"#,
                    json_str(language),
                    json_str(output)
                )
            }
            WatchEvent::Error { message } => {
                format!(r#"{{"event":"error","message":{}}}"#, json_str(message))
            }
            WatchEvent::Shutdown => r#"{"event":"shutdown"}"#.to_string(),
        }
    }
}

/// Encode one string as a JSON string literal, quotes included.
fn json_str(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Watcher state for debouncing
struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
}

impl WatcherState {
    fn new() -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
        }
    }

    fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    fn should_update(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
        } else {
            false
        }
    }

    fn take_changes(&mut self) -> Vec<PathBuf> {
        let changes: Vec<_> = self.pending_changes.drain().collect();
        self.last_change = None;
        changes
    }
}

/// Aggregate once, then watch for fragment changes until `running` clears.
///
/// The initial aggregation failure is fatal and propagates; once the watch
/// loop is running, update failures are reported through
/// [`WatchEvent::Error`] and the loop keeps going.
pub fn watch(
    config: Config,
    running: Arc<AtomicBool>,
    on_event: impl Fn(WatchEvent),
) -> CollectorResult<()> {
    // All save_dir comparisons below are lexical; settle on one path form
    // up front.
    let config = config.normalized();

    on_event(WatchEvent::Started {
        lookup_dir: config.lookup_dir.display().to_string(),
    });

    let aggregator = Aggregator::new(config.clone());
    let report = aggregator.run_full()?;
    on_event(WatchEvent::AggregationComplete {
        outputs: report.entries.len(),
    });

    let updater = Updater::new(config.clone());

    // Set up file watcher
    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| CollectorError::Io(std::io::Error::other(e.to_string())))?;

    watcher
        .watch(&config.lookup_dir, RecursiveMode::Recursive)
        .map_err(|e| CollectorError::Io(std::io::Error::other(e.to_string())))?;

    let mut state = WatcherState::new();
    // Content hashes filter out editor auto-save noise
    let mut content_hashes: HashMap<PathBuf, String> = HashMap::new();

    let cooldown_end = Instant::now() + Duration::from_millis(STARTUP_COOLDOWN_MS);
    while Instant::now() < cooldown_end {
        let _ = rx.recv_timeout(Duration::from_millis(50));
    }

    while running.load(Ordering::SeqCst) {
        // Check for file changes (non-blocking with timeout)
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            let path = crate::paths::absolutize(&path);

            // Our own output writes must not feed back into the loop
            if path.extension().map(|e| e == "json").unwrap_or(false)
                && !path.starts_with(&config.save_dir)
                && should_queue_change(&path, &mut content_hashes)
            {
                state.add_change(path);
            }
        }

        // Check if we should update (debounced)
        if state.should_update() {
            for path in state.take_changes() {
                on_event(WatchEvent::FileChanged {
                    path: path.display().to_string(),
                });

                match updater.on_file_changed(&path) {
                    UpdateOutcome::Updated { language, output } => {
                        on_event(WatchEvent::Updated {
                            language,
                            output: output.display().to_string(),
                        });
                    }
                    UpdateOutcome::Failed { language, message } => {
                        on_event(WatchEvent::Error {
                            message: format!("{language}: {message}"),
                        });
                    }
                    UpdateOutcome::Skipped => {}
                }
            }
        }
    }

    on_event(WatchEvent::Shutdown);
    Ok(())
}

/// Decide whether a change event is worth queueing.
///
/// Readable files are filtered by content hash so editor auto-save noise
/// does not trigger recomputation. An unreadable path that was hashed
/// before means a tracked fragment went away; its stale hash is dropped
/// and the change is queued so the language gets recomputed without it.
/// Unreadable paths never seen before are ignored.
fn should_queue_change(path: &Path, content_hashes: &mut HashMap<PathBuf, String>) -> bool {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let new_hash = compute_content_hash(&content);
            if content_hashes.get(path) == Some(&new_hash) {
                return false;
            }
            content_hashes.insert(path.to_path_buf(), new_hash);
            true
        }
        Err(_) => content_hashes.remove(path).is_some(),
    }
}

/// Compute a simple hash of content for change detection
fn compute_content_hash(content: &str) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}
