//! Incremental recomputation on file-change events
//!
//! Routes a single changed path to at most one language's output. Paths that
//! are not fragments (wrong extension, under the save directory, or not
//! matching any configured language) are skipped; writes to the save
//! directory in particular must never re-trigger recomputation, or the
//! watcher would feed on its own output.
//!
//! Unlike the full build pass, every failure here is caught and reported as
//! an outcome so a development session keeps running with the previous
//! output intact.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::classify::classify;
use crate::config::Config;
use crate::engine::{read_fragment, write_output};
use crate::error::CollectorResult;
use crate::merge::deep_merge;
use crate::scanner::scan_language;

/// How an incremental update recomputes a language's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStrategy {
    /// Re-scan every fragment of the affected language and rebuild the
    /// output from scratch. Strongest consistency; cost proportional to the
    /// language's fragment count.
    #[default]
    Full,
    /// Deep-merge the changed fragment on top of the existing output file.
    /// Cheaper, but keys removed from a fragment persist in the aggregate
    /// until the next full pass, and a deleted fragment reports a failure
    /// instead of recomputing. Accepted tradeoff, not silently fixed.
    Layer,
}

/// Outcome of routing one file-change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The path is not a fragment; nothing was recomputed.
    Skipped,
    /// The affected language's output was rewritten.
    Updated { language: String, output: PathBuf },
    /// Recomputation failed; the prior output file is untouched.
    Failed { language: String, message: String },
}

/// Handles file-change notifications for a fixed configuration.
pub struct Updater {
    config: Config,
}

impl Updater {
    pub fn new(config: Config) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    /// React to a single changed file.
    ///
    /// Never panics and never propagates an error; a failed recomputation is
    /// reported through [`UpdateOutcome::Failed`].
    pub fn on_file_changed(&self, changed: &Path) -> UpdateOutcome {
        // Bring the event path into the same form as the normalized config
        // before the save_dir comparison below.
        let changed = crate::paths::absolutize(changed);

        let Some(file_name) = changed.file_name().and_then(|n| n.to_str()) else {
            return UpdateOutcome::Skipped;
        };

        // Anti-feedback-loop guard: our own output writes must be no-ops.
        if !file_name.ends_with(".json") || changed.starts_with(&self.config.save_dir) {
            return UpdateOutcome::Skipped;
        }

        let Some(language) = classify(file_name, &self.config.languages) else {
            return UpdateOutcome::Skipped;
        };
        let language = language.to_string();

        let result = match self.config.strategy {
            UpdateStrategy::Full => self.remerge(&language),
            UpdateStrategy::Layer => self.layer(&changed, &language),
        };

        match result {
            Ok(output) => UpdateOutcome::Updated { language, output },
            Err(e) => UpdateOutcome::Failed {
                language,
                message: e.to_string(),
            },
        }
    }

    /// Rebuild one language's output from all of its fragments.
    fn remerge(&self, language: &str) -> CollectorResult<PathBuf> {
        let files = scan_language(&self.config.lookup_dir, &self.config.save_dir, language)?;

        let mut combined = Map::new();
        for file in &files {
            let fragment = read_fragment(file)?;
            deep_merge(&mut combined, fragment);
        }

        let output = self.output_path(language);
        write_output(&output, &combined)?;
        Ok(output)
    }

    /// Layer the changed fragment on top of the existing output.
    fn layer(&self, changed: &Path, language: &str) -> CollectorResult<PathBuf> {
        let output = self.output_path(language);

        // Absent or unreadable prior output is treated as an empty object.
        let mut combined: Map<_, _> = std::fs::read_to_string(&output)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();

        let fragment = read_fragment(changed)?;
        deep_merge(&mut combined, fragment);

        write_output(&output, &combined)?;
        Ok(output)
    }

    fn output_path(&self, language: &str) -> PathBuf {
        self.config.save_dir.join(format!("{language}.json"))
    }
}
