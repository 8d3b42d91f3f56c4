//! Full aggregation pass
//!
//! Scans the lookup tree once and writes one consolidated output file per
//! configured language. Runs at build start; any discovery, parse or write
//! failure aborts the whole pass and is left to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::{CollectorError, CollectorResult};
use crate::merge::deep_merge;
use crate::scanner::scan;

/// Aggregates fragments into per-language output files.
pub struct Aggregator {
    config: Config,
}

/// Result of a full aggregation pass, in language-configuration order.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub entries: Vec<BuildEntry>,
}

/// Per-language outcome of a full aggregation pass.
#[derive(Debug, Clone)]
pub struct BuildEntry {
    pub language: String,
    pub fragments: usize,
    pub output: PathBuf,
}

impl Aggregator {
    pub fn new(config: Config) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Output file path for one language: `{save_dir}/{language}.json`.
    pub fn output_path(&self, language: &str) -> PathBuf {
        self.config.save_dir.join(format!("{language}.json"))
    }

    /// Run the full aggregation pass.
    ///
    /// For each configured language, folds [`deep_merge`] over that
    /// language's fragments in traversal order and overwrites the output
    /// file. With identical inputs the pass is idempotent.
    pub fn run_full(&self) -> CollectorResult<BuildReport> {
        let tree = scan(
            &self.config.lookup_dir,
            &self.config.save_dir,
            &self.config.languages,
        )?;

        let mut report = BuildReport::default();

        for language in &self.config.languages {
            let files = tree.get(language.as_str()).map(Vec::as_slice).unwrap_or(&[]);

            let mut combined = Map::new();
            for file in files {
                let fragment = read_fragment(file)?;
                deep_merge(&mut combined, fragment);
            }

            let output = self.output_path(language);
            write_output(&output, &combined)?;

            report.entries.push(BuildEntry {
                language: language.clone(),
                fragments: files.len(),
                output,
            });
        }

        Ok(report)
    }
}

/// Read and parse one fragment file as a JSON object.
pub(crate) fn read_fragment(path: &Path) -> CollectorResult<Map<String, Value>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| CollectorError::Parse {
        file: path.to_path_buf(),
        source,
    })
}

/// Serialize `value` compactly and overwrite `path`, creating the parent
/// directory if needed.
pub(crate) fn write_output(path: &Path, value: &Map<String, Value>) -> CollectorResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CollectorError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let serialized = serde_json::to_string(value)
        .map_err(|e| CollectorError::Io(std::io::Error::other(e.to_string())))?;

    fs::write(path, serialized).map_err(|source| CollectorError::Write {
        path: path.to_path_buf(),
        source,
    })
}
