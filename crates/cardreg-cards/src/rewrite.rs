//! In-place card rewriting shared by reorder and mirror

use std::path::PathBuf;

use cardreg_fs::{NormalizedPath, io};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::discover::find_files;
use crate::error::Result;

/// What a transform decided for one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Write this object back (unless it serializes to the same bytes)
    Apply(Map<String, Value>),
    /// Leave the file alone for the given reason
    Skip(String),
}

/// Outcome for one card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteStatus {
    Updated,
    Unchanged,
    Skipped { reason: String },
    /// Unparsable JSON or a non-object top level
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub file: NormalizedPath,
    pub status: RewriteStatus,
}

/// Results for every card visited, in path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub results: Vec<RewriteResult>,
    pub dry_run: bool,
}

impl RewriteReport {
    pub fn count(&self, pred: impl Fn(&RewriteStatus) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.status)).count()
    }

    pub fn updated(&self) -> usize {
        self.count(|s| *s == RewriteStatus::Updated)
    }

    pub fn has_failures(&self) -> bool {
        self.count(|s| matches!(s, RewriteStatus::Failed { .. })) > 0
    }
}

/// Render a card the way it is stored: 2-space pretty JSON plus newline.
pub fn render_card(card: &Map<String, Value>) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(card)?))
}

/// Applies a [`Transform`] to every card under the agents directory.
#[derive(Debug, Clone)]
pub struct CardRewriter {
    repo_root: PathBuf,
    agents_dir: String,
    dry_run: bool,
}

impl CardRewriter {
    pub fn new(repo_root: impl Into<PathBuf>, agents_dir: impl Into<String>) -> Self {
        Self {
            repo_root: repo_root.into(),
            agents_dir: agents_dir.into(),
            dry_run: false,
        }
    }

    /// Report what would change without writing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self, transform: impl Fn(Map<String, Value>) -> Transform) -> Result<RewriteReport> {
        let cards = find_files(&self.repo_root, &self.agents_dir, ".json")?;
        let mut results = Vec::with_capacity(cards.len());

        for file in cards {
            let status = self.rewrite_one(&file, &transform)?;
            debug!(card = %file, status = ?status, "rewrite");
            results.push(RewriteResult { file, status });
        }

        let report = RewriteReport {
            results,
            dry_run: self.dry_run,
        };
        info!(
            updated = report.updated(),
            total = report.results.len(),
            dry_run = self.dry_run,
            "rewrote cards"
        );
        Ok(report)
    }

    fn rewrite_one(
        &self,
        file: &NormalizedPath,
        transform: &impl Fn(Map<String, Value>) -> Transform,
    ) -> Result<RewriteStatus> {
        let path = NormalizedPath::new(self.repo_root.join(file.to_native()));
        let original = io::read_text(&path)?;

        let card = match serde_json::from_str::<Value>(&original) {
            Ok(Value::Object(card)) => card,
            Ok(_) => {
                return Ok(RewriteStatus::Failed {
                    message: "top-level value is not an object".into(),
                });
            }
            Err(e) => {
                return Ok(RewriteStatus::Failed {
                    message: e.to_string(),
                });
            }
        };

        let updated = match transform(card) {
            Transform::Skip(reason) => return Ok(RewriteStatus::Skipped { reason }),
            Transform::Apply(updated) => updated,
        };

        let rendered = render_card(&updated)?;
        if rendered == original {
            return Ok(RewriteStatus::Unchanged);
        }
        if !self.dry_run {
            io::write_text(&path, &rendered)?;
        }
        Ok(RewriteStatus::Updated)
    }
}
