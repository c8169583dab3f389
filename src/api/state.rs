use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{RuleTable, SegmentTable};
use crate::store;

/// Shared application state
///
/// The model tables are read-only once loaded, so handlers share them through
/// a plain `Arc` with no lock; refreshing models means restarting the server
/// after a training run.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Models>,
}

/// Model tables served by the API
pub struct Models {
    pub segments: SegmentTable,
    pub rules: RuleTable,
}

impl AppState {
    /// Creates state from already-built tables
    pub fn new(segments: SegmentTable, rules: RuleTable) -> Self {
        Self {
            inner: Arc::new(Models { segments, rules }),
        }
    }

    /// Loads both model artifacts from the configured model directory.
    ///
    /// Fails when either artifact is missing or unreadable so a misconfigured
    /// deployment dies at startup instead of serving empty tables.
    pub fn load(config: &Config) -> AppResult<Self> {
        let segments = store::read_segments(&config.segments_path())?;
        let rules = store::read_rules(&config.rules_path())?;
        tracing::info!(
            segments = segments.len(),
            rules = rules.len(),
            "Model artifacts loaded"
        );

        // Provenance only; a missing manifest is not an error.
        match store::read_manifest(&config.manifest_path()) {
            Ok(manifest) => tracing::info!(
                trained_at = %manifest.trained_at,
                rules = manifest.rule_count,
                min_support = manifest.min_support,
                min_lift = manifest.min_lift,
                "Rules model provenance"
            ),
            Err(_) => tracing::debug!("No training manifest found"),
        }

        Ok(Self::new(segments, rules))
    }

    pub fn segments(&self) -> &SegmentTable {
        &self.inner.segments
    }

    pub fn rules(&self) -> &RuleTable {
        &self.inner.rules
    }
}
