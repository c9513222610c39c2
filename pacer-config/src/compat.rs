//! Compatibility layer for flat upper-case JSON stats configuration files
//!
//! Older benchmark deployments ship a `locust_stats_config.json` whose keys are
//! upper-case globals (`SPAWN_RATE`, `REQUEST_RATE_PER_USER`, `RANDOM_SEED`, ...).
//! Only the keys that map onto a pacer domain are read; statistics interval keys
//! are accepted and ignored.

use crate::domains::PacerConfig;
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Keys that mark a JSON document as the legacy flat format
const LEGACY_MARKER_KEYS: &[&str] = &[
    "SPAWN_RATE",
    "REQUEST_RATE_PER_USER",
    "RANDOM_SEED",
    "CONSOLE_STATS_INTERVAL_SEC",
    "HISTORY_STATS_INTERVAL_SEC",
    "CSV_STATS_INTERVAL_SEC",
    "CSV_STATS_FLUSH_INTERVAL_SEC",
    "CURRENT_RESPONSE_TIME_PERCENTILE_WINDOW",
    "PERCENTILES_TO_REPORT",
];

/// Flat legacy configuration document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyStatsConfig {
    #[serde(rename = "SPAWN_RATE")]
    pub spawn_rate: Option<f64>,

    #[serde(rename = "REQUEST_RATE_PER_USER")]
    pub request_rate_per_user: Option<f64>,

    #[serde(rename = "RANDOM_SEED")]
    pub random_seed: Option<u64>,
}

/// Whether a parsed JSON document uses the legacy flat key layout
pub fn is_legacy_document(value: &JsonValue) -> bool {
    value
        .as_object()
        .map(|map| LEGACY_MARKER_KEYS.iter().any(|key| map.contains_key(*key)))
        .unwrap_or(false)
}

/// Convert a legacy document into a pacer configuration on top of the defaults
pub fn from_legacy_config(legacy: &LegacyStatsConfig) -> PacerConfig {
    let mut config = PacerConfig::default();

    if let Some(spawn_rate) = legacy.spawn_rate {
        config.shape.spawn_rate = spawn_rate;
    }

    if let Some(rate) = legacy.request_rate_per_user {
        config.pacing.request_rate_per_user = rate;
    }

    config.pacing.random_seed = legacy.random_seed;
    config
}
