//! System status DTO.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Response of `GET /system/status`.
#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub machine: String,
    pub unified_memory_gb: f64,
    pub reserve_gb: f64,
    /// Model workers by name. Always empty until workers exist.
    pub workers: BTreeMap<String, Value>,
}
