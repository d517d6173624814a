//! Placeholder conversation memory served over HTTP. Nothing is persisted:
//! reads return one synthetic record and writes are acknowledged only.

use chrono::{DateTime, Utc};

use crate::ids::iso_timestamp;
use crate::models::{MemoryQuery, ServerMemoryRecord, StoreMemoryRequest, StoredMemory};

pub const DEFAULT_MEMORY_TYPE: &str = "short_term";

const SAMPLE_CONTEXT_TYPE: &str = "conversation";
const SAMPLE_CONTENT: &str = "Previous conversation about AI capabilities";
const SAMPLE_IMPORTANCE: f64 = 0.8;

pub fn recall(query: &MemoryQuery, now: DateTime<Utc>) -> Vec<ServerMemoryRecord> {
    let memory_type = query
        .memory_type
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_MEMORY_TYPE);

    vec![ServerMemoryRecord {
        id: 1,
        session_id: query.session_id.clone(),
        context_type: SAMPLE_CONTEXT_TYPE.to_string(),
        memory_type: memory_type.to_string(),
        content: SAMPLE_CONTENT.to_string(),
        timestamp: iso_timestamp(now),
        importance_score: SAMPLE_IMPORTANCE,
    }]
}

pub fn store(request: StoreMemoryRequest, now: DateTime<Utc>) -> StoredMemory {
    StoredMemory {
        id: now.timestamp_millis(),
        session_id: request.session_id,
        context_type: request.context_type,
        content: request.content,
        metadata: request.metadata,
        timestamp: iso_timestamp(now),
        stored: true,
    }
}
