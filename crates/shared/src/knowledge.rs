use chrono::{DateTime, Utc};

use crate::ids::iso_timestamp;
use crate::models::{KnowledgeEntry, KnowledgeQuery};

pub const DEFAULT_PAGE_LIMIT: usize = 50;

struct SeedEntry {
    id: u32,
    category: &'static str,
    title: &'static str,
    content: &'static str,
    confidence_score: f64,
    tags: &'static [&'static str],
}

const SEED_ENTRIES: &[SeedEntry] = &[
    SeedEntry {
        id: 1,
        category: "business_development",
        title: "Strategic Planning Fundamentals",
        content: "Core principles of business strategy and planning...",
        confidence_score: 0.95,
        tags: &["strategy", "planning", "business"],
    },
    SeedEntry {
        id: 2,
        category: "islam",
        title: "Islamic Business Ethics",
        content: "Principles of ethical business conduct in Islam...",
        confidence_score: 0.92,
        tags: &["ethics", "islam", "business"],
    },
    SeedEntry {
        id: 3,
        category: "medicine",
        title: "The Canon of Medicine",
        content: "Ibn Sina's systematic approach to diagnosis, hygiene and the six essential factors of health...",
        confidence_score: 0.9,
        tags: &["history", "medicine", "diagnosis"],
    },
    SeedEntry {
        id: 4,
        category: "medicine",
        title: "Telemedicine Follow-up Checklist",
        content: "Confirm identity, review vitals shared by the patient, reconcile medications and agree on next contact...",
        confidence_score: 0.88,
        tags: &["telemedicine", "follow-up", "medicine"],
    },
];

/// Filters the built-in knowledge entries. `total` in the response is the
/// filtered count before `offset`/`limit` paging.
pub fn search(query: &KnowledgeQuery, now: DateTime<Utc>) -> (Vec<KnowledgeEntry>, usize) {
    let category = non_empty(query.category.as_deref());
    let search = non_empty(query.search.as_deref()).map(str::to_lowercase);
    let tags: Vec<&str> = non_empty(query.tags.as_deref())
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let matching: Vec<&SeedEntry> = SEED_ENTRIES
        .iter()
        .filter(|entry| category.is_none_or(|category| entry.category == category))
        .filter(|entry| {
            search.as_deref().is_none_or(|needle| {
                entry.title.to_lowercase().contains(needle)
                    || entry.content.to_lowercase().contains(needle)
            })
        })
        .filter(|entry| tags.iter().all(|tag| entry.tags.contains(tag)))
        .collect();

    let total = matching.len();
    let created_at = iso_timestamp(now);
    let entries = matching
        .into_iter()
        .skip(query.offset.unwrap_or(0))
        .take(query.limit.unwrap_or(DEFAULT_PAGE_LIMIT))
        .map(|entry| KnowledgeEntry {
            id: entry.id,
            category: entry.category.to_string(),
            title: entry.title.to_string(),
            content: entry.content.to_string(),
            confidence_score: entry.confidence_score,
            tags: entry.tags.iter().map(ToString::to_string).collect(),
            created_at: created_at.clone(),
        })
        .collect();

    (entries, total)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
