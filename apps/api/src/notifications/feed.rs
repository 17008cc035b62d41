use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notifications::synthesizer::{NotificationCandidate, NotificationType};

/// The feed never carries more than this many items.
pub const FEED_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    pub id: String,
    pub title: String,
    pub message: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl NotificationItem {
    fn from_candidate(candidate: NotificationCandidate, read: bool) -> Self {
        Self {
            id: candidate.id,
            title: candidate.title,
            message: candidate.message,
            time: candidate.time,
            kind: candidate.kind,
            read,
            created_at: candidate.created_at,
        }
    }
}

/// Overlays read flags, orders by urgency then `created_at` descending, and caps the feed.
///
/// The sort is stable, and every candidate from one request shares the same
/// `created_at`, so items of equal urgency keep their generation order.
pub fn assemble_feed(
    candidates: Vec<NotificationCandidate>,
    read_ids: &HashSet<String>,
) -> Vec<NotificationItem> {
    let mut items: Vec<NotificationItem> = candidates
        .into_iter()
        .map(|c| {
            let read = read_ids.contains(&c.id);
            NotificationItem::from_candidate(c, read)
        })
        .collect();

    items.sort_by(|a, b| {
        a.kind
            .rank()
            .cmp(&b.kind.rank())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    items.truncate(FEED_LIMIT);
    items
}
