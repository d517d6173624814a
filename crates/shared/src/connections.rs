use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::ids::iso_timestamp;
use crate::models::{PeerConnection, PeerStatus, SendToPeerRequest, SendToPeerResponse};

pub const PEERS: [&str; 6] = [
    "genspark",
    "perplexity",
    "claude",
    "gemini",
    "character_ai",
    "manus",
];

pub const PEER_DELIVERY_MESSAGE: &str = "Message sent to AI team member";

pub fn peer_statuses(now: DateTime<Utc>) -> BTreeMap<String, PeerConnection> {
    let last_activity = iso_timestamp(now);
    PEERS
        .iter()
        .map(|peer| {
            (
                (*peer).to_string(),
                PeerConnection {
                    status: PeerStatus::Online,
                    last_activity: last_activity.clone(),
                },
            )
        })
        .collect()
}

/// Acknowledges a message for a peer. Nothing is delivered anywhere.
pub fn send_to_peer(request: &SendToPeerRequest, now: DateTime<Utc>) -> SendToPeerResponse {
    SendToPeerResponse {
        success: true,
        peer_uri: request.peer_uri.clone(),
        message: PEER_DELIVERY_MESSAGE.to_string(),
        timestamp: iso_timestamp(now),
    }
}
