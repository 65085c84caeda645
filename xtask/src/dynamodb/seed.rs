//! Seed command implementation.

use discord_relay_core::message::{NewMessage, RelayToken};
use discord_relay_core::storage::{MessageRepository, Result};

const AUTHORS: [(&str, &str); 4] = [
    ("210000000000000001", "alice"),
    ("210000000000000002", "bob"),
    ("210000000000000003", "carol"),
    ("210000000000000004", "dave"),
];

const RELAY_AUTHOR: (&str, &str) = ("900000000000000001", "relay-bot");

const CHANNELS: [&str; 3] = [
    "310000000000000001",
    "310000000000000002",
    "310000000000000003",
];

const EVENTS: [&str; 5] = ["join", "leave", "ban", "reaction_add", "thread_create"];

/// Milliseconds between consecutive demo messages.
const SPACING_MS: i64 = 45_000;

/// Generate a deterministic mix of demo messages.
///
/// Every fifth message is an event; the rest alternate between incoming chat
/// traffic and outgoing relay replies. Timestamps start at `start_ms` and
/// increase monotonically.
pub fn generate_seed_messages(start_ms: i64, count: u32) -> Vec<NewMessage> {
    (0..count as usize)
        .map(|i| {
            let timestamp = start_ms + i as i64 * SPACING_MS;
            let (author_id, username) = AUTHORS[i % AUTHORS.len()];
            let channel = CHANNELS[i % CHANNELS.len()];

            match i % 5 {
                4 => {
                    let event = NewMessage::event(
                        author_id,
                        username,
                        timestamp,
                        EVENTS[(i / 5) % EVENTS.len()],
                    );
                    if (i / 5) % 2 == 0 {
                        event
                    } else {
                        event.with_channel(channel)
                    }
                }
                1 | 3 => {
                    NewMessage::outgoing(RELAY_AUTHOR.0, RELAY_AUTHOR.1, timestamp, channel)
                }
                _ => NewMessage::incoming(author_id, username, timestamp, channel),
            }
        })
        .collect()
}

/// Persist each message through the repository, one write per message.
///
/// Stops at the first failure. Returns the number of messages written.
pub async fn seed_messages<R>(
    repository: &R,
    token: &RelayToken,
    messages: &[NewMessage],
) -> Result<u32>
where
    R: MessageRepository + ?Sized,
{
    let mut written = 0;
    for message in messages {
        repository.persist_message(token, message).await?;
        written += 1;
    }
    Ok(written)
}
