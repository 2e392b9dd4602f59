use poise::serenity_prelude as serenity;
use tokio::time::{Duration, sleep};
use tracing::{debug, error};

use crate::time::now_unix_secs;

const BULK_DELETE_MAX_AGE_SECS: u64 = 14 * 24 * 60 * 60;
const BULK_DELETE_SAFETY_BUFFER_SECS: u64 = 60 * 60;
const HISTORY_PAGE_SIZE: u64 = 100;
const HISTORY_PAGE_DELAY_MS: u64 = 1100;

/// Delete up to `limit` of the most recent messages in a channel.
///
/// Messages young enough for Discord's bulk endpoint go out in batches of at
/// most 100; older ones are deleted one by one. Returns how many were removed.
pub async fn purge_recent_messages(
    http: &serenity::Http,
    channel_id: serenity::ChannelId,
    limit: u64,
) -> anyhow::Result<u64> {
    let bulk_delete_cutoff = now_unix_secs()
        .saturating_sub(BULK_DELETE_MAX_AGE_SECS.saturating_sub(BULK_DELETE_SAFETY_BUFFER_SECS))
        as i64;

    let mut remaining = limit;
    let mut deleted_count = 0_u64;
    let mut before: Option<serenity::MessageId> = None;

    while remaining > 0 {
        let page_size = remaining.min(HISTORY_PAGE_SIZE) as u8;
        let get_messages = match before {
            Some(before_id) => serenity::GetMessages::new().before(before_id).limit(page_size),
            None => serenity::GetMessages::new().limit(page_size),
        };

        let messages = channel_id.messages(http, get_messages).await?;
        if messages.is_empty() {
            break;
        }

        let exhausted = (messages.len() as u64) < u64::from(page_size);
        remaining = remaining.saturating_sub(messages.len() as u64);
        before = messages.last().map(|message| message.id);

        let (bulk_ids, mut single_ids): (Vec<_>, Vec<_>) = messages
            .iter()
            .partition(|message| message.timestamp.unix_timestamp() >= bulk_delete_cutoff);
        let bulk_ids: Vec<serenity::MessageId> = bulk_ids.into_iter().map(|m| m.id).collect();

        if bulk_ids.len() >= 2 {
            match channel_id.delete_messages(http, bulk_ids.clone()).await {
                Ok(()) => {
                    deleted_count = deleted_count.saturating_add(bulk_ids.len() as u64);
                }
                Err(source) => {
                    error!(
                        ?source,
                        channel_id = channel_id.get(),
                        count = bulk_ids.len(),
                        "bulk delete failed, falling back to single delete"
                    );
                    single_ids.extend(messages.iter().filter(|m| bulk_ids.contains(&m.id)));
                }
            }
        } else if let Some(id) = bulk_ids.first() {
            channel_id.delete_message(http, *id).await?;
            deleted_count = deleted_count.saturating_add(1);
        }

        for message in single_ids {
            if channel_id.delete_message(http, message.id).await.is_ok() {
                deleted_count = deleted_count.saturating_add(1);
            }
        }

        if exhausted {
            break;
        }

        if remaining > 0 {
            debug!(channel_id = channel_id.get(), remaining, "paging further back in history");
            sleep(Duration::from_millis(HISTORY_PAGE_DELAY_MS)).await;
        }
    }

    Ok(deleted_count)
}
