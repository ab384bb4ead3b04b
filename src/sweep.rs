use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::core::grammar::CommandGrammar;
use crate::parse;
use crate::store::StatusStore;
use crate::types::command::ParsedCommand;
use crate::types::errors::{StoreError, SweepError};
use crate::types::status::Status;

/// Outcome counters for one sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Statuses deleted, reply parents included.
    pub deleted: usize,
    /// Statuses whose deadline has not passed yet.
    pub skipped: usize,
}

/// Pages through the account's tagged statuses and deletes the expired ones.
///
/// The sweeper holds no state between runs: every run re-derives all
/// decisions from current status content and the current time, so re-running
/// after a crash needs no replay bookkeeping.
pub struct Sweeper<S> {
    store: S,
    grammar: CommandGrammar,
    tag: String,
    timezone: Tz,
    page_size: u32,
}

impl<S: StatusStore> Sweeper<S> {
    pub fn new(store: S, tag: &str, timezone: Tz, page_size: u32) -> Self {
        Self {
            store,
            grammar: CommandGrammar::new(tag),
            tag: tag.to_string(),
            timezone,
            page_size,
        }
    }

    /// One full pass, page by page, statuses strictly in page order.
    ///
    /// An expired pure tag deletes its reply parent first, then itself; a
    /// parent that is already gone is absorbed silently. Any other store
    /// failure aborts the run — a partially processed page is safe to
    /// reprocess on the next tick.
    pub async fn run_once(&self, now_utc: DateTime<Utc>) -> Result<SweepReport, SweepError> {
        let mut report = SweepReport::default();
        let mut max_id: Option<String> = None;

        loop {
            let page: Vec<Status> = self
                .store
                .tagged_statuses(&self.tag, self.page_size, max_id.as_deref())
                .await
                .map_err(SweepError::List)?;
            let Some(last) = page.last() else {
                break;
            };
            max_id = Some(last.id.clone());

            for status in &page {
                let reference = status.reference_time(self.timezone);
                let command: ParsedCommand = parse::parse(&self.grammar, &status.content, reference);

                if now_utc < command.delete_at {
                    debug!(id = %status.id, delete_at = %command.delete_at, "Skip");
                    report.skipped += 1;
                    continue;
                }

                if command.is_tagging_reply
                    && let Some(parent_id) = &status.in_reply_to_id
                {
                    if self.delete_parent(parent_id).await? {
                        report.deleted += 1;
                    }
                }

                info!(id = %status.id, delete_at = %command.delete_at, "Delete");
                self.store
                    .delete_status(&status.id)
                    .await
                    .map_err(|source| SweepError::Delete {
                        id: status.id.clone(),
                        source,
                    })?;
                report.deleted += 1;
            }
            debug!("Fetch next page");
        }

        Ok(report)
    }

    // Resolve first so the log carries the parent's identity; true means the
    // parent existed and got deleted.
    async fn delete_parent(&self, parent_id: &str) -> Result<bool, SweepError> {
        match self.store.status(parent_id).await {
            Ok(parent) => {
                info!(id = %parent.id, "Delete reply parent");
                self.store
                    .delete_status(&parent.id)
                    .await
                    .map_err(|source| SweepError::Delete {
                        id: parent.id.clone(),
                        source,
                    })?;
                Ok(true)
            }
            Err(StoreError::NotFound { .. }) => {
                debug!(id = %parent_id, "Reply parent already gone");
                Ok(false)
            }
            Err(source) => Err(SweepError::Fetch {
                id: parent_id.to_string(),
                source,
            }),
        }
    }
}
