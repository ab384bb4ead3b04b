//! Sweeper scenarios against an in-memory status store.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Asia::Seoul;

use status_sweeper::store::StatusStore;
use status_sweeper::sweep::Sweeper;
use status_sweeper::types::errors::{StoreError, SweepError};
use status_sweeper::types::status::Status;

const TAG: &str = "deleteit";

/// In-memory platform: statuses keyed by numeric id, newest first, with a
/// recorded deletion order for ordering assertions.
#[derive(Default)]
struct MockStore {
    statuses: Arc<RwLock<Vec<Status>>>,
    deletions: Arc<RwLock<Vec<String>>>,
    fail_fetches: bool,
}

impl MockStore {
    fn new(statuses: Vec<Status>) -> Self {
        Self {
            statuses: Arc::new(RwLock::new(statuses)),
            deletions: Arc::default(),
            fail_fetches: false,
        }
    }

    fn deletions(&self) -> Vec<String> {
        self.deletions.read().unwrap().clone()
    }

    fn remaining_ids(&self) -> Vec<String> {
        self.statuses
            .read()
            .unwrap()
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }
}

impl Clone for MockStore {
    fn clone(&self) -> Self {
        Self {
            statuses: Arc::clone(&self.statuses),
            deletions: Arc::clone(&self.deletions),
            fail_fetches: self.fail_fetches,
        }
    }
}

#[async_trait]
impl StatusStore for MockStore {
    async fn tagged_statuses(
        &self,
        tag: &str,
        limit: u32,
        max_id: Option<&str>,
    ) -> Result<Vec<Status>, StoreError> {
        let marker = format!("#{tag}");
        let cutoff: Option<u64> = max_id.map(|id| id.parse().unwrap());
        let mut page: Vec<Status> = self
            .statuses
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.content.contains(&marker))
            .filter(|s| cutoff.is_none_or(|max| s.id.parse::<u64>().unwrap() < max))
            .cloned()
            .collect();
        page.sort_by_key(|s| std::cmp::Reverse(s.id.parse::<u64>().unwrap()));
        page.truncate(limit as usize);
        Ok(page)
    }

    async fn status(&self, id: &str) -> Result<Status, StoreError> {
        if self.fail_fetches {
            return Err(StoreError::Api {
                url: format!("/statuses/{id}"),
                status: 500,
                body: "boom".to_string(),
            });
        }
        self.statuses
            .read()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn delete_status(&self, id: &str) -> Result<(), StoreError> {
        // deleting an absent status is a success, like the real API told us
        // 404 and we swallowed it
        self.statuses.write().unwrap().retain(|s| s.id != id);
        self.deletions.write().unwrap().push(id.to_string());
        Ok(())
    }
}

fn status(id: &str, content: &str, created_at: DateTime<Utc>, reply_to: Option<&str>) -> Status {
    Status {
        id: id.to_string(),
        content: content.to_string(),
        created_at,
        edited_at: None,
        in_reply_to_id: reply_to.map(str::to_string),
    }
}

fn sweeper(store: MockStore) -> Sweeper<MockStore> {
    Sweeper::new(store, TAG, Seoul, 100)
}

#[tokio::test]
async fn expired_pure_tag_deletes_parent_then_itself() {
    let now = Utc::now();
    let two_hours_ago = now - Duration::hours(2);
    let store = MockStore::new(vec![
        status("1", "<p>an old hot take</p>", two_hours_ago, None),
        status("2", "<p>#deleteit 1h</p>", two_hours_ago, Some("1")),
    ]);

    let report = sweeper(store.clone()).run_once(now).await.unwrap();

    assert_eq!(report.deleted, 2);
    assert_eq!(store.deletions(), vec!["1".to_string(), "2".to_string()]);
    assert!(store.remaining_ids().is_empty());
}

#[tokio::test]
async fn future_deadline_is_skipped() {
    let now = Utc::now();
    let store = MockStore::new(vec![status("1", "<p>#deleteit 1h</p>", now, None)]);

    let report = sweeper(store.clone()).run_once(now).await.unwrap();

    assert_eq!(report.deleted, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(store.remaining_ids(), vec!["1".to_string()]);
}

#[tokio::test]
async fn missing_parent_is_not_an_error() {
    let now = Utc::now();
    let store = MockStore::new(vec![status(
        "2",
        "<p>#deleteit 1h</p>",
        now - Duration::hours(2),
        Some("404"),
    )]);

    let report = sweeper(store.clone()).run_once(now).await.unwrap();

    assert_eq!(report.deleted, 1);
    assert_eq!(store.deletions(), vec!["2".to_string()]);
}

#[tokio::test]
async fn non_pure_tag_leaves_the_parent_alone() {
    let now = Utc::now();
    let two_days_ago = now - Duration::days(2);
    let store = MockStore::new(vec![
        status("1", "<p>parent</p>", two_days_ago, None),
        // trailing prose: the command does not match, the fallback deadline
        // (one day) still expired, but this is no pure tag
        status(
            "2",
            "<p>#deleteit nuke the thread above</p>",
            two_days_ago,
            Some("1"),
        ),
    ]);

    sweeper(store.clone()).run_once(now).await.unwrap();

    assert_eq!(store.deletions(), vec!["2".to_string()]);
    assert_eq!(store.remaining_ids(), vec!["1".to_string()]);
}

#[tokio::test]
async fn rerun_after_everything_is_gone_is_a_no_op() {
    let now = Utc::now();
    let two_hours_ago = now - Duration::hours(2);
    let store = MockStore::new(vec![
        status("1", "<p>parent</p>", two_hours_ago, None),
        status("2", "<p>#deleteit 1h</p>", two_hours_ago, Some("1")),
    ]);
    let sweeper = sweeper(store.clone());

    let first = sweeper.run_once(now).await.unwrap();
    let second = sweeper.run_once(now).await.unwrap();

    assert_eq!(first.deleted, 2);
    assert_eq!(second.deleted, 0);
    assert_eq!(second.skipped, 0);
    assert_eq!(store.deletions().len(), 2);
}

#[tokio::test]
async fn pagination_drains_every_page() {
    let now = Utc::now();
    let two_days_ago = now - Duration::days(2);
    let statuses: Vec<Status> = (1..=5)
        .map(|n| status(&n.to_string(), "<p>#deleteit 1h</p>", two_days_ago, None))
        .collect();
    let store = MockStore::new(statuses);

    // page size 2 forces three listing round-trips
    let sweeper = Sweeper::new(store.clone(), TAG, Seoul, 2);
    let report = sweeper.run_once(now).await.unwrap();

    assert_eq!(report.deleted, 5);
    assert!(store.remaining_ids().is_empty());
}

#[tokio::test]
async fn parent_fetch_failure_aborts_the_run() {
    let now = Utc::now();
    let two_hours_ago = now - Duration::hours(2);
    let mut store = MockStore::new(vec![
        status("1", "<p>parent</p>", two_hours_ago, None),
        status("2", "<p>#deleteit 1h</p>", two_hours_ago, Some("1")),
    ]);
    store.fail_fetches = true;

    let err = sweeper(store.clone()).run_once(now).await.unwrap_err();

    assert!(matches!(err, SweepError::Fetch { ref id, .. } if id == "1"));
    // nothing was deleted before the failure surfaced
    assert!(store.deletions().is_empty());
}
