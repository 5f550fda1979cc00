//! Claim workflow engine: attempt → verify → approve/reject.
//!
//! Every state-changing event writes its durable notification before any
//! live push is attempted. Push failures are absorbed here; the stored
//! notification is the source of truth and the push is only a latency
//! optimization.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use reclaim_core::error::AppError;
use reclaim_core::events::PushEvent;
use reclaim_core::result::AppResult;
use reclaim_entity::item::Item;
use reclaim_entity::notification::{NewNotification, NotificationPayload, VerificationStatus};

use crate::context::RequestContext;
use crate::ports::{ItemStore, NotificationStore, PushChannel};

/// Notification title for inbound claim attempts.
const TITLE_CLAIM_ATTEMPT: &str = "New Claim Attempt";
/// Notification title for approved claims.
const TITLE_CLAIM_APPROVED: &str = "Claim Approved";
/// Notification title for declined claims.
const TITLE_CLAIM_DECLINED: &str = "Claim Declined";

/// Drives the claim lifecycle: verification attempts, poster decisions,
/// and the item's one-shot Open→Claimed transition.
#[derive(Debug, Clone)]
pub struct ClaimService {
    /// Item store.
    items: Arc<dyn ItemStore>,
    /// Notification store.
    notifications: Arc<dyn NotificationStore>,
    /// Live push channel.
    push: Arc<dyn PushChannel>,
}

impl ClaimService {
    /// Creates a new claim service.
    pub fn new(
        items: Arc<dyn ItemStore>,
        notifications: Arc<dyn NotificationStore>,
        push: Arc<dyn PushChannel>,
    ) -> Self {
        Self {
            items,
            notifications,
            push,
        }
    }

    /// Submits a verification attempt against an item.
    ///
    /// The match result is addressed to the poster only; the claimant
    /// receives a bare confirmation regardless of the outcome.
    pub async fn submit_attempt(
        &self,
        ctx: &RequestContext,
        item_id: i64,
        answer: &str,
    ) -> AppResult<()> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AppError::validation("Answer must not be empty"));
        }

        let item = self.find_item(item_id).await?;

        let status = if answers_match(answer, &item.verification_answer) {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Unverified
        };

        let payload = NotificationPayload::ClaimAttempt {
            title: TITLE_CLAIM_ATTEMPT.to_string(),
            item_title: item.title.clone(),
            item_id: item.id,
            claimant_id: ctx.user_id,
            verification_question: item.verification_question.clone(),
            claimant_answer: answer.to_string(),
            verification_status: status,
        };

        let persisted = self
            .notifications
            .insert(&NewNotification {
                recipient_id: item.poster_id,
                title: TITLE_CLAIM_ATTEMPT.to_string(),
                payload: payload.clone(),
                item_id: Some(item.id),
                claimant_id: Some(ctx.user_id),
            })
            .await?;

        debug!(
            item_id = item.id,
            claimant_id = %ctx.user_id,
            status = %status,
            "Claim attempt recorded"
        );

        match serde_json::to_value(&payload) {
            Ok(value) => {
                self.push
                    .deliver_to_user(
                        item.poster_id,
                        PushEvent::ReceiveDetailedNotification {
                            id: persisted.id,
                            title: persisted.title.clone(),
                            payload: value,
                            created_at: persisted.created_at,
                        },
                    )
                    .await;
            }
            Err(e) => {
                warn!(notification_id = persisted.id, error = %e, "Skipping live push");
            }
        }

        Ok(())
    }

    /// Approves a claim, transitioning the item Open→Claimed exactly once.
    ///
    /// Only the poster may approve; a second approval fails with a
    /// conflict and never produces a second claimant notification. Racing
    /// approvals are settled by the store's version check.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        item_id: i64,
        claimant_id: Uuid,
    ) -> AppResult<Item> {
        let item = self.find_item(item_id).await?;
        self.require_poster(ctx, &item)?;

        if item.is_claimed {
            return Err(AppError::conflict("Item already claimed"));
        }

        let updated = self
            .items
            .mark_claimed(item.id, claimant_id, Utc::now(), item.version)
            .await?;

        info!(
            item_id = item.id,
            claimant_id = %claimant_id,
            poster_id = %ctx.user_id,
            "Claim approved"
        );

        let payload = NotificationPayload::Plain {
            text: format!(
                "Your claim for \"{}\" has been approved! Contact {} to arrange the handover.",
                item.title, ctx.username
            ),
        };
        self.notify_claimant(&item, claimant_id, TITLE_CLAIM_APPROVED, payload)
            .await?;

        Ok(updated)
    }

    /// Rejects a claim. The item stays open for other claimants.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        item_id: i64,
        claimant_id: Uuid,
    ) -> AppResult<()> {
        let item = self.find_item(item_id).await?;
        self.require_poster(ctx, &item)?;

        info!(
            item_id = item.id,
            claimant_id = %claimant_id,
            "Claim declined"
        );

        let payload = NotificationPayload::Plain {
            text: format!("Your claim for \"{}\" has been declined.", item.title),
        };
        self.notify_claimant(&item, claimant_id, TITLE_CLAIM_DECLINED, payload)
            .await
    }

    /// Returns the item's verification question, if one is set.
    pub async fn verification_question(&self, item_id: i64) -> AppResult<Option<String>> {
        let item = self.find_item(item_id).await?;
        if item.verification_question.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(item.verification_question))
        }
    }

    async fn find_item(&self, item_id: i64) -> AppResult<Item> {
        self.items
            .find(item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found"))
    }

    fn require_poster(&self, ctx: &RequestContext, item: &Item) -> AppResult<()> {
        if item.poster_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the item's poster may decide a claim",
            ));
        }
        Ok(())
    }

    /// Persist a decision notification for the claimant, then push it.
    async fn notify_claimant(
        &self,
        item: &Item,
        claimant_id: Uuid,
        title: &str,
        payload: NotificationPayload,
    ) -> AppResult<()> {
        let persisted = self
            .notifications
            .insert(&NewNotification {
                recipient_id: claimant_id,
                title: title.to_string(),
                payload: payload.clone(),
                item_id: Some(item.id),
                claimant_id: Some(claimant_id),
            })
            .await?;

        self.push
            .deliver_to_user(
                claimant_id,
                PushEvent::ReceiveNotification {
                    id: persisted.id,
                    title: persisted.title.clone(),
                    message: payload.display_text(),
                    item_id: persisted.item_id,
                    claimant_id: persisted.claimant_id,
                    created_at: persisted.created_at,
                },
            )
            .await;

        Ok(())
    }
}

/// Case-insensitive, whitespace-trimmed answer comparison.
fn answers_match(submitted: &str, expected: &str) -> bool {
    submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate};
    use reclaim_core::error::ErrorKind;
    use reclaim_core::types::pagination::{PageRequest, PageResponse};
    use reclaim_entity::item::ItemType;
    use reclaim_entity::notification::Notification;

    use super::*;

    /// Shared call log: the push stub asserts ordering against it.
    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    #[derive(Debug)]
    struct MemoryItemStore {
        items: Mutex<HashMap<i64, Item>>,
    }

    impl MemoryItemStore {
        fn with(items: Vec<Item>) -> Arc<Self> {
            Arc::new(Self {
                items: Mutex::new(items.into_iter().map(|i| (i.id, i)).collect()),
            })
        }

        fn get(&self, id: i64) -> Item {
            self.items.lock().unwrap().get(&id).unwrap().clone()
        }
    }

    #[async_trait]
    impl ItemStore for MemoryItemStore {
        async fn find(&self, id: i64) -> AppResult<Option<Item>> {
            Ok(self.items.lock().unwrap().get(&id).cloned())
        }

        async fn mark_claimed(
            &self,
            id: i64,
            claimant_id: Uuid,
            claim_date: DateTime<Utc>,
            expected_version: i64,
        ) -> AppResult<Item> {
            let mut items = self.items.lock().unwrap();
            let item = items
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found("Item not found"))?;
            if item.version != expected_version || item.is_claimed {
                return Err(AppError::conflict("Item was claimed concurrently"));
            }
            item.is_claimed = true;
            item.claim_date = Some(claim_date);
            item.claimed_by = Some(claimant_id);
            item.version += 1;
            Ok(item.clone())
        }
    }

    #[derive(Debug)]
    struct MemoryNotificationStore {
        rows: Mutex<Vec<Notification>>,
        log: CallLog,
    }

    impl MemoryNotificationStore {
        fn new(log: CallLog) -> Arc<Self> {
            Arc::new(Self {
                rows: Mutex::new(Vec::new()),
                log,
            })
        }

        fn for_recipient(&self, recipient: Uuid) -> Vec<Notification> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.recipient_id == recipient)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl NotificationStore for MemoryNotificationStore {
        async fn insert(&self, notification: &NewNotification) -> AppResult<Notification> {
            let mut rows = self.rows.lock().unwrap();
            let row = Notification {
                id: rows.len() as i64 + 1,
                recipient_id: notification.recipient_id,
                title: notification.title.clone(),
                message: serde_json::to_string(&notification.payload).unwrap(),
                item_id: notification.item_id,
                claimant_id: notification.claimant_id,
                is_read: false,
                read_at: None,
                created_at: Utc::now(),
            };
            rows.push(row.clone());
            self.log.lock().unwrap().push("persist");
            Ok(row)
        }

        async fn find_by_recipient(
            &self,
            recipient_id: Uuid,
            _unread_only: bool,
            page: &PageRequest,
        ) -> AppResult<PageResponse<Notification>> {
            let rows = self.for_recipient(recipient_id);
            let total = rows.len() as u64;
            Ok(PageResponse::new(rows, page.page, page.page_size, total))
        }

        async fn count_unread(&self, recipient_id: Uuid) -> AppResult<i64> {
            Ok(self
                .for_recipient(recipient_id)
                .iter()
                .filter(|n| !n.is_read)
                .count() as i64)
        }

        async fn mark_read(&self, notification_id: i64, recipient_id: Uuid) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            match rows
                .iter_mut()
                .find(|n| n.id == notification_id && n.recipient_id == recipient_id)
            {
                Some(n) => {
                    n.is_read = true;
                    Ok(())
                }
                None => Err(AppError::not_found("Notification not found")),
            }
        }

        async fn clear_all(&self, recipient_id: Uuid) -> AppResult<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|n| n.recipient_id != recipient_id);
            Ok((before - rows.len()) as u64)
        }
    }

    #[derive(Debug)]
    struct StubPush {
        log: CallLog,
        delivered: Mutex<Vec<(Uuid, PushEvent)>>,
    }

    impl StubPush {
        fn new(log: CallLog) -> Arc<Self> {
            Arc::new(Self {
                log,
                delivered: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PushChannel for StubPush {
        async fn deliver_to_user(&self, user_id: Uuid, event: PushEvent) {
            self.log.lock().unwrap().push("push");
            self.delivered.lock().unwrap().push((user_id, event));
        }

        async fn broadcast(&self, _event: PushEvent) {
            self.log.lock().unwrap().push("broadcast");
        }
    }

    fn make_item(id: i64, poster_id: Uuid, answer: &str) -> Item {
        Item {
            id,
            poster_id,
            title: "Blue Backpack".to_string(),
            description: "Left near the library".to_string(),
            item_type: ItemType::Found,
            category_id: 1,
            brand: "".to_string(),
            color: "blue".to_string(),
            location: "Library".to_string(),
            date_reported: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            photo_path: None,
            verification_question: "What brand is the bike?".to_string(),
            verification_answer: answer.to_string(),
            is_claimed: false,
            claim_date: None,
            claimed_by: None,
            version: 1,
            created_at: Utc::now(),
        }
    }

    struct Harness {
        service: ClaimService,
        items: Arc<MemoryItemStore>,
        notifications: Arc<MemoryNotificationStore>,
        push: Arc<StubPush>,
        log: CallLog,
    }

    fn harness(items: Vec<Item>) -> Harness {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let item_store = MemoryItemStore::with(items);
        let notification_store = MemoryNotificationStore::new(Arc::clone(&log));
        let push = StubPush::new(Arc::clone(&log));
        let service = ClaimService::new(
            item_store.clone(),
            notification_store.clone(),
            push.clone(),
        );
        Harness {
            service,
            items: item_store,
            notifications: notification_store,
            push,
            log,
        }
    }

    fn ctx(user_id: Uuid) -> RequestContext {
        RequestContext::new(user_id, "tester".to_string())
    }

    #[tokio::test]
    async fn test_attempt_persists_before_push() {
        let poster = Uuid::new_v4();
        let claimant = Uuid::new_v4();
        let h = harness(vec![make_item(42, poster, "Honda")]);

        h.service
            .submit_attempt(&ctx(claimant), 42, "honda")
            .await
            .unwrap();

        assert_eq!(*h.log.lock().unwrap(), vec!["persist", "push"]);
    }

    #[tokio::test]
    async fn test_attempt_match_is_trimmed_and_case_insensitive() {
        let poster = Uuid::new_v4();
        let claimant = Uuid::new_v4();
        let h = harness(vec![make_item(42, poster, "Honda")]);

        h.service
            .submit_attempt(&ctx(claimant), 42, " honda ")
            .await
            .unwrap();

        let for_poster = h.notifications.for_recipient(poster);
        assert_eq!(for_poster.len(), 1);
        match for_poster[0].payload().unwrap() {
            NotificationPayload::ClaimAttempt {
                verification_status,
                claimant_answer,
                ..
            } => {
                assert_eq!(verification_status, VerificationStatus::Verified);
                assert_eq!(claimant_answer, "honda");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_attempt_mismatch_is_unverified_but_still_succeeds() {
        let poster = Uuid::new_v4();
        let claimant = Uuid::new_v4();
        let h = harness(vec![make_item(42, poster, "Honda")]);

        // The claimant sees plain success either way.
        h.service
            .submit_attempt(&ctx(claimant), 42, "Toyota")
            .await
            .unwrap();

        let for_poster = h.notifications.for_recipient(poster);
        match for_poster[0].payload().unwrap() {
            NotificationPayload::ClaimAttempt {
                verification_status,
                ..
            } => assert_eq!(verification_status, VerificationStatus::Unverified),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_attempt_on_missing_item_is_not_found() {
        let h = harness(vec![]);
        let err = h
            .service
            .submit_attempt(&ctx(Uuid::new_v4()), 99, "anything")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_attempt_with_empty_answer_is_rejected() {
        let poster = Uuid::new_v4();
        let h = harness(vec![make_item(42, poster, "Honda")]);
        let err = h
            .service
            .submit_attempt(&ctx(Uuid::new_v4()), 42, "   ")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        // Nothing was persisted or pushed.
        assert!(h.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_approve_transitions_once() {
        let poster = Uuid::new_v4();
        let claimant = Uuid::new_v4();
        let h = harness(vec![make_item(42, poster, "Honda")]);

        let updated = h.service.approve(&ctx(poster), 42, claimant).await.unwrap();
        assert!(updated.is_claimed);
        assert!(updated.claim_date.is_some());
        assert_eq!(updated.claimed_by, Some(claimant));

        // Second approval is a conflict and produces no second
        // notification for the claimant.
        let err = h
            .service
            .approve(&ctx(poster), 42, claimant)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(h.notifications.for_recipient(claimant).len(), 1);
    }

    #[tokio::test]
    async fn test_approve_notifies_claimant() {
        let poster = Uuid::new_v4();
        let claimant = Uuid::new_v4();
        let h = harness(vec![make_item(42, poster, "Honda")]);

        h.service.approve(&ctx(poster), 42, claimant).await.unwrap();

        let for_claimant = h.notifications.for_recipient(claimant);
        assert_eq!(for_claimant.len(), 1);
        assert_eq!(for_claimant[0].title, "Claim Approved");

        let delivered = h.push.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0, claimant);
    }

    #[tokio::test]
    async fn test_approve_requires_poster() {
        let poster = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let h = harness(vec![make_item(42, poster, "Honda")]);

        let err = h
            .service
            .approve(&ctx(intruder), 42, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert!(!h.items.get(42).is_claimed);
    }

    #[tokio::test]
    async fn test_reject_keeps_item_open() {
        let poster = Uuid::new_v4();
        let claimant = Uuid::new_v4();
        let h = harness(vec![make_item(42, poster, "Honda")]);

        h.service.reject(&ctx(poster), 42, claimant).await.unwrap();

        let item = h.items.get(42);
        assert!(!item.is_claimed);
        assert!(item.claim_date.is_none());

        let for_claimant = h.notifications.for_recipient(claimant);
        assert_eq!(for_claimant.len(), 1);
        assert_eq!(for_claimant[0].title, "Claim Declined");
    }

    #[tokio::test]
    async fn test_verification_question() {
        let poster = Uuid::new_v4();
        let mut unset = make_item(43, poster, "Honda");
        unset.verification_question = "".to_string();
        let h = harness(vec![make_item(42, poster, "Honda"), unset]);

        assert_eq!(
            h.service.verification_question(42).await.unwrap().as_deref(),
            Some("What brand is the bike?")
        );
        assert_eq!(h.service.verification_question(43).await.unwrap(), None);
    }

    #[test]
    fn test_answers_match() {
        assert!(answers_match(" honda ", "Honda"));
        assert!(answers_match("HONDA", "honda"));
        assert!(!answers_match("Toyota", "Honda"));
    }
}
