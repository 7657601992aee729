pub mod client;
pub mod extract;

use serde_json::Value;
use thiserror::Error;

use crate::core::draft::{DraftError, NotificationDraft};
use crate::core::view::NotificationView;
use client::NotifyClient;

/// Counts from one reconciliation cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Rows newly appended to the view.
    pub inserted: usize,
    /// Existing rows whose status was rewritten.
    pub updated: usize,
    /// Records discarded for want of a usable id.
    pub skipped: usize,
}

/// What a create submission that reached the server came back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The server reported an id; the row was inserted optimistically.
    Created { id: String, status: String },
    /// The server answered but reported no usable id.
    Rejected(String),
}

/// What a cancel request that reached the server came back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Canceled,
    Rejected(String),
}

/// Failures that stop a create submission before an outcome exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CreateError {
    /// Local precondition failure; no network call was made.
    #[error("{0}")]
    Invalid(#[from] DraftError),
    #[error("network error: {0}")]
    Network(String),
}

/// Merge one collection payload into the view: normalize the wrapper shape,
/// then upsert each record with a usable id, in source order. Later records
/// for the same id win within a batch.
pub fn apply_records(view: &mut NotificationView, payload: &Value) -> ReconcileStats {
    let mut stats = ReconcileStats::default();
    for record in extract::records(payload) {
        let Some(id) = extract::id(record) else {
            stats.skipped += 1;
            continue;
        };
        if view.upsert(&id, &extract::status(record)) {
            stats.inserted += 1;
        } else {
            stats.updated += 1;
        }
    }
    stats
}

/// One full pull-and-merge cycle. A transport failure is logged and leaves
/// the view untouched — the refresh is a background action, not something
/// the user asked for.
pub async fn reconcile(client: &NotifyClient, view: &mut NotificationView) -> ReconcileStats {
    match client.list().await {
        Ok(payload) => {
            let stats = apply_records(view, &payload);
            log::info!(
                "Reconciled {} rows: {} inserted, {} updated, {} skipped",
                view.len(),
                stats.inserted,
                stats.updated,
                stats.skipped
            );
            stats
        }
        Err(e) => {
            log::warn!("Failed to load notifications: {}", e);
            ReconcileStats::default()
        }
    }
}

/// Fold a create response into the view. With a recognizable id the row is
/// inserted optimistically, without waiting for the next reconciliation
/// cycle (which will then update it in place rather than duplicate it).
pub fn apply_create_response(view: &mut NotificationView, response: &Value) -> CreateOutcome {
    match extract::created_id(response) {
        Some(id) => {
            let status = extract::created_status(response);
            view.upsert(&id, &status);
            log::info!("Created notification {} ({})", id, status);
            CreateOutcome::Created { id, status }
        }
        None => CreateOutcome::Rejected(extract::error_message(response)),
    }
}

/// Submit a draft. Validation runs first, so a precondition failure aborts
/// before any network call; a transport failure leaves the view untouched.
pub async fn create(
    client: &NotifyClient,
    view: &mut NotificationView,
    draft: &NotificationDraft,
) -> Result<CreateOutcome, CreateError> {
    draft.validate()?;
    let response = client
        .create(&draft.to_payload())
        .await
        .map_err(CreateError::Network)?;
    Ok(apply_create_response(view, &response))
}

/// Fold a cancel response into the view. On a truthy success indicator only
/// the target row flips to canceled, via the narrow direct mutation — the
/// row is known to exist because the action originated from it. Anything
/// else leaves the view untouched and surfaces the server's message.
pub fn apply_cancel_response(
    view: &mut NotificationView,
    id: &str,
    response: &Value,
) -> CancelOutcome {
    if extract::success_flag(response) {
        view.mark_canceled(id);
        log::info!("Canceled notification {}", id);
        CancelOutcome::Canceled
    } else {
        CancelOutcome::Rejected(extract::error_message(response))
    }
}

/// Request cancellation of one notification. A transport failure is the
/// error; an application-level refusal is a `Rejected` outcome.
pub async fn cancel(
    client: &NotifyClient,
    view: &mut NotificationView,
    id: &str,
) -> Result<CancelOutcome, String> {
    let response = client.cancel(id).await?;
    Ok(apply_cancel_response(view, id, &response))
}

/// Fetch one notification's status (`GET ?id=`), unwrapping the `result`
/// envelope the backend responds with.
pub async fn query_status(client: &NotifyClient, id: &str) -> Result<String, String> {
    let response = client.status(id).await?;
    match extract::result_text(&response) {
        Some(status) => Ok(status),
        None => Err(extract::error_message(&response)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_collection_produces_rows() {
        let mut view = NotificationView::new();
        let stats = apply_records(&mut view, &json!({"notifications": [{"id": 1, "status": "created"}]}));

        assert_eq!(stats, ReconcileStats { inserted: 1, updated: 0, skipped: 0 });
        let row = view.get("1").unwrap();
        assert_eq!(row.status, "created");
        assert!(!row.action_disabled);
        assert!(view.is_visible());
    }

    #[test]
    fn subsequent_pull_updates_in_place() {
        let mut view = NotificationView::new();
        apply_records(&mut view, &json!([{"id": 1, "status": "created"}]));
        let stats = apply_records(&mut view, &json!([{"id": 1, "status": "canceled"}]));

        assert_eq!(stats, ReconcileStats { inserted: 0, updated: 1, skipped: 0 });
        assert_eq!(view.len(), 1);
        let row = view.get("1").unwrap();
        assert_eq!(row.status, "canceled");
        assert!(row.action_disabled);
    }

    #[test]
    fn casing_variants_merge_into_one_row() {
        let mut view = NotificationView::new();
        apply_records(&mut view, &json!([{"ID": 7, "Status": "sent"}]));
        apply_records(&mut view, &json!([{"id": 7, "status": "sent"}]));

        assert_eq!(view.len(), 1);
        assert_eq!(view.get("7").unwrap().status, "sent");
    }

    #[test]
    fn later_records_win_within_a_batch() {
        let mut view = NotificationView::new();
        let stats = apply_records(
            &mut view,
            &json!([{"id": 5, "status": "pending"}, {"ID": 5, "Status": "sent"}]),
        );

        assert_eq!(stats, ReconcileStats { inserted: 1, updated: 1, skipped: 0 });
        assert_eq!(view.len(), 1);
        assert_eq!(view.get("5").unwrap().status, "sent");
    }

    #[test]
    fn idless_records_are_skipped_not_fatal() {
        let mut view = NotificationView::new();
        let stats = apply_records(
            &mut view,
            &json!([{"status": "sent"}, {"id": 2, "status": "pending"}, null]),
        );

        assert_eq!(stats, ReconcileStats { inserted: 1, updated: 0, skipped: 2 });
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn unrecognized_payload_leaves_existing_rows_alone() {
        let mut view = NotificationView::new();
        view.upsert("1", "pending");
        let before = view.rows().to_vec();

        let stats = apply_records(&mut view, &json!({"foo": [{"id": 9}]}));
        assert_eq!(stats, ReconcileStats::default());
        assert_eq!(view.rows(), before.as_slice());
    }

    #[test]
    fn missing_status_yields_unknown_row() {
        let mut view = NotificationView::new();
        apply_records(&mut view, &json!([{"id": 3}]));
        assert_eq!(view.get("3").unwrap().status, "unknown");
    }

    #[test]
    fn create_response_inserts_optimistically() {
        let mut view = NotificationView::new();
        let outcome = apply_create_response(&mut view, &json!({"result": "abc-1"}));

        assert_eq!(
            outcome,
            CreateOutcome::Created { id: "abc-1".into(), status: "created".into() }
        );
        assert_eq!(view.get("abc-1").unwrap().status, "created");
    }

    #[test]
    fn create_response_nested_wrapper_is_accepted() {
        let mut view = NotificationView::new();
        let outcome =
            apply_create_response(&mut view, &json!({"created": {"ID": 9}, "status": "pending"}));

        assert_eq!(
            outcome,
            CreateOutcome::Created { id: "9".into(), status: "pending".into() }
        );
    }

    #[test]
    fn create_rejection_mutates_nothing() {
        let mut view = NotificationView::new();
        let outcome = apply_create_response(&mut view, &json!({"error": "unsupported channel"}));

        assert_eq!(outcome, CreateOutcome::Rejected("unsupported channel".into()));
        assert!(view.is_empty());

        let outcome = apply_create_response(&mut view, &json!("boom"));
        assert_eq!(outcome, CreateOutcome::Rejected("boom".into()));
        assert!(view.is_empty());
    }

    #[test]
    fn cancel_success_disables_only_that_row() {
        let mut view = NotificationView::new();
        view.upsert("5", "pending");
        view.upsert("6", "pending");

        let outcome = apply_cancel_response(&mut view, "5", &json!({"result": true}));
        assert_eq!(outcome, CancelOutcome::Canceled);

        let canceled = view.get("5").unwrap();
        assert_eq!(canceled.status, "canceled");
        assert!(canceled.action_disabled);
        assert_eq!(view.get("6").unwrap().status, "pending");
    }

    #[test]
    fn cancel_rejection_leaves_the_row_unchanged() {
        let mut view = NotificationView::new();
        view.upsert("5", "sent");

        let outcome =
            apply_cancel_response(&mut view, "5", &json!({"result": false, "error": "already sent"}));
        assert_eq!(outcome, CancelOutcome::Rejected("already sent".into()));

        let row = view.get("5").unwrap();
        assert_eq!(row.status, "sent");
        assert!(!row.action_disabled);
    }

    #[test]
    fn cancel_without_indicator_is_a_rejection() {
        let mut view = NotificationView::new();
        view.upsert("5", "pending");

        let outcome = apply_cancel_response(&mut view, "5", &json!({}));
        assert_eq!(outcome, CancelOutcome::Rejected("unknown error".into()));
        assert_eq!(view.get("5").unwrap().status, "pending");
    }

    #[test]
    fn create_error_messages_read_like_user_text() {
        let err = CreateError::Invalid(DraftError::MissingRecipients);
        assert_eq!(err.to_string(), "email address is required");
        let err = CreateError::Network("POST failed: timed out".into());
        assert_eq!(err.to_string(), "network error: POST failed: timed out");
    }
}
