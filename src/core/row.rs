/// Status that disables a row's cancel affordance. Every other status is
/// carried as opaque text — the backend owns the status vocabulary.
pub const STATUS_CANCELED: &str = "canceled";

/// Default status assumed for a just-created notification until the server
/// says otherwise.
pub const STATUS_CREATED: &str = "created";

/// Fallback when a record carries no recognizable status field.
pub const STATUS_UNKNOWN: &str = "unknown";

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_SENT: &str = "sent";
pub const STATUS_FAILED: &str = "failed to send";
pub const STATUS_FAILED_IN_TIME: &str = "failed to send in time";
pub const STATUS_LATE: &str = "running late";

/// One notification as shown to the user: canonical id, current status,
/// and the derived cancel-affordance state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRow {
    pub id: String,
    pub status: String,
    pub action_disabled: bool,
}

impl NotificationRow {
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        let status = status.into();
        let action_disabled = status == STATUS_CANCELED;
        Self {
            id: id.into(),
            status,
            action_disabled,
        }
    }

    /// Overwrite the displayed status and recompute the affordance from it.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.action_disabled = self.status == STATUS_CANCELED;
    }
}
