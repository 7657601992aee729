use super::row::{NotificationRow, STATUS_CANCELED};

/// Ordered, id-keyed list of notification rows, plus the visibility flag
/// for the surrounding list container.
///
/// This is the only durable record of shown state. All mutation funnels
/// through `upsert` (reconciliation and optimistic inserts) or
/// `mark_canceled` (the narrow post-cancel update), so merge semantics
/// live in exactly one place.
#[derive(Debug, Clone, Default)]
pub struct NotificationView {
    rows: Vec<NotificationRow>,
    visible: bool,
}

impl NotificationView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-update keyed by id. An unseen id appends a row at the end;
    /// a known id has its status and affordance rewritten in place. Other
    /// rows are never touched and row order never changes, so repeated
    /// calls with the same arguments are no-ops.
    ///
    /// Returns true when a new row was inserted.
    pub fn upsert(&mut self, id: &str, status: &str) -> bool {
        let inserted = match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.set_status(status);
                false
            }
            None => {
                self.rows.push(NotificationRow::new(id, status));
                true
            }
        };
        self.visible = !self.rows.is_empty();
        inserted
    }

    /// Direct post-cancel mutation: flip the one row the cancel action came
    /// from to canceled, bypassing the general upsert path. Unknown ids are
    /// ignored.
    pub fn mark_canceled(&mut self, id: &str) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == id) {
            row.set_status(STATUS_CANCELED);
        }
    }

    pub fn get(&self, id: &str) -> Option<&NotificationRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn rows(&self) -> &[NotificationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the list container should be shown at all (any rows exist).
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
