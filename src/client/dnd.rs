//! Drag-and-Drop Reordering
//!
//! Drop resolution for the board, independent of whatever drag library the
//! UI uses. The UI reports what was picked up and what it was dropped on;
//! the store mutates local order immediately and persists task moves
//! through one bulk request. Nothing is mutated speculatively before the
//! drop target is known.
//!
//! Column-over-column drops only reorder the in-memory list; column order
//! is not written back mid-drag.

use uuid::Uuid;

use crate::client::api::KanbanApi;
use crate::client::store::BoardStore;
use crate::shared::model::TaskPositionUpdate;

/// What a drag payload identifies, mirroring the UI's payload `type` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEntity {
    Column { id: String },
    Task { id: Uuid },
}

/// Move one element of `items` from `from` to `to`, shifting the elements
/// between them (an array move, not a swap). Out-of-range indices are
/// clamped.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if items.is_empty() || from >= items.len() || from == to.min(items.len() - 1) {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

impl<A: KanbanApi> BoardStore<A> {
    /// Resolve a finished drag gesture.
    ///
    /// - No `over` target, or dropping an item onto itself: no-op.
    /// - Column over column: array-move the column list (local only).
    /// - Task over task: when the statuses differ, the dragged task first
    ///   becomes a member of the target's column, then takes the target's
    ///   position; persisted as a single-element bulk update carrying the
    ///   new status, column and destination index.
    /// - Task over column (empty column region): the task adopts the
    ///   column's identifier as status and column; order is omitted from
    ///   the persistence payload (conceptually appended).
    pub async fn handle_drag_end(&mut self, active: DragEntity, over: Option<DragEntity>) {
        let Some(over) = over else {
            return;
        };

        match (active, over) {
            (DragEntity::Column { id: active_id }, DragEntity::Column { id: over_id }) => {
                if active_id == over_id {
                    return;
                }
                let from = self.columns.iter().position(|c| c.id == active_id);
                let to = self.columns.iter().position(|c| c.id == over_id);
                if let (Some(from), Some(to)) = (from, to) {
                    array_move(&mut self.columns, from, to);
                }
            }

            (DragEntity::Task { id: active_id }, DragEntity::Task { id: over_id }) => {
                if active_id == over_id {
                    return;
                }
                let from = self.tasks.iter().position(|t| t.id == active_id);
                let to = self.tasks.iter().position(|t| t.id == over_id);
                let (Some(from), Some(to)) = (from, to) else {
                    return;
                };

                let over_status = self.tasks[to].status.clone();
                let over_column = self.tasks[to].column_id.clone();
                {
                    let dragged = &mut self.tasks[from];
                    if dragged.status != over_status {
                        dragged.status = over_status;
                        dragged.column_id = over_column;
                    }
                }
                array_move(&mut self.tasks, from, to);

                let moved = &self.tasks[to];
                let update = TaskPositionUpdate {
                    id: active_id,
                    status: Some(moved.status.clone()),
                    column_id: Some(moved.column_id.clone()),
                    order: Some(to as i32),
                };
                self.bulk_update_tasks(&[update]).await;
            }

            (DragEntity::Task { id: active_id }, DragEntity::Column { id: column_id }) => {
                let Some(index) = self.tasks.iter().position(|t| t.id == active_id) else {
                    return;
                };

                let task = &mut self.tasks[index];
                task.status = column_id.clone();
                task.column_id = column_id.clone();

                let update = TaskPositionUpdate {
                    id: active_id,
                    status: Some(column_id.clone()),
                    column_id: Some(column_id),
                    order: None,
                };
                self.bulk_update_tasks(&[update]).await;
            }

            // A column resolves against columns only; dropping one on a
            // task card has no target.
            (DragEntity::Column { .. }, DragEntity::Task { .. }) => {}
        }
    }
}
