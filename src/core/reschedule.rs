use crate::core::timeline::board::{DropOutcome, TimelineBoard};
use crate::core::timeline::dnd::{DragSource, DropTarget};
use crate::db::store::{AuditLog, VisitStore};
use crate::errors::AppResult;

/// Drop handling with the audit trail around it.
pub struct RescheduleLogic;

impl RescheduleLogic {
    pub fn apply<S>(
        board: &mut TimelineBoard,
        store: &mut S,
        source: DragSource,
        target: DropTarget,
    ) -> AppResult<DropOutcome>
    where
        S: VisitStore + AuditLog + ?Sized,
    {
        match board.apply_drop(store, source, target) {
            Ok(DropOutcome::Moved(v)) => {
                let at = v
                    .visit_time
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                store.audit("move", &source.to_string(), &format!("{} → {}", v.title(), at));
                Ok(DropOutcome::Moved(v))
            }
            Ok(DropOutcome::Ignored) => Ok(DropOutcome::Ignored),
            Err(e) => {
                store.audit(
                    "move_failed",
                    &source.to_string(),
                    &format!("drop on {target} failed: {e}"),
                );
                Err(e)
            }
        }
    }
}
