use crate::db::store::{AuditLog, BridgeStore, EventStore, VisitStore};
use crate::errors::{AppError, AppResult};

pub struct DeleteLogic;

impl DeleteLogic {
    /// Visits of the event are kept; they show up without a joined event.
    pub fn event<S>(store: &mut S, id: i64) -> AppResult<String>
    where
        S: EventStore + AuditLog + ?Sized,
    {
        let ev = store
            .get_event(id)?
            .ok_or_else(|| AppError::NotFound(format!("Event #{id}")))?;
        store.delete_event(id)?;
        store.audit("del", &format!("event #{id}"), &ev.name);
        Ok(ev.name)
    }

    pub fn visit<S>(store: &mut S, id: i64) -> AppResult<String>
    where
        S: VisitStore + AuditLog + ?Sized,
    {
        let v = store
            .get_visit(id)?
            .ok_or_else(|| AppError::NotFound(format!("Visit #{id}")))?;
        store.delete_visit(id)?;
        store.audit("del", &format!("visit #{id}"), &v.title());
        Ok(v.title())
    }

    pub fn bridge<S>(store: &mut S, id: i64) -> AppResult<String>
    where
        S: BridgeStore + AuditLog + ?Sized,
    {
        let b = store
            .get_bridge(id)?
            .ok_or_else(|| AppError::NotFound(format!("Bridge #{id}")))?;
        store.delete_bridge(id)?;
        let label = format!("{} {} min", b.bridge_type.to_db_str(), b.duration);
        store.audit("del", &format!("bridge #{id}"), &label);
        Ok(label)
    }
}
