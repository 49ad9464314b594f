use crate::core::add::describe_time;
use crate::core::forms::{BridgeForm, EventForm, VisitForm};
use crate::db::store::{AuditLog, BridgeStore, EventStore, VisitStore};
use crate::errors::AppResult;
use crate::models::bridge::Bridge;
use crate::models::event::Event;
use crate::models::visit::Visit;
use crate::ui::messages::Notify;

/// Saves an edit form over an existing row.
pub struct EditLogic;

impl EditLogic {
    pub fn event<S, N>(
        store: &mut S,
        id: i64,
        form: &mut EventForm,
        notify: &mut N,
    ) -> AppResult<Event>
    where
        S: EventStore + AuditLog + ?Sized,
        N: Notify + ?Sized,
    {
        let ev = form.submit(notify, |rec| store.update_event(id, rec))?;
        store.audit("edit", &format!("event #{id}"), &ev.name);
        Ok(ev)
    }

    pub fn visit<S, N>(
        store: &mut S,
        id: i64,
        form: &mut VisitForm,
        notify: &mut N,
    ) -> AppResult<Visit>
    where
        S: VisitStore + AuditLog + ?Sized,
        N: Notify + ?Sized,
    {
        let v = form.submit(notify, |rec| store.update_visit(id, rec))?;
        store.audit(
            "edit",
            &format!("visit #{id}"),
            &format!("{} @ {}", v.title(), describe_time(&v.visit_time)),
        );
        Ok(v)
    }

    pub fn bridge<S, N>(
        store: &mut S,
        id: i64,
        form: &mut BridgeForm,
        notify: &mut N,
    ) -> AppResult<Bridge>
    where
        S: BridgeStore + AuditLog + ?Sized,
        N: Notify + ?Sized,
    {
        let b = form.submit(notify, |rec| store.update_bridge(id, rec))?;
        store.audit(
            "edit",
            &format!("bridge #{id}"),
            &format!("{} {} min", b.bridge_type.to_db_str(), b.duration),
        );
        Ok(b)
    }
}
