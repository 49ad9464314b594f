use crate::core::forms::{BridgeForm, EventForm, VisitForm};
use crate::db::store::{AuditLog, BridgeStore, EventStore, VisitStore};
use crate::errors::AppResult;
use crate::models::bridge::Bridge;
use crate::models::event::Event;
use crate::models::visit::Visit;
use crate::ui::messages::Notify;

/// High-level business logic for the `add` subcommands.
pub struct AddLogic;

impl AddLogic {
    pub fn event<S, N>(store: &mut S, form: &mut EventForm, notify: &mut N) -> AppResult<Event>
    where
        S: EventStore + AuditLog + ?Sized,
        N: Notify + ?Sized,
    {
        let ev = form.submit(notify, |rec| store.insert_event(rec))?;
        store.audit("add", &format!("event #{}", ev.id), &ev.name);
        Ok(ev)
    }

    pub fn visit<S, N>(store: &mut S, form: &mut VisitForm, notify: &mut N) -> AppResult<Visit>
    where
        S: VisitStore + AuditLog + ?Sized,
        N: Notify + ?Sized,
    {
        let v = form.submit(notify, |rec| store.insert_visit(rec))?;
        store.audit(
            "add",
            &format!("visit #{}", v.id),
            &format!("{} @ {}", v.title(), describe_time(&v.visit_time)),
        );
        Ok(v)
    }

    pub fn bridge<S, N>(store: &mut S, form: &mut BridgeForm, notify: &mut N) -> AppResult<Bridge>
    where
        S: BridgeStore + AuditLog + ?Sized,
        N: Notify + ?Sized,
    {
        let b = form.submit(notify, |rec| store.insert_bridge(rec))?;
        store.audit(
            "add",
            &format!("bridge #{}", b.id),
            &format!("{} {} min", b.bridge_type.to_db_str(), b.duration),
        );
        Ok(b)
    }
}

pub(crate) fn describe_time(t: &Option<chrono::NaiveDateTime>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unscheduled".to_string())
}
