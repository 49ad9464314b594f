//! Table-level persistence seams.
//!
//! Handlers and the timeline board receive a store explicitly instead of
//! reaching for a global connection. `DbPool` is the SQLite implementation;
//! tests plug in their own doubles for the trait they need.

use crate::db::log::write_log_quiet;
use crate::db::pool::DbPool;
use crate::db::{bridges, events, visits};
use crate::errors::AppResult;
use crate::models::bridge::{Bridge, BridgeRecord};
use crate::models::event::{Event, EventRecord};
use crate::models::visit::{Visit, VisitRecord};
use chrono::{NaiveDate, NaiveDateTime};

pub trait EventStore {
    fn list_events(&self) -> AppResult<Vec<Event>>;
    fn get_event(&self, id: i64) -> AppResult<Option<Event>>;
    fn insert_event(&mut self, rec: &EventRecord) -> AppResult<Event>;
    fn update_event(&mut self, id: i64, rec: &EventRecord) -> AppResult<Event>;
    fn delete_event(&mut self, id: i64) -> AppResult<()>;
}

pub trait VisitStore {
    fn list_visits(&self, event_id: Option<i64>) -> AppResult<Vec<Visit>>;
    fn visits_by_date(&self, date: &NaiveDate) -> AppResult<Vec<Visit>>;
    fn get_visit(&self, id: i64) -> AppResult<Option<Visit>>;
    fn insert_visit(&mut self, rec: &VisitRecord) -> AppResult<Visit>;
    fn update_visit(&mut self, id: i64, rec: &VisitRecord) -> AppResult<Visit>;
    /// Version-checked reschedule; a stale `expected_version` is a conflict.
    fn update_visit_time(
        &mut self,
        id: i64,
        time: &NaiveDateTime,
        expected_version: i64,
    ) -> AppResult<Visit>;
    fn delete_visit(&mut self, id: i64) -> AppResult<()>;
}

pub trait BridgeStore {
    fn list_bridges(&self) -> AppResult<Vec<Bridge>>;
    fn bridges_by_date(&self, date: &NaiveDate) -> AppResult<Vec<Bridge>>;
    fn bridges_by_event(&self, event_id: i64) -> AppResult<Vec<Bridge>>;
    fn get_bridge(&self, id: i64) -> AppResult<Option<Bridge>>;
    fn insert_bridge(&mut self, rec: &BridgeRecord) -> AppResult<Bridge>;
    fn update_bridge(&mut self, id: i64, rec: &BridgeRecord) -> AppResult<Bridge>;
    fn delete_bridge(&mut self, id: i64) -> AppResult<()>;
}

/// Day ordering shared by visits and bridges.
pub trait OrderStore {
    /// Rewrite `visit_order` of visits and bridges together. Nothing is
    /// written when any id is missing.
    fn update_orders(
        &mut self,
        visit_orders: &[(i64, i32)],
        bridge_orders: &[(i64, i32)],
    ) -> AppResult<()>;
}

/// Audit trail of user operations. Writing it never fails the operation.
pub trait AuditLog {
    fn audit(&self, operation: &str, target: &str, message: &str);
}

/// Everything the planner persists.
pub trait PlanStore: EventStore + VisitStore + BridgeStore + OrderStore + AuditLog {}

impl<T: EventStore + VisitStore + BridgeStore + OrderStore + AuditLog> PlanStore for T {}

impl AuditLog for DbPool {
    fn audit(&self, operation: &str, target: &str, message: &str) {
        write_log_quiet(&self.conn, operation, target, message);
    }
}

impl EventStore for DbPool {
    fn list_events(&self) -> AppResult<Vec<Event>> {
        events::load_events(&self.conn)
    }

    fn get_event(&self, id: i64) -> AppResult<Option<Event>> {
        events::load_event(&self.conn, id)
    }

    fn insert_event(&mut self, rec: &EventRecord) -> AppResult<Event> {
        events::insert_event(&self.conn, rec)
    }

    fn update_event(&mut self, id: i64, rec: &EventRecord) -> AppResult<Event> {
        events::update_event(&self.conn, id, rec)
    }

    fn delete_event(&mut self, id: i64) -> AppResult<()> {
        events::delete_event(&self.conn, id)
    }
}

impl VisitStore for DbPool {
    fn list_visits(&self, event_id: Option<i64>) -> AppResult<Vec<Visit>> {
        visits::load_visits(&self.conn, event_id)
    }

    fn visits_by_date(&self, date: &NaiveDate) -> AppResult<Vec<Visit>> {
        visits::load_visits_by_date(&self.conn, date)
    }

    fn get_visit(&self, id: i64) -> AppResult<Option<Visit>> {
        visits::load_visit(&self.conn, id)
    }

    fn insert_visit(&mut self, rec: &VisitRecord) -> AppResult<Visit> {
        visits::insert_visit(&self.conn, rec)
    }

    fn update_visit(&mut self, id: i64, rec: &VisitRecord) -> AppResult<Visit> {
        visits::update_visit(&self.conn, id, rec)
    }

    fn update_visit_time(
        &mut self,
        id: i64,
        time: &NaiveDateTime,
        expected_version: i64,
    ) -> AppResult<Visit> {
        visits::update_visit_time(&self.conn, id, time, expected_version)
    }

    fn delete_visit(&mut self, id: i64) -> AppResult<()> {
        visits::delete_visit(&self.conn, id)
    }
}

impl BridgeStore for DbPool {
    fn list_bridges(&self) -> AppResult<Vec<Bridge>> {
        bridges::load_bridges(&self.conn)
    }

    fn bridges_by_date(&self, date: &NaiveDate) -> AppResult<Vec<Bridge>> {
        bridges::load_bridges_by_date(&self.conn, date)
    }

    fn bridges_by_event(&self, event_id: i64) -> AppResult<Vec<Bridge>> {
        bridges::load_bridges_by_event(&self.conn, event_id)
    }

    fn get_bridge(&self, id: i64) -> AppResult<Option<Bridge>> {
        bridges::load_bridge(&self.conn, id)
    }

    fn insert_bridge(&mut self, rec: &BridgeRecord) -> AppResult<Bridge> {
        bridges::insert_bridge(&self.conn, rec)
    }

    fn update_bridge(&mut self, id: i64, rec: &BridgeRecord) -> AppResult<Bridge> {
        bridges::update_bridge(&self.conn, id, rec)
    }

    fn delete_bridge(&mut self, id: i64) -> AppResult<()> {
        bridges::delete_bridge(&self.conn, id)
    }
}

impl OrderStore for DbPool {
    fn update_orders(
        &mut self,
        visit_orders: &[(i64, i32)],
        bridge_orders: &[(i64, i32)],
    ) -> AppResult<()> {
        let tx = self.conn.transaction()?;
        visits::set_visit_orders(&tx, visit_orders)?;
        bridges::set_bridge_orders(&tx, bridge_orders)?;
        tx.commit()?;
        Ok(())
    }
}
