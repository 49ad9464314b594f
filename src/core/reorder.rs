use crate::core::filter::{FilterState, filter_timeline_items};
use crate::db::store::{AuditLog, BridgeStore, OrderStore, VisitStore};
use crate::errors::{AppError, AppResult};
use crate::models::item::PlanItem;
use chrono::NaiveDate;

/// Rewrites `visit_order` of a day's visits and bridges to follow their
/// times: 1, 2, 3, ... in timeline order.
pub struct ReorderLogic;

impl ReorderLogic {
    pub fn renumber<S>(store: &mut S, date: NaiveDate) -> AppResult<usize>
    where
        S: VisitStore + BridgeStore + OrderStore + AuditLog + ?Sized,
    {
        let visits = store.visits_by_date(&date)?;
        let bridges = store.bridges_by_date(&date)?;
        let placed = filter_timeline_items(&visits, &bridges, &FilterState::on(date));

        if placed.is_empty() {
            return Err(AppError::NoItemsForDate(date.to_string()));
        }

        let mut visit_orders = Vec::new();
        let mut bridge_orders = Vec::new();
        for p in &placed {
            let order = (p.pin_idx + 1) as i32;
            match &p.item {
                PlanItem::Visit(v) if v.visit_order != order => visit_orders.push((v.id, order)),
                PlanItem::Bridge(b) if b.visit_order != order => bridge_orders.push((b.id, order)),
                _ => {}
            }
        }

        store.update_orders(&visit_orders, &bridge_orders)?;

        let changed = visit_orders.len() + bridge_orders.len();
        store.audit(
            "renumber",
            &date.to_string(),
            &format!("{} of {} items renumbered", changed, placed.len()),
        );
        Ok(changed)
    }
}
