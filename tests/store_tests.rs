use chrono::Timelike;
use std::time::Duration;
use tripplanner::core::add::AddLogic;
use tripplanner::core::del::DeleteLogic;
use tripplanner::core::forms::{
    BridgeDraft, BridgeForm, EventDraft, EventForm, VisitDraft, VisitForm,
};
use tripplanner::core::reorder::ReorderLogic;
use tripplanner::core::reschedule::RescheduleLogic;
use tripplanner::core::timeline::board::{DropOutcome, TimelineBoard};
use tripplanner::core::timeline::dnd::{DragSource, DropTarget};
use tripplanner::core::timeline::zoom::ZoomLevel;
use tripplanner::db::initialize::init_db;
use tripplanner::db::log::load_entries;
use tripplanner::db::pool::DbPool;
use tripplanner::db::store::{BridgeStore, EventStore, OrderStore, VisitStore};
use tripplanner::errors::AppError;
use tripplanner::models::category::{Category, District};
use tripplanner::models::event::Event;
use tripplanner::models::visit::Visit;
use tripplanner::ui::messages::Notify;

mod common;
use common::{at, day};

struct Silent;

impl Notify for Silent {
    fn success(&mut self, _msg: &str) {}
    fn error(&mut self, _msg: &str) {}
}

fn fresh_pool() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    pool
}

fn add_event(pool: &mut DbPool, name: &str) -> Event {
    let mut form = EventForm::create(EventDraft {
        name: name.into(),
        category: Some(Category::Cosmetics),
        district: Some(District::Seongsu),
        start_date: day("2025-03-01"),
        end_date: day("2025-03-31"),
        ..Default::default()
    });
    AddLogic::event(pool, &mut form, &mut Silent).unwrap()
}

fn add_visit(pool: &mut DbPool, event_id: i64, time: &str, order: i32) -> Visit {
    let mut form = VisitForm::create(VisitDraft {
        visit_time: Some(at("2025-03-10", time)),
        visit_order: order,
        ..VisitDraft::for_event(event_id)
    });
    AddLogic::visit(pool, &mut form, &mut Silent).unwrap()
}

#[test]
fn test_event_roundtrip_through_form() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Olive Young");

    let loaded = pool.get_event(ev.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Olive Young");
    assert_eq!(loaded.category, Category::Cosmetics);
    assert_eq!(loaded.district, Some(District::Seongsu));
    assert_eq!(loaded.start_date, day("2025-03-01"));
    assert_eq!(pool.list_events().unwrap().len(), 1);
}

#[test]
fn test_visit_joins_its_event() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Nintendo pop-up");
    let v = add_visit(&mut pool, ev.id, "11:00", 1);

    assert_eq!(v.version, 1);
    assert_eq!(v.title(), "Nintendo pop-up");
    assert_eq!(pool.visits_by_date(&day("2025-03-10")).unwrap().len(), 1);
    assert!(pool.visits_by_date(&day("2025-03-11")).unwrap().is_empty());
}

#[test]
fn test_visit_for_missing_event_is_rejected() {
    let mut pool = fresh_pool();
    let mut form = VisitForm::create(VisitDraft::for_event(42));

    let err = AddLogic::visit(&mut pool, &mut form, &mut Silent).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(form.is_open());
    assert!(pool.list_visits(None).unwrap().is_empty());
}

#[test]
fn test_stale_version_is_a_conflict() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Shop");
    let v = add_visit(&mut pool, ev.id, "11:00", 1);

    let moved = pool
        .update_visit_time(v.id, &at("2025-03-10", "12:00"), v.version)
        .unwrap();
    assert_eq!(moved.version, 2);

    let err = pool
        .update_visit_time(v.id, &at("2025-03-10", "13:00"), v.version)
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let current = pool.get_visit(v.id).unwrap().unwrap();
    assert_eq!(current.visit_time, Some(at("2025-03-10", "12:00")));
}

#[test]
fn test_update_time_of_missing_visit() {
    let mut pool = fresh_pool();
    let err = pool
        .update_visit_time(9, &at("2025-03-10", "12:00"), 1)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_renumber_follows_times() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Shop");
    let late = add_visit(&mut pool, ev.id, "15:00", 1);
    let early = add_visit(&mut pool, ev.id, "09:00", 2);

    let mut form = BridgeForm::create(BridgeDraft {
        visit_time: Some(at("2025-03-10", "12:00")),
        duration: 20,
        visit_order: 7,
        ..Default::default()
    });
    let b = AddLogic::bridge(&mut pool, &mut form, &mut Silent).unwrap();

    let changed = ReorderLogic::renumber(&mut pool, day("2025-03-10")).unwrap();
    assert_eq!(changed, 3);

    assert_eq!(pool.get_visit(early.id).unwrap().unwrap().visit_order, 1);
    assert_eq!(pool.get_bridge(b.id).unwrap().unwrap().visit_order, 2);
    assert_eq!(pool.get_visit(late.id).unwrap().unwrap().visit_order, 3);

    // already in order
    assert_eq!(ReorderLogic::renumber(&mut pool, day("2025-03-10")).unwrap(), 0);
}

#[test]
fn test_order_update_is_all_or_nothing() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Shop");
    let v = add_visit(&mut pool, ev.id, "10:00", 1);

    let err = pool.update_orders(&[(v.id, 5)], &[(999, 1)]).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let stored = pool.get_visit(v.id).unwrap().unwrap();
    assert_eq!(stored.visit_order, 1);
    assert_eq!(stored.version, 1);
}

#[test]
fn test_bridges_by_event() {
    let mut pool = fresh_pool();
    let shop = add_event(&mut pool, "Shop");
    let cafe = add_event(&mut pool, "Cafe");

    for (event_id, time) in [(shop.id, "13:00"), (cafe.id, "12:00"), (shop.id, "09:00")] {
        let mut form = BridgeForm::create(BridgeDraft {
            event_id: Some(event_id),
            visit_time: Some(at("2025-03-10", time)),
            duration: 15,
            ..Default::default()
        });
        AddLogic::bridge(&mut pool, &mut form, &mut Silent).unwrap();
    }

    let times: Vec<_> = pool
        .bridges_by_event(shop.id)
        .unwrap()
        .iter()
        .map(|b| b.visit_time)
        .collect();
    assert_eq!(
        times,
        vec![Some(at("2025-03-10", "09:00")), Some(at("2025-03-10", "13:00"))]
    );
    assert!(pool.bridges_by_event(999).unwrap().is_empty());
}

#[test]
fn test_renumber_empty_day() {
    let mut pool = fresh_pool();
    let err = ReorderLogic::renumber(&mut pool, day("2025-03-12")).unwrap_err();
    assert!(matches!(err, AppError::NoItemsForDate(_)));
}

#[test]
fn test_deleting_event_keeps_visits() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Closing soon");
    let v = add_visit(&mut pool, ev.id, "10:00", 1);

    let name = DeleteLogic::event(&mut pool, ev.id).unwrap();
    assert_eq!(name, "Closing soon");
    assert!(pool.get_event(ev.id).unwrap().is_none());

    let orphan = pool.get_visit(v.id).unwrap().unwrap();
    assert!(orphan.event.is_none());
    assert_eq!(orphan.event_id, ev.id);
}

#[test]
fn test_delete_missing_items() {
    let mut pool = fresh_pool();
    assert!(matches!(DeleteLogic::event(&mut pool, 1), Err(AppError::NotFound(_))));
    assert!(matches!(DeleteLogic::visit(&mut pool, 1), Err(AppError::NotFound(_))));
    assert!(matches!(DeleteLogic::bridge(&mut pool, 1), Err(AppError::NotFound(_))));
}

#[test]
fn test_drop_on_slot_persists_and_is_audited() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Shop");
    let v = add_visit(&mut pool, ev.id, "10:30", 1);

    let mut board = TimelineBoard::load(
        &pool,
        day("2025-03-10"),
        ZoomLevel::Hour,
        Duration::from_millis(1000),
    )
    .unwrap();
    let slot = board.slot_at(&at("2025-03-10", "14:20")).unwrap();
    assert_eq!(slot.start.hour(), 14);

    let outcome = RescheduleLogic::apply(
        &mut board,
        &mut pool,
        DragSource::Visit(v.id),
        DropTarget::Slot(slot.epoch_millis()),
    )
    .unwrap();

    match outcome {
        DropOutcome::Moved(moved) => {
            assert_eq!(moved.visit_time, Some(at("2025-03-10", "14:00")));
            assert_eq!(moved.version, 2);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let stored = pool.get_visit(v.id).unwrap().unwrap();
    assert_eq!(stored.visit_time, Some(at("2025-03-10", "14:00")));

    let log = load_entries(&pool.conn).unwrap();
    assert!(log.iter().any(|e| e.operation == "move" && e.target == format!("visit-{}", v.id)));
}

#[test]
fn test_stale_board_rolls_back() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Shop");
    let v = add_visit(&mut pool, ev.id, "10:30", 1);

    let mut board = TimelineBoard::load(
        &pool,
        day("2025-03-10"),
        ZoomLevel::Hour,
        Duration::from_millis(1000),
    )
    .unwrap();

    // someone else moves the visit after the board was loaded
    pool.update_visit_time(v.id, &at("2025-03-10", "16:00"), v.version)
        .unwrap();

    let slot = board.slot_at(&at("2025-03-10", "13:00")).unwrap();
    let err = RescheduleLogic::apply(
        &mut board,
        &mut pool,
        DragSource::Visit(v.id),
        DropTarget::Slot(slot.epoch_millis()),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // board shows the pre-drag state again
    assert_eq!(board.visits()[0].visit_time, Some(at("2025-03-10", "10:30")));
    assert!(!board.is_in_flight(v.id));

    let log = load_entries(&pool.conn).unwrap();
    assert!(log.iter().any(|e| e.operation == "move_failed"));
}

#[test]
fn test_audit_rows_for_add_and_delete() {
    let mut pool = fresh_pool();
    let ev = add_event(&mut pool, "Audit me");
    DeleteLogic::event(&mut pool, ev.id).unwrap();

    let ops: Vec<(String, String)> = load_entries(&pool.conn)
        .unwrap()
        .into_iter()
        .filter(|e| e.target.starts_with("event #"))
        .map(|e| (e.operation, e.target))
        .collect();
    assert_eq!(
        ops,
        vec![
            ("add".to_string(), format!("event #{}", ev.id)),
            ("del".to_string(), format!("event #{}", ev.id)),
        ]
    );
}
