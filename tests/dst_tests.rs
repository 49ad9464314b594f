use std::time::Duration;
use tripplanner::core::add::AddLogic;
use tripplanner::core::forms::{EventDraft, EventForm, VisitDraft, VisitForm};
use tripplanner::core::timeline::board::{DropOutcome, TimelineBoard};
use tripplanner::core::timeline::dnd::{DragSource, DropTarget};
use tripplanner::core::timeline::slots::generate_slots;
use tripplanner::core::timeline::zoom::ZoomLevel;
use tripplanner::db::initialize::init_db;
use tripplanner::db::pool::DbPool;
use tripplanner::db::store::VisitStore;
use tripplanner::models::category::Category;
use tripplanner::ui::messages::Notify;

mod common;
use common::{at, day};

// US clocks jump from 02:00 to 03:00 on this day.
const SPRING_FORWARD: &str = "2024-03-10";

struct Silent;

impl Notify for Silent {
    fn success(&mut self, _msg: &str) {}
    fn error(&mut self, _msg: &str) {}
}

#[test]
fn test_spring_forward_day_keeps_slots_distinct() {
    // only test in this binary, so nothing has read the local zone yet
    unsafe { std::env::set_var("TZ", "America/New_York") };

    for zoom in ZoomLevel::ALL {
        let ids: Vec<i64> = generate_slots(&day(SPRING_FORWARD), zoom)
            .iter()
            .map(|s| s.epoch_millis())
            .collect();
        assert_eq!(ids.len(), zoom.slots_per_day());
        assert!(
            ids.windows(2).all(|w| w[0] < w[1]),
            "slot ids not strictly increasing at {zoom:?}"
        );
    }

    let mut pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();

    let mut form = EventForm::create(EventDraft {
        name: "Night market".into(),
        category: Some(Category::Game),
        start_date: day("2024-03-01"),
        end_date: day("2024-03-31"),
        ..Default::default()
    });
    let ev = AddLogic::event(&mut pool, &mut form, &mut Silent).unwrap();

    let mut form = VisitForm::create(VisitDraft {
        visit_time: Some(at(SPRING_FORWARD, "10:00")),
        ..VisitDraft::for_event(ev.id)
    });
    let v = AddLogic::visit(&mut pool, &mut form, &mut Silent).unwrap();

    let mut board = TimelineBoard::load(
        &pool,
        day(SPRING_FORWARD),
        ZoomLevel::Hour,
        Duration::from_millis(1000),
    )
    .unwrap();
    let two_am = board.slot_at(&at(SPRING_FORWARD, "02:00")).unwrap();

    let outcome = board
        .apply_drop(
            &mut pool,
            DragSource::Visit(v.id),
            DropTarget::Slot(two_am.epoch_millis()),
        )
        .unwrap();
    assert!(matches!(outcome, DropOutcome::Moved(_)));

    let stored = pool.get_visit(v.id).unwrap().unwrap();
    assert_eq!(stored.visit_time, Some(at(SPRING_FORWARD, "02:00")));
}
