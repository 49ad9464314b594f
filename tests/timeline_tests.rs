use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime};
use tripplanner::core::reschedule::RescheduleLogic;
use tripplanner::core::timeline::board::{DropOutcome, TimelineBoard, TimelineRow};
use tripplanner::core::timeline::collapse::HourRange;
use tripplanner::core::timeline::dnd::{DragSource, DropTarget};
use tripplanner::core::timeline::overlap::{OVERLAP_STEP_PX, overlap_offset};
use tripplanner::core::timeline::slots::{Slot, generate_slots, slot_index};
use tripplanner::core::timeline::timer::ExpandTimer;
use tripplanner::core::timeline::zoom::ZoomLevel;
use tripplanner::db::store::{AuditLog, BridgeStore, VisitStore};
use tripplanner::errors::{AppError, AppResult};
use tripplanner::models::bridge::{Bridge, BridgeRecord};
use tripplanner::models::visit::{Visit, VisitRecord};

mod common;
use common::{at, bridge, day, visit};

const DAY: &str = "2025-03-10";

/// In-memory visits; `fail_with_conflict` makes every reschedule fail.
#[derive(Default)]
struct FakeStore {
    visits: RefCell<Vec<Visit>>,
    bridges: Vec<Bridge>,
    fail_with_conflict: bool,
    time_updates: Cell<usize>,
    audits: RefCell<Vec<String>>,
}

impl FakeStore {
    fn with(visits: Vec<Visit>) -> Self {
        Self {
            visits: RefCell::new(visits),
            ..Default::default()
        }
    }
}

impl VisitStore for FakeStore {
    fn list_visits(&self, _event_id: Option<i64>) -> AppResult<Vec<Visit>> {
        Ok(self.visits.borrow().clone())
    }

    fn visits_by_date(&self, date: &NaiveDate) -> AppResult<Vec<Visit>> {
        Ok(self
            .visits
            .borrow()
            .iter()
            .filter(|v| v.visit_date() == Some(*date))
            .cloned()
            .collect())
    }

    fn get_visit(&self, id: i64) -> AppResult<Option<Visit>> {
        Ok(self.visits.borrow().iter().find(|v| v.id == id).cloned())
    }

    fn insert_visit(&mut self, _rec: &VisitRecord) -> AppResult<Visit> {
        Err(AppError::Other("not used".into()))
    }

    fn update_visit(&mut self, _id: i64, _rec: &VisitRecord) -> AppResult<Visit> {
        Err(AppError::Other("not used".into()))
    }

    fn update_visit_time(
        &mut self,
        id: i64,
        time: &NaiveDateTime,
        expected_version: i64,
    ) -> AppResult<Visit> {
        self.time_updates.set(self.time_updates.get() + 1);
        if self.fail_with_conflict {
            return Err(AppError::Conflict(format!("visit {id} changed")));
        }

        let mut visits = self.visits.borrow_mut();
        let v = visits
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Visit #{id}")))?;
        if v.version != expected_version {
            return Err(AppError::Conflict(format!("visit {id} changed")));
        }
        v.visit_time = Some(*time);
        v.version += 1;
        Ok(v.clone())
    }

    fn delete_visit(&mut self, _id: i64) -> AppResult<()> {
        Ok(())
    }
}

impl BridgeStore for FakeStore {
    fn list_bridges(&self) -> AppResult<Vec<Bridge>> {
        Ok(self.bridges.clone())
    }

    fn bridges_by_date(&self, date: &NaiveDate) -> AppResult<Vec<Bridge>> {
        Ok(self
            .bridges
            .iter()
            .filter(|b| b.visit_date() == Some(*date))
            .cloned()
            .collect())
    }

    fn bridges_by_event(&self, event_id: i64) -> AppResult<Vec<Bridge>> {
        Ok(self
            .bridges
            .iter()
            .filter(|b| b.event_id == Some(event_id))
            .cloned()
            .collect())
    }

    fn get_bridge(&self, id: i64) -> AppResult<Option<Bridge>> {
        Ok(self.bridges.iter().find(|b| b.id == id).cloned())
    }

    fn insert_bridge(&mut self, _rec: &BridgeRecord) -> AppResult<Bridge> {
        Err(AppError::Other("not used".into()))
    }

    fn update_bridge(&mut self, _id: i64, _rec: &BridgeRecord) -> AppResult<Bridge> {
        Err(AppError::Other("not used".into()))
    }

    fn delete_bridge(&mut self, _id: i64) -> AppResult<()> {
        Ok(())
    }
}

impl AuditLog for FakeStore {
    fn audit(&self, operation: &str, target: &str, _message: &str) {
        self.audits.borrow_mut().push(format!("{operation} {target}"));
    }
}

fn board_with(visits: Vec<Visit>, bridges: Vec<Bridge>) -> TimelineBoard {
    TimelineBoard::new(
        day(DAY),
        ZoomLevel::Hour,
        visits,
        bridges,
        Duration::from_millis(1000),
    )
}

fn slot_ms(board: &TimelineBoard, hm: &str) -> i64 {
    board.slot_at(&at(DAY, hm)).unwrap().epoch_millis()
}

// ---------------------------
// Zoom and slots
// ---------------------------

#[test]
fn test_zoom_presets() {
    assert_eq!(ZoomLevel::default(), ZoomLevel::Hour);
    assert_eq!(ZoomLevel::parse("30").unwrap(), ZoomLevel::HalfHour);
    assert_eq!(ZoomLevel::parse("15min").unwrap(), ZoomLevel::Quarter);
    assert_eq!(ZoomLevel::parse("10m").unwrap(), ZoomLevel::TenMinutes);
    assert!(matches!(ZoomLevel::parse("20"), Err(AppError::InvalidZoom(_))));

    assert_eq!(ZoomLevel::Hour.height_px(), 60);
    assert_eq!(ZoomLevel::TenMinutes.height_px(), 120);
}

#[test]
fn test_slot_count_follows_zoom() {
    let d = day(DAY);
    assert_eq!(generate_slots(&d, ZoomLevel::Hour).len(), 24);
    assert_eq!(generate_slots(&d, ZoomLevel::HalfHour).len(), 48);
    assert_eq!(generate_slots(&d, ZoomLevel::Quarter).len(), 96);
    assert_eq!(generate_slots(&d, ZoomLevel::TenMinutes).len(), 144);
}

#[test]
fn test_slots_are_contiguous_and_half_open() {
    let slots = generate_slots(&day(DAY), ZoomLevel::Quarter);
    for pair in slots.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }

    let s = &slots[40]; // 10:00
    assert_eq!(s.label(), "10:00");
    assert!(s.contains(&at(DAY, "10:14")));
    assert!(!s.contains(&at(DAY, "10:15")));
}

#[test]
fn test_slot_index_only_on_its_day() {
    let d = day(DAY);
    assert_eq!(slot_index(&d, ZoomLevel::HalfHour, &at(DAY, "10:45")), Some(21));
    assert_eq!(slot_index(&d, ZoomLevel::HalfHour, &at("2025-03-11", "10:45")), None);
}

#[test]
fn test_slot_drop_id_is_epoch_millis() {
    let slots = generate_slots(&day(DAY), ZoomLevel::Hour);
    let s = &slots[9];
    assert_eq!(s.drop_id(), format!("timeslot-{}", s.epoch_millis()));
    assert_eq!(slots[10].epoch_millis() - s.epoch_millis(), 3_600_000);
}

// ---------------------------
// Drag ids
// ---------------------------

#[test]
fn test_drag_and_drop_ids() {
    assert_eq!(DragSource::parse("visit-12").unwrap(), DragSource::Visit(12));
    assert_eq!(DragSource::parse("7").unwrap().visit_id(), 7);
    assert!(DragSource::parse("bridge-3").is_err());

    assert_eq!(
        DropTarget::parse("timeslot-1741568400000").unwrap(),
        DropTarget::Slot(1_741_568_400_000)
    );
    assert_eq!(
        DropTarget::parse("collapsed-4-8").unwrap(),
        DropTarget::Collapsed(HourRange::new(4, 8))
    );
    assert!(matches!(
        DropTarget::parse("slot-9"),
        Err(AppError::InvalidDropId(_))
    ));
    assert_eq!(
        DropTarget::Collapsed(HourRange::new(4, 8)).to_string(),
        "collapsed-4-8"
    );
}

// ---------------------------
// Overlap
// ---------------------------

fn hour_slot(hm: &str) -> Slot {
    let start = at(DAY, hm);
    Slot {
        start,
        end: start + chrono::Duration::hours(1),
    }
}

#[test]
fn test_overlap_needs_busy_neighbour() {
    let mut occupied = [false; 24];
    occupied[10] = true;
    let slot = hour_slot("10:00");

    assert_eq!(overlap_offset(&slot, 2, 1, &occupied), 0);

    occupied[11] = true;
    assert_eq!(overlap_offset(&slot, 2, 0, &occupied), 0);
    assert_eq!(overlap_offset(&slot, 2, 1, &occupied), OVERLAP_STEP_PX);
    assert_eq!(overlap_offset(&slot, 3, 2, &occupied), 2 * OVERLAP_STEP_PX);
}

#[test]
fn test_single_item_never_shifts() {
    let occupied = [true; 24];
    assert_eq!(overlap_offset(&hour_slot("10:00"), 1, 0, &occupied), 0);
}

#[test]
fn test_rows_apply_overlap_offsets() {
    let board = board_with(
        vec![
            visit(1, 1, Some(at(DAY, "10:00"))),
            visit(2, 1, Some(at(DAY, "10:30"))),
            visit(3, 1, Some(at(DAY, "11:00"))),
        ],
        vec![],
    );

    let offsets: Vec<u32> = board
        .rows()
        .into_iter()
        .find_map(|r| match r {
            TimelineRow::Slot { slot, cards, .. } if slot.hour() == 10 => {
                Some(cards.iter().map(|c| c.offset_px).collect())
            }
            _ => None,
        })
        .unwrap();

    assert_eq!(offsets, vec![0, 15]);
}

// ---------------------------
// Board layout
// ---------------------------

#[test]
fn test_rows_fold_empty_hours() {
    let board = board_with(
        vec![
            visit(1, 1, Some(at(DAY, "02:00"))),
            visit(2, 1, Some(at(DAY, "03:15"))),
            visit(3, 1, Some(at(DAY, "09:00"))),
        ],
        vec![],
    );

    assert_eq!(
        board.collapsed_ranges(),
        &[HourRange::new(4, 8), HourRange::new(10, 22)]
    );

    let rows = board.rows();
    let collapsed: Vec<HourRange> = rows
        .iter()
        .filter_map(|r| match r {
            TimelineRow::Collapsed(range) => Some(*range),
            _ => None,
        })
        .collect();
    assert_eq!(collapsed, vec![HourRange::new(4, 8), HourRange::new(10, 22)]);

    // 0, 1, 2, 3, 9 and 23 stay as slot rows
    let slot_hours: Vec<u32> = rows
        .iter()
        .filter_map(|r| match r {
            TimelineRow::Slot { slot, .. } => Some(slot.hour()),
            _ => None,
        })
        .collect();
    assert_eq!(slot_hours, vec![0, 1, 2, 3, 9, 23]);
}

#[test]
fn test_bridges_keep_hours_open_and_render_as_gaps() {
    let board = board_with(
        vec![visit(1, 1, Some(at(DAY, "10:00")))],
        vec![bridge(5, Some(at(DAY, "14:20")), 40)],
    );

    assert!(board.occupancy()[14]);
    assert!(!board.collapsed_ranges().iter().any(|r| r.contains(14)));

    let gaps: Vec<i64> = board
        .rows()
        .into_iter()
        .filter_map(|r| match r {
            TimelineRow::Gap { bridge, .. } => Some(bridge.id),
            _ => None,
        })
        .collect();
    assert_eq!(gaps, vec![5]);
}

#[test]
fn test_expand_and_toggle_through_board() {
    let mut board = board_with(vec![visit(1, 1, Some(at(DAY, "12:00")))], vec![]);

    assert!(board.expand(HourRange::new(1, 11)));
    assert!(!board.expand(HourRange::new(1, 11)));
    assert_eq!(board.collapsed_ranges(), &[HourRange::new(13, 22)]);

    board.expand_all();
    assert!(board.collapsed_ranges().is_empty());
}

#[test]
fn test_zoom_change_keeps_collapsed_ranges() {
    let mut board = board_with(vec![visit(1, 1, Some(at(DAY, "12:00")))], vec![]);
    let before = board.collapsed_ranges().to_vec();

    board.set_zoom(ZoomLevel::Quarter);
    assert_eq!(board.zoom(), ZoomLevel::Quarter);
    assert_eq!(board.slots().len(), 96);
    assert_eq!(board.slot_at(&at(DAY, "12:20")).unwrap().start, at(DAY, "12:15"));
    assert_eq!(board.collapsed_ranges(), before.as_slice());
}

// ---------------------------
// Hover timer
// ---------------------------

#[test]
fn test_timer_fires_once_after_delay() {
    let t0 = Instant::now();
    let mut timer = ExpandTimer::new(Duration::from_millis(1000));

    assert!(timer.arm(t0));
    assert!(!timer.arm(t0 + Duration::from_millis(500)));
    assert!(!timer.poll(t0 + Duration::from_millis(999)));
    assert!(timer.poll(t0 + Duration::from_millis(1000)));
    assert!(!timer.poll(t0 + Duration::from_millis(2000)));
    assert!(!timer.is_armed());
}

#[test]
fn test_timer_disarm_cancels() {
    let t0 = Instant::now();
    let mut timer = ExpandTimer::default();
    assert_eq!(timer.delay(), Duration::from_millis(1000));

    timer.arm(t0);
    timer.disarm();
    assert!(!timer.poll(t0 + Duration::from_secs(5)));
}

#[test]
fn test_hover_expands_range_after_delay() {
    let mut board = board_with(vec![visit(1, 1, Some(at(DAY, "12:00")))], vec![]);
    let range = HourRange::new(13, 22);
    let t0 = Instant::now();

    assert!(board.hover_enter(range, t0));
    // moving inside the range does not restart the countdown
    assert!(!board.hover_enter(range, t0 + Duration::from_millis(600)));
    assert!(board.is_timer_armed(&range));

    assert!(board.tick(t0 + Duration::from_millis(900)).is_empty());
    assert_eq!(board.tick(t0 + Duration::from_millis(1000)), vec![range]);
    assert!(!board.collapsed_ranges().contains(&range));
    assert!(board.tick(t0 + Duration::from_millis(3000)).is_empty());
}

#[test]
fn test_hover_leave_cancels_expand() {
    let mut board = board_with(vec![visit(1, 1, Some(at(DAY, "12:00")))], vec![]);
    let range = HourRange::new(1, 11);
    let t0 = Instant::now();

    board.hover_enter(range, t0);
    board.hover_leave(range);
    assert!(!board.is_timer_armed(&range));
    assert!(board.tick(t0 + Duration::from_secs(2)).is_empty());
    assert!(board.collapsed_ranges().contains(&range));
}

#[test]
fn test_hover_on_open_range_is_ignored() {
    let mut board = board_with(vec![visit(1, 1, Some(at(DAY, "12:00")))], vec![]);
    assert!(!board.hover_enter(HourRange::new(4, 8), Instant::now()));
}

// ---------------------------
// Drops and rollback
// ---------------------------

#[test]
fn test_drop_moves_visit_and_bumps_version() {
    let original = vec![visit(1, 1, Some(at(DAY, "10:00")))];
    let mut store = FakeStore::with(original.clone());
    let mut board = board_with(original, vec![]);

    let target = DropTarget::Slot(slot_ms(&board, "14:00"));
    let outcome = board
        .apply_drop(&mut store, DragSource::Visit(1), target)
        .unwrap();

    match outcome {
        DropOutcome::Moved(v) => {
            assert_eq!(v.visit_time, Some(at(DAY, "14:00")));
            assert_eq!(v.version, 2);
        }
        DropOutcome::Ignored => panic!("drop should move the visit"),
    }
    assert_eq!(board.visits()[0].visit_time, Some(at(DAY, "14:00")));
    assert!(board.occupancy()[14]);
    assert!(!board.occupancy()[10]);
    assert!(!board.is_in_flight(1));
}

#[test]
fn test_drop_on_collapsed_range_is_ignored() {
    let original = vec![visit(1, 1, Some(at(DAY, "10:00")))];
    let mut store = FakeStore::with(original.clone());
    let mut board = board_with(original, vec![]);

    let outcome = board
        .apply_drop(
            &mut store,
            DragSource::Visit(1),
            DropTarget::Collapsed(HourRange::new(11, 22)),
        )
        .unwrap();

    assert_eq!(outcome, DropOutcome::Ignored);
    assert_eq!(store.time_updates.get(), 0);
}

#[test]
fn test_drop_on_own_slot_is_ignored() {
    let original = vec![visit(1, 1, Some(at(DAY, "10:00")))];
    let mut store = FakeStore::with(original.clone());
    let mut board = board_with(original, vec![]);

    let target = DropTarget::Slot(slot_ms(&board, "10:00"));
    let outcome = board.apply_drop(&mut store, DragSource::Visit(1), target).unwrap();

    assert_eq!(outcome, DropOutcome::Ignored);
    assert_eq!(store.time_updates.get(), 0);
}

#[test]
fn test_drop_on_unknown_slot_is_rejected() {
    let original = vec![visit(1, 1, Some(at(DAY, "10:00")))];
    let mut store = FakeStore::with(original.clone());
    let mut board = board_with(original, vec![]);

    let bogus = slot_ms(&board, "10:00") + 1;
    let err = board
        .apply_drop(&mut store, DragSource::Visit(1), DropTarget::Slot(bogus))
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidDropId(_)));
    assert_eq!(store.time_updates.get(), 0);
}

#[test]
fn test_failed_store_update_rolls_back() {
    let original = vec![
        visit(1, 1, Some(at(DAY, "10:00"))),
        visit(2, 1, Some(at(DAY, "15:00"))),
    ];
    let mut store = FakeStore {
        fail_with_conflict: true,
        ..FakeStore::with(original.clone())
    };
    let mut board = board_with(original.clone(), vec![]);
    let ranges_before = board.collapsed_ranges().to_vec();

    let target = DropTarget::Slot(slot_ms(&board, "18:00"));
    let err = board
        .apply_drop(&mut store, DragSource::Visit(1), target)
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(board.visits(), original.as_slice());
    assert_eq!(board.collapsed_ranges(), ranges_before.as_slice());
    assert!(!board.is_in_flight(1));
}

#[test]
fn test_second_move_while_in_flight_is_rejected() {
    let mut board = board_with(vec![visit(1, 1, Some(at(DAY, "10:00")))], vec![]);

    let pending = board.begin_move(1, at(DAY, "13:00")).unwrap();
    assert!(board.is_in_flight(1));
    // optimistic state is visible right away
    assert_eq!(board.visits()[0].visit_time, Some(at(DAY, "13:00")));

    let err = board.begin_move(1, at(DAY, "16:00")).unwrap_err();
    assert!(matches!(err, AppError::MoveInFlight(1)));

    let err = board
        .finish_move(pending, Err(AppError::Conflict("stale".into())))
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(board.visits()[0].visit_time, Some(at(DAY, "10:00")));
    assert!(!board.is_in_flight(1));
}

fn time_of(board: &TimelineBoard, id: i64) -> Option<NaiveDateTime> {
    board
        .visits()
        .iter()
        .find(|v| v.id == id)
        .and_then(|v| v.visit_time)
}

#[test]
fn test_overlapping_moves_both_failing_restore_both() {
    let mut board = board_with(
        vec![
            visit(1, 1, Some(at(DAY, "10:00"))),
            visit(2, 1, Some(at(DAY, "15:00"))),
        ],
        vec![],
    );

    let first = board.begin_move(1, at(DAY, "13:00")).unwrap();
    let second = board.begin_move(2, at(DAY, "17:00")).unwrap();
    assert_eq!(time_of(&board, 1), Some(at(DAY, "13:00")));
    assert_eq!(time_of(&board, 2), Some(at(DAY, "17:00")));

    board
        .finish_move(first, Err(AppError::Conflict("stale".into())))
        .unwrap_err();
    // the other move is still pending and stays visible
    assert_eq!(time_of(&board, 1), Some(at(DAY, "10:00")));
    assert_eq!(time_of(&board, 2), Some(at(DAY, "17:00")));

    board
        .finish_move(second, Err(AppError::Conflict("stale".into())))
        .unwrap_err();
    assert_eq!(time_of(&board, 1), Some(at(DAY, "10:00")));
    assert_eq!(time_of(&board, 2), Some(at(DAY, "15:00")));
    assert!(!board.is_in_flight(1));
    assert!(!board.is_in_flight(2));
}

#[test]
fn test_failed_move_keeps_later_confirmed_move() {
    let mut board = board_with(
        vec![
            visit(1, 1, Some(at(DAY, "10:00"))),
            visit(2, 1, Some(at(DAY, "15:00"))),
        ],
        vec![],
    );

    let first = board.begin_move(1, at(DAY, "13:00")).unwrap();
    let second = board.begin_move(2, at(DAY, "17:00")).unwrap();

    let mut saved = visit(2, 1, Some(at(DAY, "17:00")));
    saved.version = 2;
    let confirmed = board.finish_move(second, Ok(saved)).unwrap();
    assert_eq!(confirmed.version, 2);

    board
        .finish_move(first, Err(AppError::Conflict("stale".into())))
        .unwrap_err();
    assert_eq!(time_of(&board, 1), Some(at(DAY, "10:00")));
    assert_eq!(time_of(&board, 2), Some(at(DAY, "17:00")));

    // the next move of visit 2 expects the confirmed version
    let next = board.begin_move(2, at(DAY, "18:00")).unwrap();
    assert_eq!(next.expected_version, 2);
}

#[test]
fn test_move_unknown_visit() {
    let mut board = board_with(vec![visit(1, 1, Some(at(DAY, "10:00")))], vec![]);
    assert!(matches!(
        board.begin_move(9, at(DAY, "11:00")),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_load_reads_only_the_board_day() {
    let store = FakeStore {
        bridges: vec![bridge(1, Some(at(DAY, "12:00")), 20)],
        ..FakeStore::with(vec![
            visit(1, 1, Some(at(DAY, "10:00"))),
            visit(2, 1, Some(at("2025-03-11", "10:00"))),
            visit(3, 1, None),
        ])
    };

    let board =
        TimelineBoard::load(&store, day(DAY), ZoomLevel::Quarter, Duration::from_millis(500))
            .unwrap();
    assert_eq!(board.visits().len(), 1);
    assert_eq!(board.bridges().len(), 1);
    assert_eq!(board.slots().len(), 96);
}

#[test]
fn test_reschedule_audits_moves_and_failures() {
    let original = vec![visit(1, 1, Some(at(DAY, "10:00")))];
    let mut store = FakeStore::with(original.clone());
    let mut board = board_with(original, vec![]);

    let target = DropTarget::Slot(slot_ms(&board, "12:00"));
    RescheduleLogic::apply(&mut board, &mut store, DragSource::Visit(1), target).unwrap();

    let bogus = DropTarget::Slot(1);
    assert!(RescheduleLogic::apply(&mut board, &mut store, DragSource::Visit(1), bogus).is_err());

    assert_eq!(
        store.audits.borrow().as_slice(),
        &["move visit-1".to_string(), "move_failed visit-1".to_string()]
    );
}
