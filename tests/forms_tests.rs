use chrono::NaiveTime;
use tripplanner::core::forms::{
    BridgeDraft, BridgeForm, Draft, EventDraft, EventForm, VisitDraft, VisitForm, non_empty,
};
use tripplanner::core::geocode::KnownPlacesGeocoder;
use tripplanner::errors::{AppError, AppResult};
use tripplanner::models::category::Category;
use tripplanner::models::event::Coords;
use tripplanner::ui::messages::Notify;
use tripplanner::utils::date::today;

mod common;
use common::{at, day, event};

/// Keeps every notification for inspection.
#[derive(Default)]
struct Recorder {
    ok: Vec<String>,
    err: Vec<String>,
}

impl Notify for Recorder {
    fn success(&mut self, msg: &str) {
        self.ok.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.err.push(msg.to_string());
    }
}

fn valid_event() -> EventDraft {
    EventDraft {
        name: "Game pop-up".into(),
        category: Some(Category::Game),
        ..Default::default()
    }
}

#[test]
fn test_event_draft_defaults() {
    let d = EventDraft::default();
    assert_eq!(d.start_date, today());
    assert_eq!(d.end_date, today());
    assert_eq!(d.open_time, NaiveTime::from_hms_opt(10, 0, 0));
    assert_eq!(d.close_time, NaiveTime::from_hms_opt(20, 0, 0));
    assert!(d.category.is_none());
}

#[test]
fn test_event_validation() {
    let mut d = valid_event();
    d.name = "   ".into();
    assert!(matches!(d.to_record(), Err(AppError::Validation(_))));

    let mut d = valid_event();
    d.category = None;
    assert!(matches!(d.to_record(), Err(AppError::Validation(_))));

    let mut d = valid_event();
    d.start_date = day("2025-03-10");
    d.end_date = day("2025-03-09");
    assert!(matches!(d.to_record(), Err(AppError::Validation(_))));
}

#[test]
fn test_event_record_trims_and_needs_both_coordinates() {
    let mut d = valid_event();
    d.description = "  ".into();
    d.url = " https://example.com ".into();
    d.lat = Some(37.5);

    let rec = d.to_record().unwrap();
    assert!(rec.description.is_none());
    assert_eq!(rec.url.as_deref(), Some("https://example.com"));
    assert!(rec.coords.is_none());

    d.lng = Some(127.0);
    assert_eq!(d.to_record().unwrap().coords, Some(Coords::new(37.5, 127.0)));
}

#[test]
fn test_non_empty() {
    assert_eq!(non_empty("  a "), Some("a".to_string()));
    assert_eq!(non_empty(" \t"), None);
}

#[test]
fn test_submit_success_closes_form_and_notifies() {
    let mut form = EventForm::create(valid_event());
    let mut notes = Recorder::default();

    let name = form
        .submit(&mut notes, |rec| -> AppResult<String> { Ok(rec.name.clone()) })
        .unwrap();

    assert_eq!(name, "Game pop-up");
    assert!(!form.is_open());
    assert_eq!(notes.ok, vec!["Event added.".to_string()]);
    assert!(notes.err.is_empty());
}

#[test]
fn test_submit_edit_says_updated() {
    let ev = event(4, "Figure shop", Category::Character, None);
    let mut form = EventForm::edit(ev.id, EventDraft::from(&ev));
    let mut notes = Recorder::default();

    assert_eq!(form.editing(), Some(4));
    form.submit(&mut notes, |_| Ok(())).unwrap();
    assert_eq!(notes.ok, vec!["Event updated.".to_string()]);
}

#[test]
fn test_submit_failure_keeps_form_open() {
    let mut form = EventForm::create(valid_event());
    let mut notes = Recorder::default();

    let res: AppResult<()> = form.submit(&mut notes, |_| Err(AppError::Conflict("busy".into())));

    assert!(res.is_err());
    assert!(form.is_open());
    assert!(notes.ok.is_empty());
    assert_eq!(notes.err.len(), 1);
    assert!(notes.err[0].contains("busy"));
}

#[test]
fn test_invalid_draft_never_reaches_store() {
    let mut form = EventForm::create(EventDraft::default());
    let mut notes = Recorder::default();
    let mut called = false;

    let res = form.submit(&mut notes, |_| {
        called = true;
        Ok(())
    });

    assert!(res.is_err());
    assert!(!called);
    assert!(form.is_open());
}

#[test]
fn test_close_form() {
    let mut form = VisitForm::create(VisitDraft::for_event(1));
    form.close();
    assert!(!form.is_open());
}

#[test]
fn test_visit_draft_rules() {
    let d = VisitDraft::default();
    assert_eq!(d.visit_order, 1);
    assert!(matches!(d.to_record(), Err(AppError::Validation(_))));

    let mut d = VisitDraft::for_event(3);
    d.visit_order = 0;
    assert!(d.to_record().is_err());

    let mut d = VisitDraft::for_event(3);
    d.visit_time = Some(at("2025-03-10", "10:00"));
    d.reservation_time = Some(at("2025-03-01", "09:00"));
    assert!(d.to_record().unwrap().reservation_time.is_none());

    d.is_reserved = true;
    assert_eq!(
        d.to_record().unwrap().reservation_time,
        Some(at("2025-03-01", "09:00"))
    );
}

#[test]
fn test_bridge_draft_rules() {
    let d = BridgeDraft::default();
    assert_eq!(d.duration, 30);
    assert!(d.to_record().is_ok());

    let mut form = BridgeForm::create(BridgeDraft {
        duration: 0,
        ..Default::default()
    });
    let mut notes = Recorder::default();
    assert!(form.submit(&mut notes, |_| Ok(())).is_err());
    assert!(notes.err[0].starts_with("Bridge could not be saved"));
}

#[test]
fn test_search_address_fills_coordinates() {
    let mut known = event(1, "Shop", Category::Cosmetics, Some((37.54, 127.05)));
    known.address = Some("Seongsu-dong 1".into());
    known.jibun_address = Some("Seongsu-dong 2-ga 1".into());
    let g = KnownPlacesGeocoder::from_events(&[known]);

    let mut form = EventForm::create(EventDraft {
        address: "seongsu-dong 1".into(),
        ..valid_event()
    });
    assert!(form.search_address(&g));
    assert_eq!(form.draft.lat, Some(37.54));
    assert_eq!(form.draft.lng, Some(127.05));
    assert_eq!(form.draft.road_address, "Seongsu-dong 1");
    assert_eq!(form.draft.jibun_address, "Seongsu-dong 2-ga 1");
    // the typed address is kept
    assert_eq!(form.draft.address, "seongsu-dong 1");
}

#[test]
fn test_search_address_miss_leaves_draft() {
    let g = KnownPlacesGeocoder::from_events(&[]);
    let mut form = EventForm::create(EventDraft {
        address: "Unknown street".into(),
        ..valid_event()
    });
    let before = form.draft.clone();

    assert!(!form.search_address(&g));
    assert_eq!(form.draft, before);
}

#[test]
fn test_pick_location_sets_point_and_address() {
    let mut known = event(1, "Shop", Category::Cosmetics, Some((37.5400, 127.0500)));
    known.road_address = Some("Yeonmujang-gil 13".into());
    let g = KnownPlacesGeocoder::from_events(&[known]);

    let mut form = EventForm::create(valid_event());
    let clicked = Coords::new(37.5405, 127.0502);
    assert!(form.pick_location(&g, clicked));
    assert_eq!(form.draft.lat, Some(clicked.lat));
    assert_eq!(form.draft.lng, Some(clicked.lng));
    assert_eq!(form.draft.address, "Yeonmujang-gil 13");

    let far = Coords::new(35.1, 129.0);
    let before = form.draft.clone();
    assert!(!form.pick_location(&g, far));
    assert_eq!(form.draft, before);
}
