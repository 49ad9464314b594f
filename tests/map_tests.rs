use tripplanner::core::filter::{FilterState, filter_events};
use tripplanner::core::geocode::{GeocodeStatus, Geocoder, KnownPlacesGeocoder};
use tripplanner::core::map::{MapView, build_markers, fit_bounds};
use tripplanner::models::category::Category;
use tripplanner::models::event::Coords;

mod common;
use common::event;

fn view() -> MapView {
    let events = vec![
        event(1, "North", Category::Game, Some((37.60, 127.00))),
        event(2, "Nowhere", Category::Game, None),
        event(3, "South", Category::Game, Some((37.50, 127.10))),
    ];
    MapView::new(filter_events(&events, &FilterState::default()))
}

#[test]
fn test_markers_skip_items_without_coordinates() {
    let v = view();
    let labels: Vec<&str> = v.markers().iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "C"]);
    assert!(v.markers().iter().all(|m| m.is_event));

    let missing: Vec<&str> = v.unplaced().map(|p| p.marker.as_str()).collect();
    assert_eq!(missing, vec!["B"]);
}

#[test]
fn test_bounds_fit_all_markers() {
    let v = view();
    let b = v.bounds().unwrap();
    assert_eq!((b.min_lat, b.max_lat), (37.50, 37.60));
    assert_eq!((b.min_lng, b.max_lng), (127.00, 127.10));

    let c = b.center();
    assert!((c.lat - 37.55).abs() < 1e-9);
    assert!((c.lng - 127.05).abs() < 1e-9);
    for m in v.markers() {
        assert!(b.contains(&m.coords));
    }
}

#[test]
fn test_no_markers_no_bounds() {
    let items = filter_events(
        &[event(1, "Nowhere", Category::Game, None)],
        &FilterState::default(),
    );
    assert!(build_markers(&items).is_empty());
    assert!(fit_bounds(&[]).is_none());
    assert!(MapView::new(items).bounds().is_none());
}

#[test]
fn test_select_marker_case_insensitive() {
    let mut v = view();
    assert_eq!(v.select("c").map(|p| p.item.id()), Some(3));
    assert_eq!(v.selected().map(|p| p.item.id()), Some(3));

    v.clear_selection();
    assert!(v.selected().is_none());

    assert!(v.select("Q").is_none());
}

#[test]
fn test_forward_geocode_matches_stored_address() {
    let mut ev = event(1, "Shop", Category::Cosmetics, Some((37.54, 127.05)));
    ev.address = Some("Seongsu-dong 1".into());
    ev.road_address = Some("Yeonmujang-gil 13".into());
    let g = KnownPlacesGeocoder::from_events(&[ev]);

    let hit = g.forward("  yeonmujang-GIL 13 ");
    assert_eq!(hit.status, GeocodeStatus::Ok);
    let m = hit.first_ok().unwrap();
    assert_eq!(m.coords, Coords::new(37.54, 127.05));
    assert_eq!(m.road_address.as_deref(), Some("Yeonmujang-gil 13"));

    assert_eq!(g.forward("Somewhere else").status, GeocodeStatus::ZeroResult);
    assert!(g.forward("").first_ok().is_none());
}

#[test]
fn test_reverse_geocode_within_radius() {
    let mut ev = event(1, "Shop", Category::Cosmetics, Some((37.5400, 127.0500)));
    ev.road_address = Some("Yeonmujang-gil 13".into());
    let g = KnownPlacesGeocoder::from_events(&[ev]);

    // ~110 m north
    let near = Coords::new(37.5410, 127.0500);
    let hit = g.reverse(near);
    let m = hit.first_ok().unwrap();
    assert_eq!(m.coords, near);
    assert_eq!(m.display_address().as_deref(), Some("Yeonmujang-gil 13"));

    // ~1.1 km away
    assert_eq!(
        g.reverse(Coords::new(37.5500, 127.0500)).status,
        GeocodeStatus::ZeroResult
    );
    assert_eq!(
        g.clone().with_radius(2000.0).reverse(Coords::new(37.5500, 127.0500)).status,
        GeocodeStatus::Ok
    );
    assert_eq!(
        g.reverse(Coords::new(f64::NAN, 127.0)).status,
        GeocodeStatus::Error
    );
}
