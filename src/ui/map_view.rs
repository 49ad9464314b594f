use crate::core::map::MapView;
use crate::models::item::{Placed, PlanItem};
use crate::ui::cards::render_card;
use crate::utils::colors::{CYAN, GREY, RESET, marker_badge};
use crate::utils::formatting::yes_no;
use crate::utils::table::{Column, Table};

fn coord(v: f64) -> String {
    format!("{:.6}", v)
}

/// Marker table plus bounds; items without coordinates are only counted.
pub fn render_map(view: &MapView) -> String {
    let mut out = String::new();

    match view.bounds() {
        Some(b) => {
            let c = b.center();
            out.push_str(&format!(
                "{CYAN}• Bounds:{RESET} ({}, {}) → ({}, {})\n",
                coord(b.min_lat),
                coord(b.min_lng),
                coord(b.max_lat),
                coord(b.max_lng)
            ));
            out.push_str(&format!(
                "{CYAN}• Center:{RESET} ({}, {})\n\n",
                coord(c.lat),
                coord(c.lng)
            ));
        }
        None => out.push_str(&format!("{GREY}No markers to show.{RESET}\n")),
    }

    if !view.markers().is_empty() {
        let mut table = Table::new(vec![
            Column::new("PIN", 5),
            Column::new("TITLE", 32),
            Column::new("LAT", 11),
            Column::new("LNG", 11),
        ]);
        for m in view.markers() {
            table.add_row(vec![
                m.label.clone(),
                m.title.clone(),
                coord(m.coords.lat),
                coord(m.coords.lng),
            ]);
        }
        out.push_str(&table.render());
    }

    let skipped: Vec<&Placed> = view.unplaced().collect();
    if !skipped.is_empty() {
        let labels: Vec<&str> = skipped.iter().map(|p| p.marker.as_str()).collect();
        out.push_str(&format!(
            "\n{GREY}{} item(s) without coordinates: {}{RESET}\n",
            skipped.len(),
            labels.join(", ")
        ));
    }

    out
}

/// Detail card of the selected marker.
pub fn render_detail(p: &Placed, width: usize, separator: &str) -> String {
    let mut out = String::new();
    let is_event = matches!(p.item, PlanItem::Event(_));

    out.push_str(&format!(
        "\n{} selected\n",
        marker_badge(&p.marker, p.pin_idx, is_event)
    ));
    out.push_str(&render_card(p, width, separator));

    let mut extra = Vec::new();
    match &p.item {
        PlanItem::Event(e) => {
            extra.push(format!("reservation: {}", yes_no(e.need_reservation)));
            if let Some(j) = &e.jibun_address {
                extra.push(format!("jibun:   {}", j));
            }
            if let Some(url) = &e.url {
                extra.push(format!("url:     {}", url));
            }
            if let Some(c) = e.coords {
                extra.push(format!("coords:  {}, {}", coord(c.lat), coord(c.lng)));
            }
            if let Some(content) = &e.content {
                extra.push(format!("content: {}", content));
            }
        }
        PlanItem::Visit(v) => {
            if let Some(url) = &v.reservation_url {
                extra.push(format!("reservation: {}", url));
            }
            if let Some(url) = &v.reference_url {
                extra.push(format!("reference:   {}", url));
            }
            if let Some(e) = &v.event {
                extra.push(format!("event:       #{} {}", e.id, e.name));
                extra.push(format!("open:        {} ({})", e.date_range_str(), e.hours_str()));
            }
        }
        PlanItem::Bridge(b) => {
            if let Some(url) = &b.reference_url {
                extra.push(format!("reference: {}", url));
            }
        }
    }

    for l in extra {
        out.push_str(&format!("  {}\n", l));
    }
    out
}
