//! Card rendering for the list screen.

use crate::models::bridge::Bridge;
use crate::models::event::Event;
use crate::models::item::{Placed, PlanItem};
use crate::models::visit::Visit;
use crate::utils::colors::{GREY, RESET, YELLOW, colorize_optional, marker_badge};
use crate::utils::formatting::{bold, truncate_width};
use textwrap::{Options, wrap};

fn wrapped(text: &str, width: usize, indent: &str) -> Vec<String> {
    let opts = Options::new(width)
        .initial_indent(indent)
        .subsequent_indent(indent);
    wrap(text, opts).into_iter().map(|l| l.into_owned()).collect()
}

fn event_lines(e: &Event, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    let district = e
        .district
        .map(|d| format!(" · {}", d.label()))
        .unwrap_or_default();
    lines.push(format!("    {}{}", e.category.label(), district));
    lines.push(format!("    📅 {}", e.date_range_str()));
    lines.push(format!("    🕒 {}", colorize_optional(&e.hours_str())));

    if let Some(addr) = e.road_address.as_ref().or(e.address.as_ref()) {
        lines.push(format!("    📍 {}", truncate_width(addr, width.saturating_sub(7))));
    }
    if e.need_reservation {
        lines.push(format!("    {YELLOW}reservation required{RESET}"));
    }
    if let Some(desc) = &e.description {
        lines.extend(wrapped(desc, width, "    "));
    }
    lines
}

fn visit_lines(v: &Visit, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    let when = v
        .visit_time
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| format!("{GREY}unscheduled{RESET}"));
    lines.push(format!("    🕒 {}  (order {})", when, v.visit_order));

    let mut flags = Vec::new();
    if v.is_important {
        flags.push("★ important".to_string());
    }
    if v.is_reserved {
        match v.reservation_time {
            Some(t) => flags.push(format!("reserved {}", t.format("%m-%d %H:%M"))),
            None => flags.push("reserved".to_string()),
        }
    }
    if !flags.is_empty() {
        lines.push(format!("    {YELLOW}{}{RESET}", flags.join(" · ")));
    }

    match &v.event {
        Some(e) => {
            if let Some(addr) = e.road_address.as_ref().or(e.address.as_ref()) {
                lines.push(format!("    📍 {}", truncate_width(addr, width.saturating_sub(7))));
            }
        }
        None => lines.push(format!("    {GREY}event #{} no longer exists{RESET}", v.event_id)),
    }

    if let Some(notes) = &v.notes {
        lines.extend(wrapped(notes, width, "    "));
    }
    lines
}

fn bridge_lines(b: &Bridge) -> Vec<String> {
    let mut lines = Vec::new();
    let span = match (b.visit_time, b.end_time()) {
        (Some(s), Some(e)) => format!("{} - {}", s.format("%H:%M"), e.format("%H:%M")),
        _ => format!("{GREY}unscheduled{RESET}"),
    };
    lines.push(format!("    {} {} min · {}", b.bridge_type.icon(), b.duration, span));
    if let Some(loc) = &b.location {
        lines.push(format!("    📍 {}", loc));
    }
    lines
}

/// One card: badge + title, then detail lines, then a separator.
pub fn render_card(p: &Placed, width: usize, separator: &str) -> String {
    let is_event = matches!(p.item, PlanItem::Event(_));
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}  {}#{}{}\n",
        marker_badge(&p.marker, p.pin_idx, is_event),
        bold(&truncate_width(&p.item.title(), width.saturating_sub(12))),
        GREY,
        p.item.id(),
        RESET
    ));

    let lines = match &p.item {
        PlanItem::Event(e) => event_lines(e, width),
        PlanItem::Visit(v) => visit_lines(v, width),
        PlanItem::Bridge(b) => bridge_lines(b),
    };
    for l in lines {
        out.push_str(&l);
        out.push('\n');
    }

    out.push_str(&separator.repeat(width));
    out.push('\n');
    out
}

pub fn render_list(items: &[Placed], width: usize, separator: &str) -> String {
    items
        .iter()
        .map(|p| render_card(p, width, separator))
        .collect()
}
