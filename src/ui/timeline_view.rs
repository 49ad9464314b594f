use crate::core::timeline::board::{TimelineBoard, TimelineRow};
use crate::models::item::PlanItem;
use crate::utils::colors::{CYAN, GREY, RESET, marker_badge};
use crate::utils::date::with_weekday;
use crate::utils::formatting::truncate_width;

/// Pixels per terminal column when drawing overlap offsets.
const PX_PER_COL: u32 = 5;

pub fn render_timeline(board: &TimelineBoard, width: usize, show_ids: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{CYAN}🗓  {}{RESET}  {GREY}slot {} min · {} px{RESET}\n",
        with_weekday(&board.date()),
        board.zoom().interval_minutes(),
        board.zoom().height_px()
    ));

    if board.visits().is_empty() && board.bridges().is_empty() {
        out.push_str(&format!("{GREY}Nothing planned for this day.{RESET}\n"));
    }
    out.push('\n');

    for row in board.rows() {
        match row {
            TimelineRow::Collapsed(r) => {
                let id = if show_ids {
                    format!("  {GREY}{}{RESET}", r.drop_id())
                } else {
                    String::new()
                };
                out.push_str(&format!(
                    "{GREY}{:02}:00 ┄┄┄┄┄┄┄┄┄┄ {:02}:00  ({} empty hours){RESET}{}\n",
                    r.start,
                    r.end,
                    r.len(),
                    id
                ));
            }
            TimelineRow::Slot { slot, cards, .. } => {
                let id = if show_ids {
                    format!("  {GREY}{}{RESET}", slot.drop_id())
                } else {
                    String::new()
                };
                out.push_str(&format!("{} ┤{}\n", slot.label(), id));

                for c in cards {
                    let pad = " ".repeat((c.offset_px / PX_PER_COL) as usize);
                    let time = c
                        .placed
                        .item
                        .visit_time()
                        .map(|t| t.format("%H:%M").to_string())
                        .unwrap_or_default();
                    let flags = match &c.placed.item {
                        PlanItem::Visit(v) if v.is_important => " ★",
                        _ => "",
                    };
                    out.push_str(&format!(
                        "      │ {}{} {} {}{}  {GREY}visit-{}{RESET}\n",
                        pad,
                        marker_badge(&c.placed.marker, c.placed.pin_idx, false),
                        time,
                        truncate_width(&c.placed.item.title(), width.saturating_sub(24)),
                        flags,
                        c.placed.item.id()
                    ));
                }
            }
            TimelineRow::Gap { placed, bridge } => {
                let span = match (bridge.visit_time, bridge.end_time()) {
                    (Some(s), Some(e)) => format!("{}-{}", s.format("%H:%M"), e.format("%H:%M")),
                    _ => String::new(),
                };
                let loc = bridge
                    .location
                    .as_ref()
                    .map(|l| format!(" @ {}", l))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "      ┆ {} {} {} {} min {}{}\n",
                    marker_badge(&placed.marker, placed.pin_idx, false),
                    bridge.bridge_type.icon(),
                    bridge.bridge_type.to_db_str(),
                    bridge.duration,
                    span,
                    loc
                ));
            }
        }
    }

    out
}
