/// ANSI color helper utilities for terminal output.
use ansi_term::{Colour, Style};

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Marker badge colours, picked by `pin_idx % len`.
pub const PASTEL_COLORS: [(u8, u8, u8); 8] = [
    (255, 179, 186),
    (255, 223, 186),
    (255, 255, 186),
    (186, 255, 201),
    (186, 225, 255),
    (218, 198, 255),
    (255, 198, 231),
    (200, 230, 220),
];

pub fn pastel(pin_idx: usize) -> Colour {
    let (r, g, b) = PASTEL_COLORS[pin_idx % PASTEL_COLORS.len()];
    Colour::RGB(r, g, b)
}

/// `[A]` for events, `(1)` for timeline items, on the pin's pastel colour.
pub fn marker_badge(marker: &str, pin_idx: usize, is_event: bool) -> String {
    let text = if is_event {
        format!("[{marker}]")
    } else {
        format!("({marker})")
    };
    Style::new()
        .on(pastel(pin_idx))
        .fg(Colour::Black)
        .bold()
        .paint(text)
        .to_string()
}

/// Grey out empty placeholders (`""`, `--:--`).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" || value.contains("--:-- ~ --:--") {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
