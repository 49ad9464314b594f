use super::{expand_delay, resolve_zoom};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timeline::board::TimelineBoard;
use crate::core::timeline::collapse::{HourRange, ToggleOutcome};
use crate::db::initialize::open_ready;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::ui::timeline_view::render_timeline;
use crate::utils::date::date_or_today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timeline {
        date,
        zoom,
        expand,
        toggle,
        expand_all,
        ids,
    } = cmd
    {
        let pool = open_ready(&cfg.database)?;
        let day = date_or_today(date.as_ref())?;
        let zoom = resolve_zoom(zoom.as_deref(), cfg)?;

        let mut board = TimelineBoard::load(&pool, day, zoom, expand_delay(cfg))?;

        if *expand_all {
            board.expand_all();
        }

        for raw in expand {
            let range = HourRange::parse(raw)?;
            if !board.expand(range) {
                warning(format!("{range} is not a collapsed range."));
            }
        }

        for hour in toggle {
            match board.toggle_hour(*hour) {
                ToggleOutcome::Unchanged => info(format!("{hour:02}:00 left as is.")),
                ToggleOutcome::Expanded(r) => info(format!("Expanded {r}.")),
                ToggleOutcome::Extended(r) => info(format!("Collapsed {r}.")),
                ToggleOutcome::Recollapsed(r) => info(format!("Collapsed {r} again.")),
            }
        }

        print!("{}", render_timeline(&board, cfg.card_width, *ids));
    }

    Ok(())
}
