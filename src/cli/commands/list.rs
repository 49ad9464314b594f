use super::filter_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::filter::apply_filters;
use crate::db::initialize::open_ready;
use crate::db::store::{BridgeStore, EventStore, VisitStore};
use crate::errors::AppResult;
use crate::ui::cards::render_list;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { view, filters } = cmd {
        let pool = open_ready(&cfg.database)?;
        let state = filter_state(filters)?;

        let events = pool.list_events()?;
        let visits = pool.list_visits(None)?;
        let bridges = pool.list_bridges()?;

        let items = apply_filters(*view, &events, &visits, &bridges, &state);
        if items.is_empty() {
            warning("No items match the current filters.");
            return Ok(());
        }

        print!("{}", render_list(&items, cfg.card_width, &cfg.separator_char));
    }

    Ok(())
}
