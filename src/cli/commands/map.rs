use super::filter_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::filter::apply_filters;
use crate::core::map::MapView;
use crate::db::initialize::open_ready;
use crate::db::store::{BridgeStore, EventStore, VisitStore};
use crate::errors::AppResult;
use crate::ui::map_view::{render_detail, render_map};
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Map {
        view,
        filters,
        select,
    } = cmd
    {
        let pool = open_ready(&cfg.database)?;
        let state = filter_state(filters)?;

        let events = pool.list_events()?;
        let visits = pool.list_visits(None)?;
        let bridges = pool.list_bridges()?;

        let mut map = MapView::new(apply_filters(*view, &events, &visits, &bridges, &state));
        print!("{}", render_map(&map));

        if let Some(label) = select {
            match map.select(label) {
                Some(p) => print!("{}", render_detail(p, cfg.card_width, &cfg.separator_char)),
                None => warning(format!("No marker '{label}' on the map.")),
            }
        }
    }

    Ok(())
}
