use super::{expand_delay, resolve_zoom};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::describe_time;
use crate::core::reschedule::RescheduleLogic;
use crate::core::timeline::board::{DropOutcome, TimelineBoard};
use crate::core::timeline::dnd::{DragSource, DropTarget};
use crate::db::initialize::open_ready;
use crate::db::store::VisitStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::timeline_view::render_timeline;
use crate::utils::date::{parse_optional_date, today};
use crate::utils::time::parse_time;

/// Handle `move`: one drag of a visit card onto a timeline drop target.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Move {
        item,
        to,
        over,
        date,
        zoom,
    } = cmd
    {
        let mut pool = open_ready(&cfg.database)?;
        let source = DragSource::parse(item)?;

        let visit_id = source.visit_id();
        let visit = pool
            .get_visit(visit_id)?
            .ok_or_else(|| AppError::NotFound(format!("Visit #{visit_id}")))?;

        let day = match parse_optional_date(date.as_ref())? {
            Some(d) => d,
            None => visit.visit_date().unwrap_or_else(today),
        };
        if visit.visit_date() != Some(day) {
            return Err(AppError::Validation(format!(
                "visit #{visit_id} is not on the {day} timeline; schedule it with `visit edit --time`"
            )));
        }

        let zoom = resolve_zoom(zoom.as_deref(), cfg)?;
        let mut board = TimelineBoard::load(&pool, day, zoom, expand_delay(cfg))?;

        let target = match (to, over) {
            (Some(raw), _) => {
                let t = parse_time(raw).ok_or_else(|| AppError::InvalidTime(raw.clone()))?;
                let slot = board
                    .slot_at(&day.and_time(t))
                    .ok_or_else(|| AppError::InvalidTime(raw.clone()))?;
                DropTarget::Slot(slot.epoch_millis())
            }
            (None, Some(raw)) => DropTarget::parse(raw)?,
            (None, None) => {
                return Err(AppError::Validation(
                    "a drop target is required: --to HH:MM or --over <drop id>".into(),
                ));
            }
        };

        match RescheduleLogic::apply(&mut board, &mut pool, source, target)? {
            DropOutcome::Moved(v) => {
                success(format!("{} moved to {}.", v.title(), describe_time(&v.visit_time)));
                print!("{}", render_timeline(&board, cfg.card_width, false));
            }
            DropOutcome::Ignored => info(format!("Drop on {target} ignored; nothing moved.")),
        }
    }

    Ok(())
}
