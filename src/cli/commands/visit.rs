use super::set_text;
use crate::cli::parser::{Commands, VisitArgs, VisitCmd};
use crate::config::Config;
use crate::core::add::{AddLogic, describe_time};
use crate::core::del::DeleteLogic;
use crate::core::edit::EditLogic;
use crate::core::forms::{VisitDraft, VisitForm};
use crate::core::reorder::ReorderLogic;
use crate::db::initialize::open_ready;
use crate::db::store::{EventStore, VisitStore};
use crate::errors::{AppError, AppResult};
use crate::models::visit::Visit;
use crate::ui::messages::{Console, confirm, info, success};
use crate::utils::date::date_or_today;
use crate::utils::time::parse_timestamp;
use chrono::NaiveDateTime;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Visit { action } = cmd {
        let mut pool = open_ready(&cfg.database)?;

        match action {
            VisitCmd::Add(args) => {
                let mut form = VisitForm::create(VisitDraft::default());
                apply_args(&mut form.draft, args)?;
                if let Some(event_id) = form.draft.event_id {
                    form.draft.event = pool.get_event(event_id)?;
                }

                let v = AddLogic::visit(&mut pool, &mut form, &mut Console)?;
                print_summary(&v);
            }

            VisitCmd::Edit {
                id,
                args,
                unschedule,
            } => {
                let current = pool
                    .get_visit(*id)?
                    .ok_or_else(|| AppError::NotFound(format!("Visit #{id}")))?;

                let mut form = VisitForm::edit(*id, VisitDraft::from(&current));
                apply_args(&mut form.draft, args)?;
                if *unschedule {
                    form.draft.visit_time = None;
                }

                let v = EditLogic::visit(&mut pool, *id, &mut form, &mut Console)?;
                print_summary(&v);
            }

            VisitCmd::Del { id, yes } => {
                if !*yes && !confirm(format!("Delete visit #{id}?")) {
                    info("Deletion cancelled.");
                    return Ok(());
                }
                let title = DeleteLogic::visit(&mut pool, *id)?;
                success(format!("Visit #{id} '{title}' deleted."));
            }

            VisitCmd::Renumber { date } => {
                let day = date_or_today(date.as_ref())?;
                let n = ReorderLogic::renumber(&mut pool, day)?;
                success(format!("{n} item(s) renumbered for {day}."));
            }
        }
    }

    Ok(())
}

fn print_summary(v: &Visit) {
    info(format!(
        "#{} {} @ {} (order {})",
        v.id,
        v.title(),
        describe_time(&v.visit_time),
        v.visit_order
    ));
}

pub(crate) fn timestamp_arg(raw: &str) -> AppResult<Option<NaiveDateTime>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_timestamp(raw)
        .map(Some)
        .ok_or_else(|| AppError::InvalidTime(raw.to_string()))
}

fn apply_args(d: &mut VisitDraft, a: &VisitArgs) -> AppResult<()> {
    if a.event_id.is_some() {
        d.event_id = a.event_id;
    }
    if let Some(raw) = &a.time {
        d.visit_time = timestamp_arg(raw)?;
    }
    if let Some(order) = a.order {
        d.visit_order = order;
    }
    if let Some(flag) = a.reserved {
        d.is_reserved = flag;
    }
    if let Some(raw) = &a.reservation_time {
        d.reservation_time = timestamp_arg(raw)?;
    }
    if let Some(flag) = a.important {
        d.is_important = flag;
    }
    set_text(&mut d.reservation_url, &a.reservation_url);
    set_text(&mut d.reference_url, &a.reference_url);
    set_text(&mut d.notes, &a.notes);
    Ok(())
}
