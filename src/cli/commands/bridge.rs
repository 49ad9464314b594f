use super::set_text;
use super::visit::timestamp_arg;
use crate::cli::parser::{BridgeArgs, BridgeCmd, Commands};
use crate::config::Config;
use crate::core::add::{AddLogic, describe_time};
use crate::core::del::DeleteLogic;
use crate::core::edit::EditLogic;
use crate::core::forms::{BridgeDraft, BridgeForm};
use crate::db::initialize::open_ready;
use crate::db::store::BridgeStore;
use crate::errors::{AppError, AppResult};
use crate::models::bridge::{Bridge, BridgeType};
use crate::ui::messages::{Console, confirm, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Bridge { action } = cmd {
        let mut pool = open_ready(&cfg.database)?;

        match action {
            BridgeCmd::Add(args) => {
                let mut form = BridgeForm::create(BridgeDraft::default());
                apply_args(&mut form.draft, args)?;
                let b = AddLogic::bridge(&mut pool, &mut form, &mut Console)?;
                print_summary(&b);
            }

            BridgeCmd::Edit { id, args } => {
                let current = pool
                    .get_bridge(*id)?
                    .ok_or_else(|| AppError::NotFound(format!("Bridge #{id}")))?;

                let mut form = BridgeForm::edit(*id, BridgeDraft::from(&current));
                apply_args(&mut form.draft, args)?;
                let b = EditLogic::bridge(&mut pool, *id, &mut form, &mut Console)?;
                print_summary(&b);
            }

            BridgeCmd::Del { id, yes } => {
                if !*yes && !confirm(format!("Delete bridge #{id}?")) {
                    info("Deletion cancelled.");
                    return Ok(());
                }
                let label = DeleteLogic::bridge(&mut pool, *id)?;
                success(format!("Bridge #{id} ({label}) deleted."));
            }
        }
    }

    Ok(())
}

fn print_summary(b: &Bridge) {
    info(format!(
        "#{} {} {} {} min @ {}",
        b.id,
        b.bridge_type.icon(),
        b.bridge_type.to_db_str(),
        b.duration,
        describe_time(&b.visit_time)
    ));
}

fn apply_args(d: &mut BridgeDraft, a: &BridgeArgs) -> AppResult<()> {
    if a.event_id.is_some() {
        d.event_id = a.event_id;
    }
    if let Some(raw) = &a.bridge_type {
        d.bridge_type =
            BridgeType::from_code(raw).ok_or_else(|| AppError::InvalidBridgeType(raw.clone()))?;
    }
    if let Some(minutes) = a.duration {
        d.duration = minutes;
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
    set_text(&mut d.location, &a.location);
    set_text(&mut d.reservation_url, &a.reservation_url);
    set_text(&mut d.reference_url, &a.reference_url);
    set_text(&mut d.notes, &a.notes);
    Ok(())
}
