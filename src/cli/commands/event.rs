use super::set_text;
use crate::cli::parser::{Commands, EventArgs, EventCmd};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::del::DeleteLogic;
use crate::core::edit::EditLogic;
use crate::core::forms::{EventDraft, EventForm};
use crate::core::geocode::KnownPlacesGeocoder;
use crate::db::initialize::open_ready;
use crate::db::pool::DbPool;
use crate::db::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::category::{Category, District};
use crate::models::event::{Coords, Event};
use crate::ui::messages::{Console, confirm, info, success};
use crate::utils::date::parse_date;
use crate::utils::time::parse_time;
use chrono::{NaiveDate, NaiveTime};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Event { action } = cmd {
        let mut pool = open_ready(&cfg.database)?;

        match action {
            EventCmd::Add(args) => {
                let mut form = EventForm::create(EventDraft::default());
                apply_args(&mut form.draft, args)?;
                locate(&pool, &mut form, args)?;

                let ev = AddLogic::event(&mut pool, &mut form, &mut Console)?;
                print_summary(&ev);
            }

            EventCmd::Edit { id, args } => {
                let current = pool
                    .get_event(*id)?
                    .ok_or_else(|| AppError::NotFound(format!("Event #{id}")))?;

                let mut form = EventForm::edit(*id, EventDraft::from(&current));
                apply_args(&mut form.draft, args)?;
                locate(&pool, &mut form, args)?;

                let ev = EditLogic::event(&mut pool, *id, &mut form, &mut Console)?;
                print_summary(&ev);
            }

            EventCmd::Del { id, yes } => {
                if !*yes && !confirm(format!("Delete event #{id}? Its visits are kept.")) {
                    info("Deletion cancelled.");
                    return Ok(());
                }
                let name = DeleteLogic::event(&mut pool, *id)?;
                success(format!("Event #{id} '{name}' deleted."));
            }
        }
    }

    Ok(())
}

fn print_summary(ev: &Event) {
    let coords = ev
        .coords
        .map(|c| format!("{:.6}, {:.6}", c.lat, c.lng))
        .unwrap_or_else(|| "no coordinates".to_string());
    info(format!(
        "#{} {} · {} · {}",
        ev.id,
        ev.name,
        ev.date_range_str(),
        coords
    ));
}

fn date_arg(raw: &str) -> AppResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}

/// `""` clears an optional time.
fn time_arg(raw: &str) -> AppResult<Option<NaiveTime>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_time(raw)
        .map(Some)
        .ok_or_else(|| AppError::InvalidTime(raw.to_string()))
}

fn apply_args(d: &mut EventDraft, a: &EventArgs) -> AppResult<()> {
    set_text(&mut d.name, &a.name);
    set_text(&mut d.description, &a.description);
    set_text(&mut d.address, &a.address);
    set_text(&mut d.road_address, &a.road_address);
    set_text(&mut d.jibun_address, &a.jibun_address);
    set_text(&mut d.url, &a.url);
    set_text(&mut d.content, &a.content);

    if let Some(raw) = &a.category {
        let cat = Category::from_code(raw).ok_or_else(|| AppError::InvalidCategory(raw.clone()))?;
        d.category = Some(cat);
    }
    if let Some(raw) = &a.district {
        d.district = if raw.trim().is_empty() {
            None
        } else {
            Some(District::from_code(raw).ok_or_else(|| AppError::InvalidDistrict(raw.clone()))?)
        };
    }

    if let Some(raw) = &a.start_date {
        d.start_date = date_arg(raw)?;
        // a single-day event unless an end is given too
        if a.end_date.is_none() && d.end_date < d.start_date {
            d.end_date = d.start_date;
        }
    }
    if let Some(raw) = &a.end_date {
        d.end_date = date_arg(raw)?;
    }
    if let Some(raw) = &a.open_time {
        d.open_time = time_arg(raw)?;
    }
    if let Some(raw) = &a.close_time {
        d.close_time = time_arg(raw)?;
    }

    if a.lat.is_some() {
        d.lat = a.lat;
    }
    if a.lng.is_some() {
        d.lng = a.lng;
    }
    if let Some(flag) = a.need_reservation {
        d.need_reservation = flag;
    }

    Ok(())
}

/// `--geocode` and `--pick-lat/--pick-lng`, resolved against the places
/// already stored.
fn locate(pool: &DbPool, form: &mut EventForm, a: &EventArgs) -> AppResult<()> {
    let pick = match (a.pick_lat, a.pick_lng) {
        (Some(lat), Some(lng)) => Some(Coords::new(lat, lng)),
        _ => None,
    };
    if !a.geocode && pick.is_none() {
        return Ok(());
    }

    let geocoder = KnownPlacesGeocoder::from_events(&pool.list_events()?);

    if a.geocode && form.search_address(&geocoder) {
        info(format!("Address located: {}", form.draft.address));
    }

    if let Some(at) = pick
        && form.pick_location(&geocoder, at)
    {
        info(format!("Picked location: {}", form.draft.address));
    }

    Ok(())
}
