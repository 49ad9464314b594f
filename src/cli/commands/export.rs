use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_ready;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        view,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let path = expand_tilde(file).to_string_lossy().to_string();
        let mut pool = open_ready(&cfg.database)?;
        let n = ExportLogic::export(&mut pool, *view, *format, &path, range, *force)?;
        if n > 0 {
            info(format!("{n} row(s) written."));
        }
    }

    Ok(())
}
