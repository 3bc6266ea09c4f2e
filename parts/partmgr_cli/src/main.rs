use anyhow::Context;
use clap::Parser;
use tracing::debug;

use crate::commands::AddPartArgs;
use crate::opts::{Command, Opts};

mod commands;
mod config;
mod opts;

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args(argfile::parse_fromfile, argfile::PREFIX).context("Expanding argument files")?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;

    let loaded = config::load(opts.config.as_deref())?;
    let db = config::resolve_db(opts.db.clone(), &loaded)?;
    debug!("Using parts database. db: {}, config_files: {:?}", db.display(), loaded.files);

    match opts.command {
        Command::Init => commands::init(db),
        Command::List {
            filter,
        } => commands::list(&commands::open(db)?, filter.as_ref()),
        Command::Manufacturers => commands::manufacturers(&commands::open(db)?),
        Command::NextPartNumber => commands::next_part_number(&commands::open(db)?),
        Command::NextManufacturerId => commands::next_manufacturer_id(&commands::open(db)?),
        Command::AddPart {
            part_number,
            description,
            manufacturer,
            mpn,
            yes,
        } => commands::add_part(&mut commands::open(db)?, AddPartArgs {
            part_number,
            description,
            manufacturer,
            mpn,
            assume_yes: yes,
        }),
        Command::EditDescription {
            part_number,
            description,
        } => commands::edit_part_description(&mut commands::open(db)?, &part_number, &description),
        Command::EditMpn {
            mpn,
            new_mpn,
        } => commands::edit_mpn(&mut commands::open(db)?, &mpn, &new_mpn),
    }
}
