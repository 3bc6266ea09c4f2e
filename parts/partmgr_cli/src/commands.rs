use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Context};
use inquire::Confirm;
use parts::operations::{
    allocate_manufacturer_id, allocate_part_number, edit_description, edit_manufacturer_part_number, list_parts,
    new_part_defaults,
};
use parts::part::NewPart;
use parts::repository::PartsRepository;
use parts::workflow::{NewPartWorkflow, WorkflowState};
use regex::Regex;
use stores::csv_repository::{ensure_store, CsvPartsRepository, PartsSource};
use tracing::{info, warn};

/// The values of the `add-part` command, unset values take the defaults from the repository.
#[derive(Debug)]
pub(crate) struct AddPartArgs {
    pub part_number: Option<String>,
    pub description: String,
    pub manufacturer: Option<String>,
    pub mpn: Option<String>,
    pub assume_yes: bool,
}

pub(crate) fn init(db: PathBuf) -> anyhow::Result<()> {
    let source = PartsSource::from_path(db);
    ensure_store(&source)?;
    info!("Parts database ready. source: '{}'", source);
    Ok(())
}

/// Opens an existing store, only `init` may create one.
pub(crate) fn open(db: PathBuf) -> anyhow::Result<CsvPartsRepository> {
    let source = PartsSource::try_existing_writable(db).context("Opening parts database")?;
    Ok(CsvPartsRepository::new(source))
}

pub(crate) fn list(repository: &impl PartsRepository, filter: Option<&Regex>) -> anyhow::Result<()> {
    let listings = list_parts(repository, filter)?;
    info!("Listing parts. count: {}", listings.len());

    for listing in listings {
        println!("{}  {}", listing.part_number, listing.description);
        for manufacturer_part in listing.manufacturer_parts {
            println!("    {}  {}", manufacturer_part.manufacturer, manufacturer_part.mpn);
        }
    }
    Ok(())
}

pub(crate) fn manufacturers(repository: &impl PartsRepository) -> anyhow::Result<()> {
    for manufacturer in repository.list_manufacturers()? {
        println!("{}  {}", manufacturer.manufacturer_id, manufacturer.name);
    }
    Ok(())
}

pub(crate) fn next_part_number(repository: &impl PartsRepository) -> anyhow::Result<()> {
    println!("{}", allocate_part_number(repository)?);
    Ok(())
}

pub(crate) fn next_manufacturer_id(repository: &impl PartsRepository) -> anyhow::Result<()> {
    println!("{}", allocate_manufacturer_id(repository)?);
    Ok(())
}

pub(crate) fn add_part(repository: &mut impl PartsRepository, args: AddPartArgs) -> anyhow::Result<()> {
    let defaults = new_part_defaults(repository)?;

    let part = NewPart::new(
        args.part_number
            .unwrap_or_else(|| defaults.part_number.to_string()),
        args.description,
        args.manufacturer
            .unwrap_or(defaults.manufacturer),
        args.mpn.unwrap_or(defaults.mpn),
    );

    let mut workflow = NewPartWorkflow::new(defaults.known_manufacturers);
    let mut confirmation = |name: &str| confirm_new_manufacturer(name, args.assume_yes);

    match workflow.run(repository, part, &mut confirmation)? {
        WorkflowState::Committed(committed) => {
            if let Some(manufacturer_id) = committed.new_manufacturer_id {
                println!("{}  {}", manufacturer_id, committed.part.manufacturer);
            }
            println!("{}", committed.part.part_number);
            Ok(())
        }
        WorkflowState::Rejected(rejection) => bail!("Part not added. reason: {}", rejection),
        state => bail!("Part not added. state: {}", state.kind()),
    }
}

fn confirm_new_manufacturer(name: &str, assume_yes: bool) -> bool {
    if assume_yes {
        info!("Adding manufacturer without confirmation. name: '{}'", name);
        return true;
    }

    if !std::io::stdin().is_terminal() {
        warn!("Unrecognised manufacturer and no terminal to confirm, use '--yes' to add it. name: '{}'", name);
        return false;
    }

    Confirm::new(&format!("Add Manufacturer: {}?", name))
        .with_default(false)
        .prompt()
        .unwrap_or_else(|error| {
            warn!("Confirmation failed. cause: {}", error);
            false
        })
}

pub(crate) fn edit_part_description(
    repository: &mut impl PartsRepository,
    part_number: &str,
    description: &str,
) -> anyhow::Result<()> {
    edit_description(repository, part_number, description)?;
    Ok(())
}

pub(crate) fn edit_mpn(repository: &mut impl PartsRepository, mpn: &str, new_mpn: &str) -> anyhow::Result<()> {
    edit_manufacturer_part_number(repository, mpn, new_mpn)?;
    Ok(())
}
