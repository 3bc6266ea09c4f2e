#![deny(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use regex::Regex;

#[derive(Parser, Debug)]
#[command(name = "partmgr_cli")]
#[command(bin_name = "partmgr_cli")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Trace log file
    #[arg(long, num_args = 0..=1, default_missing_value = "trace.log")]
    pub(crate) trace: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,

    /// Configuration file, read after the default locations
    #[arg(long, value_name = "CONFIG_FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Parts database directory, overrides the configuration files
    #[arg(long, env = "PARTMGR_DB", value_name = "DIRECTORY")]
    pub(crate) db: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create an empty parts database
    Init,
    /// List parts and their manufacturer parts
    List {
        /// Only list parts whose part number or description match (regexp)
        #[arg(long)]
        filter: Option<Regex>,
    },
    /// List manufacturers
    Manufacturers,
    /// Show the next available part number
    NextPartNumber,
    /// Show the next available manufacturer id
    NextManufacturerId,
    /// Add a part
    AddPart {
        /// Part number (e.g. '800001-101'), defaults to the next available part number
        #[arg(long)]
        part_number: Option<String>,

        /// Description, 5 to 50 characters
        #[arg(long)]
        description: String,

        /// Manufacturer name, defaults to the default manufacturer
        #[arg(long)]
        manufacturer: Option<String>,

        /// Manufacturer part number, 3 to 30 characters, defaults to 'N/A'
        #[arg(long)]
        mpn: Option<String>,

        /// Add an unrecognised manufacturer without asking
        #[arg(long)]
        yes: bool,
    },
    /// Edit the description of a part
    EditDescription {
        /// Part number (e.g. '800001-101')
        #[arg(long)]
        part_number: String,

        /// New description, 5 to 50 characters
        #[arg(long)]
        description: String,
    },
    /// Edit a manufacturer part number
    EditMpn {
        /// Current manufacturer part number
        #[arg(long)]
        mpn: String,

        /// New manufacturer part number, 3 to 30 characters
        #[arg(long)]
        new_mpn: String,
    },
}
