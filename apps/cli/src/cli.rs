//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pcbuild_core::{Category, ComponentId};

/// Pick PC components from a catalog and check that they fit together.
#[derive(Debug, Parser)]
#[command(name = "pcbuild", version, about)]
pub struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog database file, overriding config and environment
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Text menu for selecting components and checking the build
    Interactive,

    /// Load a catalog CSV into the database
    Import {
        /// Header: id,type,name,manufacturer,model,socket,memory_type,power,price
        csv: PathBuf,
    },

    /// List catalog components
    Search(SearchArgs),

    /// Check a build given by component ids
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// cpu, gpu, ram, motherboard or psu
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<Category>,

    /// Substring of the name or model
    #[arg(long)]
    pub term: Option<String>,

    /// Exact manufacturer
    #[arg(long)]
    pub manufacturer: Option<String>,

    /// Maximum rows (default: `search_limit` from config)
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(long, value_name = "ID")]
    pub cpu: Option<ComponentId>,

    #[arg(long, value_name = "ID")]
    pub gpu: Option<ComponentId>,

    #[arg(long, value_name = "ID")]
    pub ram: Option<ComponentId>,

    #[arg(long, value_name = "ID")]
    pub motherboard: Option<ComponentId>,

    #[arg(long, value_name = "ID")]
    pub psu: Option<ComponentId>,

    /// Print the selection and verdict as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// The ids that were given, in slot order.
    pub fn slots(&self) -> Vec<(Category, ComponentId)> {
        [
            (Category::Cpu, self.cpu),
            (Category::Gpu, self.gpu),
            (Category::Ram, self.ram),
            (Category::Motherboard, self.motherboard),
            (Category::Psu, self.psu),
        ]
        .into_iter()
        .filter_map(|(slot, id)| id.map(|id| (slot, id)))
        .collect()
    }
}
