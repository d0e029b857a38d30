use crate::db::DEFAULT_DB_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autos")]
#[command(about = "Vehicle mark and model catalogue")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Database file (created if absent)
    #[arg(long, global = true, env = "AUTOS_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Print rows as JSON instead of tuples
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the autos and models tables
    Init,

    /// Insert the sample FIAT mark and TIPO model
    Seed,

    /// Add a mark
    AddMark {
        /// Mark name
        name: String,
        /// Production start
        #[arg(long)]
        start: Option<String>,
        /// Production end
        #[arg(long)]
        end: Option<String>,
    },

    /// Add a model to an existing mark
    AddModel {
        /// Mark ID
        mark_id: i64,
        /// Model name
        name: String,
        /// Optional description
        #[arg(long)]
        desc: Option<String>,
        /// Status (e.g. "Ended")
        #[arg(long)]
        status: String,
        /// Production start (YYYY-MM-DD [HH:MM:SS])
        #[arg(long)]
        start: String,
        /// Production end (YYYY-MM-DD [HH:MM:SS])
        #[arg(long)]
        end: String,
    },

    /// List every row of a table
    List {
        /// autos or models
        table: String,
    },

    /// Show one mark or model by ID
    Show {
        /// autos or models
        table: String,
        /// Row ID
        id: i64,
    },

    /// List rows matching all column=value pairs
    Find {
        /// autos or models
        table: String,
        /// Filters, e.g. marka_id=2
        #[arg(required = true)]
        filters: Vec<String>,
    },

    /// Change columns of one row
    Update {
        /// autos or models
        table: String,
        /// Row ID
        id: i64,
        /// New values, e.g. status=Ended
        #[arg(required = true)]
        changes: Vec<String>,
    },

    /// Delete rows matching all column=value pairs
    Delete {
        /// autos or models
        table: String,
        /// Filters, e.g. id=3
        #[arg(required = true)]
        filters: Vec<String>,
    },

    /// Delete every row of a table
    Clear {
        /// autos or models
        table: String,
    },

    /// Run a raw SQL statement
    Exec {
        /// Statement text
        sql: String,
    },
}
