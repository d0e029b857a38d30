//! # autos
//!
//! Vehicle marks (`autos`) and their models (`models`) in an SQLite file,
//! with allow-listed CRUD helpers and a command line front end.

pub mod cli;
pub mod cli_handlers;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;

pub use db::Database;
pub use error::{AutosError, Result};
pub use models::*;
pub use schema::{Fields, Table};
