use autos::NewModel;
use autos::cli::{Cli, Commands};
use autos::cli_handlers;
use clap::Parser;
use std::process;

fn main() {
    // Logs go to stderr so row output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = cli.db.as_path();

    let result = match cli.command {
        Commands::Init => cli_handlers::handle_init(db),
        Commands::Seed => cli_handlers::handle_seed(db),
        Commands::AddMark { name, start, end } => {
            cli_handlers::handle_add_mark(db, &name, start.as_deref(), end.as_deref())
        }
        Commands::AddModel {
            mark_id,
            name,
            desc,
            status,
            start,
            end,
        } => cli_handlers::handle_add_model(
            db,
            NewModel {
                mark_id,
                name,
                description: desc,
                status,
                production_start: start,
                production_end: end,
            },
        ),
        Commands::List { table } => cli_handlers::handle_list(db, &table, cli.json),
        Commands::Show { table, id } => cli_handlers::handle_show(db, &table, id, cli.json),
        Commands::Find { table, filters } => {
            cli_handlers::handle_find(db, &table, &filters, cli.json)
        }
        Commands::Update { table, id, changes } => {
            cli_handlers::handle_update(db, &table, id, &changes)
        }
        Commands::Delete { table, filters } => cli_handlers::handle_delete(db, &table, &filters),
        Commands::Clear { table } => cli_handlers::handle_clear(db, &table),
        Commands::Exec { sql } => cli_handlers::handle_exec(db, &sql),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
