use crate::db::Database;
use crate::error::AutosError;
use crate::models::{Mark, Model, NewMark, NewModel, Row};
use crate::schema::{Fields, Table};
use std::path::Path;

/// Handle the init command
pub fn handle_init(db_path: &Path) -> Result<(), AutosError> {
    let db = Database::connect(db_path)?;
    db.init_schema()?;
    db.close()?;

    println!("Initialized {}", db_path.display());

    Ok(())
}

/// Handle the seed command
pub fn handle_seed(db_path: &Path) -> Result<(), AutosError> {
    let db = Database::connect(db_path)?;
    let (mark_id, model_id) = db.seed()?;
    db.close()?;

    println!("{mark_id} {model_id}");

    Ok(())
}

/// Handle the add-mark command
pub fn handle_add_mark(
    db_path: &Path,
    name: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(), AutosError> {
    let db = Database::connect(db_path)?;
    let id = db.insert_mark(&NewMark {
        name: name.to_string(),
        production_start: start.map(str::to_string),
        production_end: end.map(str::to_string),
    })?;
    db.close()?;

    println!("{id}");

    Ok(())
}

/// Handle the add-model command
pub fn handle_add_model(db_path: &Path, model: NewModel) -> Result<(), AutosError> {
    let db = Database::connect(db_path)?;
    let id = db.insert_model(&model)?;
    db.close()?;

    println!("{id}");

    Ok(())
}

/// Handle the list command
pub fn handle_list(db_path: &Path, table: &str, json: bool) -> Result<(), AutosError> {
    let table: Table = table.parse()?;
    let db = Database::connect(db_path)?;
    let rows = db.select_all(table)?;
    db.close()?;

    print_rows(&rows, json)
}

/// Handle the show command
pub fn handle_show(db_path: &Path, table: &str, id: i64, json: bool) -> Result<(), AutosError> {
    let table: Table = table.parse()?;
    let db = Database::connect(db_path)?;
    let not_found = || AutosError::RowNotFound {
        table: table.as_str(),
        id,
    };

    match table {
        Table::Autos => {
            let mark = db.get_mark(id)?.ok_or_else(not_found)?;
            db.close()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&mark)?);
            } else {
                print_mark(&mark);
            }
        }
        Table::Models => {
            let model = db.get_model(id)?.ok_or_else(not_found)?;
            db.close()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&model)?);
            } else {
                print_model(&model);
            }
        }
    }

    Ok(())
}

fn print_mark(mark: &Mark) {
    println!("[#{id}] {name}", id = mark.id, name = mark.name);
    println!("Start:        {}", mark.production_start.as_deref().unwrap_or("(none)"));
    println!("End:          {}", mark.production_end.as_deref().unwrap_or("(none)"));
}

fn print_model(model: &Model) {
    println!("[#{id}] {name}", id = model.id, name = model.name);
    println!("Mark:         {}", model.mark_id);
    println!("Status:       {}", model.status);
    println!("Start:        {}", model.production_start);
    println!("End:          {}", model.production_end);
    if let Some(ref desc) = model.description {
        println!("Description:  {desc}");
    }
}

/// Handle the find command
pub fn handle_find(
    db_path: &Path,
    table: &str,
    filters: &[String],
    json: bool,
) -> Result<(), AutosError> {
    let filter = Fields::parse(table.parse()?, filters)?;
    let db = Database::connect(db_path)?;
    let rows = db.select_where(&filter)?;
    db.close()?;

    print_rows(&rows, json)
}

/// Handle the update command
pub fn handle_update(
    db_path: &Path,
    table: &str,
    id: i64,
    changes: &[String],
) -> Result<(), AutosError> {
    let changes = Fields::parse(table.parse()?, changes)?;
    let db = Database::connect(db_path)?;
    let changed = db.update(id, &changes)?;
    db.close()?;

    if changed == 0 {
        println!("No row with id {id} in {}", changes.table());
    } else {
        println!("OK");
    }

    Ok(())
}

/// Handle the delete command
pub fn handle_delete(db_path: &Path, table: &str, filters: &[String]) -> Result<(), AutosError> {
    let filter = Fields::parse(table.parse()?, filters)?;
    let db = Database::connect(db_path)?;
    let deleted = db.delete_where(&filter)?;
    db.close()?;

    println!("Deleted {deleted} row(s)");

    Ok(())
}

/// Handle the clear command
pub fn handle_clear(db_path: &Path, table: &str) -> Result<(), AutosError> {
    let table: Table = table.parse()?;
    let db = Database::connect(db_path)?;
    let deleted = db.delete_all(table)?;
    db.close()?;

    println!("Deleted {deleted} row(s)");

    Ok(())
}

/// Handle the exec command
pub fn handle_exec(db_path: &Path, sql: &str) -> Result<(), AutosError> {
    let db = Database::connect(db_path)?;
    db.execute(sql)?;
    db.close()?;

    println!("OK");

    Ok(())
}

fn print_rows(rows: &[Row], json: bool) -> Result<(), AutosError> {
    if json {
        let values = rows.iter().map(Row::to_json).collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    for row in rows {
        println!("{}", row.to_tuple_string());
    }

    Ok(())
}
