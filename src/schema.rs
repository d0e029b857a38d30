//! Table and column allow-list.
//!
//! Only names that appear here are ever written into statement text; values
//! always travel as bound parameters.

use crate::error::{AutosError, Result};
use crate::models::check_model_value;
use rusqlite::types::Value;
use std::fmt;
use std::str::FromStr;

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
}

/// A known column of a known table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn int(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::Integer,
    }
}

const fn text(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::Text,
    }
}

const AUTOS_COLUMNS: &[Column] = &[int("id"), text("nazwa"), text("start_prod"), text("end_prod")];

const MODELS_COLUMNS: &[Column] = &[
    int("id"),
    int("marka_id"),
    text("nazwa"),
    text("opis"),
    text("status"),
    text("start_prod"),
    text("end_prod"),
];

pub const CREATE_AUTOS_SQL: &str = "CREATE TABLE IF NOT EXISTS autos (
    id integer PRIMARY KEY,
    nazwa text NOT NULL,
    start_prod text,
    end_prod text
)";

pub const CREATE_MODELS_SQL: &str = "CREATE TABLE IF NOT EXISTS models (
    id integer PRIMARY KEY,
    marka_id integer NOT NULL,
    nazwa VARCHAR(250) NOT NULL,
    opis TEXT,
    status VARCHAR(15) NOT NULL,
    start_prod text NOT NULL,
    end_prod text NOT NULL,
    FOREIGN KEY (marka_id) REFERENCES autos (id)
)";

/// The two catalogue tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// Marks (manufacturers)
    Autos,
    /// Models, each belonging to a mark
    Models,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Autos => "autos",
            Table::Models => "models",
        }
    }

    /// Columns in storage order
    pub fn columns(&self) -> &'static [Column] {
        match self {
            Table::Autos => AUTOS_COLUMNS,
            Table::Models => MODELS_COLUMNS,
        }
    }

    /// Look up a column by name, rejecting anything outside the allow-list
    pub fn column(&self, name: &str) -> Result<Column> {
        self.columns()
            .iter()
            .copied()
            .find(|c| c.name == name)
            .ok_or_else(|| AutosError::UnknownColumn {
                table: self.as_str(),
                column: name.to_string(),
            })
    }

    /// Comma separated column list for SELECT statements
    pub fn column_list(&self) -> String {
        self.columns()
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Table {
    type Err = AutosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "autos" => Ok(Table::Autos),
            "models" => Ok(Table::Models),
            _ => Err(AutosError::UnknownTable(s.to_string())),
        }
    }
}

/// Ordered `column = value` pairs bound to one table.
///
/// Used both as an equality predicate (joined with `AND`) and as the
/// assignment list of an UPDATE (joined with `, `).
#[derive(Debug, Clone, PartialEq)]
pub struct Fields {
    table: Table,
    pairs: Vec<(Column, Value)>,
}

impl Fields {
    pub fn new(table: Table) -> Self {
        Fields {
            table,
            pairs: Vec::new(),
        }
    }

    /// Add a pair, builder style
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Result<Self> {
        self.push(column, value)?;
        Ok(self)
    }

    pub fn push(&mut self, column: &str, value: impl Into<Value>) -> Result<()> {
        let column = self.table.column(column)?;
        let value = value.into();
        check_kind(column, &value)?;
        self.pairs.push((column, value));
        Ok(())
    }

    /// Parse `col=value`, typing the value by the column's kind.
    /// The literal `NULL` binds SQL NULL.
    pub fn push_pair(&mut self, pair: &str) -> Result<()> {
        let (name, raw) = pair
            .split_once('=')
            .ok_or_else(|| AutosError::InvalidValue {
                column: pair.to_string(),
                reason: "expected column=value".to_string(),
            })?;
        let column = self.table.column(name.trim())?;
        let value = parse_value(column, raw)?;
        self.pairs.push((column, value));
        Ok(())
    }

    /// Build from a list of `col=value` strings
    pub fn parse<S: AsRef<str>>(table: Table, pairs: &[S]) -> Result<Self> {
        let mut fields = Fields::new(table);
        for pair in pairs {
            fields.push_pair(pair.as_ref())?;
        }
        Ok(fields)
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.pairs.iter().any(|(c, _)| c.name == column)
    }

    /// Apply the per-column value rules of the table, as inserts do
    pub fn validate(&self) -> Result<()> {
        if self.table == Table::Models {
            for (column, value) in &self.pairs {
                check_model_value(column.name, value)?;
            }
        }
        Ok(())
    }

    /// `c1 = ?1 AND c2 = ?2`
    pub fn predicate_sql(&self) -> String {
        self.placeholders(" AND ")
    }

    /// `c1 = ?1, c2 = ?2`
    pub fn assignment_sql(&self) -> String {
        self.placeholders(", ")
    }

    /// Values in the same order as the placeholders
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.pairs.iter().map(|(_, v)| v)
    }

    fn placeholders(&self, separator: &str) -> String {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, (c, _))| format!("{} = ?{}", c.name, i + 1))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

fn check_kind(column: Column, value: &Value) -> Result<()> {
    match (column.kind, value) {
        (_, Value::Null) => Ok(()),
        (ColumnKind::Integer, Value::Integer(_)) => Ok(()),
        (ColumnKind::Text, Value::Text(_)) => Ok(()),
        (kind, other) => Err(AutosError::InvalidValue {
            column: column.name.to_string(),
            reason: format!("expected {kind:?}, got {:?}", other.data_type()),
        }),
    }
}

fn parse_value(column: Column, raw: &str) -> Result<Value> {
    if raw == "NULL" {
        return Ok(Value::Null);
    }
    match column.kind {
        ColumnKind::Text => Ok(Value::Text(raw.to_string())),
        ColumnKind::Integer => {
            raw.trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| AutosError::InvalidValue {
                    column: column.name.to_string(),
                    reason: e.to_string(),
                })
        }
    }
}
