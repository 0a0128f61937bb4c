//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a table definition.

use crate::schema::{quoted, TableDef};
use crate::sql::SqlValue;

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

fn select_column_list(table: &TableDef) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Placeholder for parameter `n`, cast to the column's type when the column is known.
fn placeholder(table: &TableDef, column: &str, n: u32) -> String {
    table
        .column(column)
        .map(|c| format!("${}::{}", n, c.kind.cast()))
        .unwrap_or_else(|| format!("${}", n))
}

/// SELECT by primary key. Caller binds the id as sole param.
pub fn select_by_id(table: &TableDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = table.primary_key().name;
    let n = q.push_param(SqlValue::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(table),
        quoted(table.name),
        quoted(pk),
        placeholder(table, pk, n)
    );
    q
}

/// SELECT every row, ORDER BY pk. No LIMIT/OFFSET.
pub fn select_all(table: &TableDef) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(table),
        quoted(table.name),
        quoted(table.primary_key().name)
    );
    q
}

/// INSERT of exactly the given columns. The primary key and unknown columns are skipped
/// so the database assigns the id.
pub fn insert(table: &TableDef, values: &[(&str, SqlValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (name, val) in values {
        let Some(c) = table.column(name) else { continue };
        if c.primary_key {
            continue;
        }
        let n = q.push_param(val.clone());
        cols.push(quoted(c.name));
        placeholders.push(placeholder(table, c.name, n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(table.name),
        cols.join(", "),
        placeholders.join(", ")
    );
    q
}

/// UPDATE by id: SET only the given columns. Returns None when nothing would be set.
pub fn update(table: &TableDef, id: i32, values: &[(&str, SqlValue)]) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let pk = table.primary_key().name;
    let mut sets = Vec::new();
    for (name, val) in values {
        let Some(c) = table.column(name) else { continue };
        if c.primary_key {
            continue;
        }
        let n = q.push_param(val.clone());
        sets.push(format!("{} = {}", quoted(c.name), placeholder(table, c.name, n)));
    }
    if sets.is_empty() {
        return None;
    }
    let id_param = q.push_param(SqlValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        quoted(table.name),
        sets.join(", "),
        quoted(pk),
        placeholder(table, pk, id_param)
    );
    Some(q)
}

/// DELETE by id.
pub fn delete(table: &TableDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let pk = table.primary_key().name;
    let n = q.push_param(SqlValue::Int(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        quoted(table.name),
        quoted(pk),
        placeholder(table, pk, n)
    );
    q
}
