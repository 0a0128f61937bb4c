//! Static table definitions and create-if-absent DDL.
//! `user` is declared so the store layout matches, but nothing reads or writes it.

use crate::error::AppError;
use sqlx::PgPool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Serial,
    Integer,
    Text,
    Boolean,
}

impl ColumnKind {
    /// Type used in CREATE TABLE.
    pub fn ddl(self) -> &'static str {
        match self {
            ColumnKind::Serial => "SERIAL",
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Text => "VARCHAR",
            ColumnKind::Boolean => "BOOLEAN",
        }
    }

    /// Type used for `$n::type` casts on bound parameters.
    pub fn cast(self) -> &'static str {
        match self {
            ColumnKind::Serial | ColumnKind::Integer => "integer",
            ColumnKind::Text => "varchar",
            ColumnKind::Boolean => "boolean",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub default: Option<&'static str>,
    pub primary_key: bool,
}

const fn col(name: &'static str, kind: ColumnKind, nullable: bool) -> ColumnDef {
    ColumnDef {
        name,
        kind,
        nullable,
        default: None,
        primary_key: false,
    }
}

const fn pk(name: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        kind: ColumnKind::Serial,
        nullable: false,
        default: None,
        primary_key: true,
    }
}

const fn flag(name: &'static str, default: &'static str) -> ColumnDef {
    ColumnDef {
        name,
        kind: ColumnKind::Boolean,
        nullable: false,
        default: Some(default),
        primary_key: false,
    }
}

#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

pub static PRODUCTS: TableDef = TableDef {
    name: "products",
    columns: &[
        pk("id"),
        col("product_name", ColumnKind::Text, false),
        col("price", ColumnKind::Integer, false),
        col("description", ColumnKind::Text, true),
        col("in_stock", ColumnKind::Boolean, false),
        col("image_url", ColumnKind::Text, true),
    ],
};

pub static USER: TableDef = TableDef {
    name: "user",
    columns: &[
        pk("id"),
        col("username", ColumnKind::Text, false),
        col("hashed_password", ColumnKind::Text, false),
        col("email", ColumnKind::Text, false),
        flag("is_active", "true"),
        flag("is_verified", "false"),
        flag("is_superuser", "false"),
    ],
};

pub static ALL_TABLES: &[&TableDef] = &[&PRODUCTS, &USER];

/// Quote identifier for PostgreSQL (safe: only from static definitions).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Single-column primary key. Every static table has exactly one.
    pub fn primary_key(&self) -> &ColumnDef {
        self.columns
            .iter()
            .find(|c| c.primary_key)
            .unwrap_or(&self.columns[0])
    }

    pub fn create_table_sql(&self) -> String {
        let mut defs: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let mut def = format!("{} {}", quoted(c.name), c.kind.ddl());
                if !c.nullable {
                    def.push_str(" NOT NULL");
                }
                if let Some(d) = c.default {
                    def.push_str(" DEFAULT ");
                    def.push_str(d);
                }
                def
            })
            .collect();
        defs.push(format!("PRIMARY KEY ({})", quoted(self.primary_key().name)));
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quoted(self.name),
            defs.join(", ")
        )
    }
}

/// Create every declared table that does not exist yet. Existing tables are left untouched.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for table in ALL_TABLES {
        let ddl = table.create_table_sql();
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
        tracing::info!(table = table.name, "table ensured");
    }
    Ok(())
}
