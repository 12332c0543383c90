//! Declarative table and column descriptors.
//!
//! The schema registry holds an explicit, ordered list of structural
//! definitions, resolved once at connect time and consumed by the additive
//! sync pass in `db::migrations`. Table names are used verbatim and are
//! singular by convention (`user`, not `users`).

/// Column data types, rendered to SQLite DDL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    BigInt,
    Real,
    Text,
    Boolean,
    Timestamp,
    Blob,
    Json,
}

impl ColumnType {
    /// DDL type name for this column type
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Timestamp => "TIMESTAMP",
            // JSON is stored as text in SQLite
            ColumnType::Json => "TEXT",
            ColumnType::Blob => "BLOB",
        }
    }
}

/// A single column definition
///
/// Columns are NOT NULL unless marked [`nullable`](ColumnDef::nullable).
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub indexed: bool,
    pub default: Option<String>,
}

impl ColumnDef {
    /// Creates a non-null column of the given type
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            primary_key: false,
            auto_increment: false,
            unique: false,
            indexed: false,
            default: None,
        }
    }

    /// Creates an auto-incrementing integer primary key column
    pub fn primary_key(name: impl Into<String>) -> Self {
        let mut col = Self::new(name, ColumnType::Integer);
        col.primary_key = true;
        col.auto_increment = true;
        col
    }

    /// Marks the column as accepting NULL
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Adds a UNIQUE constraint
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Requests a secondary index on this column
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Sets a literal DEFAULT expression (e.g. `CURRENT_TIMESTAMP`, `0`)
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// Column fragment for CREATE TABLE
    pub(crate) fn sql(&self) -> String {
        let mut fragment = format!("{} {}", self.name, self.ty.sql_type());
        if self.primary_key {
            fragment.push_str(" PRIMARY KEY");
            if self.auto_increment {
                fragment.push_str(" AUTOINCREMENT");
            }
        } else if !self.nullable {
            fragment.push_str(" NOT NULL");
        }
        if self.unique && !self.primary_key {
            fragment.push_str(" UNIQUE");
        }
        if let Some(default) = &self.default {
            fragment.push_str(" DEFAULT ");
            fragment.push_str(default);
        }
        fragment
    }

    /// Column fragment for ALTER TABLE ADD COLUMN
    ///
    /// SQLite cannot add PRIMARY KEY or UNIQUE columns to an existing
    /// table, and rejects non-constant defaults (CURRENT_TIMESTAMP and
    /// friends) in ADD COLUMN; those qualifiers are omitted here. A column
    /// whose default was dropped is added nullable so existing rows stay
    /// valid.
    pub(crate) fn sql_for_alter(&self) -> String {
        let mut fragment = format!("{} {}", self.name, self.ty.sql_type());
        let addable_default = self
            .default
            .as_deref()
            .filter(|d| !matches!(*d, "CURRENT_TIME" | "CURRENT_DATE" | "CURRENT_TIMESTAMP"));
        if !self.nullable && addable_default.is_some() {
            fragment.push_str(" NOT NULL");
        }
        if let Some(default) = addable_default {
            fragment.push_str(" DEFAULT ");
            fragment.push_str(default);
        }
        fragment
    }
}

/// An ordered table definition: a singular table name plus its columns
#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Creates an empty table definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Creates a table definition pre-populated with the base record
    /// columns (`id`, `created_at`, `updated_at`, `deleted_at`)
    pub fn with_base_columns(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: base_columns(),
        }
    }

    /// Appends a column (builder style)
    pub fn column(mut self, col: ColumnDef) -> Self {
        self.columns.push(col);
        self
    }

    /// CREATE TABLE IF NOT EXISTS statement for this definition
    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| c.sql()).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            columns.join(", ")
        )
    }

    /// ALTER TABLE statement adding a single column
    pub fn add_column_sql(&self, col: &ColumnDef) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.name,
            col.sql_for_alter()
        )
    }

    /// CREATE INDEX IF NOT EXISTS statement for an indexed column
    pub fn create_index_sql(&self, col: &ColumnDef) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_{col} ON {table} ({col})",
            table = self.name,
            col = col.name
        )
    }
}

/// The base embedded column set shared by persisted entities:
/// integer primary key, creation and update timestamps, and a nullable,
/// indexed soft-delete timestamp.
pub fn base_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::primary_key("id"),
        ColumnDef::new("created_at", ColumnType::Timestamp).default_value("CURRENT_TIMESTAMP"),
        ColumnDef::new("updated_at", ColumnType::Timestamp).default_value("CURRENT_TIMESTAMP"),
        ColumnDef::new("deleted_at", ColumnType::Timestamp)
            .nullable()
            .indexed(),
    ]
}

/// Ordered, append-only collection of table definitions
///
/// Registration performs no validation and does not deduplicate; the sync
/// pass tolerates duplicates through IF NOT EXISTS semantics.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: Vec<TableDef>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a table definition
    pub fn register(&mut self, table: TableDef) {
        self.tables.push(table);
    }

    /// Appends several table definitions in order
    pub fn register_all<I>(&mut self, tables: I)
    where
        I: IntoIterator<Item = TableDef>,
    {
        self.tables.extend(tables);
    }

    /// Registered tables, in registration order
    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
