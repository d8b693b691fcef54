//! The project document tree and utilities for walking it.
//!
//! Documents are plain serde structs owned by their parent. Code that needs
//! to look upwards (a column's table, a table's schema) works on a
//! [`DocumentPath`], which pairs a borrowed document with its ancestor chain.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::naming;
use crate::{Result, SchemaError};

fn enabled() -> bool {
    true
}

/// Root of a project file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Base package of the generated code.
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub dbmses: Vec<Dbms>,
}

impl Project {
    /// Parses a project from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a project file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Paths of every table that is enabled along with all its ancestors.
    pub fn enabled_tables(&self) -> Vec<DocumentPath<'_>> {
        traverse(self)
            .into_iter()
            .filter(|path| path.document().kind() == DocumentKind::Table && path.is_enabled())
            .collect()
    }
}

/// A database management system instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dbms {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Dialect name, e.g. `MySQL` or `PostgreSQL`.
    pub type_name: String,
    #[serde(default)]
    pub schemas: Vec<Schema>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub primary_key_columns: Vec<PrimaryKeyColumn>,
}

impl Table {
    /// Looks up a column by its database name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns true if `column` is part of the primary key.
    pub fn is_primary_key(&self, column: &Column) -> bool {
        self.primary_key_columns.iter().any(|pk| pk.name == column.name)
    }

    /// Resolves the primary key references to columns, in key order.
    pub fn primary_key(&self) -> Result<Vec<&Column>> {
        self.primary_key_columns
            .iter()
            .map(|pk| {
                self.column(&pk.name).ok_or_else(|| SchemaError::UnknownColumn {
                    table: self.name.clone(),
                    column: pk.name.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// SQL type name as reported by the database, e.g. `VARCHAR`.
    pub database_type: String,
    #[serde(default = "enabled")]
    pub nullable: bool,
    #[serde(default)]
    pub auto_increment: bool,
}

/// A reference from a table's primary key to one of its columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKeyColumn {
    /// Name of the referenced column.
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "enabled")]
    pub enabled: bool,
}

/// The level of a document in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Project,
    Dbms,
    Schema,
    Table,
    Column,
    PrimaryKeyColumn,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Project => "project",
            DocumentKind::Dbms => "dbms",
            DocumentKind::Schema => "schema",
            DocumentKind::Table => "table",
            DocumentKind::Column => "column",
            DocumentKind::PrimaryKeyColumn => "primary key column",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed reference to a document of any level.
#[derive(Debug, Clone, Copy)]
pub enum DocumentRef<'a> {
    Project(&'a Project),
    Dbms(&'a Dbms),
    Schema(&'a Schema),
    Table(&'a Table),
    Column(&'a Column),
    PrimaryKeyColumn(&'a PrimaryKeyColumn),
}

impl<'a> DocumentRef<'a> {
    pub fn kind(self) -> DocumentKind {
        match self {
            DocumentRef::Project(_) => DocumentKind::Project,
            DocumentRef::Dbms(_) => DocumentKind::Dbms,
            DocumentRef::Schema(_) => DocumentKind::Schema,
            DocumentRef::Table(_) => DocumentKind::Table,
            DocumentRef::Column(_) => DocumentKind::Column,
            DocumentRef::PrimaryKeyColumn(_) => DocumentKind::PrimaryKeyColumn,
        }
    }

    /// The database name.
    pub fn name(self) -> &'a str {
        match self {
            DocumentRef::Project(d) => &d.name,
            DocumentRef::Dbms(d) => &d.name,
            DocumentRef::Schema(d) => &d.name,
            DocumentRef::Table(d) => &d.name,
            DocumentRef::Column(d) => &d.name,
            DocumentRef::PrimaryKeyColumn(d) => &d.name,
        }
    }

    pub fn alias(self) -> Option<&'a str> {
        let alias = match self {
            DocumentRef::Project(d) => &d.alias,
            DocumentRef::Dbms(d) => &d.alias,
            DocumentRef::Schema(d) => &d.alias,
            DocumentRef::Table(d) => &d.alias,
            DocumentRef::Column(d) => &d.alias,
            DocumentRef::PrimaryKeyColumn(d) => &d.alias,
        };
        alias.as_deref().filter(|a| !a.is_empty())
    }

    /// The alias if set, otherwise the database name converted to a Java
    /// identifier.
    pub fn java_name(self) -> String {
        match self.alias() {
            Some(alias) => alias.to_string(),
            None => naming::java_name(self.name()),
        }
    }

    pub fn is_enabled(self) -> bool {
        match self {
            DocumentRef::Project(d) => d.enabled,
            DocumentRef::Dbms(d) => d.enabled,
            DocumentRef::Schema(d) => d.enabled,
            DocumentRef::Table(d) => d.enabled,
            DocumentRef::Column(d) => d.enabled,
            DocumentRef::PrimaryKeyColumn(d) => d.enabled,
        }
    }

    /// Direct children, in document order. A table lists its columns
    /// before its primary key columns.
    pub fn children(self) -> Vec<DocumentRef<'a>> {
        match self {
            DocumentRef::Project(d) => d.dbmses.iter().map(DocumentRef::Dbms).collect(),
            DocumentRef::Dbms(d) => d.schemas.iter().map(DocumentRef::Schema).collect(),
            DocumentRef::Schema(d) => d.tables.iter().map(DocumentRef::Table).collect(),
            DocumentRef::Table(d) => d
                .columns
                .iter()
                .map(DocumentRef::Column)
                .chain(d.primary_key_columns.iter().map(DocumentRef::PrimaryKeyColumn))
                .collect(),
            DocumentRef::Column(_) | DocumentRef::PrimaryKeyColumn(_) => vec![],
        }
    }
}

impl fmt::Display for DocumentRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind(), self.name())
    }
}

/// A document together with the chain of documents above it.
#[derive(Debug, Clone)]
pub struct DocumentPath<'a> {
    /// Root first, parent last.
    ancestors: Vec<DocumentRef<'a>>,
    document: DocumentRef<'a>,
}

impl<'a> DocumentPath<'a> {
    /// The path of the project itself.
    pub fn root(project: &'a Project) -> Self {
        Self {
            ancestors: vec![],
            document: DocumentRef::Project(project),
        }
    }

    /// Extends this path by one of the document's children.
    pub fn child(&self, child: DocumentRef<'a>) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(self.document);
        Self {
            ancestors,
            document: child,
        }
    }

    pub fn document(&self) -> DocumentRef<'a> {
        self.document
    }

    pub fn parent(&self) -> Option<DocumentRef<'a>> {
        self.ancestors.last().copied()
    }

    /// Every ancestor, root first.
    pub fn ancestors(&self) -> &[DocumentRef<'a>] {
        &self.ancestors
    }

    /// The nearest ancestor of the given level.
    pub fn ancestor(&self, kind: DocumentKind) -> Option<DocumentRef<'a>> {
        self.ancestors.iter().rev().find(|d| d.kind() == kind).copied()
    }

    /// Returns true if the document and all of its ancestors are enabled.
    pub fn is_enabled(&self) -> bool {
        self.document.is_enabled() && self.ancestors.iter().all(|d| d.is_enabled())
    }
}

/// Walks the whole project depth first, parents before children.
pub fn traverse(project: &Project) -> Vec<DocumentPath<'_>> {
    let mut paths = Vec::new();
    let mut stack = vec![DocumentPath::root(project)];

    while let Some(path) = stack.pop() {
        let children = path.document().children();
        // Reversed so the first child is popped first.
        for child in children.into_iter().rev() {
            stack.push(path.child(child));
        }
        paths.push(path);
    }
    paths
}

/// Which name of a document to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Name {
    /// The name as stored in the database.
    Database,
    /// The alias, or the Java form of the database name.
    Java,
}

impl Name {
    pub fn of(self, document: DocumentRef<'_>) -> String {
        match self {
            Name::Database => document.name().to_string(),
            Name::Java => document.java_name(),
        }
    }
}

/// Joins the names of a document and its ancestors, starting at the first
/// ancestor of level `from`.
///
/// Every name goes through `mapper` before joining. If no ancestor has
/// level `from`, only the document's own name is used.
pub fn relative_name(
    path: &DocumentPath<'_>,
    from: DocumentKind,
    name: Name,
    separator: &str,
    mapper: impl Fn(&str) -> String,
) -> String {
    let start = path.ancestors().iter().position(|d| d.kind() == from);

    let mut parts: Vec<String> = match start {
        Some(start) => path.ancestors()[start..]
            .iter()
            .map(|d| mapper(&name.of(*d)))
            .collect(),
        None => vec![],
    };
    parts.push(mapper(&name.of(path.document())));
    parts.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = r#"{
        "name": "shop",
        "package": "com.example",
        "dbmses": [{
            "name": "main",
            "typeName": "MySQL",
            "schemas": [{
                "name": "sales",
                "tables": [
                    {
                        "name": "order_line",
                        "columns": [
                            { "name": "id", "databaseType": "BIGINT", "nullable": false, "autoIncrement": true },
                            { "name": "product_name", "databaseType": "VARCHAR", "alias": "product" }
                        ],
                        "primaryKeyColumns": [{ "name": "id" }]
                    },
                    { "name": "audit", "enabled": false }
                ]
            }]
        }]
    }"#;

    fn project() -> Project {
        Project::from_json(PROJECT).unwrap()
    }

    #[test]
    fn test_from_json_defaults() {
        let project = project();
        let table = &project.dbmses[0].schemas[0].tables[0];
        assert!(project.enabled);
        assert_eq!(project.package.as_deref(), Some("com.example"));
        assert!(!table.columns[0].nullable);
        assert!(table.columns[0].auto_increment);
        assert!(table.columns[1].nullable);
        assert!(!table.columns[1].auto_increment);
    }

    #[test]
    fn test_from_json_rejects_missing_type() {
        let err = Project::from_json(r#"{ "name": "x", "dbmses": [{ "name": "db" }] }"#).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_traverse_is_pre_order() {
        let project = project();
        let names: Vec<String> = traverse(&project)
            .iter()
            .map(|path| path.document().to_string())
            .collect();

        assert_eq!(
            names,
            [
                "project 'shop'",
                "dbms 'main'",
                "schema 'sales'",
                "table 'order_line'",
                "column 'id'",
                "column 'product_name'",
                "primary key column 'id'",
                "table 'audit'",
            ]
        );
    }

    #[test]
    fn test_path_ancestors() {
        let project = project();
        let paths = traverse(&project);
        let column = paths
            .iter()
            .find(|p| p.document().name() == "product_name")
            .unwrap();

        assert_eq!(column.parent().map(|d| d.name()), Some("order_line"));
        assert_eq!(column.ancestors().len(), 4);
        assert_eq!(column.ancestor(DocumentKind::Schema).map(|d| d.name()), Some("sales"));
        assert!(column.ancestor(DocumentKind::Column).is_none());
        assert_eq!(column.document().java_name(), "product");
    }

    #[test]
    fn test_enabled_tables_skip_disabled() {
        let project = project();
        let tables: Vec<&str> = project
            .enabled_tables()
            .iter()
            .map(|p| p.document().name())
            .collect();
        assert_eq!(tables, ["order_line"]);
    }

    #[test]
    fn test_relative_name() {
        let project = project();
        let paths = traverse(&project);
        let column = paths.iter().find(|p| p.document().name() == "id").unwrap();

        assert_eq!(
            relative_name(column, DocumentKind::Schema, Name::Database, ".", str::to_string),
            "sales.order_line.id"
        );
        assert_eq!(
            relative_name(column, DocumentKind::Table, Name::Java, "/", |s| s.to_uppercase()),
            "ORDERLINE/ID"
        );
        // No ancestor of that level: own name only.
        assert_eq!(
            relative_name(column, DocumentKind::Column, Name::Database, ".", str::to_string),
            "id"
        );
    }

    #[test]
    fn test_primary_key_resolution() {
        let mut table = project().dbmses[0].schemas[0].tables[0].clone();
        let keys: Vec<&str> = table.primary_key().unwrap().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(keys, ["id"]);
        assert!(table.is_primary_key(&table.columns[0]));
        assert!(!table.is_primary_key(&table.columns[1]));

        table.primary_key_columns.push(PrimaryKeyColumn {
            name: "missing".to_string(),
            alias: None,
            enabled: true,
        });
        let err = table.primary_key().unwrap_err();
        assert_eq!(
            err.to_string(),
            "table 'order_line' has a primary key on unknown column 'missing'"
        );
    }

    #[test]
    fn test_clone_is_deep() {
        let original = project();
        let mut copy = original.clone();
        copy.dbmses[0].schemas[0].tables[0].name = "renamed".to_string();
        assert_eq!(original.dbmses[0].schemas[0].tables[0].name, "order_line");
    }
}
