//! Schema documents for ormgen.
//!
//! A project file describes the databases to generate entities for as a tree
//! `Project > Dbms > Schema > Table > Column`. This crate loads that tree
//! from JSON ([`document`]) and knows how each database dialect spells
//! qualified and quoted names ([`naming`]).

pub mod document;
pub mod naming;

pub use document::{
    relative_name, traverse, Column, Dbms, DocumentKind, DocumentPath, DocumentRef, Name,
    PrimaryKeyColumn, Project, Schema, Table,
};
pub use naming::{
    dialect, java_name, java_type_name, DatabaseNamingConvention, MySqlNamingConvention,
    PostgresNamingConvention,
};

use thiserror::Error;

/// Errors raised while loading or interpreting a schema document.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("invalid project document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("can't create full name of {0} since it doesn't have a parent")]
    NoParent(String),

    #[error("table '{table}' has a primary key on unknown column '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error("unknown database dialect: {0}")]
    UnknownDialect(String),
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
