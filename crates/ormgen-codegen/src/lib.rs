//! Code generation engine for ormgen.
//!
//! Generated source is described as a tree of [`ormgen_model`] nodes and
//! turned into text by a [`Generator`]:
//! 1. A [`ViewRegistryBuilder`] collects one [`View`] per model kind, starting
//!    from the default Java views and letting callers override any of them
//! 2. [`ViewRegistryBuilder::build`] freezes it into a total [`ViewRegistry`]
//! 3. [`Generator::render`] dispatches each node to its view, which renders
//!    children by calling back into the generator
//!
//! The [`entity`] module builds such trees from a schema document and is what
//! the CLI drives.
//!
//! # Example
//!
//! ```ignore
//! use ormgen_codegen::{Generator, ViewRegistryBuilder};
//! use ormgen_model::{Class, File, Kind};
//!
//! let file = File::new("User")
//!     .with_package("com.example")
//!     .with_declaration(Class::new("User"));
//!
//! let mut builder = ViewRegistryBuilder::java();
//! builder.install_fn(Kind::Javadoc, |_, _| Ok(String::new()));
//!
//! let mut generator = Generator::new(builder.build()?);
//! let source = generator.render(&file)?;
//! ```

use std::path::PathBuf;

use ormgen_model::Kind;
use ormgen_schema::{Project, SchemaError};
use thiserror::Error;

pub mod entity;
pub mod generator;
pub mod java;
pub mod registry;
pub mod view;

pub use entity::EntityGenerator;
pub use generator::Generator;
pub use registry::{ViewRegistry, ViewRegistryBuilder};
pub use view::{node, FnView, View};

/// Errors raised while building a view registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no view installed for kinds: {}", join_kinds(.0))]
    MissingViews(Vec<Kind>),
}

/// Errors raised while rendering a model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("no view registered for {0} models")]
    Dispatch(Kind),

    #[error("no {0} is being rendered")]
    NoAncestor(Kind),

    #[error("no {} is being rendered", join_kinds(.0))]
    NoAncestorOfAny(Vec<Kind>),

    #[error("invalid {kind} model: {message}")]
    InvalidModel { kind: Kind, message: String },

    #[error("naming error: {0}")]
    Naming(String),
}

impl RenderError {
    /// Creates an [`RenderError::InvalidModel`] error.
    pub fn invalid(kind: Kind, message: impl Into<String>) -> Self {
        RenderError::InvalidModel {
            kind,
            message: message.into(),
        }
    }
}

impl From<SchemaError> for RenderError {
    fn from(err: SchemaError) -> Self {
        RenderError::Naming(err.to_string())
    }
}

fn join_kinds(kinds: &[Kind]) -> String {
    kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("invalid option '{key}': {message}")]
    InvalidOption { key: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A generated file with its path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Relative path for the generated file.
    pub path: PathBuf,
    /// Content of the generated file.
    pub content: String,
}

impl GeneratedFile {
    /// Creates a new generated file.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Result of code generation.
#[derive(Debug, Clone, Default)]
pub struct GeneratedFiles {
    /// The generated files, in generation order.
    pub files: Vec<GeneratedFile>,
}

impl GeneratedFiles {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file to the result.
    pub fn add(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if nothing was generated.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Looks up a file by its relative path.
    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path.to_str() == Some(path))
    }

    /// Writes all files below `output_dir`, creating directories as needed.
    pub fn write_to(&self, output_dir: &std::path::Path) -> Result<(), std::io::Error> {
        for file in &self.files {
            validate_relative_path(&file.path)?;
            let path = output_dir.join(&file.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            tracing::debug!(path = %path.display(), bytes = file.content.len(), "writing file");
            std::fs::write(&path, &file.content)?;
        }
        Ok(())
    }
}

fn validate_relative_path(path: &std::path::Path) -> Result<(), std::io::Error> {
    use std::path::Component;

    if path.is_absolute() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("generated file path must be relative: {}", path.display()),
        ));
    }

    // Anything but plain names could escape `output_dir`.
    if !path.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("generated file path must be a normal relative path: {}", path.display()),
        ));
    }

    Ok(())
}

/// Turns a schema project into generated files.
pub trait CodeGenerator {
    /// Generates code for every enabled table of the project.
    fn generate(&self, project: &Project) -> Result<GeneratedFiles, CodegenError>;

    /// Returns the name of this generator.
    fn name(&self) -> &'static str;
}
