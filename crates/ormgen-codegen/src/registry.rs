//! View registry and its builder.
//!
//! Views are collected in a [`ViewRegistryBuilder`], where installing a view
//! for a kind that already has one replaces it. [`ViewRegistryBuilder::build`]
//! then checks that every [`Kind`] is covered and freezes the result into a
//! [`ViewRegistry`], which can be shared between generators.
//!
//! # Example
//!
//! ```ignore
//! use ormgen_codegen::registry::ViewRegistryBuilder;
//! use ormgen_codegen::Generator;
//! use ormgen_model::Kind;
//!
//! let mut builder = ViewRegistryBuilder::java();
//! builder.install_fn(Kind::Javadoc, |_, _| Ok(String::new()));
//! let registry = builder.build()?;
//!
//! let mut generator = Generator::new(registry);
//! let source = generator.render(&file)?;
//! ```

use std::fmt;
use std::sync::Arc;

use ormgen_model::{Kind, Model};

use crate::generator::Generator;
use crate::view::{FnView, View};
use crate::{java, RegistryError, RenderError};

/// Accumulates views per kind before they are frozen into a registry.
pub struct ViewRegistryBuilder {
    views: [Option<Arc<dyn View>>; Kind::COUNT],
    overridden: Vec<Kind>,
}

impl Default for ViewRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRegistryBuilder {
    /// Creates a builder with no views installed.
    pub fn new() -> Self {
        Self {
            views: std::array::from_fn(|_| None),
            overridden: vec![],
        }
    }

    /// Creates a builder with the default Java views installed for every kind.
    pub fn java() -> Self {
        let mut builder = Self::new();
        java::install_defaults(&mut builder);
        builder
    }

    /// Installs the view for `kind`, replacing any view installed before.
    ///
    /// Returns `&mut Self` for method chaining.
    pub fn install<V: View + 'static>(&mut self, kind: Kind, view: V) -> &mut Self {
        let slot = &mut self.views[kind.index()];
        if slot.is_some() {
            tracing::debug!(%kind, "replacing installed view");
            self.overridden.push(kind);
        }
        *slot = Some(Arc::new(view));
        self
    }

    /// Installs a closure as the view for `kind`.
    pub fn install_fn<F>(&mut self, kind: Kind, view: F) -> &mut Self
    where
        F: for<'m> Fn(&mut Generator<'m>, Model<'m>) -> Result<String, RenderError>
            + Send
            + Sync
            + 'static,
    {
        self.install(kind, FnView(view))
    }

    /// Returns true if a view is installed for `kind`.
    pub fn is_installed(&self, kind: Kind) -> bool {
        self.views[kind.index()].is_some()
    }

    /// Kinds whose view was replaced by a later install, in install order.
    ///
    /// Replacing a view is allowed; this is how callers notice an
    /// unintended double registration.
    pub fn overridden(&self) -> &[Kind] {
        &self.overridden
    }

    /// Freezes the installed views into a registry.
    ///
    /// Fails if any kind has no view, naming every missing kind.
    pub fn build(&self) -> Result<ViewRegistry, RegistryError> {
        let mut views = Vec::with_capacity(Kind::COUNT);
        let mut missing = Vec::new();

        for kind in Kind::ALL {
            match &self.views[kind.index()] {
                Some(view) => views.push(Arc::clone(view)),
                None => missing.push(kind),
            }
        }

        if !missing.is_empty() {
            return Err(RegistryError::MissingViews(missing));
        }

        Ok(ViewRegistry { views })
    }
}

/// An immutable, total mapping from kind to view.
pub struct ViewRegistry {
    /// Indexed by [`Kind::index`]; holds exactly one view per kind.
    views: Vec<Arc<dyn View>>,
}

impl ViewRegistry {
    /// Returns the view for `kind`.
    pub fn view_for(&self, kind: Kind) -> &dyn View {
        self.views[kind.index()].as_ref()
    }

    /// Returns the view for `kind`, or `None` if the registry has none.
    pub fn get(&self, kind: Kind) -> Option<&Arc<dyn View>> {
        self.views.get(kind.index())
    }

    /// Number of kinds covered.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Always false for a built registry.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("views", &self.views.len())
            .finish()
    }
}
