//! The rendering engine.
//!
//! A [`Generator`] dispatches every model to the view installed for its
//! kind. While a view runs, its model sits on top of the rendering context
//! for that kind, so nested views can ask for the nearest enclosing node of
//! any kind with [`Generator::last_of_kind`] instead of having it threaded
//! through every call.
//!
//! Contexts are pushed by [`Generator::render`] and popped by a guard that
//! runs on every exit path (normal return, `Err`, or unwinding), so a failed
//! generation leaves every context empty and the generator reusable.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use ormgen_model::{Kind, Model, Node};

use crate::registry::ViewRegistry;
use crate::RenderError;

/// One in-flight render.
#[derive(Debug, Clone, Copy)]
struct Entry<'m> {
    model: Model<'m>,
    /// Number of renders active (across all kinds) once this one started.
    depth: usize,
}

/// Renders model trees through a [`ViewRegistry`].
///
/// A generator holds the mutable per-kind rendering contexts of one
/// generation at a time. `render` takes `&mut self`, so two generations can
/// never interleave on the same instance; generate independent trees in
/// parallel with one generator each, sharing the registry.
pub struct Generator<'m> {
    registry: Arc<ViewRegistry>,
    contexts: [Vec<Entry<'m>>; Kind::COUNT],
    active: usize,
}

impl<'m> Generator<'m> {
    /// Creates a generator with an empty context for every kind.
    pub fn new(registry: impl Into<Arc<ViewRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            contexts: std::array::from_fn(|_| Vec::new()),
            active: 0,
        }
    }

    /// The registry this generator dispatches through.
    pub fn registry(&self) -> &Arc<ViewRegistry> {
        &self.registry
    }

    /// Renders `model` with the view installed for its kind.
    ///
    /// The model is on top of its kind's context for the duration of the
    /// view call. Nothing is cached; rendering the same model twice runs
    /// its view twice.
    pub fn render(&mut self, model: impl Into<Model<'m>>) -> Result<String, RenderError> {
        let model = model.into();
        let kind = model.kind();
        let registry = Arc::clone(&self.registry);
        let view = registry.get(kind).ok_or(RenderError::Dispatch(kind))?;

        let mut frame = self.enter(model);
        view.render(&mut frame, model)
    }

    /// Renders each model in order and joins the non-empty results with
    /// `separator`. Stops at the first error.
    pub fn render_all<I>(&mut self, models: I, separator: &str) -> Result<String, RenderError>
    where
        I: IntoIterator,
        I::Item: Into<Model<'m>>,
    {
        let mut parts = Vec::new();
        for model in models {
            let text = self.render(model)?;
            if !text.is_empty() {
                parts.push(text);
            }
        }
        Ok(parts.join(separator))
    }

    /// Returns the innermost model of `kind` currently being rendered.
    ///
    /// Called from a view of that same kind, this is the view's own model.
    /// Fails with [`RenderError::NoAncestor`] if no render of `kind` is
    /// active.
    pub fn last_of_kind(&self, kind: Kind) -> Result<Model<'m>, RenderError> {
        self.contexts[kind.index()]
            .last()
            .map(|entry| entry.model)
            .ok_or(RenderError::NoAncestor(kind))
    }

    /// Typed form of [`Generator::last_of_kind`].
    pub fn last<T: Node>(&self) -> Result<&'m T, RenderError> {
        let model = self.last_of_kind(T::KIND)?;
        model.downcast::<T>().ok_or_else(|| {
            RenderError::invalid(T::KIND, format!("context holds a {} model", model.kind()))
        })
    }

    /// Returns the innermost model being rendered whose kind is one of
    /// `kinds`.
    ///
    /// Contexts are kept per kind, so this compares the start depth of each
    /// context's top entry to find the nearest one.
    pub fn last_of_any(&self, kinds: &[Kind]) -> Result<Model<'m>, RenderError> {
        kinds
            .iter()
            .filter_map(|kind| self.contexts[kind.index()].last())
            .max_by_key(|entry| entry.depth)
            .map(|entry| entry.model)
            .ok_or_else(|| RenderError::NoAncestorOfAny(kinds.to_vec()))
    }

    /// Number of rendering contexts; always [`Kind::COUNT`].
    pub fn kind_count(&self) -> usize {
        self.contexts.len()
    }

    /// Number of renders of `kind` currently active.
    pub fn depth(&self, kind: Kind) -> usize {
        self.contexts[kind.index()].len()
    }

    /// Returns true if no render is active.
    pub fn is_idle(&self) -> bool {
        self.contexts.iter().all(Vec::is_empty)
    }

    fn enter(&mut self, model: Model<'m>) -> Frame<'_, 'm> {
        let kind = model.kind();
        self.active += 1;
        self.contexts[kind.index()].push(Entry {
            model,
            depth: self.active,
        });
        tracing::trace!(%kind, depth = self.active, "render");

        Frame {
            generator: self,
            kind,
        }
    }

    fn exit(&mut self, kind: Kind) {
        let popped = self.contexts[kind.index()].pop();
        debug_assert!(popped.is_some(), "unbalanced exit for {kind}");
        self.active = self.active.saturating_sub(1);
    }
}

/// Pops the context pushed by [`Generator::enter`] when dropped.
///
/// Derefs to the generator so the view can be handed `&mut Generator`
/// while the frame is alive.
struct Frame<'g, 'm> {
    generator: &'g mut Generator<'m>,
    kind: Kind,
}

impl Drop for Frame<'_, '_> {
    fn drop(&mut self) {
        self.generator.exit(self.kind);
    }
}

impl<'m> Deref for Frame<'_, 'm> {
    type Target = Generator<'m>;

    fn deref(&self) -> &Self::Target {
        self.generator
    }
}

impl DerefMut for Frame<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.generator
    }
}
