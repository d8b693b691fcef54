//! The per-kind rendering contract.

use ormgen_model::{Model, Node};

use crate::generator::Generator;
use crate::RenderError;

/// Renders one model node into text.
///
/// A view is installed for exactly one [`Kind`](ormgen_model::Kind) and only ever receives
/// models of that kind. It may call back into the generator to render
/// children (in whatever order it wants, interleaved with literal text) and
/// to look up enclosing nodes with [`Generator::last_of_kind`].
///
/// Views are shared between generators, so they hold no per-generation
/// state.
pub trait View: Send + Sync {
    /// Renders `model`.
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError>;
}

/// Adapts a closure into a [`View`].
pub struct FnView<F>(pub F);

impl<F> View for FnView<F>
where
    F: for<'m> Fn(&mut Generator<'m>, Model<'m>) -> Result<String, RenderError> + Send + Sync,
{
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        (self.0)(generator, model)
    }
}

/// Downcasts the model a view was handed to the node type it renders.
///
/// Fails with [`RenderError::InvalidModel`] when the view was installed for
/// a kind it cannot render.
pub fn node<'m, T: Node>(model: Model<'m>) -> Result<&'m T, RenderError> {
    model.downcast::<T>().ok_or_else(|| {
        RenderError::invalid(
            model.kind(),
            format!("view for {} received a {} model", T::KIND, model.kind()),
        )
    })
}
