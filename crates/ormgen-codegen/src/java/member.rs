//! Views for fields and methods.

use ormgen_model::{Field, Kind, Method, Model};

use super::{indent, modifiers, preamble};
use crate::generator::Generator;
use crate::view::{node, View};
use crate::RenderError;

/// `private Type name = value`, without the trailing `;`.
///
/// When the field is a parameter of the method being rendered, its
/// annotations stay on the same line and its javadoc is dropped.
pub struct FieldView;

impl View for FieldView {
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let field = node::<Field>(model)?;
        if field.name.is_empty() {
            return Err(RenderError::invalid(Kind::Field, "field has no name"));
        }

        let is_param = generator
            .last::<Method>()
            .map(|method| method.params.iter().any(|p| std::ptr::eq(p, field)))
            .unwrap_or(false);

        let mut text = if is_param {
            let mut inline = String::new();
            for annotation in &field.annotations {
                let text = generator.render(annotation)?;
                if !text.is_empty() {
                    inline.push_str(&text);
                    inline.push(' ');
                }
            }
            inline
        } else {
            preamble(generator, field.javadoc.as_ref(), &field.annotations)?
        };

        text.push_str(&modifiers(&field.modifiers));
        text.push_str(&generator.render(&field.ty)?);
        text.push(' ');
        text.push_str(&field.name);
        if let Some(value) = &field.value {
            text.push_str(" = ");
            text.push_str(&generator.render(value)?);
        }
        Ok(text)
    }
}

/// Methods and constructors.
///
/// A constructor is named after the nearest enclosing class or enum. A
/// method without a body renders as a declaration ending in `;`.
pub struct MethodView;

impl View for MethodView {
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let method = node::<Method>(model)?;

        let mut text = preamble(generator, method.javadoc.as_ref(), &method.annotations)?;
        text.push_str(&modifiers(&method.modifiers));

        if method.is_constructor {
            let owner = generator.last_of_any(&Kind::DECLARATIONS)?;
            text.push_str(owner.name().unwrap_or_default());
        } else {
            if method.name.is_empty() {
                return Err(RenderError::invalid(Kind::Method, "method has no name"));
            }
            text.push_str(&generator.render(&method.return_type)?);
            text.push(' ');
            text.push_str(&method.name);
        }

        text.push('(');
        text.push_str(&generator.render_all(&method.params, ", ")?);
        text.push(')');

        if !method.throws.is_empty() {
            text.push_str(" throws ");
            text.push_str(&generator.render_all(&method.throws, ", ")?);
        }

        match &method.body {
            None => text.push(';'),
            Some(lines) if lines.is_empty() => text.push_str(" {}"),
            Some(lines) => {
                text.push_str(" {\n");
                text.push_str(&indent(&lines.join("\n")));
                text.push_str("\n}");
            }
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::registry::ViewRegistryBuilder;
    use ormgen_model::{Annotation, Class, Javadoc, Modifier, Type, Value};

    fn generator<'m>() -> Generator<'m> {
        Generator::new(Arc::new(ViewRegistryBuilder::java().build().unwrap()))
    }

    #[test]
    fn test_field_with_initializer() {
        let field = Field::new("MAX", Type::new("int"))
            .with_modifier(Modifier::Final)
            .with_modifier(Modifier::Static)
            .with_modifier(Modifier::Public)
            .with_value(Value::Integer(10));

        assert_eq!(generator().render(&field).unwrap(), "public static final int MAX = 10");
    }

    #[test]
    fn test_field_preamble() {
        let field = Field::new("id", Type::new("java.lang.Long"))
            .with_javadoc(Javadoc::new("The key."))
            .with_annotation(Annotation::new("Id"));

        assert_eq!(
            generator().render(&field).unwrap(),
            "/**\n * The key.\n */\n@Id\nLong id"
        );
    }

    #[test]
    fn test_parameter_annotations_inline() {
        let method = Method::new("find", Type::new("User"))
            .with_param(
                Field::new("id", Type::new("long"))
                    .with_annotation(Annotation::new("NotNull"))
                    .with_javadoc(Javadoc::new("ignored")),
            )
            .without_body();

        assert_eq!(generator().render(&method).unwrap(), "User find(@NotNull long id);");
    }

    #[test]
    fn test_method_throws_and_body() {
        let method = Method::new("close", Type::void())
            .with_modifier(Modifier::Public)
            .with_throws(Type::new("java.io.IOException"))
            .with_line("if (open) {")
            .with_line("    open = false;")
            .with_line("}");

        let expected = "\
public void close() throws IOException {
    if (open) {
        open = false;
    }
}";
        assert_eq!(generator().render(&method).unwrap(), expected);
    }

    #[test]
    fn test_empty_body() {
        let method = Method::new("noop", Type::void());
        assert_eq!(generator().render(&method).unwrap(), "void noop() {}");
    }

    #[test]
    fn test_constructor_takes_class_name() {
        let class = Class::new("User").with_constructor(Method::constructor().with_modifier(Modifier::Public));
        assert_eq!(
            generator().render(&class).unwrap(),
            "class User {\n    public User() {}\n}"
        );
    }

    #[test]
    fn test_constructor_outside_declaration_fails() {
        let constructor = Method::constructor();
        let mut generator = generator();
        let err = generator.render(&constructor).unwrap_err();
        assert!(matches!(err, RenderError::NoAncestorOfAny(_)));
        assert!(generator.is_idle());
    }
}
