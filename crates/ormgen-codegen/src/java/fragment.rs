//! Views for the small pieces: annotations, javadoc, types and values.

use ormgen_model::{Annotation, Javadoc, Kind, Model, Type, Value};

use super::visible_name;
use crate::generator::Generator;
use crate::view::{node, View};
use crate::RenderError;

/// `@Name`, `@Name(value)` or `@Name(key = value, ...)`.
pub struct AnnotationView;

impl View for AnnotationView {
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let annotation = node::<Annotation>(model)?;
        let name = visible_name(generator, &annotation.name);
        if name.is_empty() {
            return Err(RenderError::invalid(Kind::Annotation, "annotation has no name"));
        }

        let mut args = Vec::new();
        match &annotation.value {
            Some(value) if annotation.params.is_empty() => {
                args.push(generator.render(value)?);
            }
            Some(value) => args.push(format!("value = {}", generator.render(value)?)),
            None => {}
        }
        for (key, value) in &annotation.params {
            args.push(format!("{key} = {}", generator.render(value)?));
        }

        if args.is_empty() {
            Ok(format!("@{name}"))
        } else {
            Ok(format!("@{name}({})", args.join(", ")))
        }
    }
}

/// A `/** ... */` block with the text first and tags after a blank line.
///
/// A `*/` inside the text is written as `*&#47;` so it cannot close the
/// comment.
pub struct JavadocView;

impl View for JavadocView {
    fn render<'m>(
        &self,
        _generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let javadoc = node::<Javadoc>(model)?;

        let mut lines: Vec<String> = javadoc
            .text
            .lines()
            .map(|line| close_safe(line.trim_end()))
            .collect();
        if !lines.is_empty() && !javadoc.tags.is_empty() {
            lines.push(String::new());
        }
        for tag in &javadoc.tags {
            lines.push(close_safe(format!("@{} {}", tag.name, tag.text).trim_end()));
        }

        let mut text = String::from("/**\n");
        for line in &lines {
            if line.is_empty() {
                text.push_str(" *\n");
            } else {
                text.push_str(" * ");
                text.push_str(line);
                text.push('\n');
            }
        }
        text.push_str(" */");
        Ok(text)
    }
}

fn close_safe(line: &str) -> String {
    line.replace("*/", "*&#47;")
}

/// Simple name plus generics and array brackets: `List<String>[]`.
///
/// Imports are the file's business. A type renders qualified only when a
/// declaration in scope shadows its simple name.
pub struct TypeView;

impl View for TypeView {
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let ty = node::<Type>(model)?;
        if ty.name.is_empty() {
            return Err(RenderError::invalid(Kind::Type, "type has no name"));
        }

        let mut text = visible_name(generator, &ty.name).to_string();
        if !ty.generics.is_empty() {
            text.push('<');
            text.push_str(&generator.render_all(&ty.generics, ", ")?);
            text.push('>');
        }
        for _ in 0..ty.array_dimension {
            text.push_str("[]");
        }
        Ok(text)
    }
}

/// Java literal for a value.
pub struct ValueView;

impl View for ValueView {
    fn render<'m>(
        &self,
        _generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let value = node::<Value>(model)?;
        match value {
            Value::Text(text) => Ok(quote(text)),
            Value::Integer(n) => Ok(n.to_string()),
            Value::Float(f) if f.is_finite() => Ok(format!("{f:?}")),
            Value::Float(f) => Err(RenderError::invalid(
                Kind::Value,
                format!("{f} has no literal form"),
            )),
            Value::Boolean(b) => Ok(b.to_string()),
            Value::Null => Ok("null".to_string()),
            Value::Reference(text) => Ok(text.clone()),
        }
    }
}

/// Quotes and escapes a string literal.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::registry::ViewRegistryBuilder;
    use ormgen_model::{Class, Field};

    fn generator<'m>() -> Generator<'m> {
        Generator::new(Arc::new(ViewRegistryBuilder::java().build().unwrap()))
    }

    #[test]
    fn test_annotation_forms() {
        let mut generator = generator();

        let marker = Annotation::new("javax.persistence.Id");
        assert_eq!(generator.render(&marker).unwrap(), "@Id");

        let single = Annotation::new("SuppressWarnings").with_value(Value::text("unchecked"));
        assert_eq!(generator.render(&single).unwrap(), "@SuppressWarnings(\"unchecked\")");

        let named = Annotation::new("Column")
            .with_param("name", Value::text("id"))
            .with_param("nullable", Value::Boolean(false));
        assert_eq!(
            generator.render(&named).unwrap(),
            "@Column(name = \"id\", nullable = false)"
        );

        let both = Annotation::new("Size").with_value(Value::Integer(1)).with_param("max", Value::Integer(9));
        assert_eq!(generator.render(&both).unwrap(), "@Size(value = 1, max = 9)");
    }

    #[test]
    fn test_javadoc_with_tags() {
        let javadoc = Javadoc::new("Finds a user.\n\nReturns null when absent.")
            .with_tag("param", "id the key")
            .with_tag("return", "the user");

        let expected = "\
/**
 * Finds a user.
 *
 * Returns null when absent.
 *
 * @param id the key
 * @return the user
 */";
        assert_eq!(generator().render(&javadoc).unwrap(), expected);
    }

    #[test]
    fn test_javadoc_cannot_close_early() {
        let javadoc = Javadoc::new("Maps the a*/b table.").with_tag("see", "*/");
        assert_eq!(
            generator().render(&javadoc).unwrap(),
            "/**\n * Maps the a*&#47;b table.\n *\n * @see *&#47;\n */"
        );
    }

    #[test]
    fn test_shadowed_names_stay_qualified() {
        let class = Class::new("Timestamp")
            .with_annotation(Annotation::new("javax.persistence.Entity"))
            .with_field(
                Field::new("at", Type::new("java.sql.Timestamp"))
                    .with_annotation(Annotation::new("com.example.Timestamp")),
            );

        assert_eq!(
            generator().render(&class).unwrap(),
            "@Entity\nclass Timestamp {\n    @com.example.Timestamp\n    java.sql.Timestamp at;\n}"
        );
    }

    #[test]
    fn test_type_rendering() {
        let ty = Type::new("java.util.Map")
            .with_generic(Type::new("java.lang.String"))
            .with_generic(Type::new("java.util.List").with_generic(Type::new("Integer")));
        assert_eq!(generator().render(&ty).unwrap(), "Map<String, List<Integer>>");

        let bytes = Type::new("byte").array().array();
        assert_eq!(generator().render(&bytes).unwrap(), "byte[][]");
    }

    #[test]
    fn test_value_literals() {
        assert_eq!(generator().render(&Value::text("a \"b\"\n")).unwrap(), "\"a \\\"b\\\"\\n\"");
        assert_eq!(generator().render(&Value::Integer(-3)).unwrap(), "-3");
        assert_eq!(generator().render(&Value::Float(1.5)).unwrap(), "1.5");
        assert_eq!(generator().render(&Value::Null).unwrap(), "null");
        assert_eq!(
            generator().render(&Value::reference("Status.ACTIVE")).unwrap(),
            "Status.ACTIVE"
        );
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let nan = Value::Float(f64::NAN);
        let mut generator = generator();
        let err = generator.render(&nan).unwrap_err();
        assert!(matches!(err, RenderError::InvalidModel { kind: Kind::Value, .. }));
        assert!(generator.is_idle());
    }
}
