//! Default views rendering models as Java source.
//!
//! One view per [`Kind`]; [`install_defaults`] puts all of them into a
//! builder. Callers customize output by installing their own view for a
//! kind afterwards.
//!
//! Layout conventions shared by the views:
//! - four spaces per indentation level, applied by the enclosing view
//! - declarations end with a closing brace and no trailing newline
//! - a field renders without its `;` so the same view serves parameters

mod declaration;
mod fragment;
mod member;
mod unit;

pub use declaration::{ClassView, ConstantView, EnumView, InterfaceView};
pub use fragment::{AnnotationView, JavadocView, TypeView, ValueView};
pub use member::{FieldView, MethodView};
pub use unit::{FileView, ImportView};

use ormgen_model::{Annotation, File, Javadoc, Kind, Modifier};

use crate::generator::Generator;
use crate::registry::ViewRegistryBuilder;
use crate::RenderError;

/// One level of indentation.
pub const INDENT: &str = "    ";

/// Installs the Java view for every kind.
pub fn install_defaults(builder: &mut ViewRegistryBuilder) {
    builder
        .install(Kind::File, FileView)
        .install(Kind::Import, ImportView)
        .install(Kind::Class, ClassView)
        .install(Kind::Interface, InterfaceView)
        .install(Kind::Enum, EnumView)
        .install(Kind::Constant, ConstantView)
        .install(Kind::Annotation, AnnotationView)
        .install(Kind::Javadoc, JavadocView)
        .install(Kind::Field, FieldView)
        .install(Kind::Method, MethodView)
        .install(Kind::Type, TypeView)
        .install(Kind::Value, ValueView);
}

/// Indents every non-empty line of `text` by one level.
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders modifiers in conventional order, each followed by a space.
pub fn modifiers(modifiers: &[Modifier]) -> String {
    let mut sorted = modifiers.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted.iter().map(|m| format!("{} ", m.as_str())).collect()
}

/// Wraps member sections in a braced body, separating non-empty sections
/// with a blank line. An empty body renders as `{}`.
pub(crate) fn body(sections: &[String]) -> String {
    let sections: Vec<&str> = sections
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();

    if sections.is_empty() {
        "{}".to_string()
    } else {
        format!("{{\n{}\n}}", indent(&sections.join("\n\n")))
    }
}

/// Renders the javadoc and annotations that precede a declaration, each
/// on its own line. Parts that render empty take no line.
pub(crate) fn preamble<'m>(
    generator: &mut Generator<'m>,
    javadoc: Option<&'m Javadoc>,
    annotations: &'m [Annotation],
) -> Result<String, RenderError> {
    let mut text = String::new();
    if let Some(javadoc) = javadoc {
        push_line(&mut text, &generator.render(javadoc)?);
    }
    for annotation in annotations {
        push_line(&mut text, &generator.render(annotation)?);
    }
    Ok(text)
}

fn push_line(text: &mut String, line: &str) {
    if !line.is_empty() {
        text.push_str(line);
        text.push('\n');
    }
}

/// Returns the simple form of a qualified type name, or the name as given
/// when a declaration of the file being rendered, or an enclosing one, has
/// the same simple name.
pub(crate) fn visible_name<'a>(generator: &Generator<'_>, name: &'a str) -> &'a str {
    let Some((_, simple)) = name.rsplit_once('.') else {
        return name;
    };

    let in_file = generator
        .last::<File>()
        .map(|file| file.declarations.iter().any(|d| d.name() == simple))
        .unwrap_or(false);
    let enclosing = Kind::DECLARATIONS.iter().any(|&kind| {
        generator
            .last_of_kind(kind)
            .ok()
            .and_then(|model| model.name())
            == Some(simple)
    });

    if in_file || enclosing {
        name
    } else {
        simple
    }
}

/// Formats `<A, B>`, or nothing when `generics` is empty.
pub(crate) fn generic_list(generics: &[String]) -> String {
    if generics.is_empty() {
        String::new()
    } else {
        format!("<{}>", generics.join(", "))
    }
}
