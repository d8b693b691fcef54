//! Views for type declarations: classes, interfaces, enums and enum constants.

use ormgen_model::{Class, Constant, Enum, Field, Interface, Kind, Model};

use super::{body, generic_list, modifiers, preamble};
use crate::generator::Generator;
use crate::view::{node, View};
use crate::RenderError;

/// Renders fields one per line, each terminated with `;`.
fn field_lines<'m>(
    generator: &mut Generator<'m>,
    fields: &'m [Field],
) -> Result<String, RenderError> {
    let mut lines = Vec::with_capacity(fields.len());
    for field in fields {
        lines.push(format!("{};", generator.render(field)?));
    }
    Ok(lines.join("\n"))
}

fn check_name(kind: Kind, name: &str) -> Result<(), RenderError> {
    if name.is_empty() {
        return Err(RenderError::invalid(kind, "declaration has no name"));
    }
    Ok(())
}

/// `class Name<T> extends Base implements A, B { ... }`
pub struct ClassView;

impl View for ClassView {
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let class = node::<Class>(model)?;
        check_name(Kind::Class, &class.name)?;

        let mut header = preamble(generator, class.javadoc.as_ref(), &class.annotations)?;
        header.push_str(&modifiers(&class.modifiers));
        header.push_str("class ");
        header.push_str(&class.name);
        header.push_str(&generic_list(&class.generics));
        if let Some(extends) = &class.extends {
            header.push_str(" extends ");
            header.push_str(&generator.render(extends)?);
        }
        if !class.implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&generator.render_all(&class.implements, ", ")?);
        }

        let sections = [
            field_lines(generator, &class.fields)?,
            generator.render_all(&class.constructors, "\n\n")?,
            generator.render_all(&class.methods, "\n\n")?,
            generator.render_all(&class.nested, "\n\n")?,
        ];
        Ok(format!("{header} {}", body(&sections)))
    }
}

/// `interface Name<T> extends A, B { ... }`
pub struct InterfaceView;

impl View for InterfaceView {
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let interface = node::<Interface>(model)?;
        check_name(Kind::Interface, &interface.name)?;

        let mut header =
            preamble(generator, interface.javadoc.as_ref(), &interface.annotations)?;
        header.push_str(&modifiers(&interface.modifiers));
        header.push_str("interface ");
        header.push_str(&interface.name);
        header.push_str(&generic_list(&interface.generics));
        if !interface.extends.is_empty() {
            header.push_str(" extends ");
            header.push_str(&generator.render_all(&interface.extends, ", ")?);
        }

        let sections = [
            field_lines(generator, &interface.fields)?,
            generator.render_all(&interface.methods, "\n\n")?,
            generator.render_all(&interface.nested, "\n\n")?,
        ];
        Ok(format!("{header} {}", body(&sections)))
    }
}

/// `enum Name implements A { CONSTANT, ...; members }`
pub struct EnumView;

impl View for EnumView {
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let enumeration = node::<Enum>(model)?;
        check_name(Kind::Enum, &enumeration.name)?;

        let mut header = preamble(
            generator,
            enumeration.javadoc.as_ref(),
            &enumeration.annotations,
        )?;
        header.push_str(&modifiers(&enumeration.modifiers));
        header.push_str("enum ");
        header.push_str(&enumeration.name);
        if !enumeration.implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&generator.render_all(&enumeration.implements, ", ")?);
        }

        let members = [
            field_lines(generator, &enumeration.fields)?,
            generator.render_all(&enumeration.constructors, "\n\n")?,
            generator.render_all(&enumeration.methods, "\n\n")?,
            generator.render_all(&enumeration.nested, "\n\n")?,
        ];

        // The constant list needs its `;` whenever members follow it.
        let constants = generator.render_all(&enumeration.constants, ",\n")?;
        let has_members = members.iter().any(|m| !m.is_empty());
        let constants = if constants.is_empty() && has_members {
            ";".to_string()
        } else if has_members {
            format!("{constants};")
        } else {
            constants
        };

        let mut sections = vec![constants];
        sections.extend(members);
        Ok(format!("{header} {}", body(&sections)))
    }
}

/// `NAME` or `NAME(value, ...)`
pub struct ConstantView;

impl View for ConstantView {
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let constant = node::<Constant>(model)?;
        if constant.name.is_empty() {
            return Err(RenderError::invalid(Kind::Constant, "enum constant has no name"));
        }

        if constant.values.is_empty() {
            Ok(constant.name.clone())
        } else {
            let values = generator.render_all(&constant.values, ", ")?;
            Ok(format!("{}({values})", constant.name))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::registry::ViewRegistryBuilder;
    use ormgen_model::{Annotation, Method, Modifier, Type, Value};

    fn generator<'m>() -> Generator<'m> {
        Generator::new(Arc::new(ViewRegistryBuilder::java().build().unwrap()))
    }

    #[test]
    fn test_empty_class() {
        let class = Class::new("User").with_modifier(Modifier::Public);
        assert_eq!(generator().render(&class).unwrap(), "public class User {}");
    }

    #[test]
    fn test_class_header_and_members() {
        let class = Class::new("Box")
            .with_modifier(Modifier::Final)
            .with_modifier(Modifier::Public)
            .with_generic("T")
            .with_extends(Type::new("com.example.Base"))
            .with_implements(Type::new("java.io.Serializable"))
            .with_annotation(Annotation::new("Entity"))
            .with_field(Field::new("value", Type::new("T")).with_modifier(Modifier::Private))
            .with_method(
                Method::new("get", Type::new("T"))
                    .with_modifier(Modifier::Public)
                    .with_line("return value;"),
            );

        let expected = "\
@Entity
public final class Box<T> extends Base implements Serializable {
    private T value;

    public T get() {
        return value;
    }
}";
        assert_eq!(generator().render(&class).unwrap(), expected);
    }

    #[test]
    fn test_nested_class_is_indented() {
        let class = Class::new("Outer").with_nested(Class::new("Inner"));
        assert_eq!(
            generator().render(&class).unwrap(),
            "class Outer {\n    class Inner {}\n}"
        );
    }

    #[test]
    fn test_interface() {
        let interface = Interface::new("Repository")
            .with_modifier(Modifier::Public)
            .with_generic("T")
            .with_extends(Type::new("java.lang.AutoCloseable"))
            .with_method(Method::new("find", Type::new("T")).without_body());

        assert_eq!(
            generator().render(&interface).unwrap(),
            "public interface Repository<T> extends AutoCloseable {\n    T find();\n}"
        );
    }

    #[test]
    fn test_enum_constants_only() {
        let status = Enum::new("Status")
            .with_constant(Constant::new("ACTIVE"))
            .with_constant(Constant::new("DELETED"));

        assert_eq!(
            generator().render(&status).unwrap(),
            "enum Status {\n    ACTIVE,\n    DELETED\n}"
        );
    }

    #[test]
    fn test_enum_with_members() {
        let status = Enum::new("Status")
            .with_constant(Constant::new("ACTIVE").with_value(Value::text("a")))
            .with_field(
                Field::new("code", Type::new("String"))
                    .with_modifier(Modifier::Private)
                    .with_modifier(Modifier::Final),
            )
            .with_constructor(
                Method::constructor()
                    .with_param(Field::new("code", Type::new("String")))
                    .with_line("this.code = code;"),
            );

        let expected = "\
enum Status {
    ACTIVE(\"a\");

    private final String code;

    Status(String code) {
        this.code = code;
    }
}";
        assert_eq!(generator().render(&status).unwrap(), expected);
    }

    #[test]
    fn test_enum_without_constants_keeps_separator() {
        let empty = Enum::new("Marker").with_method(Method::new("id", Type::new("int")).with_line("return 0;"));
        let text = generator().render(&empty).unwrap();
        assert!(text.starts_with("enum Marker {\n    ;\n\n    int id() {"), "{text}");
    }

    #[test]
    fn test_unnamed_class_is_rejected() {
        let class = Class::new("");
        let mut generator = generator();
        assert!(matches!(
            generator.render(&class),
            Err(RenderError::InvalidModel { kind: Kind::Class, .. })
        ));
        assert!(generator.is_idle());
    }
}
