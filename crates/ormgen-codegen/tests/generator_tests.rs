//! End-to-end behavior of the generator with custom views.

use std::sync::Arc;

use ormgen_codegen::{node, Generator, RenderError, ViewRegistry, ViewRegistryBuilder};
use ormgen_model::{Class, Field, File, Kind, Method, Type};
use pretty_assertions::assert_eq;

/// Views that render the bare structure of a file: a package line, then each
/// class as `class ` followed by its methods and fields.
fn skeleton() -> ViewRegistryBuilder {
    let mut builder = ViewRegistryBuilder::java();
    builder
        .install_fn(Kind::File, |generator, model| {
            let file = node::<File>(model)?;
            Ok(format!("package;\n{}", generator.render_all(&file.declarations, "")?))
        })
        .install_fn(Kind::Class, |generator, model| {
            let class = node::<Class>(model)?;
            let methods = generator.render_all(&class.methods, "")?;
            let fields = generator.render_all(&class.fields, "")?;
            Ok(format!("class {methods}{fields}"))
        })
        .install_fn(Kind::Method, |generator, model| {
            let method = node::<Method>(model)?;
            generator.render_all(&method.params, "")?;
            Ok("method();".to_string())
        })
        .install_fn(Kind::Field, |_, _| Ok("field;".to_string()));
    builder
}

fn build(builder: &ViewRegistryBuilder) -> Arc<ViewRegistry> {
    Arc::new(builder.build().unwrap())
}

fn sample() -> File {
    File::new("User").with_declaration(
        Class::new("User")
            .with_method(Method::new("save", Type::void()))
            .with_field(Field::new("id", Type::new("long"))),
    )
}

#[test]
fn test_renders_nested_structure() {
    let file = sample();
    let mut generator = Generator::new(build(&skeleton()));

    assert_eq!(generator.render(&file).unwrap(), "package;\nclass method();field;");
    assert!(generator.is_idle());
}

#[test]
fn test_field_finds_class_through_method() {
    let mut builder = skeleton();
    builder
        .install_fn(Kind::Method, |generator, model| {
            let method = node::<Method>(model)?;
            generator.render_all(&method.params, "")
        })
        .install_fn(Kind::Field, |generator, _| {
            let class = generator.last::<Class>()?;
            let method = generator.last::<Method>()?;
            Ok(format!("{}.{};", class.name, method.name))
        });

    // The param renders under the method, two levels below the class.
    let file = File::new("User").with_declaration(Class::new("User").with_method(
        Method::new("save", Type::void()).with_param(Field::new("id", Type::new("long"))),
    ));
    let mut generator = Generator::new(build(&builder));

    assert_eq!(generator.render(&file).unwrap(), "package;\nclass User.save;");
}

#[test]
fn test_reentrant_kind_sees_innermost() {
    let mut builder = skeleton();
    builder.install_fn(Kind::Class, |generator, model| {
        let class = node::<Class>(model)?;
        let top = generator.last_of_kind(Kind::Class)?;
        assert!(top.same_node(model));

        let depth = generator.depth(Kind::Class);
        let nested = generator.render_all(&class.nested, "")?;
        Ok(format!("{}@{depth}[{nested}]", class.name))
    });

    let file = File::new("Outer").with_declaration(
        Class::new("Outer").with_nested(Class::new("Middle").with_nested(Class::new("Inner"))),
    );
    let mut generator = Generator::new(build(&builder));

    assert_eq!(
        generator.render(&file).unwrap(),
        "package;\nOuter@1[Middle@2[Inner@3[]]]"
    );
    assert!(generator.is_idle());
}

#[test]
fn test_override_is_used() {
    let mut builder = skeleton();
    builder.install_fn(Kind::Field, |_, _| Ok("override;".to_string()));
    assert!(builder.overridden().contains(&Kind::Field));

    let file = sample();
    let mut generator = Generator::new(build(&builder));
    assert_eq!(generator.render(&file).unwrap(), "package;\nclass method();override;");
}

#[test]
fn test_failure_leaves_contexts_empty() {
    let mut builder = skeleton();
    builder.install_fn(Kind::Field, |generator, _| {
        assert_eq!(generator.depth(Kind::File), 1);
        assert_eq!(generator.depth(Kind::Class), 1);
        Err(RenderError::invalid(Kind::Field, "unsupported"))
    });

    let file = sample();
    let mut generator = Generator::new(build(&builder));

    let err = generator.render(&file).unwrap_err();
    assert_eq!(err.to_string(), "invalid field model: unsupported");
    for kind in Kind::ALL {
        assert_eq!(generator.depth(kind), 0, "{kind} context not empty");
    }

    // Still usable, and lookups fail cleanly outside a render.
    let class = Class::new("Empty");
    assert!(generator.render(&class).is_ok());
    assert!(matches!(
        generator.last_of_kind(Kind::Class),
        Err(RenderError::NoAncestor(Kind::Class))
    ));
}

#[test]
fn test_generators_share_registry_across_threads() {
    let registry = build(&skeleton());
    let files: Vec<File> = (0..4).map(|_| sample()).collect();

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = files
            .iter()
            .map(|file| {
                let registry = Arc::clone(&registry);
                scope.spawn(move || Generator::new(registry).render(file).unwrap())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for output in outputs {
        assert_eq!(output, "package;\nclass method();field;");
    }
}

#[test]
fn test_default_java_views_render_file() {
    let file = File::new("User")
        .with_package("com.example")
        .with_declaration(Class::new("User").with_field(Field::new("id", Type::new("long"))));
    let mut generator = Generator::new(build(&ViewRegistryBuilder::java()));

    assert_eq!(
        generator.render(&file).unwrap(),
        "package com.example;\n\nclass User {\n    long id;\n}\n"
    );
}
