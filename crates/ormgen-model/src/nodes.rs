//! Node structs of the generated program.

/// A declaration modifier.
///
/// Variants are listed in the conventional Java order, so sorting a modifier
/// list yields the order they should be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
}

impl Modifier {
    /// Returns the keyword for this modifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
        }
    }
}

/// A reference to a type, e.g. `java.util.List<String>` or `byte[]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    /// The type name, qualified (`java.sql.Timestamp`) or simple (`int`).
    pub name: String,
    /// Generic arguments.
    pub generics: Vec<Type>,
    /// Number of array dimensions.
    pub array_dimension: u32,
}

impl Type {
    /// Creates a type reference without generics.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generics: vec![],
            array_dimension: 0,
        }
    }

    /// The `void` pseudo-type.
    pub fn void() -> Self {
        Self::new("void")
    }

    /// Adds a generic argument.
    pub fn with_generic(mut self, generic: Type) -> Self {
        self.generics.push(generic);
        self
    }

    /// Adds one array dimension.
    pub fn array(mut self) -> Self {
        self.array_dimension += 1;
        self
    }

    /// Returns the name without its package.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Returns the package part of a qualified name.
    pub fn package(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(package, _)| package)
    }

    /// Returns true if referencing this type from another package needs an import.
    ///
    /// Types in `java.lang` and unqualified names never do.
    pub fn needs_import(&self) -> bool {
        matches!(self.package(), Some(package) if package != "java.lang")
    }

    /// Returns this type and every generic argument, recursively.
    pub fn referenced(&self) -> Vec<&Type> {
        let mut types = vec![self];
        for generic in &self.generics {
            types.extend(generic.referenced());
        }
        types
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string literal; quoted and escaped when rendered.
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    /// Source text written as-is, e.g. `Status.ACTIVE` or `new ArrayList<>()`.
    Reference(String),
}

impl Value {
    /// Creates a string literal.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Creates a verbatim reference.
    pub fn reference(s: impl Into<String>) -> Self {
        Value::Reference(s.into())
    }
}

/// A usage of an annotation, e.g. `@Column(name = "id")`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// The annotation type name, simple or qualified.
    pub name: String,
    /// Single unnamed value, as in `@SuppressWarnings("unchecked")`.
    pub value: Option<Value>,
    /// Named values, in order.
    pub params: Vec<(String, Value)>,
}

impl Annotation {
    /// Creates a new annotation with no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            params: vec![],
        }
    }

    /// Sets the single unnamed value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Adds a named value.
    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.push((key.into(), value));
        self
    }
}

/// A tag line inside a documentation comment, e.g. `@param id the key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavadocTag {
    pub name: String,
    pub text: String,
}

/// A documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Javadoc {
    /// Free text; may span several lines.
    pub text: String,
    pub tags: Vec<JavadocTag>,
}

impl Javadoc {
    /// Creates a comment with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: vec![],
        }
    }

    /// Adds a tag.
    pub fn with_tag(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.tags.push(JavadocTag {
            name: name.into(),
            text: text.into(),
        });
        self
    }
}

/// A field, method parameter or local declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    pub modifiers: Vec<Modifier>,
    /// Initializer.
    pub value: Option<Value>,
    pub javadoc: Option<Javadoc>,
    pub annotations: Vec<Annotation>,
}

impl Field {
    /// Creates a field with no modifiers.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: vec![],
            value: None,
            javadoc: None,
            annotations: vec![],
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_javadoc(mut self, javadoc: Javadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    /// Method name. Ignored for constructors, which take the name of the
    /// enclosing declaration.
    pub name: String,
    pub return_type: Type,
    pub is_constructor: bool,
    pub modifiers: Vec<Modifier>,
    pub params: Vec<Field>,
    pub throws: Vec<Type>,
    /// Body lines, unindented. `None` for abstract and interface methods.
    pub body: Option<Vec<String>>,
    pub javadoc: Option<Javadoc>,
    pub annotations: Vec<Annotation>,
}

impl Method {
    /// Creates a method with an empty body.
    pub fn new(name: impl Into<String>, return_type: Type) -> Self {
        Self {
            name: name.into(),
            return_type,
            is_constructor: false,
            modifiers: vec![],
            params: vec![],
            throws: vec![],
            body: Some(vec![]),
            javadoc: None,
            annotations: vec![],
        }
    }

    /// Creates a constructor with an empty body.
    pub fn constructor() -> Self {
        Self {
            is_constructor: true,
            ..Self::new("<init>", Type::void())
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_param(mut self, param: Field) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_throws(mut self, ty: Type) -> Self {
        self.throws.push(ty);
        self
    }

    /// Appends a body line, creating the body if the method had none.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.body.get_or_insert_with(Vec::new).push(line.into());
        self
    }

    /// Removes the body, turning this into a declaration only.
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn with_javadoc(mut self, javadoc: Javadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    /// Generic parameter names, e.g. `T` or `T extends Comparable<T>`.
    pub generics: Vec<String>,
    pub extends: Option<Type>,
    pub implements: Vec<Type>,
    pub fields: Vec<Field>,
    pub constructors: Vec<Method>,
    pub methods: Vec<Method>,
    /// Nested type declarations.
    pub nested: Vec<Declaration>,
    pub javadoc: Option<Javadoc>,
    pub annotations: Vec<Annotation>,
}

impl Class {
    /// Creates an empty class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: vec![],
            generics: vec![],
            extends: None,
            implements: vec![],
            fields: vec![],
            constructors: vec![],
            methods: vec![],
            nested: vec![],
            javadoc: None,
            annotations: vec![],
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_generic(mut self, generic: impl Into<String>) -> Self {
        self.generics.push(generic.into());
        self
    }

    pub fn with_extends(mut self, ty: Type) -> Self {
        self.extends = Some(ty);
        self
    }

    pub fn with_implements(mut self, ty: Type) -> Self {
        self.implements.push(ty);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_constructor(mut self, constructor: Method) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_nested(mut self, declaration: impl Into<Declaration>) -> Self {
        self.nested.push(declaration.into());
        self
    }

    pub fn with_javadoc(mut self, javadoc: Javadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// An interface declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub generics: Vec<String>,
    pub extends: Vec<Type>,
    /// Constant fields.
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub nested: Vec<Declaration>,
    pub javadoc: Option<Javadoc>,
    pub annotations: Vec<Annotation>,
}

impl Interface {
    /// Creates an empty interface.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: vec![],
            generics: vec![],
            extends: vec![],
            fields: vec![],
            methods: vec![],
            nested: vec![],
            javadoc: None,
            annotations: vec![],
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_generic(mut self, generic: impl Into<String>) -> Self {
        self.generics.push(generic.into());
        self
    }

    pub fn with_extends(mut self, ty: Type) -> Self {
        self.extends.push(ty);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_javadoc(mut self, javadoc: Javadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }
}

/// One constant of an enum, e.g. `ACTIVE("a")`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub name: String,
    /// Constructor arguments.
    pub values: Vec<Value>,
}

impl Constant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![],
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.values.push(value);
        self
    }
}

/// An enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub implements: Vec<Type>,
    pub constants: Vec<Constant>,
    pub fields: Vec<Field>,
    pub constructors: Vec<Method>,
    pub methods: Vec<Method>,
    pub nested: Vec<Declaration>,
    pub javadoc: Option<Javadoc>,
    pub annotations: Vec<Annotation>,
}

impl Enum {
    /// Creates an empty enum.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: vec![],
            implements: vec![],
            constants: vec![],
            fields: vec![],
            constructors: vec![],
            methods: vec![],
            nested: vec![],
            javadoc: None,
            annotations: vec![],
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_constant(mut self, constant: Constant) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_constructor(mut self, constructor: Method) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

/// A type declaration: class, interface or enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(Class),
    Interface(Interface),
    Enum(Enum),
}

impl Declaration {
    /// Returns the declared type name.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Class(class) => &class.name,
            Declaration::Interface(interface) => &interface.name,
            Declaration::Enum(enumeration) => &enumeration.name,
        }
    }
}

impl From<Class> for Declaration {
    fn from(class: Class) -> Self {
        Declaration::Class(class)
    }
}

impl From<Interface> for Declaration {
    fn from(interface: Interface) -> Self {
        Declaration::Interface(interface)
    }
}

impl From<Enum> for Declaration {
    fn from(enumeration: Enum) -> Self {
        Declaration::Enum(enumeration)
    }
}

/// An import statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Import {
    /// Fully qualified path, e.g. `java.util.List`.
    pub path: String,
    pub is_static: bool,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_static: false,
        }
    }

    /// Creates an import for a qualified type.
    pub fn of(ty: &Type) -> Self {
        Self::new(ty.name.clone())
    }

    pub fn static_member(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_static: true,
        }
    }
}

/// A compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    /// File name without extension, usually the primary type's name.
    pub name: String,
    pub package: Option<String>,
    /// Header comment.
    pub javadoc: Option<Javadoc>,
    pub imports: Vec<Import>,
    pub declarations: Vec<Declaration>,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            javadoc: None,
            imports: vec![],
            declarations: vec![],
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_javadoc(mut self, javadoc: Javadoc) -> Self {
        self.javadoc = Some(javadoc);
        self
    }

    pub fn with_import(mut self, import: Import) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_declaration(mut self, declaration: impl Into<Declaration>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    /// Returns the relative path of this file, `com/example/User.java` style.
    pub fn path(&self, extension: &str) -> String {
        let file_name = format!("{}.{}", self.name, extension);
        match &self.package {
            Some(package) => format!("{}/{}", package.replace('.', "/"), file_name),
            None => file_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        let ty = Type::new("java.util.List").with_generic(Type::new("java.lang.String"));
        assert_eq!(ty.simple_name(), "List");
        assert_eq!(ty.package(), Some("java.util"));
        assert!(ty.needs_import());
        assert!(!ty.generics[0].needs_import());
        assert!(!Type::new("int").needs_import());
        assert_eq!(ty.referenced().len(), 2);
    }

    #[test]
    fn test_modifier_order() {
        let mut modifiers = vec![Modifier::Final, Modifier::Static, Modifier::Public];
        modifiers.sort();
        let words: Vec<_> = modifiers.iter().map(|m| m.as_str()).collect();
        assert_eq!(words, ["public", "static", "final"]);
    }

    #[test]
    fn test_method_body() {
        let abstract_method = Method::new("run", Type::void()).without_body();
        assert!(abstract_method.body.is_none());

        let method = Method::new("run", Type::void()).with_line("return;");
        assert_eq!(method.body, Some(vec!["return;".to_string()]));

        let constructor = Method::constructor();
        assert!(constructor.is_constructor);
    }

    #[test]
    fn test_file_path() {
        let file = File::new("User").with_package("com.example.db");
        assert_eq!(file.path("java"), "com/example/db/User.java");
        assert_eq!(File::new("Main").path("java"), "Main.java");
    }
}
