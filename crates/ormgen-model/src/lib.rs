//! Core model types for ormgen code generation.
//!
//! A generated program is a tree of plain node structs ([`File`], [`Class`],
//! [`Method`], ...) owned by the caller. The generator never walks those
//! structs directly; it works on [`Model`], a `Copy` reference into the tree
//! tagged with the node's [`Kind`]. Dispatch, ancestor lookup and downcasting
//! all go through that tag.

mod nodes;

pub use nodes::{
    Annotation, Class, Constant, Declaration, Enum, Field, File, Import, Interface, Javadoc,
    JavadocTag, Method, Modifier, Type, Value,
};

use std::fmt;
use std::str::FromStr;

/// The closed set of node categories.
///
/// Every kind must have exactly one view installed before a registry can be
/// built, so adding a variant here means adding a view for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    File,
    Import,
    Class,
    Interface,
    Enum,
    Constant,
    Annotation,
    Javadoc,
    Field,
    Method,
    Type,
    Value,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 12] = [
        Kind::File,
        Kind::Import,
        Kind::Class,
        Kind::Interface,
        Kind::Enum,
        Kind::Constant,
        Kind::Annotation,
        Kind::Javadoc,
        Kind::Field,
        Kind::Method,
        Kind::Type,
        Kind::Value,
    ];

    /// Number of kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Kinds that declare a type and therefore own members.
    pub const DECLARATIONS: [Kind; 3] = [Kind::Class, Kind::Interface, Kind::Enum];

    /// Stable position of this kind in [`Kind::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the lowercase name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::File => "file",
            Kind::Import => "import",
            Kind::Class => "class",
            Kind::Interface => "interface",
            Kind::Enum => "enum",
            Kind::Constant => "constant",
            Kind::Annotation => "annotation",
            Kind::Javadoc => "javadoc",
            Kind::Field => "field",
            Kind::Method => "method",
            Kind::Type => "type",
            Kind::Value => "value",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| format!("unknown model kind: {s}"))
    }
}

/// A node struct that can be rendered.
///
/// Implemented for every struct that has a [`Kind`]; lets callers go from
/// a [`Model`] back to the concrete node with a checked downcast.
pub trait Node {
    /// The kind every instance of this node reports.
    const KIND: Kind;

    /// Returns the node if `model` refers to this node type.
    fn from_model(model: Model<'_>) -> Option<&Self>;

    /// Wraps this node in a tagged model reference.
    fn as_model(&self) -> Model<'_>;
}

macro_rules! models {
    ($($variant:ident),* $(,)?) => {
        /// A tagged, borrowed reference to one node of the model tree.
        #[derive(Debug, Clone, Copy)]
        pub enum Model<'m> {
            $($variant(&'m $variant),)*
        }

        impl<'m> Model<'m> {
            /// The kind of the referenced node.
            pub fn kind(self) -> Kind {
                match self {
                    $(Model::$variant(_) => Kind::$variant,)*
                }
            }

            fn addr(self) -> *const () {
                match self {
                    $(Model::$variant(node) => node as *const $variant as *const (),)*
                }
            }
        }

        $(
            impl Node for $variant {
                const KIND: Kind = Kind::$variant;

                fn from_model(model: Model<'_>) -> Option<&Self> {
                    match model {
                        Model::$variant(node) => Some(node),
                        _ => None,
                    }
                }

                fn as_model(&self) -> Model<'_> {
                    Model::$variant(self)
                }
            }

            impl<'m> From<&'m $variant> for Model<'m> {
                fn from(node: &'m $variant) -> Self {
                    Model::$variant(node)
                }
            }
        )*
    };
}

models!(
    File, Import, Class, Interface, Enum, Constant, Annotation, Javadoc, Field, Method, Type,
    Value,
);

impl<'m> Model<'m> {
    /// Downcasts to a concrete node type.
    pub fn downcast<T: Node>(self) -> Option<&'m T> {
        T::from_model(self)
    }

    /// Returns true if both references point at the same node.
    pub fn same_node(self, other: Model<'_>) -> bool {
        self.kind() == other.kind() && std::ptr::eq(self.addr(), other.addr())
    }

    /// Returns the declared name of the node, if it has one.
    pub fn name(self) -> Option<&'m str> {
        match self {
            Model::File(file) => Some(&file.name),
            Model::Import(import) => Some(&import.path),
            Model::Class(class) => Some(&class.name),
            Model::Interface(interface) => Some(&interface.name),
            Model::Enum(enumeration) => Some(&enumeration.name),
            Model::Constant(constant) => Some(&constant.name),
            Model::Annotation(annotation) => Some(&annotation.name),
            Model::Field(field) => Some(&field.name),
            Model::Method(method) => Some(&method.name),
            Model::Type(ty) => Some(&ty.name),
            Model::Javadoc(_) | Model::Value(_) => None,
        }
    }
}

impl<'m> From<&'m Declaration> for Model<'m> {
    fn from(declaration: &'m Declaration) -> Self {
        match declaration {
            Declaration::Class(class) => Model::Class(class),
            Declaration::Interface(interface) => Model::Interface(interface),
            Declaration::Enum(enumeration) => Model::Enum(enumeration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_indices_follow_all() {
        for (i, kind) in Kind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(Kind::COUNT, 12);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("class".parse::<Kind>(), Ok(Kind::Class));
        assert_eq!("Method".parse::<Kind>(), Ok(Kind::Method));
        assert!("package".parse::<Kind>().is_err());
        assert_eq!(Kind::Javadoc.to_string(), "javadoc");
    }

    #[test]
    fn test_model_kind_and_downcast() {
        let class = Class::new("User");
        let model = Model::from(&class);

        assert_eq!(model.kind(), Kind::Class);
        assert_eq!(model.name(), Some("User"));
        assert!(model.downcast::<Class>().is_some());
        assert!(model.downcast::<Method>().is_none());
    }

    #[test]
    fn test_same_node_compares_identity() {
        let a = Field::new("id", Type::new("int"));
        let b = a.clone();

        assert!(a.as_model().same_node(Model::from(&a)));
        assert!(!a.as_model().same_node(b.as_model()));
    }

    #[test]
    fn test_declaration_into_model() {
        let declaration = Declaration::Enum(Enum::new("Status"));
        let model = Model::from(&declaration);
        assert_eq!(model.kind(), Kind::Enum);
        assert_eq!(model.name(), Some("Status"));
    }
}
