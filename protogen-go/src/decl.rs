//! Top-level declarations of a Go source file.

use std::{fmt, str::FromStr};

use serde::Serialize;

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// `type Name ...`
    Type,
    /// `func Name(...)` (methods are not package-level)
    Function,
    /// `var Name ...`
    Variable,
    /// `const Name ...`
    Constant,
}

impl DeclarationKind {
    /// Returns the kind identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Type => "type",
            DeclarationKind::Function => "func",
            DeclarationKind::Variable => "var",
            DeclarationKind::Constant => "const",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeclarationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "type" | "types" => Ok(DeclarationKind::Type),
            "func" | "function" | "funcs" => Ok(DeclarationKind::Function),
            "var" | "variable" | "vars" => Ok(DeclarationKind::Variable),
            "const" | "constant" | "consts" => Ok(DeclarationKind::Constant),
            _ => Err(format!(
                "unknown declaration kind '{}', expected 'type', 'func', 'var' or 'const'",
                s
            )),
        }
    }
}

/// Underlying shape of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeShape {
    /// `struct { ... }`
    Struct,
    /// `type A = B`
    Alias,
    Interface,
    /// Defined from another named type, e.g. `type ID int64`
    Named,
    Pointer,
    Slice,
    Array,
    Map,
    Channel,
    Function,
    /// `type T (X)`
    Parenthesized,
    Other,
}

impl TypeShape {
    /// Classify the `type:` child of a tree-sitter `type_spec` node.
    pub fn from_node_kind(kind: &str) -> Self {
        match kind {
            "struct_type" => TypeShape::Struct,
            "interface_type" => TypeShape::Interface,
            "type_identifier" | "qualified_type" | "generic_type" => TypeShape::Named,
            "pointer_type" => TypeShape::Pointer,
            "slice_type" => TypeShape::Slice,
            "array_type" | "implicit_length_array_type" => TypeShape::Array,
            "map_type" => TypeShape::Map,
            "channel_type" => TypeShape::Channel,
            "function_type" => TypeShape::Function,
            "parenthesized_type" => TypeShape::Parenthesized,
            _ => TypeShape::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeShape::Struct => "struct",
            TypeShape::Alias => "alias",
            TypeShape::Interface => "interface",
            TypeShape::Named => "named type",
            TypeShape::Pointer => "pointer",
            TypeShape::Slice => "slice",
            TypeShape::Array => "array",
            TypeShape::Map => "map",
            TypeShape::Channel => "channel",
            TypeShape::Function => "function type",
            TypeShape::Parenthesized => "parenthesized type",
            TypeShape::Other => "other",
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One named top-level entity of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// Only set for [`DeclarationKind::Type`].
    pub shape: Option<TypeShape>,
    /// Whether the type declares type parameters.
    pub generic: bool,
    /// 1-based line of the declared name.
    pub line: usize,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind, line: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            shape: None,
            generic: false,
            line,
        }
    }

    /// A type declaration with the given underlying shape.
    pub fn type_decl(name: impl Into<String>, shape: TypeShape, line: usize) -> Self {
        Self {
            shape: Some(shape),
            ..Self::new(name, DeclarationKind::Type, line)
        }
    }

    pub fn with_generic(mut self, generic: bool) -> Self {
        self.generic = generic;
        self
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// Go's export rule: the name starts with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exported() {
        assert!(is_exported("Foo"));
        assert!(is_exported("Élan"));
        assert!(!is_exported("foo"));
        assert!(!is_exported("_Foo"));
        assert!(!is_exported("_"));
        assert!(!is_exported(""));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(DeclarationKind::from_str("type").unwrap(), DeclarationKind::Type);
        assert_eq!(
            DeclarationKind::from_str("FUNC").unwrap(),
            DeclarationKind::Function
        );
        assert_eq!(
            DeclarationKind::from_str("vars").unwrap(),
            DeclarationKind::Variable
        );
        assert_eq!(
            DeclarationKind::from_str("const").unwrap(),
            DeclarationKind::Constant
        );
        assert!(DeclarationKind::from_str("method").is_err());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DeclarationKind::Function.to_string(), "func");
        assert_eq!(DeclarationKind::Type.to_string(), "type");
    }

    #[test]
    fn test_shape_from_node_kind() {
        assert_eq!(TypeShape::from_node_kind("struct_type"), TypeShape::Struct);
        assert_eq!(TypeShape::from_node_kind("type_identifier"), TypeShape::Named);
        assert_eq!(TypeShape::from_node_kind("qualified_type"), TypeShape::Named);
        assert_eq!(TypeShape::from_node_kind("map_type"), TypeShape::Map);
        assert_eq!(TypeShape::from_node_kind("negated_type"), TypeShape::Other);
    }

    #[test]
    fn test_type_decl() {
        let decl = Declaration::type_decl("User", TypeShape::Struct, 3);
        assert_eq!(decl.kind, DeclarationKind::Type);
        assert_eq!(decl.shape, Some(TypeShape::Struct));
        assert!(!decl.generic);
        assert!(decl.is_exported());
    }
}
