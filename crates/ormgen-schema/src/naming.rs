//! Database naming conventions and Java identifier conversion.

use crate::document::{DocumentKind, DocumentPath};
use crate::{Result, SchemaError};

/// How a database dialect quotes values and encloses identifiers.
///
/// Implementors supply the raw strings; qualified names and escaping are
/// provided on top of them.
pub trait DatabaseNamingConvention: Send + Sync {
    /// Precedes a database value, e.g. in a comparison.
    fn field_quote_start(&self) -> &str;

    fn field_quote_end(&self) -> &str;

    /// Precedes an identifier so it cannot collide with a reserved word,
    /// e.g. `` ` `` for MySQL or `"` for PostgreSQL.
    fn field_encloser_start(&self) -> &str;

    fn field_encloser_end(&self) -> &str;

    /// System schemas that are never generated for.
    fn schema_exclude_set(&self) -> &[&'static str];

    fn is_excluded(&self, schema: &str) -> bool {
        self.schema_exclude_set()
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(schema))
    }

    /// `table.column` for a path whose document is a column.
    fn full_name_of_column(&self, path: &DocumentPath<'_>) -> Result<String> {
        qualified_name(path, DocumentKind::Table)
    }

    /// `schema.table` for a path whose document is a table.
    fn full_name_of_table(&self, path: &DocumentPath<'_>) -> Result<String> {
        qualified_name(path, DocumentKind::Schema)
    }

    fn quote_field(&self, field: &str) -> String {
        format!("{}{field}{}", self.field_quote_start(), self.field_quote_end())
    }

    fn enclose_field(&self, field: &str) -> String {
        format!(
            "{}{field}{}",
            self.field_encloser_start(),
            self.field_encloser_end()
        )
    }

    /// The encloser start, escaped when it is a `"` written inside a
    /// string literal.
    fn encloser_start(&self, within_quotes: bool) -> String {
        escape_if_quote(self.field_encloser_start(), within_quotes)
    }

    fn encloser_end(&self, within_quotes: bool) -> String {
        escape_if_quote(self.field_encloser_end(), within_quotes)
    }
}

fn qualified_name(path: &DocumentPath<'_>, parent: DocumentKind) -> Result<String> {
    let document = path.document();
    match path.parent() {
        Some(p) if p.kind() == parent => Ok(format!("{}.{}", p.name(), document.name())),
        _ => Err(SchemaError::NoParent(document.to_string())),
    }
}

fn escape_if_quote(item: &str, within_quotes: bool) -> String {
    if within_quotes && item == "\"" {
        format!("\\{item}")
    } else {
        item.to_string()
    }
}

/// MySQL and MariaDB: backtick-enclosed identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlNamingConvention;

impl DatabaseNamingConvention for MySqlNamingConvention {
    fn field_quote_start(&self) -> &str {
        "'"
    }

    fn field_quote_end(&self) -> &str {
        "'"
    }

    fn field_encloser_start(&self) -> &str {
        "`"
    }

    fn field_encloser_end(&self) -> &str {
        "`"
    }

    fn schema_exclude_set(&self) -> &[&'static str] {
        &["information_schema", "mysql", "performance_schema", "sys"]
    }
}

/// PostgreSQL: double-quote-enclosed identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresNamingConvention;

impl DatabaseNamingConvention for PostgresNamingConvention {
    fn field_quote_start(&self) -> &str {
        "'"
    }

    fn field_quote_end(&self) -> &str {
        "'"
    }

    fn field_encloser_start(&self) -> &str {
        "\""
    }

    fn field_encloser_end(&self) -> &str {
        "\""
    }

    fn schema_exclude_set(&self) -> &[&'static str] {
        &["information_schema", "pg_catalog", "pg_toast"]
    }
}

/// Picks the naming convention for a dialect name, ignoring case.
pub fn dialect(name: &str) -> Result<Box<dyn DatabaseNamingConvention>> {
    match name.to_ascii_lowercase().as_str() {
        "mysql" | "mariadb" => Ok(Box::new(MySqlNamingConvention)),
        "postgres" | "postgresql" => Ok(Box::new(PostgresNamingConvention)),
        _ => Err(SchemaError::UnknownDialect(name.to_string())),
    }
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null",
];

/// Splits a database name on every character that cannot appear in an
/// identifier, such as `_`, `-`, spaces and quotes. All-caps words are
/// lowercased so `USER_ID` and `user_id` convert alike.
fn words(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| {
            if w.chars().any(char::is_lowercase) {
                w.to_string()
            } else {
                w.to_lowercase()
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decapitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Makes `name` a legal identifier: keywords and names starting with a
/// digit get a `_` prefix.
fn safe_identifier(name: String) -> String {
    let starts_with_digit = name.chars().next().is_some_and(|c| c.is_ascii_digit());
    if name.is_empty() || starts_with_digit || JAVA_KEYWORDS.contains(&name.as_str()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Lower camel case Java name for a field or variable: `user_name` ->
/// `userName`.
pub fn java_name(name: &str) -> String {
    let words = words(name);
    let mut result = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            result.push_str(&decapitalize(word));
        } else {
            result.push_str(&capitalize(word));
        }
    }
    safe_identifier(result)
}

/// Upper camel case Java name for a type: `order_line` -> `OrderLine`.
pub fn java_type_name(name: &str) -> String {
    let result: String = words(name).iter().map(|w| capitalize(w)).collect();
    safe_identifier(result)
}
