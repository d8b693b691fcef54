//! Entity class generation from a schema project.
//!
//! Every enabled table becomes one Java file holding an annotated entity
//! class. The file is first built as a model tree and then rendered through
//! a [`Generator`], so custom views apply to entities as well.

use std::collections::BTreeSet;
use std::sync::Arc;

use ormgen_model::{
    Annotation, Class, Field, File, Import, Javadoc, Method, Modifier, Type, Value,
};
use ormgen_schema::{
    dialect, java_name, java_type_name, DatabaseNamingConvention, DocumentKind, DocumentPath,
    DocumentRef, Project, SchemaError,
};

use crate::generator::Generator;
use crate::registry::{ViewRegistry, ViewRegistryBuilder};
use crate::{CodeGenerator, CodegenError, GeneratedFile, GeneratedFiles};

const PERSISTENCE: &str = "javax.persistence";

/// Maps tables to JPA entity classes.
pub struct EntityGenerator {
    /// Base package; falls back to the project's package.
    package: Option<String>,
    /// Dialect name; falls back to each dbms's type name.
    dialect: Option<String>,
    /// Whether to add a getter and a fluent setter per column.
    accessors: bool,
    registry: Arc<ViewRegistry>,
}

impl EntityGenerator {
    /// Creates a generator rendering through `registry`.
    pub fn new(registry: impl Into<Arc<ViewRegistry>>) -> Self {
        Self {
            package: None,
            dialect: None,
            accessors: true,
            registry: registry.into(),
        }
    }

    /// Creates a generator using the default Java views.
    pub fn java() -> Result<Self, CodegenError> {
        Ok(Self::new(ViewRegistryBuilder::java().build()?))
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect = Some(dialect.into());
        self
    }

    pub fn with_accessors(mut self, accessors: bool) -> Self {
        self.accessors = accessors;
        self
    }

    /// Sets an option from its textual `key=value` form.
    ///
    /// Known keys are `package`, `dialect` and `accessors`.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), CodegenError> {
        let invalid = |message: String| CodegenError::InvalidOption {
            key: key.to_string(),
            message,
        };

        match key {
            "package" => {
                if value.is_empty() {
                    return Err(invalid("package must not be empty".to_string()));
                }
                self.package = Some(value.to_string());
            }
            "dialect" => {
                dialect(value).map_err(|e| invalid(e.to_string()))?;
                self.dialect = Some(value.to_string());
            }
            "accessors" => {
                self.accessors = value
                    .parse()
                    .map_err(|_| invalid(format!("expected true or false, got '{value}'")))?;
            }
            _ => {
                return Err(invalid(
                    "unknown option, expected one of: package, dialect, accessors".to_string(),
                ))
            }
        }
        Ok(())
    }

    /// Builds the file model for the table at `path`.
    pub fn entity(
        &self,
        path: &DocumentPath<'_>,
        base_package: &str,
        naming: &dyn DatabaseNamingConvention,
    ) -> Result<File, CodegenError> {
        let DocumentRef::Table(table) = path.document() else {
            return Err(SchemaError::NoParent(path.document().to_string()).into());
        };
        let schema = path
            .ancestor(DocumentKind::Schema)
            .ok_or_else(|| SchemaError::NoParent(path.document().to_string()))?;

        let package = format!("{base_package}.{}", schema.java_name().to_lowercase());
        let class_name = path
            .document()
            .alias()
            .map(str::to_string)
            .unwrap_or_else(|| java_type_name(&table.name));
        let full_name = naming.full_name_of_table(path)?;
        let primary_key = table.primary_key()?;

        let mut imports = BTreeSet::new();
        let identity = if class_name == "GenerationType" {
            format!("{PERSISTENCE}.GenerationType.IDENTITY")
        } else {
            "GenerationType.IDENTITY".to_string()
        };
        for name in ["Entity", "Table", "Column"] {
            imports.insert(format!("{PERSISTENCE}.{name}"));
        }

        let mut class = Class::new(&class_name)
            .with_modifier(Modifier::Public)
            .with_javadoc(Javadoc::new(format!("Entity mapped to the {full_name} table.")))
            .with_annotation(Annotation::new(format!("{PERSISTENCE}.Entity")))
            .with_annotation(
                Annotation::new(format!("{PERSISTENCE}.Table"))
                    .with_param("name", Value::text(naming.enclose_field(&table.name))),
            );

        for column in table.columns.iter().filter(|c| c.enabled) {
            let ty = java_type(&column.database_type);
            for referenced in ty.referenced() {
                if referenced.needs_import() {
                    imports.insert(referenced.name.clone());
                }
            }

            let field_name = DocumentRef::Column(column).java_name();
            let mut field = Field::new(&field_name, ty.clone()).with_modifier(Modifier::Private);

            if primary_key.iter().any(|key| key.name == column.name) {
                imports.insert(format!("{PERSISTENCE}.Id"));
                field = field.with_annotation(Annotation::new(format!("{PERSISTENCE}.Id")));
            }
            if column.auto_increment {
                imports.insert(format!("{PERSISTENCE}.GeneratedValue"));
                imports.insert(format!("{PERSISTENCE}.GenerationType"));
                field = field.with_annotation(
                    Annotation::new(format!("{PERSISTENCE}.GeneratedValue"))
                        .with_param("strategy", Value::reference(identity.clone())),
                );
            }

            let mut annotation = Annotation::new(format!("{PERSISTENCE}.Column"))
                .with_param("name", Value::text(&column.name));
            if !column.nullable {
                annotation = annotation.with_param("nullable", Value::Boolean(false));
            }
            class = class.with_field(field.with_annotation(annotation));

            if self.accessors {
                let property = java_type_name(&field_name);
                class = class
                    .with_method(
                        Method::new(format!("get{property}"), ty.clone())
                            .with_modifier(Modifier::Public)
                            .with_line(format!("return {field_name};")),
                    )
                    .with_method(
                        Method::new(format!("set{property}"), Type::new(&class_name))
                            .with_modifier(Modifier::Public)
                            .with_param(Field::new(&field_name, ty))
                            .with_line(format!("this.{field_name} = {field_name};"))
                            .with_line("return this;"),
                    );
            }
        }

        tracing::debug!(table = %full_name, class = %class_name, %package, "mapped table");

        let mut file = File::new(&class_name)
            .with_javadoc(Javadoc::new("Generated by ormgen. Do not edit."))
            .with_package(package);
        // The views keep a name qualified when the class shadows it, so
        // its import must go.
        for import in imports {
            if Type::new(&import).simple_name() != class_name {
                file = file.with_import(Import::new(import));
            }
        }
        Ok(file.with_declaration(class))
    }
}

impl CodeGenerator for EntityGenerator {
    fn generate(&self, project: &Project) -> Result<GeneratedFiles, CodegenError> {
        let base_package = self
            .package
            .clone()
            .or_else(|| project.package.clone())
            .unwrap_or_else(|| java_name(&project.name).to_lowercase());

        let mut entities = Vec::new();
        for path in project.enabled_tables() {
            let type_name = match path.ancestor(DocumentKind::Dbms) {
                Some(DocumentRef::Dbms(dbms)) => dbms.type_name.as_str(),
                _ => return Err(SchemaError::NoParent(path.document().to_string()).into()),
            };
            let naming = dialect(self.dialect.as_deref().unwrap_or(type_name))?;

            if let Some(schema) = path.ancestor(DocumentKind::Schema) {
                if naming.is_excluded(schema.name()) {
                    tracing::debug!(schema = schema.name(), "skipping excluded schema");
                    continue;
                }
            }
            entities.push(self.entity(&path, &base_package, naming.as_ref())?);
        }

        let mut files = GeneratedFiles::new();
        let mut generator = Generator::new(Arc::clone(&self.registry));
        for entity in &entities {
            let content = generator.render(entity)?;
            files.add(GeneratedFile::new(entity.path("java"), content));
        }
        Ok(files)
    }

    fn name(&self) -> &'static str {
        "entity"
    }
}

/// Maps an SQL type name to the Java type holding its values.
///
/// Length and precision suffixes and `UNSIGNED` are ignored. Unknown types
/// map to `Object`.
pub fn java_type(database_type: &str) -> Type {
    let upper = database_type.to_ascii_uppercase();
    let base = upper
        .split('(')
        .next()
        .unwrap_or_default()
        .trim_end_matches(" UNSIGNED")
        .trim();

    match base {
        "BIT" | "BOOL" | "BOOLEAN" => Type::new("java.lang.Boolean"),
        "TINYINT" => Type::new("java.lang.Byte"),
        "SMALLINT" => Type::new("java.lang.Short"),
        "INT" | "INTEGER" | "MEDIUMINT" | "SERIAL" => Type::new("java.lang.Integer"),
        "BIGINT" | "BIGSERIAL" => Type::new("java.lang.Long"),
        "FLOAT" | "REAL" => Type::new("java.lang.Float"),
        "DOUBLE" | "DOUBLE PRECISION" => Type::new("java.lang.Double"),
        "DECIMAL" | "NUMERIC" => Type::new("java.math.BigDecimal"),
        "CHAR" | "VARCHAR" | "CHARACTER" | "CHARACTER VARYING" | "TINYTEXT" | "TEXT"
        | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" | "JSON" => Type::new("java.lang.String"),
        "DATE" => Type::new("java.sql.Date"),
        "TIME" => Type::new("java.sql.Time"),
        "DATETIME" | "TIMESTAMP" => Type::new("java.sql.Timestamp"),
        "BINARY" | "VARBINARY" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BYTEA" => {
            Type::new("byte").array()
        }
        "UUID" => Type::new("java.util.UUID"),
        _ => Type::new("java.lang.Object"),
    }
}
