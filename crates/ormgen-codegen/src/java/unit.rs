//! Views for compilation units and imports.

use ormgen_model::{File, Import, Kind, Model};

use crate::generator::Generator;
use crate::view::{node, View};
use crate::RenderError;

/// Header comment, package, imports and declarations, separated by blank
/// lines. Empty sections are left out; the file ends with a newline.
pub struct FileView;

impl View for FileView {
    fn render<'m>(
        &self,
        generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let file = node::<File>(model)?;

        let mut sections = Vec::new();
        if let Some(javadoc) = &file.javadoc {
            sections.push(generator.render(javadoc)?);
        }
        if let Some(package) = &file.package {
            sections.push(format!("package {package};"));
        }
        sections.push(generator.render_all(&file.imports, "\n")?);
        sections.push(generator.render_all(&file.declarations, "\n\n")?);

        sections.retain(|s| !s.is_empty());
        Ok(format!("{}\n", sections.join("\n\n")))
    }
}

/// `import a.b.C;` or `import static a.b.C.member;`
pub struct ImportView;

impl View for ImportView {
    fn render<'m>(
        &self,
        _generator: &mut Generator<'m>,
        model: Model<'m>,
    ) -> Result<String, RenderError> {
        let import = node::<Import>(model)?;
        if import.path.is_empty() {
            return Err(RenderError::invalid(Kind::Import, "import has no path"));
        }

        let keyword = if import.is_static { "import static" } else { "import" };
        Ok(format!("{keyword} {};", import.path))
    }
}
