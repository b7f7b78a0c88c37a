//! Fixed-shape support files rendered from Askama templates.
//!
//! Only the namespace changes between runs, so these files are plain
//! templates under `templates/` rather than emission trees.

use askama::Template;

use super::{help_text, GeneratedFile, Generator, GeneratorKind, GeneratorOptions};
use super::{NAMESPACE_PARAM, OUTPUT_PARAM};
use crate::error::Result;

/// Template data for `PageModel.cs`
#[derive(Template)]
#[template(path = "page_model.cs.txt", escape = "none")]
pub struct PageModelTemplate<'a> {
    /// Namespace of the generated class
    pub namespace: &'a str,
}

/// Template data for `IPageModel.cs`
#[derive(Template)]
#[template(path = "i_page_model.cs.txt", escape = "none")]
pub struct PageModelInterfaceTemplate<'a> {
    /// Namespace of the generated interface
    pub namespace: &'a str,
}

/// Template data for `ResultModel.cs`
#[derive(Template)]
#[template(path = "result_model.cs.txt", escape = "none")]
pub struct ResultModelTemplate<'a> {
    /// Namespace of the generated class
    pub namespace: &'a str,
}

/// Template data for `CustomWebApplicationFactory.cs`
#[derive(Template)]
#[template(path = "web_application_factory.cs.txt", escape = "none")]
pub struct WebApplicationFactoryTemplate<'a> {
    /// Namespace of the generated class
    pub namespace: &'a str,
}

fn render_file(name: &str, template: &impl Template) -> Result<GeneratedFile> {
    let mut contents = template.render()?;
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    Ok(GeneratedFile::new(name, contents))
}

/// `IPageModel.cs` and `PageModel.cs` in `namespace`
pub(super) fn page_model_files(namespace: &str) -> Result<Vec<GeneratedFile>> {
    Ok(vec![
        render_file("IPageModel.cs", &PageModelInterfaceTemplate { namespace })?,
        render_file("PageModel.cs", &PageModelTemplate { namespace })?,
    ])
}

/// `ResultModel.cs` in `namespace`
pub(super) fn result_model_file(namespace: &str) -> Result<GeneratedFile> {
    render_file("ResultModel.cs", &ResultModelTemplate { namespace })
}

/// `CustomWebApplicationFactory.cs` in `namespace`
pub(super) fn web_application_factory_file(namespace: &str) -> Result<GeneratedFile> {
    render_file(
        "CustomWebApplicationFactory.cs",
        &WebApplicationFactoryTemplate { namespace },
    )
}

/// `pagemodel`: the paging interface and class
pub struct PageModelGenerator;

impl Generator for PageModelGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::PageModel
    }

    fn render(&self, options: &GeneratorOptions) -> Result<Vec<GeneratedFile>> {
        page_model_files(options.namespace()?)
    }

    fn help(&self) -> String {
        help_text(
            self.kind(),
            "Generates a model to handle paging for queryables.",
            &[NAMESPACE_PARAM, OUTPUT_PARAM],
        )
    }
}

/// `resultmodel`: the outcome wrapper class
pub struct ResultModelGenerator;

impl Generator for ResultModelGenerator {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::ResultModel
    }

    fn render(&self, options: &GeneratorOptions) -> Result<Vec<GeneratedFile>> {
        Ok(vec![result_model_file(options.namespace()?)?])
    }

    fn help(&self) -> String {
        help_text(
            self.kind(),
            "Generates a result model that represents the result of a service operation.",
            &[NAMESPACE_PARAM, OUTPUT_PARAM],
        )
    }
}
