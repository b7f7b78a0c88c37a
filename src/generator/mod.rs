//! # Generator Module
//!
//! Scaffolds ASP.NET Core source files from a C# model class.
//!
//! ## Overview
//!
//! Every generator is selected by a keyword and produces one family of files:
//!
//! | Keyword              | Files                                                    |
//! |----------------------|----------------------------------------------------------|
//! | `servicegen`         | `I{Name}Service.cs`, `{Name}Service.cs`                  |
//! | `servicegen:test`    | `{Name}ServiceTests.cs`                                  |
//! | `pagemodel`          | `IPageModel.cs`, `PageModel.cs`                          |
//! | `resultmodel`        | `ResultModel.cs`                                         |
//! | `mvccontroller`      | `{Plural}Controller.cs`                                  |
//! | `mvccontroller:test` | `{Plural}ControllerTests.cs`, `CustomWebApplicationFactory.cs` |
//! | `apicontroller`      | `{Plural}Controller.cs`                                  |
//!
//! ## Architecture
//!
//! ```text
//! GeneratorOptions → ModelMetadata → emit IR (SourceFile) → render → GeneratedFile → output
//!                                  ↘ askama templates (fixed-shape files) ↗
//! ```
//!
//! 1. **Metadata** - the model file is parsed once per run ([`crate::model`])
//! 2. **Emission** - model-dependent files are built as an [`emit::SourceFile`]
//!    tree and pretty-printed, so indentation and braces are structural
//! 3. **Templates** - files whose shape never depends on the model (page and
//!    result models, the web application factory) are Askama templates
//! 4. **Output** - rendered files are written to the output folder, overwriting
//!    existing files of the same name
//!
//! Rendering is pure: [`Generator::render`] returns the files without touching
//! the filesystem, and [`Generator::generate`] writes them. All metadata and
//! option errors surface from `render`, before the first write.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use minionsuite::generator::{get_generator, GeneratorKind, GeneratorOptions};
//!
//! let options = GeneratorOptions {
//!     model_path: Some("Models/Post.cs".into()),
//!     namespace: Some("Blog.Services".into()),
//!     ..GeneratorOptions::default()
//! };
//! let written = get_generator(GeneratorKind::Service).generate(&options)?;
//! ```

pub mod emit;
mod controller;
mod options;
mod output;
mod service;
mod support;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Result, ScaffoldError};
use crate::model::ModelMetadata;
use emit::SourceFile;

pub use controller::{ApiControllerGenerator, MvcControllerGenerator};
pub use controller_test::MvcControllerTestGenerator;
pub use options::{GeneratorOptions, DEFAULT_DB_CONTEXT, DEFAULT_PAGE_SIZE};
pub use output::write_files;
pub use service::ServiceGenerator;
pub use service_test::ServiceTestGenerator;
pub use support::{PageModelGenerator, ResultModelGenerator};

/// A rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output folder, e.g. `PostService.cs`
    pub name: String,
    /// Full file contents
    pub contents: String,
}

impl GeneratedFile {
    /// Build a file from its name and contents
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        GeneratedFile {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// The known generators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// `servicegen`
    Service,
    /// `servicegen:test`
    ServiceTest,
    /// `pagemodel`
    PageModel,
    /// `resultmodel`
    ResultModel,
    /// `mvccontroller`
    MvcController,
    /// `mvccontroller:test`
    MvcControllerTest,
    /// `apicontroller`
    ApiController,
}

impl GeneratorKind {
    /// All generators, in the order the usage text lists them
    pub const ALL: [GeneratorKind; 7] = [
        GeneratorKind::Service,
        GeneratorKind::ServiceTest,
        GeneratorKind::PageModel,
        GeneratorKind::ResultModel,
        GeneratorKind::MvcController,
        GeneratorKind::MvcControllerTest,
        GeneratorKind::ApiController,
    ];

    /// Command-line keyword
    pub fn keyword(self) -> &'static str {
        match self {
            GeneratorKind::Service => "servicegen",
            GeneratorKind::ServiceTest => "servicegen:test",
            GeneratorKind::PageModel => "pagemodel",
            GeneratorKind::ResultModel => "resultmodel",
            GeneratorKind::MvcController => "mvccontroller",
            GeneratorKind::MvcControllerTest => "mvccontroller:test",
            GeneratorKind::ApiController => "apicontroller",
        }
    }

    /// One-line description for the usage text
    pub fn summary(self) -> &'static str {
        match self {
            GeneratorKind::Service => "generates a service layer based on a model class.",
            GeneratorKind::ServiceTest => {
                "generates tests for the service layer based on a model class."
            }
            GeneratorKind::PageModel => "generates a model to handle paging for queryables.",
            GeneratorKind::ResultModel => {
                "generates a result model that represents the result of a service operation."
            }
            GeneratorKind::MvcController => {
                "generates an MVC controller with CRUD operations on a model class."
            }
            GeneratorKind::MvcControllerTest => {
                "generates tests for the MVC controller of a model class."
            }
            GeneratorKind::ApiController => {
                "generates an API controller with CRUD operations on a model class."
            }
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for GeneratorKind {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        GeneratorKind::ALL
            .into_iter()
            .find(|kind| kind.keyword() == s)
            .ok_or_else(|| ScaffoldError::InvalidGenerator(s.to_string()))
    }
}

/// A named strategy rendering one family of files
pub trait Generator {
    /// Which generator this is
    fn kind(&self) -> GeneratorKind;

    /// Render every file without writing anything
    ///
    /// # Errors
    ///
    /// Fails when required options are missing or the model cannot be analysed.
    fn render(&self, options: &GeneratorOptions) -> Result<Vec<GeneratedFile>>;

    /// Usage text for this generator
    fn help(&self) -> String;

    /// Render, then write the files into `options.output`
    ///
    /// Returns the written paths in order. A write failure stops the run;
    /// files written before it are kept.
    ///
    /// # Errors
    ///
    /// Any error of [`Generator::render`], or [`ScaffoldError::Io`] when writing fails.
    fn generate(&self, options: &GeneratorOptions) -> Result<Vec<PathBuf>> {
        let files = self.render(options)?;
        write_files(&options.output, &files)
    }
}

/// The generator implementing `kind`
pub fn get_generator(kind: GeneratorKind) -> Box<dyn Generator> {
    match kind {
        GeneratorKind::Service => Box::new(ServiceGenerator),
        GeneratorKind::ServiceTest => Box::new(ServiceTestGenerator),
        GeneratorKind::PageModel => Box::new(PageModelGenerator),
        GeneratorKind::ResultModel => Box::new(ResultModelGenerator),
        GeneratorKind::MvcController => Box::new(MvcControllerGenerator),
        GeneratorKind::MvcControllerTest => Box::new(MvcControllerTestGenerator),
        GeneratorKind::ApiController => Box::new(ApiControllerGenerator),
    }
}

/// Look a generator up by its command-line keyword
///
/// # Errors
///
/// [`ScaffoldError::InvalidGenerator`] for an unknown keyword.
pub fn generator_for(keyword: &str) -> Result<Box<dyn Generator>> {
    keyword.parse().map(get_generator)
}

/// Top-level usage text listing every generator
pub fn usage() -> String {
    let width = GeneratorKind::ALL
        .iter()
        .map(|kind| kind.keyword().len() + 1)
        .max()
        .unwrap_or(0);
    let mut text = String::from(
        "Usage: minionsuite [generator] [parameters]\n\nGeneral purpose generators.\n\nGenerators:\n",
    );
    for kind in GeneratorKind::ALL {
        let label = format!("{}:", kind.keyword());
        text.push_str(&format!("  {label:<width$}  {}\n", kind.summary()));
    }
    text.push_str("\nRun `minionsuite [generator] --help` for the parameters of a generator.\n");
    text
}

/// Usage text of a single generator: usage line, description, aligned parameter table
fn help_text(kind: GeneratorKind, description: &str, parameters: &[(&str, &str)]) -> String {
    let width = parameters
        .iter()
        .map(|(flag, _)| flag.len() + 1)
        .max()
        .unwrap_or(0);
    let mut text = format!(
        "Usage: minionsuite {} [parameters]\n\n{description}\n\nParameters:\n",
        kind.keyword()
    );
    for (flag, meaning) in parameters {
        let label = format!("{flag}:");
        text.push_str(&format!("  {label:<width$}  {meaning}\n"));
    }
    text
}

const MODEL_PATH_PARAM: (&str, &str) = ("-m|--model-path <path>", "The path to the model class.");
const NAMESPACE_PARAM: (&str, &str) = (
    "-ns|--namespace <name>",
    "The namespace of the generated classes.",
);
const OUTPUT_PARAM: (&str, &str) = (
    "-o|--output <path>",
    "The path to the output folder (default: .).",
);
const DB_CONTEXT_PARAM: (&str, &str) = (
    "-db|--db-context <class name>",
    "The database context class (default: ApplicationDbContext).",
);

/// Start a file in `namespace` with `usings`, importing the model namespace when it differs
fn model_file(namespace: &str, meta: &ModelMetadata, usings: &[&str]) -> SourceFile {
    let file = usings
        .iter()
        .fold(SourceFile::new(namespace), |file, using| file.using(*using));
    if meta.namespace() == namespace {
        file
    } else {
        file.using(meta.namespace())
    }
}
