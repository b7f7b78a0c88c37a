use std::path::PathBuf;

use crate::error::{Result, ScaffoldError};
use crate::model::ModelMetadata;

/// Database context class referenced when none is given
pub const DEFAULT_DB_CONTEXT: &str = "ApplicationDbContext";

/// Page size of generated controllers when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Everything a generator needs besides the model itself
///
/// Built by the CLI from flags layered over the project configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Path of the C# model source
    pub model_path: Option<String>,
    /// Namespace of the generated classes
    pub namespace: Option<String>,
    /// Output folder
    pub output: PathBuf,
    /// Database context class used by services and service tests
    pub db_context: String,
    /// `PAGE_SIZE` of generated controllers
    pub page_size: u32,
    /// Also emit `IPageModel.cs`/`PageModel.cs` from `servicegen`
    pub generate_page_model: bool,
    /// Also emit `ResultModel.cs` from `servicegen`
    pub generate_result_model: bool,
    /// Also emit `CustomWebApplicationFactory.cs` from `mvccontroller:test`
    pub generate_web_application_factory: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            model_path: None,
            namespace: None,
            output: PathBuf::from("."),
            db_context: DEFAULT_DB_CONTEXT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            generate_page_model: false,
            generate_result_model: false,
            generate_web_application_factory: false,
        }
    }
}

impl GeneratorOptions {
    /// The target namespace
    ///
    /// # Errors
    ///
    /// [`ScaffoldError::Configuration`] when it is missing or blank.
    pub fn namespace(&self) -> Result<&str> {
        self.namespace
            .as_deref()
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .ok_or_else(|| ScaffoldError::Configuration("You must enter a namespace.".to_string()))
    }

    /// Load the metadata of the model at `model_path`
    ///
    /// # Errors
    ///
    /// Everything [`ModelMetadata::load`] raises; a missing path is a
    /// [`ScaffoldError::Configuration`] error.
    pub fn load_model(&self) -> Result<ModelMetadata> {
        ModelMetadata::load(self.model_path.as_deref().unwrap_or_default())
    }
}
