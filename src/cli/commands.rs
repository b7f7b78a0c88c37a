use crate::config::resolve_project_config;
use crate::generator::{generator_for, usage, GeneratorOptions};
use anyhow::Context;
use clap::{ArgAction, Parser};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Command-line interface for minionsuite
///
/// A single optional generator keyword followed by its parameters. Help is
/// handled by the generators themselves, so clap's built-in help flag is off.
#[derive(Parser, Debug)]
#[command(name = "minionsuite")]
#[command(about = "Scaffolds ASP.NET Core services, controllers and tests from a C# model", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Generator keyword, e.g. `servicegen` or `mvccontroller:test`
    pub generator: Option<String>,

    /// Path to the C# model class
    #[arg(short = 'm', long)]
    pub model_path: Option<String>,

    /// Namespace of the generated classes (`-ns`)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Output folder (default: .)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Database context class (`-db`, default: ApplicationDbContext)
    #[arg(long)]
    pub db_context: Option<String>,

    /// Items per page of generated controller list actions (default: 20)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Also generate IPageModel.cs and PageModel.cs (`-gpm`)
    #[arg(long, default_value_t = false)]
    pub generate_page_model: bool,

    /// Also generate ResultModel.cs (`-grm`)
    #[arg(long, default_value_t = false)]
    pub generate_result_model: bool,

    /// Also generate CustomWebApplicationFactory.cs (`-gwaf`)
    #[arg(long, default_value_t = false)]
    pub generate_web_application_factory: bool,

    /// Show usage, or the parameters of the given generator
    #[arg(short = 'h', long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Path to a project configuration file (default: ./minionsuite.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Multi-letter single-dash spellings and their long forms
const SHORT_ALIASES: &[(&str, &str)] = &[
    ("-ns", "--namespace"),
    ("-db", "--db-context"),
    ("-gpm", "--generate-page-model"),
    ("-grm", "--generate-result-model"),
    ("-gwaf", "--generate-web-application-factory"),
];

/// Rewrite `-ns`, `-db`, `-gpm`, `-grm` and `-gwaf` to their long forms
///
/// clap reads `-ns` as the cluster `-n -s`, so these spellings are replaced
/// before parsing. The `-ns=Value` form is rewritten too.
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let (flag, value) = match arg.split_once('=') {
                Some((flag, value)) => (flag, Some(value)),
                None => (arg.as_str(), None),
            };
            match SHORT_ALIASES.iter().find(|(short, _)| *short == flag) {
                Some((_, long)) => match value {
                    Some(value) => format!("{long}={value}"),
                    None => (*long).to_string(),
                },
                None => arg,
            }
        })
        .collect()
}

/// Parse process-style arguments (program name first)
///
/// # Errors
///
/// Returns clap's error for unknown flags or missing values.
pub fn parse_args<I, S>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Cli::try_parse_from(normalize_args(args))
}

impl Cli {
    /// Build generator options: defaults, then the project config, then flags
    ///
    /// Relative model, output and config paths resolve against `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing or a config file
    /// cannot be parsed.
    pub fn options(&self, working_dir: &Path) -> anyhow::Result<GeneratorOptions> {
        let mut options = GeneratorOptions::default();

        let config_path = self.config.as_deref().map(|path| working_dir.join(path));
        if let Some(config) = resolve_project_config(config_path.as_deref(), working_dir)? {
            debug!(?config, "loaded project config");
            config.apply_to(&mut options);
        }

        if let Some(model_path) = &self.model_path {
            options.model_path = Some(working_dir.join(model_path).to_string_lossy().into_owned());
        }
        if let Some(namespace) = &self.namespace {
            options.namespace = Some(namespace.clone());
        }
        if let Some(output) = &self.output {
            options.output = output.clone();
        }
        if let Some(db_context) = &self.db_context {
            options.db_context = db_context.clone();
        }
        if let Some(page_size) = self.page_size {
            options.page_size = page_size;
        }
        options.generate_page_model |= self.generate_page_model;
        options.generate_result_model |= self.generate_result_model;
        options.generate_web_application_factory |= self.generate_web_application_factory;
        options.output = working_dir.join(&options.output);

        Ok(options)
    }
}

/// Execute a parsed command line against `working_dir`, printing to `out`
///
/// - no generator: print the usage text
/// - generator with `--help`: print that generator's parameters
/// - otherwise: generate and print one line per written file
///
/// # Errors
///
/// Returns an error if:
/// - The generator keyword is unknown
/// - Required options are missing or the model cannot be analysed
/// - An output file cannot be written
pub fn execute(cli: &Cli, working_dir: &Path, out: &mut dyn Write) -> anyhow::Result<()> {
    let Some(keyword) = cli.generator.as_deref() else {
        write!(out, "{}", usage())?;
        return Ok(());
    };

    let generator = generator_for(keyword)?;
    if cli.help {
        write!(out, "{}", generator.help())?;
        return Ok(());
    }

    let options = cli.options(working_dir)?;
    info!(generator = %generator.kind(), output = %options.output.display(), "generating");
    let written = generator.generate(&options)?;
    for path in written {
        writeln!(out, "✅ Generated {}", path.display())?;
    }
    Ok(())
}

/// Execute the CLI command against the current directory and stdout
///
/// # Errors
///
/// See [`execute`].
pub fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    let working_dir = std::env::current_dir().context("Failed to read the working directory")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, &working_dir, &mut out)
}
