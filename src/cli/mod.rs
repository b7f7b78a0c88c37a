//! # CLI Module
//!
//! Command-line interface of the `minionsuite` binary.
//!
//! ## Overview
//!
//! ```bash
//! minionsuite [generator] [parameters]
//! ```
//!
//! The generator keyword selects what to scaffold (`servicegen`,
//! `servicegen:test`, `pagemodel`, `resultmodel`, `mvccontroller`,
//! `mvccontroller:test`, `apicontroller`). Without a keyword the usage text is
//! printed; with `--help` the parameters of the selected generator are.
//!
//! ## Parameters
//!
//! - `-m|--model-path <path>` - The C# model class
//! - `-ns|--namespace <name>` - Namespace of the generated classes
//! - `-o|--output <path>` - Output folder (default: `.`)
//! - `-db|--db-context <class name>` - Database context (default: `ApplicationDbContext`)
//! - `--page-size <count>` - Controller page size (default: 20)
//! - `-gpm`, `-grm`, `-gwaf` - Also emit page model, result model, web application factory
//! - `--config <path>` - Project configuration file (default: `./minionsuite.toml`)
//! - `-v|--verbose` - Debug logging
//!
//! The multi-letter single-dash forms are rewritten by [`normalize_args`]
//! before clap sees them.
//!
//! ## Examples
//!
//! ```bash
//! # Service layer plus its paging and result types
//! minionsuite servicegen -m Models/Post.cs -ns Blog.Services -o Services -gpm -grm
//!
//! # Controller tests with a web application factory
//! minionsuite mvccontroller:test -m Models/Post.cs -ns Blog.Tests -gwaf
//!
//! # Parameters of one generator
//! minionsuite apicontroller --help
//! ```

mod commands;


pub use commands::{execute, normalize_args, parse_args, run_cli, Cli};
