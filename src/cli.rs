//! Command-line interface implementation for ndc.
//! Provides argument parsing using clap and folds flags into [`ProjectOptions`].

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::Features;
use crate::config::ProjectOptions;
use crate::error::Result;

/// Command-line arguments structure for ndc.
#[derive(Parser, Debug)]
#[command(
    name = "ndc",
    author,
    version,
    about = "ndc: generate cloud-ready .NET service projects",
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a template
    Create(CreateArgs),
    /// List available templates
    List,
}

/// Arguments of `ndc create`.
#[derive(clap::Args, Debug, Default)]
pub struct CreateArgs {
    /// Template to generate from (see `ndc list`)
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory the project folder is created in
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// .NET framework version
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Application port
    #[arg(short, long, allow_negative_numbers = true)]
    pub port: Option<i64>,

    /// Minimum instances
    #[arg(long, allow_negative_numbers = true)]
    pub min_instances: Option<i64>,

    /// Maximum instances
    #[arg(long, allow_negative_numbers = true)]
    pub max_instances: Option<i64>,

    /// CPU allocation (cloud-specific)
    #[arg(long)]
    pub cpu: Option<String>,

    /// Memory allocation (cloud-specific)
    #[arg(long)]
    pub memory: Option<String>,

    /// Database engine (PostgreSQL, MySQL, SqlServer)
    #[arg(long)]
    pub database: Option<String>,

    /// Include Redis cache
    #[arg(long)]
    pub cache: bool,

    /// Include S3-compatible storage
    #[arg(long)]
    pub storage: bool,

    /// Include email service
    #[arg(long)]
    pub mail: bool,

    /// Include message queue
    #[arg(long)]
    pub queue: bool,

    /// Include background jobs
    #[arg(long)]
    pub jobs: bool,

    /// Include worker service
    #[arg(long)]
    pub worker: bool,

    /// Comma-separated services (database,cache,storage,mail,queue,jobs,worker,all)
    #[arg(long, value_name = "LIST")]
    pub services: Option<String>,

    /// JSON or YAML file with project options; flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read templates from this directory instead of the bundled set
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

impl CreateArgs {
    /// Folds the flags over the options file (or defaults).
    ///
    /// # Errors
    /// * `Error::ConfigError` if the options file cannot be loaded
    /// * `Error::ValidationError` if the services list is malformed
    pub fn to_options(&self) -> Result<ProjectOptions> {
        let mut options = match &self.config {
            Some(path) => ProjectOptions::from_file(path)?,
            None => ProjectOptions::default(),
        };

        options.template = self.template.clone();
        if let Some(name) = &self.name {
            options.name = name.clone();
        }
        if let Some(output) = &self.output {
            options.output_dir = output.clone();
        }
        if let Some(framework) = &self.framework {
            options.framework = framework.clone();
        }
        if let Some(port) = self.port {
            options.port = port;
        }
        if let Some(min) = self.min_instances {
            options.min_instances = min;
        }
        if let Some(max) = self.max_instances {
            options.max_instances = max;
        }
        if self.cpu.is_some() {
            options.cpu = self.cpu.clone();
        }
        if self.memory.is_some() {
            options.memory = self.memory.clone();
        }
        if self.database.is_some() {
            options.database = self.database.clone();
        }

        let flags = Features {
            cache: self.cache,
            storage: self.storage,
            mail: self.mail,
            queue: self.queue,
            jobs: self.jobs,
            worker: self.worker,
        };
        let services = match &self.services {
            Some(list) => Features::from_services(list)?,
            None => Features::NONE,
        };
        options.features = options.features.union(flags).union(services);

        Ok(options)
    }
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
