//! Project configuration.
//!
//! [`ProjectOptions`] is the raw input gathered from flags or an options file.
//! [`ProjectOptions::validate`] checks it, fills in cloud-specific defaults and
//! produces an immutable [`ProjectConfig`], which is all the generator sees.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{Database, Features, TemplateId};
use crate::constants::{
    DEFAULT_FRAMEWORK, DEFAULT_MAX_INSTANCES, DEFAULT_MIN_INSTANCES, DEFAULT_PORT,
};
use crate::error::{Error, Result};

/// Unvalidated project options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectOptions {
    pub name: String,
    pub template: String,
    pub output_dir: PathBuf,
    pub framework: String,
    pub port: i64,
    pub min_instances: i64,
    pub max_instances: i64,
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub database: Option<String>,
    pub features: Features,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            name: String::new(),
            template: String::new(),
            output_dir: PathBuf::from("."),
            framework: DEFAULT_FRAMEWORK.to_string(),
            port: DEFAULT_PORT,
            min_instances: DEFAULT_MIN_INSTANCES,
            max_instances: DEFAULT_MAX_INSTANCES,
            cpu: None,
            memory: None,
            database: None,
            features: Features::NONE,
        }
    }
}

impl ProjectOptions {
    /// Loads options from a JSON or YAML file.
    ///
    /// JSON is tried first; anything that is not valid JSON is parsed as YAML.
    /// Missing fields keep their defaults.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading options from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::parse(&content)
    }

    /// Parses options from JSON or YAML text.
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content) {
            Ok(options) => Ok(options),
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("invalid options format: {e}"))),
        }
    }

    /// Validates the options and resolves defaults.
    ///
    /// # Errors
    /// * `Error::ValidationError` for a missing or out-of-range value
    /// * `Error::UnknownTemplate` if the template is not in the catalog
    pub fn validate(self) -> Result<ProjectConfig> {
        validate_name(&self.name)?;

        if self.port <= 0 || self.port > 65535 {
            return Err(Error::ValidationError(
                "port must be between 1 and 65535".to_string(),
            ));
        }
        if self.min_instances < 0 {
            return Err(Error::ValidationError(
                "min-instances must be >= 0".to_string(),
            ));
        }
        if self.max_instances <= 0 {
            return Err(Error::ValidationError(
                "max-instances must be > 0".to_string(),
            ));
        }
        if self.min_instances > self.max_instances {
            return Err(Error::ValidationError(
                "min-instances cannot be greater than max-instances".to_string(),
            ));
        }
        if self.framework.trim().is_empty() {
            return Err(Error::ValidationError("framework is required".to_string()));
        }

        let template: TemplateId = self.template.parse()?;
        let database = self
            .database
            .as_deref()
            .filter(|db| !db.trim().is_empty())
            .map(str::parse::<Database>)
            .transpose()?;

        let min_instances = u32::try_from(self.min_instances).map_err(|_| {
            Error::ValidationError(format!("min-instances must be <= {}", u32::MAX))
        })?;
        let max_instances = u32::try_from(self.max_instances).map_err(|_| {
            Error::ValidationError(format!("max-instances must be <= {}", u32::MAX))
        })?;

        let descriptor = template.descriptor();
        let cpu = non_empty_or(self.cpu, descriptor.default_cpu);
        let memory = non_empty_or(self.memory, descriptor.default_memory);

        Ok(ProjectConfig {
            display_name: title_case(&self.name),
            name: self.name,
            template,
            output_dir: self.output_dir,
            framework: self.framework,
            port: self.port as u16,
            min_instances,
            max_instances,
            cpu,
            memory,
            database,
            features: self.features,
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::ValidationError("project name is required".to_string()));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::ValidationError(format!(
            "project name '{name}' must be a single directory name"
        )));
    }
    if title_case(name).is_empty() {
        return Err(Error::ValidationError(format!(
            "project name '{name}' must contain more than separators"
        )));
    }
    Ok(())
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

/// Validated, immutable project configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    name: String,
    display_name: String,
    template: TemplateId,
    output_dir: PathBuf,
    framework: String,
    port: u16,
    min_instances: u32,
    max_instances: u32,
    cpu: String,
    memory: String,
    database: Option<Database>,
    features: Features,
}

impl ProjectConfig {
    /// Raw project name as given by the user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title-cased name with separators removed, e.g. `MyApi`.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Directory the project is generated into: `output_dir/name`.
    pub fn project_dir(&self) -> PathBuf {
        self.output_dir.join(&self.name)
    }

    pub fn framework(&self) -> &str {
        &self.framework
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn min_instances(&self) -> u32 {
        self.min_instances
    }

    pub fn max_instances(&self) -> u32 {
        self.max_instances
    }

    pub fn cpu(&self) -> &str {
        &self.cpu
    }

    pub fn memory(&self) -> &str {
        &self.memory
    }

    /// Explicitly requested database engine, if any.
    pub fn database(&self) -> Option<Database> {
        self.database
    }

    /// Explicitly requested features, before template defaults are applied.
    pub fn features(&self) -> Features {
        self.features
    }
}

/// Converts a raw name to its display form.
///
/// Words are split on hyphens, underscores and whitespace. Each word gets an
/// upper-case first letter and a lower-case remainder; words are joined
/// without a separator.
pub fn title_case(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("my-api"), "MyApi");
        assert_eq!(title_case("foo_bar baz"), "FooBarBaz");
        assert_eq!(title_case("WebApp"), "Webapp");
        assert_eq!(title_case("--orders--"), "Orders");
        assert_eq!(title_case(""), "");
    }
}
