//! Project generation entry points.

use log::info;

use crate::config::{ProjectConfig, ProjectOptions};
use crate::context::{build_context, IdGenerator};
use crate::error::Result;
use crate::processor::{Generated, Processor};
use crate::renderer::MiniJinjaRenderer;
use crate::store::TemplateStore;

/// Generates the project described by `config` into `config.project_dir()`.
///
/// # Errors
/// The first asset, template or filesystem error aborts the run. Files and
/// directories written before the failure are not removed.
pub fn generate_project(
    config: &ProjectConfig,
    store: &dyn TemplateStore,
    ids: &mut dyn IdGenerator,
) -> Result<Generated> {
    let descriptor = config.template().descriptor();
    let context = build_context(config, ids);
    let destination = config.project_dir();
    info!(
        "Generating {} project '{}' into {}",
        descriptor.name,
        config.name(),
        destination.display()
    );

    let renderer = MiniJinjaRenderer::new();
    let generated = Processor::new(store, &renderer, &context)
        .materialize(descriptor.asset_root, &destination)?;
    info!(
        "Wrote {} files in {} directories",
        generated.files.len(),
        generated.directories.len()
    );
    Ok(generated)
}

/// Validates `options` and generates the project.
///
/// Validation happens before anything touches the filesystem.
pub fn scaffold(
    options: ProjectOptions,
    store: &dyn TemplateStore,
    ids: &mut dyn IdGenerator,
) -> Result<Generated> {
    let config = options.validate()?;
    generate_project(&config, store, ids)
}
