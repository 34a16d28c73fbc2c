//! Template tree processing.
//!
//! [`Processor`] mirrors a template root from a [`TemplateStore`] into a
//! destination directory. Names go through [`render_name`], file bodies
//! through a [`TemplateRenderer`]. The first failure aborts the walk; output
//! written before it is left in place.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::store::{join_asset_path, AssetKind, TemplateStore};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Substitutes `{{.Key}}` placeholders in a single file or directory name.
///
/// Only direct substitution is supported. The result must be a usable path
/// segment.
///
/// # Errors
/// * `Error::NameError` if a placeholder is unknown or holds a sequence, if
///   any `{{` remains, or if the result is empty, `.`, `..` or contains a
///   path separator
pub fn render_name(raw: &str, context: &Context) -> Result<String> {
    let name_error = |reason: String| Error::NameError {
        name: raw.to_string(),
        reason,
    };

    let mut rendered = String::with_capacity(raw.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(raw) {
        let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = context
            .get(key.as_str())
            .ok_or_else(|| name_error(format!("unknown placeholder '{}'", key.as_str())))?;
        let fragment = value.as_name_fragment().ok_or_else(|| {
            name_error(format!("placeholder '{}' is a sequence", key.as_str()))
        })?;
        rendered.push_str(&raw[last..whole.start()]);
        rendered.push_str(&fragment);
        last = whole.end();
    }
    rendered.push_str(&raw[last..]);

    if rendered.contains("{{") {
        return Err(name_error("unsupported placeholder syntax".to_string()));
    }
    if !is_rendered_name_valid(&rendered) {
        return Err(name_error(format!("'{rendered}' is not a valid name")));
    }
    Ok(rendered)
}

/// Checks that a rendered name is a single, non-empty path segment.
pub fn is_rendered_name_valid(name: &str) -> bool {
    !name.trim().is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Summary of what a generation run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generated {
    /// Destination root.
    pub root: PathBuf,
    /// Directories created below the root, in creation order.
    pub directories: Vec<PathBuf>,
    /// Files written, in creation order.
    pub files: Vec<PathBuf>,
}

/// Walks a template root and materializes it at a destination.
pub struct Processor<'a> {
    store: &'a dyn TemplateStore,
    renderer: &'a dyn TemplateRenderer,
    context: &'a Context,
}

impl<'a> Processor<'a> {
    pub fn new(
        store: &'a dyn TemplateStore,
        renderer: &'a dyn TemplateRenderer,
        context: &'a Context,
    ) -> Self {
        Self {
            store,
            renderer,
            context,
        }
    }

    /// Mirrors `template_root` into `destination`.
    ///
    /// Directory creation is idempotent; existing files are overwritten.
    ///
    /// # Errors
    /// The first asset, name, template or filesystem error aborts the run.
    pub fn materialize(&self, template_root: &str, destination: &Path) -> Result<Generated> {
        debug!(
            "Materializing template root '{}' into {}",
            template_root,
            destination.display()
        );
        create_dir_all(destination)?;

        let mut generated = Generated {
            root: destination.to_path_buf(),
            ..Generated::default()
        };
        self.walk(template_root, destination, &mut generated)?;
        Ok(generated)
    }

    fn walk(&self, asset_dir: &str, dest_dir: &Path, generated: &mut Generated) -> Result<()> {
        for entry in self.store.list(asset_dir)? {
            let source = join_asset_path(asset_dir, &entry.name);
            let target = dest_dir.join(render_name(&entry.name, self.context)?);
            debug!("Processing {} -> {}", source, target.display());

            match entry.kind {
                AssetKind::Directory => {
                    create_dir_all(&target)?;
                    generated.directories.push(target.clone());
                    self.walk(&source, &target, generated)?;
                }
                AssetKind::File => {
                    let content = self.store.read(&source)?;
                    self.renderer
                        .render_file(&source, &content, &target, self.context)?;
                    generated.files.push(target);
                }
            }
        }
        Ok(())
    }
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::FilesystemError {
        action: "create directory",
        path: path.to_path_buf(),
        source,
    })
}
