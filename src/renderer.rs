//! Template renderer and rendering functionality for ndc.
//! Lowers action-dialect bodies and executes them with MiniJinja.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use minijinja::value::ValueKind;
use minijinja::{
    escape_formatter, AutoEscape, Environment, Output, State, UndefinedBehavior, Value,
};

use crate::context::Context;
use crate::dialect;
use crate::error::{Error, Result};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Asset path of the template, used in error messages
    /// * `template` - Template source in the action dialect
    /// * `context` - Values for placeholder substitution
    fn render(&self, name: &str, template: &str, context: &Context) -> Result<String>;

    /// Renders a template body into a newly created file at `dest`.
    ///
    /// The template is compiled before `dest` is created, so a syntax error
    /// leaves no file behind. An existing file at `dest` is overwritten.
    fn render_file(&self, name: &str, template: &[u8], dest: &Path, context: &Context)
        -> Result<()>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// Shared configuration cloned for every template.
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that rejects undefined keys and never escapes output.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_formatter(format_value);
        Self { env }
    }

    /// Lowers and compiles `template`, returning an environment holding it
    /// under `name`.
    fn compile(&self, name: &str, template: &str) -> Result<Environment<'static>> {
        let lowered = dialect::lower(template).map_err(|e| Error::SyntaxError {
            path: name.to_string(),
            line: e.line,
            message: e.message,
        })?;

        let mut env = self.env.clone();
        env.add_template_owned(name.to_string(), lowered)
            .map_err(|source| Error::TemplateError {
                path: name.to_string(),
                source,
            })?;
        Ok(env)
    }
}

/// Writes booleans as `true`/`false`, the way they appear in file names.
fn format_value(
    out: &mut Output,
    state: &State,
    value: &Value,
) -> std::result::Result<(), minijinja::Error> {
    if value.kind() == ValueKind::Bool {
        out.write_str(if value.is_true() { "true" } else { "false" })?;
        return Ok(());
    }
    escape_formatter(out, state, value)
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, name: &str, template: &str, context: &Context) -> Result<String> {
        let env = self.compile(name, template)?;
        let template_error = |source: minijinja::Error| Error::TemplateError {
            path: name.to_string(),
            source,
        };
        let tmpl = env.get_template(name).map_err(template_error)?;
        tmpl.render(context).map_err(template_error)
    }

    fn render_file(
        &self,
        name: &str,
        template: &[u8],
        dest: &Path,
        context: &Context,
    ) -> Result<()> {
        let text = std::str::from_utf8(template).map_err(|e| Error::AssetError {
            path: name.to_string(),
            reason: format!("template is not valid UTF-8: {e}"),
        })?;

        let env = self.compile(name, text)?;
        let template_error = |source: minijinja::Error| Error::TemplateError {
            path: name.to_string(),
            source,
        };
        let tmpl = env.get_template(name).map_err(template_error)?;

        debug!("Writing file: {}", dest.display());
        let file = File::create(dest).map_err(|source| Error::FilesystemError {
            action: "create file",
            path: dest.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        tmpl.render_captured_to(context, &mut writer)
            .map_err(template_error)?;
        writer.flush().map_err(|source| Error::FilesystemError {
            action: "write file",
            path: dest.to_path_buf(),
            source,
        })
    }
}
