use crate::config::Config;
use crate::error::{Error, Result};
use std::fs;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "cheatsheet";

/// Template engine for rendering the output document.
#[derive(Debug)]
pub(crate) struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Creates a new template engine from configuration.
    ///
    /// The embedded template is used unless the configuration points at
    /// a replacement file.
    ///
    /// # Errors
    ///
    /// Returns an error if the template file cannot be read or the
    /// template does not parse.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let source = match &config.template_path {
            Some(path) => fs::read_to_string(path).map_err(|e| Error::io(path, e))?,
            None => include_str!("../templates/cheatsheet.tera").to_string(),
        };

        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, &source)
            .map_err(|e| Error::template(TEMPLATE_NAME, e))?;

        Ok(Self { tera })
    }

    /// Renders one document from the banner and the per-chunk blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub(crate) fn render(&self, banner: &str, blocks: &[String]) -> Result<String> {
        let mut context = Context::new();
        context.insert("banner", banner);
        context.insert("blocks", blocks);

        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| Error::template(TEMPLATE_NAME, e))
    }
}
