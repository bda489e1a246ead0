use crate::core::slides::{render_slide, SlideSpec};
use crate::core::{ConfigProvider, Deck, Pipeline, Storage};
use crate::pptx::package::write_package;
use crate::pptx::Presentation;
use crate::utils::error::{ReportError, Result};
use serde_json::error::Category;

/// Deck JSON in, `.pptx` out.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Parse a deck description.
///
/// Syntax errors are reported as a format error against `path`; well-formed
/// JSON with the wrong structure is an invalid configuration value.
pub fn parse_deck(path: &str, data: &[u8]) -> Result<Deck> {
    serde_json::from_slice(data).map_err(|source| match source.classify() {
        Category::Data => ReportError::InvalidConfigValueError {
            field: "presentation".to_string(),
            value: path.to_string(),
            reason: source.to_string(),
        },
        Category::Io | Category::Syntax | Category::Eof => ReportError::ConfigFormatError {
            path: path.to_string(),
            source,
        },
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Deck> {
        let path = self.config.input_path();
        tracing::debug!("Reading deck description from: {}", path);

        let data = self.storage.read_file(path).await?;
        let deck = parse_deck(path, &data).inspect_err(|e| {
            if let ReportError::ConfigFormatError { source, .. } = e {
                tracing::error!("Invalid configuration file format: {}", path);
                tracing::error!("Error: {}", source);
            }
        })?;

        Ok(deck)
    }

    async fn transform(&self, deck: Deck) -> Result<Presentation> {
        let mut presentation = Presentation::new();

        for (index, descriptor) in deck.presentation.iter().enumerate() {
            match SlideSpec::from_descriptor(index, descriptor)? {
                Some(spec) => render_slide(&self.storage, index, spec, &mut presentation).await?,
                None => {
                    tracing::warn!(
                        "Skipping slide {} ('{}'): unknown slide type '{}'",
                        index,
                        descriptor.title.as_deref().unwrap_or(""),
                        descriptor.kind
                    );
                }
            }
        }

        Ok(presentation)
    }

    async fn load(&self, presentation: Presentation) -> Result<String> {
        let output_path = self.config.output_path();

        let data = write_package(&presentation, chrono::Utc::now())?;

        tracing::debug!("Writing PPTX file ({} bytes) to storage", data.len());
        self.storage.write_file(&output_path, &data).await?;

        tracing::debug!("PPTX file saved successfully");
        Ok(output_path)
    }
}
