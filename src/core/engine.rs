use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Run extract → transform → load and return the output path.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Reading deck configuration...");
        let deck = self.pipeline.extract().await?;
        tracing::info!("Loaded {} slide descriptors", deck.presentation.len());

        tracing::info!("Rendering slides...");
        let presentation = self.pipeline.transform(deck).await?;
        tracing::info!("Rendered {} slides", presentation.slide_count());

        tracing::info!("Writing presentation...");
        let output_path = self.pipeline.load(presentation).await?;

        Ok(output_path)
    }
}
