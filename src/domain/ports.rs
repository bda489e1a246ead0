use crate::domain::model::Deck;
use crate::pptx::Presentation;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Path of the JSON deck description.
    fn input_path(&self) -> &str;
    /// Where the generated `.pptx` goes.
    fn output_path(&self) -> String;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Deck>;
    async fn transform(&self, deck: Deck) -> Result<Presentation>;
    async fn load(&self, presentation: Presentation) -> Result<String>;
}
