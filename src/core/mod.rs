pub mod engine;
pub mod layout;
pub mod pipeline;
pub mod plot;
pub mod slides;

pub use crate::domain::model::{Deck, SlideDescriptor};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
