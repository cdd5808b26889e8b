pub mod extractor;
pub mod fetcher;
pub mod pipeline;

pub use extractor::extract_article;
pub use fetcher::{FetcherConfig, HttpFetcher};
pub use pipeline::Pipeline;

pub mod prelude {
    pub use super::extractor::extract_article;
    pub use super::fetcher::{FetcherConfig, HttpFetcher};
    pub use super::pipeline::Pipeline;
    pub use sn_core::{Error, GenerationResult, Mode, Result};
}
