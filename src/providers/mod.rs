/*!
 * Clients for the external text services.
 *
 * This module contains the service interfaces used by the text robot and
 * their implementations:
 * - Algorithmia: Wikipedia article fetching
 * - Watson: keyword extraction via Natural Language Understanding
 * - Mock: in-process doubles for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Source of encyclopedia article text
#[async_trait]
pub trait ArticleProvider: Send + Sync + Debug {
    /// Fetch the plain text of the article matching `search_term`
    ///
    /// # Arguments
    /// * `search_term` - The topic to look up
    /// * `lang` - ISO 639-1 code of the Wikipedia edition
    async fn fetch_article(&self, search_term: &str, lang: &str) -> Result<String, ProviderError>;
}

/// Keyword extraction service
#[async_trait]
pub trait KeywordProvider: Send + Sync + Debug {
    /// Extract keywords from one sentence, in the service's ranking order
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, ProviderError>;
}

pub mod algorithmia;
pub mod mock;
pub mod retry;
pub mod watson;

pub use retry::RetryPolicy;
