/*!
 * Mock provider implementations for testing.
 *
 * These doubles never touch the network:
 * - `MockArticleProvider` returns a canned article or a configured error
 * - `MockKeywordProvider` derives keywords from the sentence text, records
 *   every call, and can fail on a chosen sentence or fail transiently
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{ArticleProvider, KeywordProvider};

/// Behavior mode for the mock providers
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails with a transient error for the first N calls, then succeeds
    TransientFailures { remaining: usize },
    /// Always fails with a fatal error
    Failing,
    /// Fails fatally when the input contains the given text
    FailOn(String),
}

/// Canned article source
#[derive(Debug)]
pub struct MockArticleProvider {
    article: String,
    behavior: Mutex<MockBehavior>,
    request_count: AtomicUsize,
}

impl MockArticleProvider {
    /// Create a provider that returns `article` for every search term
    pub fn working(article: impl Into<String>) -> Self {
        Self::new(article, MockBehavior::Working)
    }

    /// Create a provider that always fails
    pub fn failing() -> Self {
        Self::new(String::new(), MockBehavior::Failing)
    }

    pub fn new(article: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            article: article.into(),
            behavior: Mutex::new(behavior),
            request_count: AtomicUsize::new(0),
        }
    }

    /// Number of fetch calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleProvider for MockArticleProvider {
    async fn fetch_article(&self, search_term: &str, _lang: &str) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        check_behavior(&self.behavior, search_term)?;
        Ok(self.article.clone())
    }
}

/// Keyword extractor double
///
/// Keywords are the capitalized words of the sentence, stripped of
/// punctuation, in order of appearance.
#[derive(Debug)]
pub struct MockKeywordProvider {
    behavior: Mutex<MockBehavior>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Option<Duration>,
}

impl MockKeywordProvider {
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Simulate a slow service, used to observe concurrency
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sentences received, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Highest number of calls that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Keywords this double returns for `text`
    pub fn keywords_for(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl KeywordProvider for MockKeywordProvider {
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, ProviderError> {
        self.calls.lock().push(text.to_string());

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let result = check_behavior(&self.behavior, text).map(|_| Self::keywords_for(text));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn check_behavior(behavior: &Mutex<MockBehavior>, input: &str) -> Result<(), ProviderError> {
    let mut behavior = behavior.lock();
    match &mut *behavior {
        MockBehavior::Working => Ok(()),
        MockBehavior::TransientFailures { remaining } if *remaining > 0 => {
            *remaining -= 1;
            Err(ProviderError::ConnectionError("simulated connection reset".to_string()))
        }
        MockBehavior::TransientFailures { .. } => Ok(()),
        MockBehavior::Failing => Err(ProviderError::AuthenticationError("simulated invalid key".to_string())),
        MockBehavior::FailOn(needle) if input.contains(needle.as_str()) => Err(ProviderError::ApiError {
            status_code: 422,
            message: format!("simulated rejection of '{}'", input),
        }),
        MockBehavior::FailOn(_) => Ok(()),
    }
}
