use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::content::{Content, Sentence};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{ArticleProvider, KeywordProvider, RetryPolicy};
use crate::text::sanitize::sanitize;
use crate::text::segmenter::SentenceSegmenter;

// @module: Text stage of the content pipeline

/// Turns a search term into a short list of annotated sentences
///
/// Steps run strictly in order: fetch, sanitize, segment, truncate,
/// annotate. The document is taken by value and handed back when done.
pub struct TextRobot {
    articles: Arc<dyn ArticleProvider>,
    keywords: Arc<dyn KeywordProvider>,
    retry: RetryPolicy,
    keyword_concurrency: usize,
    extra_abbreviations: Vec<String>,
    progress: ProgressBar,
}

impl TextRobot {
    pub fn new(articles: Arc<dyn ArticleProvider>, keywords: Arc<dyn KeywordProvider>) -> Self {
        Self {
            articles,
            keywords,
            retry: RetryPolicy::default(),
            keyword_concurrency: 1,
            extra_abbreviations: Vec::new(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Allow up to `limit` keyword requests in flight (minimum 1)
    pub fn with_keyword_concurrency(mut self, limit: usize) -> Self {
        self.keyword_concurrency = limit.max(1);
        self
    }

    pub fn with_abbreviations(mut self, abbreviations: Vec<String>) -> Self {
        self.extra_abbreviations = abbreviations;
        self
    }

    /// Progress bar advanced once per annotated sentence
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Run every text step on the document
    pub async fn run(&self, mut content: Content) -> Result<Content, ProviderError> {
        self.fetch_content_from_wikipedia(&mut content).await?;
        Self::sanitize_content(&mut content);
        self.break_content_into_sentences(&mut content);
        Self::limit_maximum_sentences(&mut content);
        self.fetch_keywords_of_all_sentences(&mut content).await?;
        Ok(content)
    }

    pub async fn fetch_content_from_wikipedia(&self, content: &mut Content) -> Result<(), ProviderError> {
        let language = language_utils::get_language_name(&content.lang).unwrap_or_else(|_| content.lang.clone());
        info!("[text-robot] Fetching content from Wikipedia for '{}' ({})", content.search_term, language);

        let articles = &self.articles;
        let (term, lang) = (content.search_term.as_str(), content.lang.as_str());
        let article = self
            .retry
            .run("Wikipedia fetch", || articles.fetch_article(term, lang))
            .await?;

        if article.trim().is_empty() {
            warn!("[text-robot] Wikipedia returned an empty article for '{}'", content.search_term);
        }
        debug!("[text-robot] Fetched {} characters", article.chars().count());

        content.source_content_original = article;
        Ok(())
    }

    pub fn sanitize_content(content: &mut Content) {
        content.source_content_sanitized = sanitize(&content.source_content_original);
    }

    pub fn break_content_into_sentences(&self, content: &mut Content) {
        let segmenter =
            SentenceSegmenter::for_language(&content.lang).with_abbreviations(&self.extra_abbreviations);
        content.sentences = segmenter
            .split(&content.source_content_sanitized)
            .into_iter()
            .map(Sentence::new)
            .collect();
        debug!("[text-robot] Found {} sentences", content.sentences.len());
    }

    pub fn limit_maximum_sentences(content: &mut Content) {
        content.limit_sentences();
    }

    /// Annotate every sentence with its keywords
    ///
    /// Results are stored in sentence order whatever the concurrency. The
    /// first failure aborts the stage and no further requests are started.
    pub async fn fetch_keywords_of_all_sentences(&self, content: &mut Content) -> Result<(), ProviderError> {
        info!(
            "[text-robot] Fetching keywords for {} sentences (concurrency {})",
            content.sentences.len(),
            self.keyword_concurrency
        );
        self.progress.set_length(content.sentences.len() as u64);

        let result: Result<Vec<Vec<String>>, ProviderError> = stream::iter(content.sentences.iter().enumerate())
            .map(|(index, sentence)| self.fetch_keywords(index, &sentence.text))
            .buffered(self.keyword_concurrency)
            .try_collect()
            .await;
        self.progress.finish_and_clear();

        for (sentence, keywords) in content.sentences.iter_mut().zip(result?) {
            sentence.keywords = keywords;
        }
        Ok(())
    }

    async fn fetch_keywords(&self, index: usize, text: &str) -> Result<Vec<String>, ProviderError> {
        let label = format!("Keyword extraction for sentence {}", index);
        let keywords = self.retry.run(&label, || self.keywords.extract_keywords(text)).await?;
        debug!("[text-robot] Sentence {}: {}", index, keywords.join(", "));
        self.progress.inc(1);
        Ok(keywords)
    }
}
