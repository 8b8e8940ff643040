/*!
 * End-to-end tests for the text stage
 */

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wikireel::content::{Content, Prefix};
use wikireel::errors::ProviderError;
use wikireel::providers::RetryPolicy;
use wikireel::providers::algorithmia::Algorithmia;
use wikireel::providers::mock::{MockArticleProvider, MockBehavior, MockKeywordProvider};
use wikireel::text::TextRobot;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

fn sample_robot(keywords: Arc<MockKeywordProvider>) -> TextRobot {
    common::init_logging();
    TextRobot::new(Arc::new(MockArticleProvider::working(common::SAMPLE_ARTICLE)), keywords)
        .with_retry(RetryPolicy::new(2, 1))
}

/// Test the stage keeps the first sentences and annotates each one
#[tokio::test]
async fn test_text_robot_withMaximumSentences_shouldTruncateAndAnnotate() {
    let keywords = Arc::new(MockKeywordProvider::working());
    let content = Content::new("Rio de Janeiro", Prefix::WhatIs, "en", 4);

    let content = sample_robot(keywords.clone()).run(content).await.unwrap();

    assert_eq!(content.source_content_original, common::SAMPLE_ARTICLE);
    assert_eq!(content.sentences.len(), 4);
    assert_eq!(content.sentences[3].text, "Dr. Silva lived there.");
    for sentence in &content.sentences {
        assert_eq!(sentence.keywords, MockKeywordProvider::keywords_for(&sentence.text));
        assert!(sentence.images.is_empty());
    }
    assert_eq!(
        keywords.calls(),
        content.sentences.iter().map(|s| s.text.clone()).collect::<Vec<_>>()
    );
}

/// Test a short article keeps every sentence it has
#[tokio::test]
async fn test_text_robot_withFewerSentencesThanMaximum_shouldKeepAll() {
    let keywords = Arc::new(MockKeywordProvider::working());
    let content = Content::new("Rio de Janeiro", Prefix::WhatIs, "en", 50);

    let content = sample_robot(keywords).run(content).await.unwrap();
    assert_eq!(content.sentences.len(), 6);
}

/// Test concurrent annotation stays bounded and keeps sentence order
#[tokio::test]
async fn test_text_robot_withKeywordConcurrency_shouldPreserveOrder() {
    let keywords = Arc::new(MockKeywordProvider::working().with_delay(Duration::from_millis(20)));
    let content = Content::new("Rio de Janeiro", Prefix::WhatIs, "en", 7);

    let content = sample_robot(keywords.clone())
        .with_keyword_concurrency(3)
        .run(content)
        .await
        .unwrap();

    assert!(keywords.max_in_flight() <= 3);
    assert!(keywords.max_in_flight() > 1);
    for sentence in &content.sentences {
        assert_eq!(sentence.keywords, MockKeywordProvider::keywords_for(&sentence.text));
    }
}

/// Test sequential annotation never overlaps calls
#[tokio::test]
async fn test_text_robot_withDefaultConcurrency_shouldCallOneAtATime() {
    let keywords = Arc::new(MockKeywordProvider::working().with_delay(Duration::from_millis(5)));
    let content = Content::new("Rio de Janeiro", Prefix::WhatIs, "en", 7);

    sample_robot(keywords.clone()).run(content).await.unwrap();
    assert_eq!(keywords.max_in_flight(), 1);
}

/// Test transient keyword failures are retried
#[tokio::test]
async fn test_text_robot_withTransientKeywordFailures_shouldRecover() {
    let keywords = Arc::new(MockKeywordProvider::new(MockBehavior::TransientFailures { remaining: 2 }));
    let content = Content::new("Rio de Janeiro", Prefix::WhatIs, "en", 2);

    let content = sample_robot(keywords.clone()).run(content).await.unwrap();

    assert_eq!(content.sentences.len(), 2);
    // Two failed attempts on the first sentence, then one call per sentence
    assert_eq!(keywords.calls().len(), 4);
}

/// Test a fatal fetch error stops the stage before any annotation
#[tokio::test]
async fn test_text_robot_withFailingArticleProvider_shouldStopImmediately() {
    let articles = Arc::new(MockArticleProvider::failing());
    let keywords = Arc::new(MockKeywordProvider::working());
    let robot = TextRobot::new(articles.clone(), keywords.clone()).with_retry(RetryPolicy::new(3, 1));

    let result = robot.run(Content::new("x", Prefix::WhoIs, "en", 7)).await;

    assert!(matches!(result, Err(ProviderError::AuthenticationError(_))));
    assert_eq!(articles.request_count(), 1);
    assert!(keywords.calls().is_empty());
}

/// Test the real article client recovers from a busy server
#[tokio::test]
async fn test_text_robot_withServerBusyOnce_shouldRetryFetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "content": "Lisboa\n\nLisboa is the capital of Portugal. It lies on the Tagus." }
        })))
        .mount(&server)
        .await;

    let articles = Algorithmia::new("key", server.uri(), "web/WikipediaParser/0.1.2", 300, 5);
    let robot = TextRobot::new(Arc::new(articles), Arc::new(MockKeywordProvider::working()))
        .with_retry(RetryPolicy::new(2, 1));

    let content = robot.run(Content::new("Lisboa", Prefix::WhatIs, "en", 7)).await.unwrap();

    let texts: Vec<_> = content.sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Lisboa Lisboa is the capital of Portugal.", "It lies on the Tagus."]);
    assert_eq!(content.sentences[0].keywords, vec!["Lisboa", "Lisboa", "Portugal"]);
}
