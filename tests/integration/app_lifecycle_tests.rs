/*!
 * Integration tests for application lifecycle
 */

use anyhow::{Result, anyhow};
use std::io::Cursor;
use std::sync::Arc;
use wikireel::app_config::Config;
use wikireel::app_controller::{ContentRequest, Controller};
use wikireel::content::Prefix;
use wikireel::prompt::{LinePrompt, Prompt};
use wikireel::providers::RetryPolicy;
use wikireel::providers::mock::{MockArticleProvider, MockKeywordProvider};
use wikireel::state::ContentStore;
use wikireel::text::TextRobot;

use crate::common;

/// Prompt that must never be asked anything
struct NoPrompt;

impl Prompt for NoPrompt {
    fn ask_search_term(&mut self) -> Result<String> {
        Err(anyhow!("search term should not be asked"))
    }

    fn ask_prefix(&mut self) -> Result<Option<Prefix>> {
        Err(anyhow!("prefix should not be asked"))
    }
}

fn line_prompt(input: &str) -> LinePrompt<Cursor<Vec<u8>>, Vec<u8>> {
    LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

/// Test the controller rejects an invalid configuration
#[test]
fn test_controller_initialization_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.maximum_sentences = 0;
    assert!(Controller::with_config(config).is_err());
    assert!(Controller::with_config(Config::default()).is_ok());
}

/// Test command line answers skip the prompts entirely
#[test]
fn test_start_content_withFullRequest_shouldNotPrompt() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let request = ContentRequest {
        search_term: Some("  Ayrton Senna ".to_string()),
        prefix: Some(Prefix::WhoIs),
        lang: Some("por".to_string()),
        maximum_sentences: Some(3),
    };

    let content = controller.start_content(request, &mut NoPrompt)?.expect("content should be created");

    assert_eq!(content.search_term, "Ayrton Senna");
    assert_eq!(content.prefix, Prefix::WhoIs);
    assert_eq!(content.lang, "pt");
    assert_eq!(content.maximum_sentences, 3);
    Ok(())
}

/// Test a zero sentence limit is rejected before anything is asked
#[test]
fn test_start_content_withZeroMaximumSentences_shouldFail() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let request = ContentRequest {
        search_term: Some("Brasil".to_string()),
        prefix: Some(Prefix::HistoryOf),
        lang: None,
        maximum_sentences: Some(0),
    };

    let error = controller.start_content(request, &mut NoPrompt).unwrap_err();
    assert!(error.to_string().contains("greater than 0"));

    let request = ContentRequest {
        maximum_sentences: Some(0),
        ..ContentRequest::default()
    };
    let error = controller.start_content(request, &mut NoPrompt).unwrap_err();
    assert!(error.to_string().contains("greater than 0"));
    Ok(())
}

/// Test missing answers are asked and config defaults fill the rest
#[test]
fn test_start_content_withEmptyRequest_shouldAskAndUseDefaults() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let mut prompt = line_prompt("Brasil\n3\n");

    let content = controller
        .start_content(ContentRequest::default(), &mut prompt)?
        .expect("content should be created");

    assert_eq!(content.title(), "A historia de Brasil");
    assert_eq!(content.lang, "pt");
    assert_eq!(content.maximum_sentences, 7);
    Ok(())
}

/// Test cancelling the prefix menu produces no document
#[test]
fn test_start_content_withCancelledMenu_shouldReturnNone() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let mut prompt = line_prompt("Brasil\n0\n");

    assert!(controller.start_content(ContentRequest::default(), &mut prompt)?.is_none());
    Ok(())
}

/// Test the text stage result is saved for the video stage
#[test]
fn test_run_text_withMockProviders_shouldSaveContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = common::create_test_config(temp_dir.path())?;
    let controller = Controller::with_config(config)?;
    let robot = TextRobot::new(
        Arc::new(MockArticleProvider::working(common::SAMPLE_ARTICLE)),
        Arc::new(MockKeywordProvider::working()),
    )
    .with_retry(RetryPolicy::none());

    let request = ContentRequest {
        search_term: Some("Rio de Janeiro".to_string()),
        prefix: Some(Prefix::WhatIs),
        lang: Some("en".to_string()),
        maximum_sentences: Some(2),
    };
    let content = controller.start_content(request, &mut NoPrompt)?.expect("content should be created");

    let content = tokio_test::block_on(controller.run_text_with(&robot, content))?;

    let saved = controller.store().load()?;
    assert_eq!(saved, content);
    assert_eq!(saved.sentences.len(), 2);
    assert!(temp_dir.path().join("content/content.json").exists());
    Ok(())
}

/// Test the real text robot can be built from the credential files
#[test]
fn test_text_robot_withCredentialFiles_shouldBuild() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::create_test_config(temp_dir.path())?)?;
    assert!(controller.text_robot().is_ok());

    let controller = Controller::with_config(Config::default())?;
    if !std::path::Path::new("credentials/algorithmia.json").exists() {
        assert!(controller.text_robot().is_err());
    }
    Ok(())
}

/// Test the video stage reports missing state from a fresh directory
#[tokio::test]
async fn test_run_video_withoutSavedContent_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::create_test_config(temp_dir.path())?)?;

    let error = controller.run_video().await.unwrap_err();
    assert!(format!("{:#}", error).contains("No saved content"));
    Ok(())
}
