/*!
 * Integration tests for the video stage
 */

use anyhow::Result;
use std::sync::Arc;
use wikireel::content::Content;
use wikireel::errors::{AppError, StateError};
use wikireel::file_utils::ContentPaths;
use wikireel::state::{ContentStore, FileStore};
use wikireel::video::{CaptionLayout, CaptionLayouts, Gravity, VideoRobot};

use crate::common::{self, RecordingMedia};

fn robot(media: &Arc<RecordingMedia>, store: FileStore) -> VideoRobot {
    common::init_logging();
    VideoRobot::new(media.clone(), media.clone(), Arc::new(store))
}

/// Test the saved document drives every step in order
#[tokio::test]
async fn test_video_robot_withSavedContent_shouldRunStepsInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store = FileStore::new(ContentPaths::new(temp_dir.path()));
    let content = common::sample_content(4);
    store.save(&content)?;

    let media = RecordingMedia::new();
    let rendered = robot(&media, store.clone()).run_from_store().await?;

    assert_eq!(rendered, content);
    assert_eq!(
        media.events(),
        vec![
            "convert 0",
            "convert 1",
            "convert 2",
            "convert 3",
            "caption 0 1920x400 center Sentence number 0.",
            "caption 1 1920x1080 center Sentence number 1.",
            "caption 2 800x1080 west Sentence number 2.",
            "caption 3 1920x400 center Sentence number 3.",
            "thumbnail",
            "render",
        ]
    );

    let script = std::fs::read_to_string(store.paths().script_file())?;
    assert!(script.starts_with("var content = "));
    assert!(script.contains("Sentence number 3."));
    Ok(())
}

/// Test configured layouts replace the default table
#[tokio::test]
async fn test_video_robot_withCustomLayouts_shouldCycleThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let layouts = CaptionLayouts::new(vec![
        CaptionLayout::new(1280, 200, Gravity::North),
        CaptionLayout::new(1280, 200, Gravity::South),
    ])?;

    let media = RecordingMedia::new();
    robot(&media, FileStore::new(ContentPaths::new(temp_dir.path())))
        .with_layouts(layouts)
        .run(common::sample_content(3))
        .await?;

    let captions: Vec<String> = media.events().into_iter().filter(|e| e.starts_with("caption")).collect();
    assert_eq!(
        captions,
        vec![
            "caption 0 1280x200 north Sentence number 0.",
            "caption 1 1280x200 south Sentence number 1.",
            "caption 2 1280x200 north Sentence number 2.",
        ]
    );
    Ok(())
}

/// Test the stage refuses to start without a saved document
#[tokio::test]
async fn test_video_robot_withoutSavedContent_shouldFailBeforeAnyStep() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let media = RecordingMedia::new();

    let result = robot(&media, FileStore::new(ContentPaths::new(temp_dir.path()))).run_from_store().await;

    assert!(matches!(result, Err(AppError::State(StateError::NotFound(_)))));
    assert!(media.events().is_empty());
    Ok(())
}

/// Test a document handed over in memory needs no saved state
#[tokio::test]
async fn test_video_robot_withDocumentByValue_shouldNotReadState() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store = FileStore::new(ContentPaths::new(temp_dir.path()));
    let content: Content = common::sample_content(1);

    let media = RecordingMedia::new();
    robot(&media, store.clone()).run(content).await?;

    assert!(!store.paths().state_file().exists());
    assert!(store.paths().script_file().exists());
    assert_eq!(media.events().last().map(String::as_str), Some("render"));
    Ok(())
}
