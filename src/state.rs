/*!
 * Persistence of the content document between stages.
 *
 * The text and video stages may run as separate invocations. The text stage
 * saves the document to `content.json`; the video stage loads it back and
 * writes the script the renderer template reads.
 */

use log::debug;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::content::{Content, SCHEMA_VERSION};
use crate::errors::StateError;
use crate::file_utils::ContentPaths;

/// Storage for the content document
pub trait ContentStore: Send + Sync {
    /// Load the saved document. Fails when nothing has been saved yet.
    fn load(&self) -> Result<Content, StateError>;

    /// Persist the document for a later stage
    fn save(&self, content: &Content) -> Result<(), StateError>;

    /// Write the document in the form the renderer template reads
    fn save_script(&self, content: &Content) -> Result<(), StateError>;
}

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(rename = "schemaVersion", default = "legacy_version")]
    schema_version: u32,
}

// Documents written before versioning carry no version field
fn legacy_version() -> u32 {
    1
}

/// JSON files inside the content directory
#[derive(Debug, Clone)]
pub struct FileStore {
    paths: ContentPaths,
}

impl FileStore {
    pub fn new(paths: ContentPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ContentPaths {
        &self.paths
    }

    fn write(path: &Path, body: &str) -> Result<(), StateError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StateError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, body).map_err(|source| StateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Render the script body: a JS assignment of the pretty-printed document
pub fn render_script(content: &Content) -> Result<String, StateError> {
    let json = serde_json::to_string_pretty(content)?;
    Ok(format!("var content = {}", json))
}

/// Parse a saved document, checking the schema version first
pub fn parse_document(raw: &str) -> Result<Content, StateError> {
    let probe: VersionProbe = serde_json::from_str(raw)?;
    if probe.schema_version != SCHEMA_VERSION {
        return Err(StateError::SchemaMismatch {
            found: probe.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(serde_json::from_str(raw)?)
}

impl ContentStore for FileStore {
    fn load(&self) -> Result<Content, StateError> {
        let path = self.paths.state_file();
        let raw = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StateError::NotFound(path.clone())
            } else {
                StateError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let content = parse_document(&raw)?;
        debug!("Loaded content for '{}' from {:?}", content.search_term, path);
        Ok(content)
    }

    fn save(&self, content: &Content) -> Result<(), StateError> {
        let path = self.paths.state_file();
        let json = serde_json::to_string(content)?;
        Self::write(&path, &json)?;
        debug!("Saved content to {:?}", path);
        Ok(())
    }

    fn save_script(&self, content: &Content) -> Result<(), StateError> {
        let path = self.paths.script_file();
        Self::write(&path, &render_script(content)?)?;
        debug!("Wrote render script to {:?}", path);
        Ok(())
    }
}
