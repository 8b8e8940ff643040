use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::app_config::VideoConfig;
use crate::errors::MediaError;

/// Final video renderer
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render the template into the output video
    ///
    /// Only a failure to start the renderer is an error. Its exit status is
    /// reported but never fails the stage.
    async fn render(&self) -> Result<(), MediaError>;
}

/// After Effects command line renderer (`aerender`)
#[derive(Debug, Clone)]
pub struct AfterEffects {
    binary: PathBuf,
    project: PathBuf,
    composition: String,
    output: PathBuf,
}

impl AfterEffects {
    pub fn new(binary: impl Into<PathBuf>, project: impl Into<PathBuf>, composition: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            project: project.into(),
            composition: composition.into(),
            output: output.into(),
        }
    }

    /// Build from config, resolving the project and output against the
    /// working directory since `aerender` does not.
    pub fn from_config(config: &VideoConfig, output: PathBuf) -> Self {
        Self::new(
            &config.aerender_path,
            absolute_path(&config.template_path),
            &config.composition,
            absolute_path(&output),
        )
    }

    pub fn args(&self) -> Vec<String> {
        vec![
            "-comp".to_string(),
            self.composition.clone(),
            "-project".to_string(),
            self.project.display().to_string(),
            "-output".to_string(),
            self.output.display().to_string(),
        ]
    }
}

#[async_trait]
impl Renderer for AfterEffects {
    async fn render(&self) -> Result<(), MediaError> {
        let tool = self.binary.display().to_string();
        info!("[video-robot] Starting After Effects");
        debug!("{} {}", tool, self.args().join(" "));

        let mut child = Command::new(&self.binary)
            .args(self.args())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| MediaError::SpawnFailed {
                tool: tool.clone(),
                source,
            })?;

        if let Some(stdout) = child.stdout.take() {
            relay_output(stdout).await;
        }

        match child.wait().await {
            Ok(status) if status.success() => info!("[video-robot] After Effects closed ({})", status),
            Ok(status) => warn!("[video-robot] After Effects exited with {}", status),
            Err(e) => warn!("[video-robot] Could not wait for After Effects: {}", e),
        }
        Ok(())
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Print renderer output line by line until the pipe closes.
///
/// The pipe must stay open while the renderer writes. Undecodable bytes are
/// printed lossily and after a read error the rest is drained unprinted.
async fn relay_output<R: AsyncRead + Unpin>(output: R) -> usize {
    let mut reader = BufReader::new(output);
    let mut buffer = Vec::new();
    let mut relayed = 0;
    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buffer);
                println!("{}", line.trim_end_matches(['\r', '\n']));
                relayed += 1;
            }
            Err(e) => {
                warn!("[video-robot] Lost After Effects output: {}", e);
                let _ = tokio::io::copy(&mut reader, &mut tokio::io::sink()).await;
                break;
            }
        }
    }
    relayed
}
