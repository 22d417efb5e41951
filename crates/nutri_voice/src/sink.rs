//! Destinations for synthesized audio bytes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Plays (or stores) decoded MP3 audio. Returns once playback has finished.
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn play(&self, audio: &[u8]) -> Result<()>;
}

/// Writes each clip to its own `.mp3` file in a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl AudioSink for FileSink {
    async fn play(&self, audio: &[u8]) -> Result<()> {
        if audio.is_empty() {
            anyhow::bail!("No audio content received");
        }
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create audio dir {}", self.dir.display()))?;
        let path = self
            .dir
            .join(format!("reply-{}.mp3", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, audio)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Audio saved to {} ({} bytes)", path.display(), audio.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_sink_writes_clip() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("audio"));
        sink.play(b"ID3fake").await.unwrap();
        let files: Vec<_> = std::fs::read_dir(sink.dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].extension().and_then(|e| e.to_str()), Some("mp3"));
        assert_eq!(std::fs::read(&files[0]).unwrap(), b"ID3fake");
    }

    #[tokio::test]
    async fn test_file_sink_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        assert!(sink.play(&[]).await.is_err());
    }
}
