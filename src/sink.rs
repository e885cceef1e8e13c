//! Artifact persistence.
//!
//! Generators never touch the filesystem; they hand [`Artifact`]s to a
//! [`Sink`]. [`FsSink`] writes under the output directory, [`MemorySink`]
//! keeps everything in memory for embedders and tests.

use crate::{config::SiteConfig, generator::Artifact};
use anyhow::{Context, Result, bail};
use parking_lot::Mutex;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Destination for emitted artifacts.
///
/// Called from several threads at once during a build.
pub trait Sink: Sync {
    fn write(&self, artifact: &Artifact) -> Result<()>;
}

// ============================================================================
// Filesystem
// ============================================================================

/// Writes `<root>/<slug><ext>`, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sink rooted at `[build].output`.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.build.output)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Output path for an artifact. Slugs may not leave the output root.
    pub fn path_for(&self, artifact: &Artifact) -> Result<PathBuf> {
        let relative = Path::new(&artifact.slug);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if artifact.slug.is_empty() || escapes {
            bail!("invalid artifact slug `{}`", artifact.slug);
        }
        Ok(self.root.join(artifact.name()))
    }
}

impl Sink for FsSink {
    fn write(&self, artifact: &Artifact) -> Result<()> {
        let path = self.path_for(artifact)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(&path, &artifact.content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

// ============================================================================
// Memory
// ============================================================================

/// Collects artifacts in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Mutex<Vec<Artifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifacts written so far, sorted by name.
    pub fn artifacts(&self) -> Vec<Artifact> {
        let mut artifacts = self.artifacts.lock().clone();
        artifacts.sort_by(|a, b| a.name().cmp(&b.name()));
        artifacts
    }

    /// Content of the artifact named `name` (`slug + ext`).
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.artifacts
            .lock()
            .iter()
            .rev()
            .find(|a| a.name() == name)
            .map(|a| a.content.clone())
    }

    pub fn len(&self) -> usize {
        self.artifacts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.lock().is_empty()
    }

    pub fn into_inner(self) -> Vec<Artifact> {
        self.artifacts.into_inner()
    }
}

impl Sink for MemorySink {
    fn write(&self, artifact: &Artifact) -> Result<()> {
        self.artifacts.lock().push(artifact.clone());
        Ok(())
    }
}
