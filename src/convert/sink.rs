//! Destinations for rendered output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Receives named rendered files.
pub trait RenderSink {
    /// Write one file. Writing the same name twice replaces the content.
    fn write(&mut self, name: &str, content: &str) -> Result<()>;
}

/// Writes files into a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Create a sink rooted at `root`, creating the directory if needed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The output directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a file written under `name`.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl RenderSink for DirectorySink {
    fn write(&mut self, name: &str, content: &str) -> Result<()> {
        let path = self.path_of(name);
        fs::write(&path, content)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

/// Keeps files in memory, in write order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content written under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, content)| content.as_str())
    }

    /// File names in write order.
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl RenderSink for MemorySink {
    fn write(&mut self, name: &str, content: &str) -> Result<()> {
        match self.files.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = content.to_string(),
            None => self.files.push((name.to_string(), content.to_string())),
        }
        Ok(())
    }
}
