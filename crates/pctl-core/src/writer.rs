//! Sinks for generated subscription resources.

use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::subscription::SubscriptionResource;

#[derive(Debug, Error)]
pub enum WriterError {
    #[error("failed to serialize subscription")]
    Serialize(#[source] serde_yaml::Error),

    #[error("failed to write subscription to {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write subscription")]
    Stream(#[source] std::io::Error),
}

/// Persists a subscription resource.
pub trait Writer {
    fn output(&self, resource: &SubscriptionResource) -> Result<(), WriterError>;
}

/// Writes the resource as YAML to a file, creating parent directories.
#[derive(Debug, Clone)]
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Writer for FileWriter {
    fn output(&self, resource: &SubscriptionResource) -> Result<(), WriterError> {
        let content = resource.to_yaml().map_err(WriterError::Serialize)?;
        let write_err = |source| WriterError::WriteFile {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&self.path, content).map_err(write_err)?;
        tracing::info!(path = %self.path.display(), "wrote profile subscription");
        Ok(())
    }
}

/// Writes the resource as YAML to any `io::Write`, e.g. stdout or a buffer.
#[derive(Debug)]
pub struct StreamWriter<W: Write> {
    inner: RefCell<W>,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: RefCell::new(inner),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl<W: Write> Writer for StreamWriter<W> {
    fn output(&self, resource: &SubscriptionResource) -> Result<(), WriterError> {
        let content = resource.to_yaml().map_err(WriterError::Serialize)?;
        let mut inner = self.inner.borrow_mut();
        inner
            .write_all(content.as_bytes())
            .map_err(WriterError::Stream)?;
        inner.flush().map_err(WriterError::Stream)
    }
}
