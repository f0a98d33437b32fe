//! Pending logo upload.

use std::fmt;

use crate::error::DomainError;

/// An image chosen in the form, not yet uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct LogoFile {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl LogoFile {
    /// Create a logo file from its original file name and contents.
    ///
    /// The blob path is derived from the file name, so names containing a
    /// path separator are rejected rather than allowed to escape the prefix.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Logo file name cannot be empty"));
        }
        if trimmed.contains(|c| c == '/' || c == '\\') || trimmed == "." || trimmed == ".." {
            return Err(DomainError::validation(format!(
                "Logo file name '{}' must not contain a path",
                trimmed
            )));
        }
        Ok(Self {
            name: trimmed.to_string(),
            content_type: None,
            bytes,
        })
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keep image bytes out of logs.
impl fmt::Debug for LogoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
