//! Raw values submitted with one request

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;

/// A file part of a submission
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Browsers send an empty, nameless part when no file was chosen
    pub fn is_empty(&self) -> bool {
        self.filename.is_empty()
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Field name to raw value mapping for a single form post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    values: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_value(name, value);
        self
    }

    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.insert_file(name, file);
        self
    }

    pub fn insert_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Store a file part; empty placeholder parts are dropped
    pub fn insert_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        if !file.is_empty() {
            self.files.insert(name.into(), file);
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}
