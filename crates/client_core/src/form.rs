//! Input state of the submission form: one file or one block of text.

use shared::domain::{SelectedFile, SubmissionInput};

use crate::error::SubmitError;

pub const FILE_LABEL_PREFIX: &str = "Arquivo:";

/// Holds the pending file selection, the text draft, and the file label.
///
/// Every change handler keeps at most one of {file, non-blank text} active.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    file: Option<SelectedFile>,
    text: String,
    file_label: String,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_file_change(&mut self, file: Option<SelectedFile>) {
        match file {
            Some(file) => {
                self.file_label = format!("{FILE_LABEL_PREFIX} {}", file.name);
                self.text.clear();
                self.file = Some(file);
            }
            None => {
                self.file = None;
                self.file_label.clear();
            }
        }
    }

    pub fn on_text_input(&mut self, value: impl Into<String>) {
        self.text = value.into();
        if !self.text.trim().is_empty() {
            self.file = None;
            self.file_label.clear();
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file_label(&self) -> &str {
        &self.file_label
    }

    pub fn has_active_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Picks the payload for a submit: the file if selected, otherwise the
    /// trimmed text.
    pub fn submission(&self) -> Result<SubmissionInput, SubmitError> {
        if let Some(file) = &self.file {
            return Ok(SubmissionInput::File(file.clone()));
        }
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Err(SubmitError::NothingToSubmit);
        }
        Ok(SubmissionInput::Text(trimmed.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
