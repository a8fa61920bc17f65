use std::path::{Path, PathBuf};

use crate::protocol::ProcessResponse;

/// Element ids of the page the form handler was written against.
pub mod element_ids {
    pub const FORM: &str = "formEmail";
    pub const FILE_INPUT: &str = "arquivo";
    pub const TEXT_INPUT: &str = "textoEmail";
    pub const RESPONSE_CONTAINER: &str = "resposta";
    pub const SELECTED_FILE_LABEL: &str = "nome-arquivo-selecionado";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Uses the last path component as the display name.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, path)
    }
}

/// Payload of one submission. Text is always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    File(SelectedFile),
    Text(String),
}

impl SubmissionInput {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Text(_) => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationView {
    pub original_text: String,
    pub category: String,
    pub reply: String,
}

impl From<ProcessResponse> for ClassificationView {
    fn from(value: ProcessResponse) -> Self {
        Self {
            original_text: value.texto_original,
            category: value.categoria,
            reply: value.resposta,
        }
    }
}

/// What the response area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Hidden,
    Loading,
    Result(ClassificationView),
    Error(String),
}

impl DisplayState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Loading => "loading",
            Self::Result(_) => "result",
            Self::Error(_) => "error",
        }
    }
}
