//! Failure taxonomy of a single submission.

use shared::error::ServerRejection;
use thiserror::Error;

/// Prefix of the message shown for transport and parsing failures.
pub const TRANSPORT_ERROR_PREFIX: &str = "Ocorreu um erro ao processar o email. Detalhes:";

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Neither a file nor non-blank text was provided.
    #[error("Envie um arquivo .txt/.pdf ou escreva um texto.")]
    NothingToSubmit,
    /// The API answered with a non-2xx status.
    #[error(transparent)]
    Server(#[from] ServerRejection),
    #[error("{0:#}")]
    Transport(anyhow::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl SubmitError {
    pub fn transport(err: impl Into<anyhow::Error>) -> Self {
        Self::Transport(err.into())
    }

    /// Text rendered in the response area for this failure.
    pub fn display_message(&self) -> String {
        match self {
            Self::NothingToSubmit | Self::Server(_) => self.to_string(),
            Self::Transport(_) | Self::Decode(_) => format!("{TRANSPORT_ERROR_PREFIX} {self}"),
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(value: reqwest::Error) -> Self {
        Self::transport(value)
    }
}
