//! Backend-to-UI events.

use shared::domain::DisplayState;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    /// Terminal state of one submission.
    SubmissionResolved(DisplayState),
    HealthChecked(Result<String, String>),
    BackendFailed(String),
}
