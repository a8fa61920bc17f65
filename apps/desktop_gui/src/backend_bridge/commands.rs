//! Backend commands queued from UI to backend worker.

use shared::domain::SubmissionInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Submit { submission: SubmissionInput },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Submit { .. } => "submit",
            Self::CheckHealth => "check_health",
        }
    }
}
