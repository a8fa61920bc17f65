//! Submission controller: the three form events bound to one HTTP call.

use shared::domain::{DisplayState, SelectedFile};
use tracing::debug;

use crate::{form::FormState, render::ResponseView, resolve_submission, ProcessApi};

pub struct SubmissionController<A> {
    form: FormState,
    api: A,
}

impl<A: ProcessApi> SubmissionController<A> {
    pub fn new(api: A) -> Self {
        Self {
            form: FormState::new(),
            api,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn on_file_change(&mut self, file: Option<SelectedFile>) {
        self.form.on_file_change(file);
    }

    pub fn on_text_input(&mut self, value: impl Into<String>) {
        self.form.on_text_input(value);
    }

    /// Validates the form, then shows Loading and awaits the single request.
    /// Returns the terminal state that was shown.
    pub async fn on_submit<V: ResponseView + ?Sized>(&self, view: &mut V) -> DisplayState {
        let submission = match self.form.submission() {
            Ok(submission) => submission,
            Err(err) => {
                debug!("triage: submit rejected before sending: {err}");
                let state = DisplayState::Error(err.display_message());
                view.show(&state);
                return state;
            }
        };

        view.show(&DisplayState::Loading);
        let state = resolve_submission(&self.api, &submission).await;
        view.show(&state);
        state
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
