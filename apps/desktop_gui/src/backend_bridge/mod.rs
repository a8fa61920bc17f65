//! Backend bridge: command queue from the UI thread to the async worker.

pub mod commands;
pub mod runtime;
