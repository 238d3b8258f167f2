// Library root
// -----------
// This crate exposes the pieces the `clickup` binary is assembled from, so
// each stage of an invocation can be tested on its own.
//
// Module responsibilities:
// - `credentials`: finds the API token (environment, then fallback file).
// - `action`: the fixed set of actions and their method/path routes.
// - `request`: turns an action plus flags into an `ApiRequest`.
// - `api`: the blocking HTTP client and response/error translation.
// - `cli`: clap argument surface, the execute pipeline, output rendering.
// - `logger`: tracing setup, stderr only.
pub mod action;
pub mod api;
pub mod cli;
pub mod credentials;
pub mod error;
pub mod logger;
pub mod request;

pub use error::{Error, Result};
