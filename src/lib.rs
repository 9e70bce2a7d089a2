//! Structured logging with hue-tinted terminal output.
//!
//! Records go through [`tracing`]; on an interactive terminal each one is
//! pretty-printed and wrapped in a randomly scheduled background color from
//! the green-to-blue band, so adjacent records are easy to tell apart. Off a
//! terminal (or with `LOG_FORMAT=json`) output falls back to one JSON object
//! per line.
//!
//! ```no_run
//! tintlog::init().expect("install logger");
//! tracing::info!(port = 8080, "listening");
//! ```

mod color;
mod config;
mod format;
mod layer;
mod record;
mod tint;

pub use color::Rgb;
pub use config::{init, Config, InitError, LogFormat};
pub use layer::{JsonLayer, TintLayer};
pub use tint::{HueScheduler, SharedScheduler, TintStream};
