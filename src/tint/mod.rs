mod hue;
mod stream;

pub use hue::{HueScheduler, SharedScheduler};
pub use stream::TintStream;

pub(crate) use stream::RESET;
