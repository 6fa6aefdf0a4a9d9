//! HTTP Handlers

mod generation;
mod health;
mod synthesis;
mod voice;

pub use generation::*;
pub use health::*;
pub use synthesis::*;
pub use voice::*;
