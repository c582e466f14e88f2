//! Explorer state machine and render output

pub mod session;
pub mod types;

pub use session::{ExplorerEvent, ExplorerState};
pub use types::{RenderFrame, TimeTick};
