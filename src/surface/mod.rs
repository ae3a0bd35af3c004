//! Presentation surface: the upload/analyze session and static page chrome.

pub mod page;
mod session;

pub use session::{Session, SurfaceState};
