pub mod error;
pub mod platform;
pub mod report;
pub mod roles;
pub mod watch;

pub use platform::{Builder, Platform};
