pub mod role;
pub mod traits;
pub mod workflow;

pub use self::role::{Role, Roles};
