use crate::ac::traits::{
    ShareBackend,
    WorkflowBackend,
};

/// FlowPlatform - the combined collaborator surface
///
/// The transition applicator talks to the hosting content store
/// through this trait.  It is applicable to everything that correctly
/// implements the backends that compose it.
pub trait FlowPlatform: WorkflowBackend + ShareBackend {}

impl<P: WorkflowBackend + ShareBackend> FlowPlatform for P {}
