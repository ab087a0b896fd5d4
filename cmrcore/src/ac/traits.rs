use crate::error::BackendError;
use super::role::Roles;

/// The workflow mechanism collaborator.
pub trait WorkflowBackend {
    /// Invoke the named transition on the resource.  A guard refusal
    /// surfaces as [`BackendError::TransitionRejected`].
    fn run_transition(
        &mut self,
        res: &str,
        transition: &str,
    ) -> Result<(), BackendError>;
}

/// Permission plumbing on the object store: acquisition toggling and
/// local role bookkeeping.
pub trait ShareBackend {
    /// Toggle whether the resource acquires permissions from its
    /// container.  Returns whether the flag actually changed.
    fn update_inherit(
        &mut self,
        res: &str,
        inherit: bool,
    ) -> Result<bool, BackendError>;
    /// The local roles currently held by the principal on the resource.
    fn local_roles(
        &self,
        res: &str,
        principal: &str,
    ) -> Result<Roles, BackendError>;
    fn set_local_roles(
        &mut self,
        res: &str,
        principal: &str,
        roles: Roles,
    ) -> Result<(), BackendError>;
    /// Drop every local role the principal holds on the resource.
    fn remove_local_roles(
        &mut self,
        res: &str,
        principal: &str,
    ) -> Result<(), BackendError>;
    /// Rebuild the security indexes of the resource after its local
    /// roles changed.
    fn reindex_security(
        &mut self,
        res: &str,
    ) -> Result<(), BackendError>;
}
