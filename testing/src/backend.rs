use anyhow::anyhow;
use cmrcore::{
    ac::{
        Roles,
        traits::{ShareBackend, WorkflowBackend},
        workflow::{ResourceState, State},
    },
    error::BackendError,
};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
};

/// A collaborator call observed by [`MemBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Transition { res: String, transition: String },
    Inherit { res: String, value: bool },
    SetLocalRoles { res: String, principal: String, roles: Roles },
    RemoveLocalRoles { res: String, principal: String },
    ReindexSecurity { res: String },
}

#[derive(Clone, Debug, Default)]
struct MemResource {
    state: State,
    inherit: bool,
    local_roles: HashMap<String, Roles>,
}

#[derive(Default)]
struct Inner {
    resources: HashMap<String, MemResource>,
    rejects: HashSet<String>,
    calls: Vec<Call>,
}

/// In-memory stand-in for the hosting content store: tracks the
/// workflow state, the acquisition flag and the local roles of each
/// resource, records every collaborator call, and can be scripted to
/// reject transitions.
///
/// Clones share state, so a test can keep a handle for inspection
/// after handing one to the applicator.
#[derive(Clone, Default)]
pub struct MemBackend {
    inner: Rc<RefCell<Inner>>,
}

fn transition_target(transition: &str) -> Option<State> {
    match transition {
        "make_visible" | "make_visible_again" => Some(State::Visible),
        "make_public" => Some(State::Published),
        "make_restricted_again" => Some(State::Restricted),
        _ => None,
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(self, res: impl Into<String>, state: State) -> Self {
        self.add_resource(res, state);
        self
    }

    pub fn add_resource(&self, res: impl Into<String>, state: State) {
        self.inner.borrow_mut()
            .resources
            .insert(res.into(), MemResource {
                state,
                ..Default::default()
            });
    }

    /// Every subsequent transition for the resource will be rejected,
    /// as if a guard condition failed.
    pub fn reject_transitions_for(&self, res: impl Into<String>) {
        self.inner.borrow_mut()
            .rejects
            .insert(res.into());
    }

    /// Overwrite a resource's state behind the applicator's back.
    pub fn set_state(&self, res: &str, state: State) {
        if let Some(resource) = self.inner.borrow_mut()
            .resources
            .get_mut(res)
        {
            resource.state = state;
        }
    }

    pub fn seed_inherit(&self, res: &str, value: bool) {
        if let Some(resource) = self.inner.borrow_mut()
            .resources
            .get_mut(res)
        {
            resource.inherit = value;
        }
    }

    pub fn seed_local_roles(
        &self,
        res: &str,
        principal: impl Into<String>,
        roles: impl Into<Roles>,
    ) {
        if let Some(resource) = self.inner.borrow_mut()
            .resources
            .get_mut(res)
        {
            resource.local_roles.insert(principal.into(), roles.into());
        }
    }

    pub fn state_of(&self, res: &str) -> Option<State> {
        self.inner.borrow()
            .resources
            .get(res)
            .map(|resource| resource.state)
    }

    pub fn inherit_of(&self, res: &str) -> Option<bool> {
        self.inner.borrow()
            .resources
            .get(res)
            .map(|resource| resource.inherit)
    }

    pub fn local_roles_of(&self, res: &str, principal: &str) -> Roles {
        self.inner.borrow()
            .resources
            .get(res)
            .and_then(|resource| resource.local_roles.get(principal))
            .copied()
            .unwrap_or_default()
    }

    /// The resource as the catalog would report it right now.
    pub fn resource_state(&self, res: &str) -> anyhow::Result<ResourceState> {
        self.state_of(res)
            .map(|state| ResourceState::new(res, state))
            .ok_or_else(|| anyhow!("no such resource {res:?}"))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow()
            .calls
            .clone()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut()
            .calls
            .clear();
    }

    /// Number of transitions attempted on the resource so far.
    pub fn transition_calls(&self, res: &str) -> usize {
        self.inner.borrow()
            .calls
            .iter()
            .filter(|call| matches!(
                call,
                Call::Transition { res: r, .. } if r == res,
            ))
            .count()
    }
}

impl WorkflowBackend for MemBackend {
    fn run_transition(
        &mut self,
        res: &str,
        transition: &str,
    ) -> Result<(), BackendError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::Transition {
            res: res.to_string(),
            transition: transition.to_string(),
        });
        if inner.rejects.contains(res) {
            return Err(BackendError::TransitionRejected {
                res: res.to_string(),
                transition: transition.to_string(),
                reason: "guard condition failed".to_string(),
            });
        }
        let target = transition_target(transition)
            .ok_or_else(|| BackendError::AppInvariantViolation(
                format!("unknown transition {transition:?}")))?;
        inner.resources.get_mut(res)
            .map(|resource| resource.state = target)
            .ok_or_else(|| BackendError::AppInvariantViolation(
                format!("no such resource {res:?}")))
    }
}

impl ShareBackend for MemBackend {
    fn update_inherit(
        &mut self,
        res: &str,
        inherit: bool,
    ) -> Result<bool, BackendError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::Inherit {
            res: res.to_string(),
            value: inherit,
        });
        let resource = inner.resources.get_mut(res)
            .ok_or_else(|| BackendError::AppInvariantViolation(
                format!("no such resource {res:?}")))?;
        let changed = resource.inherit != inherit;
        resource.inherit = inherit;
        Ok(changed)
    }

    fn local_roles(
        &self,
        res: &str,
        principal: &str,
    ) -> Result<Roles, BackendError> {
        Ok(self.local_roles_of(res, principal))
    }

    fn set_local_roles(
        &mut self,
        res: &str,
        principal: &str,
        roles: Roles,
    ) -> Result<(), BackendError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::SetLocalRoles {
            res: res.to_string(),
            principal: principal.to_string(),
            roles,
        });
        let resource = inner.resources.get_mut(res)
            .ok_or_else(|| BackendError::AppInvariantViolation(
                format!("no such resource {res:?}")))?;
        resource.local_roles.insert(principal.to_string(), roles);
        Ok(())
    }

    fn remove_local_roles(
        &mut self,
        res: &str,
        principal: &str,
    ) -> Result<(), BackendError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(Call::RemoveLocalRoles {
            res: res.to_string(),
            principal: principal.to_string(),
        });
        let resource = inner.resources.get_mut(res)
            .ok_or_else(|| BackendError::AppInvariantViolation(
                format!("no such resource {res:?}")))?;
        resource.local_roles.remove(principal);
        Ok(())
    }

    fn reindex_security(&mut self, res: &str) -> Result<(), BackendError> {
        self.inner.borrow_mut()
            .calls
            .push(Call::ReindexSecurity {
                res: res.to_string(),
            });
        Ok(())
    }
}
