use cmrcore::{
    ac::workflow::{
        ResourceState,
        State,
        StateSets,
        StateTransitions,
    },
    platform::FlowPlatform,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    roles::RoleChange,
    watch::Watcher,
};

mod impls;

/// Governs how the permission-acquisition flag is toggled per target
/// state (independently of the workflow transition itself).
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritMode {
    /// Leave acquisition untouched.
    Skip,
    /// Always activate acquisition.
    Activate,
    /// Always deactivate acquisition.
    Deactivate,
    /// Activate for `Published` and `Inherit` targets, deactivate
    /// otherwise.
    Auto,
    /// Like `Auto`, but leave `Published` targets untouched.
    #[default]
    AutoRestrict,
}

/// Governs whether resolution and transition failures surface as
/// errors or as fields of the returned [`Outcome`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    #[default]
    Lenient,
    Strict,
}

/// Per-call result of [`Platform::apply`].
///
/// `changed` is `None` when the applicator cannot tell whether the
/// resource was modified (unknown or failed transition); `target_ok`
/// is `None` only when no target state could be resolved at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Outcome {
    pub changed: Option<bool>,
    pub target_ok: Option<bool>,
}

/// Enrolls further resource ids into a target set whenever a resource
/// is actually processed towards that state.
pub type TargetHook = Box<dyn Fn(&ResourceState) -> Vec<String>>;

/// Computes the local role adjustments for a resource and its resolved
/// target state.
pub type LocalRolesFn = Box<dyn Fn(&ResourceState, State) -> Vec<RoleChange>>;

struct TargetSpec {
    ids: Vec<String>,
    state: State,
    hook: Option<TargetHook>,
}

pub struct Builder {
    platform: Option<Box<dyn FlowPlatform>>,
    targets: Vec<TargetSpec>,
    default_target: Option<State>,
    transitions: StateTransitions,
    force: bool,
    regard_current: bool,
    shortcircuit: bool,
    set_best_status: Option<bool>,
    error_policy: ErrorPolicy,
    inherit: InheritMode,
    local_roles: Option<LocalRolesFn>,
    watcher: Option<Watcher>,
}

/// The transition applicator.
///
/// Holds the per-run bookkeeping that decides whether a transition
/// still needs to be attempted for a resource; create one per batch
/// and drive it through [`Platform::apply`].
pub struct Platform {
    platform: Box<dyn FlowPlatform>,
    transitions: StateTransitions,
    target_sets: StateSets,
    done_sets: StateSets,
    hooks: HashMap<State, TargetHook>,
    default_target: Option<State>,
    force: bool,
    regard_current: bool,
    shortcircuit: bool,
    set_best_status: bool,
    error_policy: ErrorPolicy,
    inherit: InheritMode,
    local_roles: Option<LocalRolesFn>,
    watcher: Option<Watcher>,
}
