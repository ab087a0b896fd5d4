//! Local role adjustment for resources moving through the workflow.
//!
//! Role changes are merges, not assignments: a grant ensures the roles
//! are present, a revocation ensures they are absent, and whatever
//! else the principal already holds on the resource is preserved.

use cmrcore::{
    ac::{
        Roles,
        workflow::{ResourceState, State},
    },
    error::BackendError,
    platform::FlowPlatform,
};
use std::collections::{
    BTreeMap,
    BTreeSet,
};

/// A requested adjustment of one principal's local roles.
#[derive(Clone, Debug, PartialEq)]
pub struct RoleChange {
    pub principal: String,
    pub roles: Roles,
    /// true ensures the roles are present, false ensures they are
    /// absent.
    pub add: bool,
}

impl RoleChange {
    pub fn grant(principal: impl Into<String>, roles: impl Into<Roles>) -> Self {
        Self {
            principal: principal.into(),
            roles: roles.into(),
            add: true,
        }
    }

    pub fn revoke(principal: impl Into<String>, roles: impl Into<Roles>) -> Self {
        Self {
            principal: principal.into(),
            roles: roles.into(),
            add: false,
        }
    }
}

/// A local-roles function granting (or revoking) a fixed role set for
/// one principal on every resource headed for exactly one target
/// state, and touching nothing otherwise.
pub fn simple_role_changes(
    target_state: State,
    principal: impl Into<String>,
    roles: impl Into<Roles>,
    add: bool,
) -> impl Fn(&ResourceState, State) -> Vec<RoleChange> {
    let principal = principal.into();
    let roles = roles.into();
    move |_res, target| {
        if target == target_state {
            vec![RoleChange {
                principal: principal.clone(),
                roles,
                add,
            }]
        } else {
            Vec::new()
        }
    }
}

/// Merge the requested changes into the resource's local role
/// assignments.
///
/// Principals whose role set did not change are not written at all;
/// principals whose set emptied out are removed entirely.  The
/// security indexes are rebuilt once iff anything was written.
/// Returns whether anything was written.
pub fn apply_role_changes(
    platform: &mut dyn FlowPlatform,
    res: &str,
    changes: &[RoleChange],
) -> Result<bool, BackendError> {
    if changes.is_empty() {
        return Ok(false);
    }
    let mut current: BTreeMap<String, Roles> = BTreeMap::new();
    let mut touched: BTreeSet<String> = BTreeSet::new();
    for change in changes {
        if !current.contains_key(&change.principal) {
            let roles = platform.local_roles(res, &change.principal)?;
            current.insert(change.principal.clone(), roles);
        }
        let Some(roles) = current.get_mut(&change.principal) else {
            continue;
        };
        let principal = change.principal.as_str();
        for role in change.roles.iter() {
            match (roles.contains(role), change.add) {
                (true, true) => log::info!(
                    "resource {res:?}: {role} already granted to {principal:?}"),
                (true, false) => {
                    log::info!(
                        "resource {res:?}: removing {role} from {principal:?}");
                    roles.remove(role);
                    touched.insert(change.principal.clone());
                }
                (false, true) => {
                    log::info!(
                        "resource {res:?}: adding {role} for {principal:?}");
                    roles.insert(role);
                    touched.insert(change.principal.clone());
                }
                (false, false) => log::info!(
                    "resource {res:?}: {role} not held by {principal:?}"),
            }
        }
    }
    if touched.is_empty() {
        return Ok(false);
    }
    for principal in &touched {
        let roles = current.get(principal).copied().unwrap_or_default();
        if roles.is_empty() {
            log::info!(
                "resource {res:?}: removing all local roles for {principal:?}");
            platform.remove_local_roles(res, principal)?;
        } else {
            log::info!(
                "resource {res:?}: local roles for {principal:?} set to \
                [{roles}]");
            platform.set_local_roles(res, principal, roles)?;
        }
    }
    platform.reindex_security(res)?;
    Ok(true)
}
