use cmrcore::{
    ac::workflow::{
        ResourceState,
        State,
        StateSets,
        StateTransitions,
    },
    error::ValueError,
    platform::FlowPlatform,
};
use std::collections::HashMap;

use crate::{
    error::Error,
    report::Summary,
    roles,
    watch::Watcher,
};
use super::{
    Builder,
    ErrorPolicy,
    InheritMode,
    Outcome,
    Platform,
    TargetHook,
    TargetSpec,
};

impl InheritMode {
    /// The acquisition flag to apply for the given target state, or
    /// `None` to leave it untouched.
    pub fn resolve(&self, target: State) -> Option<bool> {
        match self {
            InheritMode::Skip => None,
            InheritMode::Activate => Some(true),
            InheritMode::Deactivate => Some(false),
            InheritMode::Auto => Some(matches!(
                target,
                State::Published | State::Inherit,
            )),
            InheritMode::AutoRestrict => match target {
                State::Published => None,
                State::Inherit => Some(true),
                _ => Some(false),
            },
        }
    }
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        self.changed == Some(true)
    }

    pub fn is_target_ok(&self) -> bool {
        self.target_ok == Some(true)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            platform: None,
            targets: Vec::new(),
            default_target: None,
            transitions: StateTransitions::default(),
            force: false,
            regard_current: true,
            shortcircuit: true,
            set_best_status: None,
            error_policy: ErrorPolicy::default(),
            inherit: InheritMode::default(),
            local_roles: None,
            watcher: None,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(mut self, val: impl FlowPlatform + 'static) -> Self {
        self.platform = Some(Box::new(val));
        self
    }

    /// Declare a target set: the listed resources are meant to end up
    /// in the given state (or better).  Declaration order is
    /// significant for resolution.
    pub fn target(
        mut self,
        ids: impl IntoIterator<Item = impl Into<String>>,
        state: State,
    ) -> Self {
        self.targets.push(TargetSpec {
            ids: ids.into_iter().map(Into::into).collect(),
            state,
            hook: None,
        });
        self
    }

    /// Like [`Self::target`], with a hook that runs whenever a
    /// resource is processed towards this state and returns further
    /// resource ids to enroll in the same set.
    pub fn target_with_hook(
        mut self,
        ids: impl IntoIterator<Item = impl Into<String>>,
        state: State,
        hook: impl Fn(&ResourceState) -> Vec<String> + 'static,
    ) -> Self {
        self.targets.push(TargetSpec {
            ids: ids.into_iter().map(Into::into).collect(),
            state,
            hook: Some(Box::new(hook)),
        });
        self
    }

    /// Fallback target state for resources not found in any declared
    /// target set.
    pub fn default_target(mut self, val: State) -> Self {
        self.default_target = Some(val);
        self
    }

    pub fn transitions(mut self, val: StateTransitions) -> Self {
        self.transitions = val;
        self
    }

    /// Re-attempt transitions even for resources the done bookkeeping
    /// already marks as satisfied.
    pub fn force(mut self, val: bool) -> Self {
        self.force = val;
        self
    }

    /// Treat a missing or failed transition as successful when the
    /// current state already matches the target.
    pub fn regard_current(mut self, val: bool) -> Self {
        self.regard_current = val;
        self
    }

    /// Skip the transition machinery entirely when the current state
    /// already matches the target.
    pub fn shortcircuit(mut self, val: bool) -> Self {
        self.shortcircuit = val;
        self
    }

    /// Let a done mark for a more public state satisfy a lesser
    /// request.  Defaults to true iff any target set was declared.
    pub fn set_best_status(mut self, val: bool) -> Self {
        self.set_best_status = Some(val);
        self
    }

    pub fn error_policy(mut self, val: ErrorPolicy) -> Self {
        self.error_policy = val;
        self
    }

    pub fn inherit(mut self, val: InheritMode) -> Self {
        self.inherit = val;
        self
    }

    pub fn local_roles(
        mut self,
        val: impl Fn(&ResourceState, State) -> Vec<roles::RoleChange> + 'static,
    ) -> Self {
        self.local_roles = Some(Box::new(val));
        self
    }

    pub fn watcher(mut self, val: Watcher) -> Self {
        self.watcher = Some(val);
        self
    }

    pub fn build(self) -> Result<Platform, Error> {
        let mut target_sets = StateSets::new();
        let mut hooks: HashMap<State, TargetHook> = HashMap::new();
        for spec in self.targets {
            if !target_sets.add_set(spec.state) {
                return Err(ValueError::Unsupported(
                    format!("duplicate target state {:?}", spec.state.to_string())
                ).into());
            }
            for id in spec.ids {
                target_sets.insert(spec.state, id);
            }
            if let Some(hook) = spec.hook {
                hooks.insert(spec.state, hook);
            }
        }
        let set_best_status = self.set_best_status
            .unwrap_or(!target_sets.is_empty());
        Ok(Platform {
            platform: self.platform
                .expect("missing required argument platform"),
            transitions: self.transitions,
            target_sets,
            done_sets: StateSets::new(),
            hooks,
            default_target: self.default_target,
            force: self.force,
            regard_current: self.regard_current,
            shortcircuit: self.shortcircuit,
            set_best_status,
            error_policy: self.error_policy,
            inherit: self.inherit,
            local_roles: self.local_roles,
            watcher: self.watcher,
        })
    }
}

impl Platform {
    /// Move the resource towards its target workflow state.
    ///
    /// When `target` is `None` it is resolved from the declared target
    /// sets (declaration order) and then the default target.  The
    /// returned [`Outcome`] reports whether anything was modified and
    /// whether the resource now satisfies the target; under
    /// [`ErrorPolicy::Strict`] resolution and transition failures are
    /// returned as errors instead.
    pub fn apply(
        &mut self,
        res: &ResourceState,
        target: Option<State>,
    ) -> Result<Outcome, Error> {
        let uid = res.res.as_str();
        let current = res.state;
        let strict = self.error_policy == ErrorPolicy::Strict;

        let target = match target {
            Some(state) => {
                // enroll explicitly targetted resources, but only for
                // states that were declared up front
                if self.target_sets.has_set(state) {
                    self.target_sets.insert(state, uid);
                }
                state
            }
            None => match self.target_sets.first_hit(uid)
                .or(self.default_target)
            {
                Some(state) => state,
                None => {
                    log::error!("unknown target state for resource {uid:?}");
                    if strict {
                        return Err(Error::UnresolvedTarget(uid.to_string()));
                    }
                    return Ok(Outcome::default());
                }
            },
        };

        if let Some(watcher) = &self.watcher {
            watcher.hit(uid, target);
        }

        let mut changed = Some(false);
        let mut target_ok = Some(true);

        let done_state = if self.set_best_status {
            self.done_sets.best_hit(uid, target)
        } else {
            self.done_sets.contains(target, uid).then_some(target)
        };
        let mut skip_transition = false;
        let mut exact_done = false;
        if let Some(done_state) = done_state {
            log::info!(
                "resource {uid:?} (-> {target}) found as done for {done_state}");
            if !self.force {
                skip_transition = true;
                exact_done = done_state == target;
            }
        }

        if !skip_transition {
            if let Some(hook) = self.hooks.get(&target) {
                let found = hook(res);
                if !found.is_empty() {
                    log::debug!(
                        "hook for {target} enrolled {} resource(s)",
                        found.len());
                }
                for id in found {
                    self.target_sets.insert(target, id);
                }
            }

            if self.shortcircuit && current == target {
                log::info!("resource {uid:?} ({current}): no action required");
                self.done_sets.insert(target, uid);
            } else {
                let step = self.transitions.lookup(current, target)
                    .map(|transition| transition.name.clone());
                match step {
                    None => {
                        if self.regard_current && current == target {
                            log::info!(
                                "no transition {current} -> {target} for \
                                {uid:?}, but the target state already holds");
                            self.done_sets.insert(target, uid);
                            changed = None;
                        } else {
                            log::error!(
                                "no transition {current} -> {target} known \
                                for {uid:?}");
                            if strict {
                                return Err(Error::UnknownTransition {
                                    from: current,
                                    to: target,
                                });
                            }
                            changed = None;
                            target_ok = Some(current == target);
                        }
                    }
                    Some(None) => {
                        // explicit no-op entry
                        log::debug!("resource {uid:?} stays {current}");
                    }
                    Some(Some(name)) => {
                        log::debug!(
                            "resource {uid:?} ({current}): applying {name} ...");
                        match self.platform.run_transition(uid, &name) {
                            Ok(()) => {
                                self.done_sets.insert(target, uid);
                                log::info!("resource {uid:?}, {name}: OK");
                                changed = Some(true);
                            }
                            Err(e) => {
                                if self.regard_current && current == target {
                                    log::info!(
                                        "resource {uid:?}: transition {name} \
                                        failed, but the target state {target} \
                                        already holds");
                                    self.done_sets.insert(target, uid);
                                } else {
                                    log::error!(
                                        "resource {uid:?}, transition {name}: {e}");
                                    if strict && !self.regard_current {
                                        return Err(e.into());
                                    }
                                    changed = None;
                                    target_ok = Some(false);
                                }
                            }
                        }
                    }
                }
            }
        }

        // acquisition and local roles are tracked independently of the
        // transition itself; only an exact done mark skips them
        if !exact_done {
            if let Some(inherit) = self.inherit.resolve(target) {
                let act = if inherit { "activate" } else { "deactivate" };
                log::info!(
                    "resource {uid:?} (-> {target}): {act} permission \
                    inheritance ...");
                if self.platform.update_inherit(uid, inherit)? {
                    changed = Some(true);
                    log::info!(
                        "resource {uid:?} (-> {target}): permission \
                        inheritance {act}d");
                } else {
                    log::info!(
                        "resource {uid:?} (-> {target}): permission \
                        inheritance not changed");
                }
            }

            let role_changes = self.local_roles.as_ref()
                .map(|func| func(res, target))
                .unwrap_or_default();
            if roles::apply_role_changes(
                self.platform.as_mut(),
                uid,
                &role_changes,
            )? {
                changed = Some(true);
            }
        }

        Ok(Outcome { changed, target_ok })
    }

    /// A snapshot of the target and done bookkeeping, for progress
    /// reporting between batches.
    pub fn summary(&self, label: impl Into<String>) -> Summary {
        let watched = self.watcher.as_ref()
            .map(Watcher::ids)
            .unwrap_or_default();
        Summary::build(label, &self.target_sets, &self.done_sets, &watched)
    }

    pub fn log_summary(&self, label: impl Into<String>) -> Summary {
        let summary = self.summary(label);
        log::info!("{summary}");
        summary
    }
}

#[cfg(test)]
mod test {
    use cmrcore::ac::workflow::State;
    use super::{ErrorPolicy, InheritMode, Outcome};

    #[test]
    fn inherit_resolution() {
        assert_eq!(InheritMode::Skip.resolve(State::Published), None);
        assert_eq!(InheritMode::Activate.resolve(State::Restricted), Some(true));
        assert_eq!(InheritMode::Deactivate.resolve(State::Inherit), Some(false));

        assert_eq!(InheritMode::Auto.resolve(State::Published), Some(true));
        assert_eq!(InheritMode::Auto.resolve(State::Inherit), Some(true));
        assert_eq!(InheritMode::Auto.resolve(State::Visible), Some(false));
        assert_eq!(InheritMode::Auto.resolve(State::Restricted), Some(false));

        assert_eq!(InheritMode::AutoRestrict.resolve(State::Published), None);
        assert_eq!(InheritMode::AutoRestrict.resolve(State::Inherit), Some(true));
        assert_eq!(InheritMode::AutoRestrict.resolve(State::Restricted), Some(false));
    }

    #[test]
    fn outcome_defaults_unknown() {
        let outcome = Outcome::default();
        assert_eq!(outcome.changed, None);
        assert_eq!(outcome.target_ok, None);
        assert!(!outcome.is_changed());
        assert!(!outcome.is_target_ok());
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Lenient);
    }
}
