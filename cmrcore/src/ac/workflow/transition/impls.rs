use super::*;

impl Transition {
    pub fn new(
        target: State,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            target,
            name: Some(name.into()),
            description: description.into(),
        }
    }

    /// An explicit entry stating that no action is required to reach
    /// the target.
    pub fn noop(target: State) -> Self {
        Self {
            target,
            name: None,
            description: "No change required".to_string(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.name.is_none()
    }
}

impl Default for StateTransitions {
    fn default() -> Self {
        Self(HashMap::from([
            (State::Restricted, vec![
                Transition::new(
                    State::Visible,
                    "make_visible",
                    "Make the resource visible",
                ),
                Transition::new(
                    State::Published,
                    "make_public",
                    "Publish",
                ),
                Transition::noop(State::Restricted),
            ]),
            (State::Visible, vec![
                Transition::new(
                    State::Published,
                    "make_public",
                    "Publish",
                ),
                Transition::new(
                    State::Restricted,
                    "make_restricted_again",
                    "Restrict again",
                ),
                Transition::noop(State::Visible),
            ]),
            (State::Published, vec![
                Transition::new(
                    State::Visible,
                    "make_visible_again",
                    "Make visible again",
                ),
                Transition::new(
                    State::Restricted,
                    "make_restricted_again",
                    "Restrict again",
                ),
                Transition::noop(State::Published),
            ]),
            // the permission-acquiring state only ever moves up
            (State::Inherit, vec![
                Transition::new(
                    State::Visible,
                    "make_visible",
                    "Make the resource visible",
                ),
                Transition::new(
                    State::Published,
                    "make_public",
                    "Publish",
                ),
            ]),
        ]))
    }
}

impl StateTransitions {
    /// A table with no entries at all; populate via [`Self::insert`].
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// The first entry leaving `from` that reaches `to`, if any.
    pub fn lookup(&self, from: State, to: State) -> Option<&Transition> {
        self.0.get(&from)?
            .iter()
            .find(|transition| transition.target == to)
    }

    pub fn insert(&mut self, from: State, transition: Transition) {
        self.0.entry(from)
            .or_default()
            .push(transition)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_covers_core_pairs() {
        let table = StateTransitions::default();
        let core = [State::Restricted, State::Visible, State::Published];
        for from in core {
            for to in core {
                let transition = table.lookup(from, to)
                    .expect("core pair must have an entry");
                assert_eq!(transition.is_noop(), from == to);
            }
        }
    }

    #[test]
    fn default_names() {
        let table = StateTransitions::default();
        assert_eq!(
            table.lookup(State::Restricted, State::Published)
                .and_then(|t| t.name.as_deref()),
            Some("make_public"),
        );
        assert_eq!(
            table.lookup(State::Published, State::Visible)
                .and_then(|t| t.name.as_deref()),
            Some("make_visible_again"),
        );
        assert_eq!(
            table.lookup(State::Inherit, State::Visible)
                .and_then(|t| t.name.as_deref()),
            Some("make_visible"),
        );
        // parallel state has no way back down
        assert!(table.lookup(State::Inherit, State::Restricted).is_none());
        assert!(table.lookup(State::Unknown, State::Visible).is_none());
    }

    #[test]
    fn json_round_trip() -> anyhow::Result<()> {
        let doc = r#"{
            "restricted": [
                {"target": "published", "name": "submit", "description": "Straight to published"},
                {"target": "restricted", "description": "No change required"}
            ]
        }"#;
        let table: StateTransitions = serde_json::from_str(doc)?;
        assert_eq!(
            table.lookup(State::Restricted, State::Published)
                .and_then(|t| t.name.as_deref()),
            Some("submit"),
        );
        assert!(table.lookup(State::Restricted, State::Restricted)
            .expect("explicit entry")
            .is_noop());
        assert!(table.lookup(State::Restricted, State::Visible).is_none());

        let echoed: StateTransitions = serde_json::from_str(
            &serde_json::to_string(&table)?)?;
        assert_eq!(echoed, table);
        Ok(())
    }
}
