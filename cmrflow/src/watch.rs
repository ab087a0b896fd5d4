use cmrcore::ac::workflow::State;
use enumset::EnumSet;
use std::collections::HashMap;

/// The target states of a watched resource id that are of interest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Watch {
    /// Any target state.
    All,
    /// Only the listed target states.
    States(EnumSet<State>),
}

/// Debugging aid: reports (and logs a warning) whenever the
/// applicator is about to process a watched (resource, target state)
/// case.  Purely observational.
#[derive(Clone, Debug, Default)]
pub struct Watcher {
    cases: HashMap<String, Watch>,
}

impl Watcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(mut self, id: impl Into<String>, watch: Watch) -> Self {
        self.cases.insert(id.into(), watch);
        self
    }

    /// Watch the id for a single target state.
    pub fn watch_state(self, id: impl Into<String>, state: State) -> Self {
        self.watch(id, Watch::States(EnumSet::only(state)))
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// The watched resource ids, in no particular order.
    pub fn ids(&self) -> Vec<&str> {
        self.cases.keys()
            .map(String::as_str)
            .collect()
    }

    pub fn hit(&self, id: &str, state: State) -> bool {
        let hit = match self.cases.get(id) {
            Some(Watch::All) => true,
            Some(Watch::States(states)) => states.contains(state),
            None => false,
        };
        if hit {
            log::warn!("watched case: resource {id:?} -> {state}");
        }
        hit
    }
}

#[cfg(test)]
mod test {
    use cmrcore::ac::workflow::State;
    use enumset::EnumSet;
    use super::{Watch, Watcher};

    #[test]
    fn hits() {
        let watcher = Watcher::new()
            .watch("abc123", Watch::All)
            .watch_state("cde456", State::Restricted)
            .watch("efg789", Watch::States(
                State::Restricted | State::Visible));

        assert!(watcher.hit("abc123", State::Published));
        assert!(watcher.hit("cde456", State::Restricted));
        assert!(!watcher.hit("cde456", State::Published));
        assert!(watcher.hit("efg789", State::Visible));
        assert!(!watcher.hit("unlisted", State::Restricted));

        let mut ids = watcher.ids();
        ids.sort();
        assert_eq!(ids, vec!["abc123", "cde456", "efg789"]);
    }

    #[test]
    fn empty_watcher_never_hits() {
        let watcher = Watcher::new();
        assert!(watcher.is_empty());
        assert!(!watcher.hit("abc123", State::Published));
        assert_eq!(
            Watch::States(EnumSet::only(State::Visible)),
            Watch::States(EnumSet::only(State::Visible)),
        );
    }
}
