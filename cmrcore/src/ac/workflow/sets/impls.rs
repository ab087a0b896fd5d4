use std::collections::HashSet;

use super::{State, StateSets};

impl StateSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state at the end of the declaration order.  Returns
    /// false when the state was already registered.
    pub fn add_set(&mut self, state: State) -> bool {
        if self.sets.contains_key(&state) {
            return false;
        }
        self.order.push(state);
        self.sets.insert(state, HashSet::new());
        true
    }

    pub fn has_set(&self, state: State) -> bool {
        self.sets.contains_key(&state)
    }

    /// Record an id under the given state, registering the state first
    /// if needed.  Returns whether the id was newly added.
    pub fn insert(&mut self, state: State, id: impl Into<String>) -> bool {
        if !self.sets.contains_key(&state) {
            self.order.push(state);
        }
        self.sets.entry(state)
            .or_default()
            .insert(id.into())
    }

    pub fn contains(&self, state: State, id: &str) -> bool {
        self.sets.get(&state)
            .map_or(false, |set| set.contains(id))
    }

    /// The first state, in declaration order, whose set holds the id.
    pub fn first_hit(&self, id: &str) -> Option<State> {
        self.order.iter()
            .copied()
            .find(|state| self.contains(*state, id))
    }

    /// The most public state the id is recorded under, provided it
    /// ranks at least as high as `floor`.  A floor outside the
    /// publicness order only ever matches exactly.
    pub fn best_hit(&self, id: &str, floor: State) -> Option<State> {
        match floor.publicness() {
            None => self.contains(floor, id).then_some(floor),
            Some(rank) => self.order.iter()
                .copied()
                .filter(|state| state.publicness()
                    .map_or(false, |r| r >= rank))
                .filter(|state| self.contains(*state, id))
                .max_by_key(|state| state.publicness()),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Declaration-order view of the registered sets.
    pub fn iter(&self) -> impl Iterator<Item = (State, &HashSet<String>)> {
        self.order.iter()
            .filter_map(move |state| self.sets.get(state)
                .map(|set| (*state, set)))
    }
}

#[cfg(test)]
mod test {
    use super::super::{State, StateSets};

    #[test]
    fn declaration_order() {
        let mut sets = StateSets::new();
        assert!(sets.add_set(State::Published));
        assert!(sets.add_set(State::Visible));
        assert!(!sets.add_set(State::Published));

        sets.insert(State::Published, "abc123");
        sets.insert(State::Visible, "abc123");
        // published was declared first
        assert_eq!(sets.first_hit("abc123"), Some(State::Published));
        assert_eq!(sets.first_hit("nope"), None);

        let order = sets.iter()
            .map(|(state, _)| state)
            .collect::<Vec<_>>();
        assert_eq!(order, vec![State::Published, State::Visible]);
    }

    #[test]
    fn insert_registers_new_states() {
        let mut sets = StateSets::new();
        assert!(sets.insert(State::Restricted, "abc123"));
        assert!(!sets.insert(State::Restricted, "abc123"));
        assert!(sets.has_set(State::Restricted));
        assert_eq!(sets.len(), 1);
    }

    #[test]
    fn best_hit_by_publicness() {
        let mut sets = StateSets::new();
        sets.insert(State::Published, "abc123");

        // a mark for a more public state satisfies a lesser floor
        assert_eq!(
            sets.best_hit("abc123", State::Visible),
            Some(State::Published),
        );
        assert_eq!(
            sets.best_hit("abc123", State::Published),
            Some(State::Published),
        );
        assert_eq!(sets.best_hit("abc123", State::Inherit), None);

        sets.insert(State::Inherit, "cde456");
        // parallel states match exactly only
        assert_eq!(
            sets.best_hit("cde456", State::Inherit),
            Some(State::Inherit),
        );
        assert_eq!(sets.best_hit("cde456", State::Visible), None);
    }
}
