use std::collections::{
    HashMap,
    HashSet,
};

use super::State;

/// Insertion-ordered collection of per-state resource id sets.
///
/// The shared shape behind the applicator's target and done
/// bookkeeping: the order in which states are registered is significant
/// for declaration-order lookup ([`Self::first_hit`]), while
/// [`Self::best_hit`] consults the publicness rank instead.
#[derive(Clone, Debug, Default)]
pub struct StateSets {
    order: Vec<State>,
    sets: HashMap<State, HashSet<String>>,
}

mod impls;
