use serde::{
    Deserialize,
    Serialize,
};
use std::collections::HashMap;

use super::State;

/// One edge of the workflow transition table.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Transition {
    /// The target workflow state
    pub target: State,
    /// The action name understood by the workflow mechanism; `None`
    /// marks an explicit no-op entry (the target already holds, nothing
    /// to invoke).
    #[serde(default)]
    pub name: Option<String>,
    /// A description of the goal of this transition
    pub description: String,
}

/// The transition table, keyed by the outgoing state.  A missing
/// `(from, to)` pair means "no known transition"; no-op pairs are
/// recorded explicitly, never by absence.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StateTransitions(HashMap<State, Vec<Transition>>);

mod impls;
