use enumset::EnumSetType;
use serde::{Deserialize, Serialize};

mod impls;
pub mod sets;
pub mod transition;
pub use sets::StateSets;
pub use transition::{StateTransitions, Transition};

#[non_exhaustive]
#[derive(Debug, Default, EnumSetType, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    // catch-all when infallable conversion is required
    #[default]
    Unknown,
    Restricted,
    Visible,
    Published,
    Inherit,
}

/// Resource workflow state
///
/// Couples a resource identifier with the workflow state the resource
/// was last observed in, typically as reported by the hosting content
/// catalog.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ResourceState {
    pub res: String,
    pub state: State,
}
