use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

#[non_exhaustive]
#[derive(Debug, Default, EnumSetType, Hash, Deserialize, Serialize)]
pub enum Role {
    // catch-all for whenever infallable conversion is needed
    #[default]
    Undefined,
    Manager,
    Owner,
    Editor,
    Reviewer,
    Reader,
}

/// An unordered set of local roles held by (or requested for) a single
/// principal on a resource.
#[derive(Debug, Default, Hash, Eq, PartialEq, Clone, Copy)]
pub struct Roles(pub EnumSet<Role>);

mod impls;
