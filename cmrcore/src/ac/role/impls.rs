use enumset::EnumSet;
use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::{Role, Roles};

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Role> for &'static str {
    fn from(role: Role) -> &'static str {
        match role {
            Role::Manager => "Manager",
            Role::Owner => "Owner",
            Role::Editor => "Editor",
            Role::Reviewer => "Reviewer",
            Role::Reader => "Reader",
            Role::Undefined => "Undefined",
        }
    }
}

impl FromStr for Role {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Manager" => Ok(Role::Manager),
            "Owner" => Ok(Role::Owner),
            "Editor" => Ok(Role::Editor),
            "Reviewer" => Ok(Role::Reviewer),
            "Reader" => Ok(Role::Reader),
            // Undefined,
            s => Err(ValueError::Unsupported(s.to_string())),
        }
    }
}

impl Roles {
    pub fn new() -> Self {
        Self(EnumSet::new())
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(role)
    }

    /// Returns whether the role was newly added.
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    /// Returns whether the role was present.
    pub fn remove(&mut self, role: Role) -> bool {
        self.0.remove(role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> {
        self.0.iter()
    }
}

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut roles = self.0.iter();
        if let Some(role) = roles.next() {
            write!(f, "{role}")?;
            for role in roles {
                write!(f, ", {role}")?;
            }
        }
        Ok(())
    }
}

impl From<EnumSet<Role>> for Roles {
    fn from(set: EnumSet<Role>) -> Self {
        Self(set)
    }
}

impl<const N: usize> From<[Role; N]> for Roles {
    fn from(roles: [Role; N]) -> Self {
        Self(roles.into_iter().collect())
    }
}

impl FromIterator<Role> for Roles {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Roles {
    type Item = Role;
    type IntoIter = enumset::EnumSetIter<Role>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(feature = "clap")]
mod clap {
    use ::clap::{
        ValueEnum,
        builder::PossibleValue,
    };
    use super::*;

    impl ValueEnum for Role {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                Role::Manager,
                Role::Owner,
                Role::Editor,
                Role::Reviewer,
                Role::Reader,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            match self {
                Role::Manager => Some(PossibleValue::new("Manager")),
                Role::Owner => Some(PossibleValue::new("Owner")),
                Role::Editor => Some(PossibleValue::new("Editor")),
                Role::Reviewer => Some(PossibleValue::new("Reviewer")),
                Role::Reader => Some(PossibleValue::new("Reader")),
                Role::Undefined => None,
            }
        }
    }
}
