use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::{ResourceState, State};

impl State {
    /// Rank of this state on the publicness order; `None` for states
    /// outside of it (`Inherit` is a parallel state, not a lesser or
    /// greater one).
    pub fn publicness(&self) -> Option<u8> {
        match self {
            State::Restricted => Some(0),
            State::Visible => Some(1),
            State::Published => Some(2),
            _ => None,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", <&'static str>::from(*self))
    }
}

impl From<State> for String {
    fn from(state: State) -> String {
        format!("{state}")
    }
}

impl From<State> for &'static str {
    fn from(state: State) -> &'static str {
        match state {
            State::Restricted => "restricted",
            State::Visible => "visible",
            State::Published => "published",
            State::Inherit => "inherit",
            State::Unknown => "unknown",
        }
    }
}

impl FromStr for State {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "restricted" => Ok(State::Restricted),
            "visible" => Ok(State::Visible),
            "published" => Ok(State::Published),
            "inherit" => Ok(State::Inherit),
            // Unknown,
            s => Err(ValueError::Unsupported(s.to_string())),
        }
    }
}

impl ResourceState {
    pub fn new(res: impl Into<String>, state: State) -> Self {
        Self {
            res: res.into(),
            state,
        }
    }
}

#[cfg(feature = "clap")]
mod clap {
    use ::clap::{
        ValueEnum,
        builder::PossibleValue,
    };
    use super::*;

    impl ValueEnum for State {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                State::Restricted,
                State::Visible,
                State::Published,
                State::Inherit,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            match self {
                State::Restricted => Some(PossibleValue::new("restricted")),
                State::Visible => Some(PossibleValue::new("visible")),
                State::Published => Some(PossibleValue::new("published")),
                State::Inherit => Some(PossibleValue::new("inherit")),
                State::Unknown => None,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use super::State;
    use crate::error::ValueError;

    #[test]
    fn smoke() -> anyhow::Result<()> {
        // sample of standard conversions
        assert_eq!(State::Restricted.to_string(), "restricted");
        assert_eq!(State::Restricted, State::from_str("restricted")?);
        assert_eq!(State::Published.to_string(), "published");
        assert_eq!(State::Published, State::from_str("published")?);

        // error conversion
        assert!(State::from_str("unknown").is_err());
        assert!(matches!(
            State::from_str("no_such_workflow_state")
                .expect_err("should be an error"),
            ValueError::Unsupported(s) if s == "no_such_workflow_state".to_string(),
        ));

        // infallable conversion
        assert_eq!(
            State::from_str("no_such_wf_state")
                .unwrap_or_default(),
            State::Unknown,
        );
        Ok(())
    }

    #[test]
    fn publicness_order() {
        assert!(State::Restricted.publicness() < State::Visible.publicness());
        assert!(State::Visible.publicness() < State::Published.publicness());
        assert_eq!(State::Inherit.publicness(), None);
        assert_eq!(State::Unknown.publicness(), None);
    }
}
