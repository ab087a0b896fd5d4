use cmrcore::ac::workflow::{State, StateSets};
use serde::Serialize;
use std::fmt;

/// Size and watched-id membership of one per-state set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SetReport {
    pub state: State,
    pub size: usize,
    /// Watched resource ids present in the set.
    pub watched: Vec<String>,
}

/// A snapshot of the applicator's bookkeeping, suitable for progress
/// logging between batches.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub label: String,
    pub targets: Vec<SetReport>,
    pub done: Vec<SetReport>,
}

fn reports(sets: &StateSets, watched: &[&str]) -> Vec<SetReport> {
    sets.iter()
        .map(|(state, ids)| {
            let mut hits = watched.iter()
                .filter(|id| ids.contains(**id))
                .map(|id| id.to_string())
                .collect::<Vec<_>>();
            hits.sort();
            SetReport {
                state,
                size: ids.len(),
                watched: hits,
            }
        })
        .collect()
}

impl Summary {
    pub(crate) fn build(
        label: impl Into<String>,
        targets: &StateSets,
        done: &StateSets,
        watched: &[&str],
    ) -> Self {
        Self {
            label: label.into(),
            targets: reports(targets, watched),
            done: reports(done, watched),
        }
    }

    /// Whether any watched id has already been recorded as done.
    pub fn has_hits(&self) -> bool {
        self.done.iter()
            .any(|report| !report.watched.is_empty())
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "summary")?;
        if !self.label.is_empty() {
            write!(f, " ({})", self.label)?;
        }
        if self.targets.is_empty() && self.done.is_empty() {
            return write!(f, ": <empty>");
        }
        for (title, sets) in [
            ("target sets", &self.targets),
            ("done sets", &self.done),
        ] {
            if sets.is_empty() {
                continue;
            }
            write!(f, "\n  {title}")?;
            for report in sets {
                write!(
                    f,
                    "\n  {:7} {:?}",
                    report.size,
                    report.state.to_string(),
                )?;
                if !report.watched.is_empty() {
                    write!(f, "; contains {}", report.watched.join(", "))?;
                }
            }
        }
        Ok(())
    }
}
