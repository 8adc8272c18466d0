use std::fmt;

/// Stages of one harvest. `Done` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarvestState {
    Idle,
    Verifying,
    Fetching,
    Extracting,
    Writing,
    Done,
    Error,
}

impl HarvestState {
    pub fn is_terminal(self) -> bool {
        matches!(self, HarvestState::Done | HarvestState::Error)
    }

    /// Whether the machine may move from `self` to `next`.
    pub fn can_transition_to(self, next: HarvestState) -> bool {
        use HarvestState::*;
        matches!(
            (self, next),
            (Idle, Verifying)
                | (Verifying, Fetching)
                | (Verifying, Error)
                | (Fetching, Extracting)
                | (Fetching, Error)
                | (Extracting, Writing)
                | (Extracting, Done)
                | (Writing, Done)
                | (Writing, Error)
        )
    }
}

impl fmt::Display for HarvestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HarvestState::Idle => "idle",
            HarvestState::Verifying => "verifying",
            HarvestState::Fetching => "fetching",
            HarvestState::Extracting => "extracting",
            HarvestState::Writing => "writing",
            HarvestState::Done => "done",
            HarvestState::Error => "error",
        };
        f.write_str(name)
    }
}
