use serde::{Deserialize, Serialize};

/// One of the eight discrete move commands a camera understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    ForwardLeft,
    ForwardRight,
    BackwardLeft,
    BackwardRight,
}

impl Movement {
    pub const ALL: [Movement; 8] = [
        Movement::Forward,
        Movement::Backward,
        Movement::Left,
        Movement::Right,
        Movement::ForwardLeft,
        Movement::ForwardRight,
        Movement::BackwardLeft,
        Movement::BackwardRight,
    ];

    /// The command that undoes this one at the same delta time.
    pub fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::ForwardLeft => Self::BackwardRight,
            Self::ForwardRight => Self::BackwardLeft,
            Self::BackwardLeft => Self::ForwardRight,
            Self::BackwardRight => Self::ForwardLeft,
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::ForwardLeft | Self::ForwardRight | Self::BackwardLeft | Self::BackwardRight
        )
    }
}
