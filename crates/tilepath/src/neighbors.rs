use tilepath_core::Point;

const CARDINAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, 1),
];

const ALL: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(1, 1),
];

/// Movement model: which neighbor offsets a single step may take.
///
/// Offsets are enumerated in a fixed row-major order so that searches with
/// equal-cost alternatives always resolve the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// 4-connected: up, left, right, down.
    Cardinal,
    /// 8-connected: cardinal steps plus the four diagonals.
    Diagonal,
}

impl Movement {
    /// Movement model for the given diagonal flag.
    #[inline]
    pub fn from_diagonal(allow_diagonal: bool) -> Self {
        if allow_diagonal {
            Self::Diagonal
        } else {
            Self::Cardinal
        }
    }

    /// Whether diagonal steps are allowed.
    #[inline]
    pub fn allows_diagonal(self) -> bool {
        self == Self::Diagonal
    }

    /// The step offsets of this model. Never contains the zero offset.
    #[inline]
    pub fn offsets(self) -> &'static [Point] {
        match self {
            Self::Cardinal => &CARDINAL,
            Self::Diagonal => &ALL,
        }
    }

    /// Neighbors of `p` under this model, before any bounds or blocking
    /// checks.
    #[inline]
    pub fn neighbors(self, p: Point) -> impl Iterator<Item = Point> {
        self.offsets().iter().map(move |&d| p + d)
    }
}
