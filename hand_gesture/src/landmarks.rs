//! The 21-point hand model produced by the external detector.
//!
//! Coordinates are normalised to the image: `x` and `y` in `[0, 1]` with the
//! origin at the top-left; `z` is relative depth and unused by the
//! classifier.

use serde::{Deserialize, Serialize};

use crate::error::GestureError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// (tip, base) for index, middle, ring and pinky.
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_MCP),
    (RING_TIP, RING_MCP),
    (PINKY_TIP, PINKY_MCP),
];

/// (tip, base) used for the thumb test.
pub const THUMB: (usize, usize) = (THUMB_TIP, THUMB_MCP);

/// Wrist plus the four finger bases; their mean is the palm centre.
pub const PALM: [usize; 5] = [WRIST, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

/// Skeleton edges for drawing: four joints per digit plus the knuckle line.
pub const HAND_CONNECTIONS: [(usize, usize); 23] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, RING_MCP), (RING_MCP, PINKY_MCP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self { Landmark { x, y, z } }

    /// Distance in the image plane; depth is ignored.
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One detected hand.  Always exactly [`LANDMARK_COUNT`] points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        HandLandmarks { points }
    }

    pub fn from_slice(points: &[Landmark]) -> Result<Self, GestureError> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| GestureError::LandmarkCount(points.len()))?;
        Ok(HandLandmarks { points })
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] { &self.points }

    pub fn get(&self, index: usize) -> Option<&Landmark> { self.points.get(index) }

    pub fn wrist(&self) -> &Landmark { &self.points[WRIST] }

    /// Mean of the wrist and the four finger bases, `(x, y)`.
    pub fn palm_center(&self) -> (f32, f32) {
        let (sx, sy) = PALM.iter().fold((0.0, 0.0), |(sx, sy), &i| {
            (sx + self.points[i].x, sy + self.points[i].y)
        });
        let n = PALM.len() as f32;
        (sx / n, sy / n)
    }
}

impl std::ops::Index<usize> for HandLandmarks {
    type Output = Landmark;
    fn index(&self, index: usize) -> &Landmark { &self.points[index] }
}

impl TryFrom<Vec<Landmark>> for HandLandmarks {
    type Error = GestureError;
    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        HandLandmarks::from_slice(&points)
    }
}

impl From<HandLandmarks> for Vec<Landmark> {
    fn from(hand: HandLandmarks) -> Self { hand.points.to_vec() }
}

// ============================================================================
// TESTS
// ============================================================================
