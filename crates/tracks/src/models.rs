use geo::{Distance as _, Euclidean, Point};
use serde::{Deserialize, Serialize};

use crate::errors::TrackError;

/// A point in course space: planar `x`/`y` plus elevation `z`, all in the
/// track's length unit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the horizontal plane.
    pub fn planar(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One discrete step of a course.
///
/// `position` is where the segment ends. `slope` is signed rise/run,
/// `turning_angle` is the heading change entering the segment in (-π, π],
/// and `roughness` lies in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub position: Position,
    pub length: f64,
    pub slope: f64,
    pub turning_angle: f64,
    pub roughness: f64,
}

impl Segment {
    /// A straight, smooth segment with the given length and slope, positioned at the origin.
    ///
    /// Handy for hand-built courses fed straight to a pacing run.
    pub fn straight(length: f64, slope: f64) -> Self {
        Self {
            position: Position::ORIGIN,
            length,
            slope,
            turning_angle: 0.0,
            roughness: 0.0,
        }
    }

    /// Elevation gained (or lost, if negative) across this segment.
    pub fn rise(&self) -> f64 {
        self.slope * self.length
    }
}

/// An ordered, non-empty sequence of segments describing a path.
///
/// Once built, a track is read-only; segment order defines traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrackData")]
pub struct Track {
    start: Position,
    segments: Vec<Segment>,
}

/// Wire form of [`Track`]; deserialized tracks are re-validated.
#[derive(Deserialize)]
struct TrackData {
    #[serde(default)]
    start: Position,
    segments: Vec<Segment>,
}

impl TryFrom<TrackData> for Track {
    type Error = TrackError;

    fn try_from(data: TrackData) -> Result<Self, Self::Error> {
        Self::with_start(data.start, data.segments)
    }
}

impl Track {
    /// Builds a track starting at the origin.
    pub fn new(segments: Vec<Segment>) -> Result<Self, TrackError> {
        Self::with_start(Position::ORIGIN, segments)
    }

    /// Builds a track starting at `start`.
    pub fn with_start(start: Position, segments: Vec<Segment>) -> Result<Self, TrackError> {
        if segments.is_empty() {
            return Err(TrackError::EmptyTrack);
        }
        for (index, segment) in segments.iter().enumerate() {
            if !segment.length.is_finite() || segment.length <= 0.0 {
                return Err(TrackError::InvalidSegment {
                    index,
                    reason: format!("length must be finite and positive, got {}", segment.length),
                });
            }
        }
        Ok(Self { start, segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a constructed track; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Position at the end of the last segment.
    pub fn end(&self) -> Position {
        self.segments
            .last()
            .map_or(self.start, |segment| segment.position)
    }

    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    pub fn total_slope(&self) -> f64 {
        self.segments.iter().map(|s| s.slope).sum()
    }

    pub fn total_turning_angle(&self) -> f64 {
        self.segments.iter().map(|s| s.turning_angle).sum()
    }

    /// Sum of slope × length; zero for a loop that returns to its starting height.
    pub fn net_elevation_change(&self) -> f64 {
        self.segments.iter().map(Segment::rise).sum()
    }

    /// Total climbing, ignoring descents.
    pub fn elevation_gain(&self) -> f64 {
        self.segments
            .iter()
            .map(Segment::rise)
            .filter(|rise| *rise > 0.0)
            .sum()
    }

    /// Number of segments whose turning angle magnitude exceeds `threshold`.
    pub fn sharp_turn_count(&self, threshold: f64) -> usize {
        self.segments
            .iter()
            .filter(|s| s.turning_angle.abs() > threshold)
            .count()
    }

    /// Planar distance between the start and the end of the last segment.
    pub fn closure_distance(&self) -> f64 {
        Euclidean.distance(self.start.planar(), self.end().planar())
    }

    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.closure_distance() < tolerance
    }

    /// Distance travelled at the end of each segment.
    pub fn cumulative_distances(&self) -> Vec<f64> {
        self.segments
            .iter()
            .scan(0.0, |distance, segment| {
                *distance += segment.length;
                Some(*distance)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Output of a synthesis run.
///
/// When `constraints_satisfied` is false the retry budget ran out and the
/// track is best-effort: closure, length and zero net elevation still hold,
/// but the sharpness and net-turn rules were not met.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedTrack {
    pub track: Track,
    pub constraints_satisfied: bool,
    /// Geometry attempts consumed, including the accepted one.
    pub attempts: u32,
}

impl SynthesizedTrack {
    pub fn into_track(self) -> Track {
        self.track
    }
}
