use serde::{Deserialize, Serialize};

use crate::models::{Segment, Track};

/// Streaming accumulator over a track's segments.
pub trait TrackMetric {
    type Score;
    fn next_segment(&mut self, segment: &Segment);
    fn finish(&mut self) -> Self::Score;
}

/// Headline figures for a course, as reported alongside a pacing run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub segments: usize,
    pub total_length: f64,
    pub elevation_gain: f64,
    pub max_climb_slope: f64,
    pub max_descent_slope: f64,
    pub sharp_turns: usize,
    pub net_turn: f64,
    pub mean_roughness: f64,
    pub closure_distance: f64,
}

pub fn summarize(track: &Track, sharp_turn_threshold: f64) -> TrackSummary {
    let mut acc = Metrics::new(sharp_turn_threshold);
    for segment in track {
        acc.next_segment(segment);
    }
    let mut summary = acc.finish();
    summary.closure_distance = track.closure_distance();
    summary
}

#[derive(Debug, Clone, Default)]
struct Metrics {
    count: usize,
    distance: DistanceMetric,
    gain: ElevationGainMetric,
    slope: SlopeExtremaMetric,
    turns: TurnMetric,
    roughness: f64,
}

impl Metrics {
    fn new(sharp_turn_threshold: f64) -> Self {
        Self {
            turns: TurnMetric {
                threshold: sharp_turn_threshold,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl TrackMetric for Metrics {
    type Score = TrackSummary;

    fn next_segment(&mut self, segment: &Segment) {
        self.count += 1;
        self.roughness += segment.roughness;
        self.distance.next_segment(segment);
        self.gain.next_segment(segment);
        self.slope.next_segment(segment);
        self.turns.next_segment(segment);
    }

    fn finish(&mut self) -> TrackSummary {
        let (max_climb_slope, max_descent_slope) = self.slope.finish();
        let (sharp_turns, net_turn) = self.turns.finish();
        TrackSummary {
            segments: self.count,
            total_length: self.distance.finish(),
            elevation_gain: self.gain.finish(),
            max_climb_slope,
            max_descent_slope,
            sharp_turns,
            net_turn,
            mean_roughness: if self.count > 0 {
                self.roughness / self.count as f64
            } else {
                0.0
            },
            closure_distance: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct DistanceMetric {
    total_distance: f64,
}

impl TrackMetric for DistanceMetric {
    type Score = f64;
    fn next_segment(&mut self, segment: &Segment) {
        self.total_distance += segment.length;
    }

    fn finish(&mut self) -> f64 {
        self.total_distance
    }
}

#[derive(Debug, Clone, Default)]
struct ElevationGainMetric {
    total_gain: f64,
}

impl TrackMetric for ElevationGainMetric {
    type Score = f64;
    fn next_segment(&mut self, segment: &Segment) {
        let rise = segment.rise();
        if rise > 0.0 {
            self.total_gain += rise;
        }
    }

    fn finish(&mut self) -> f64 {
        self.total_gain
    }
}

#[derive(Debug, Clone, Default)]
struct SlopeExtremaMetric {
    steepest_climb: f64,
    steepest_descent: f64,
}

impl TrackMetric for SlopeExtremaMetric {
    type Score = (f64, f64);
    fn next_segment(&mut self, segment: &Segment) {
        self.steepest_climb = self.steepest_climb.max(segment.slope);
        self.steepest_descent = self.steepest_descent.min(segment.slope);
    }

    fn finish(&mut self) -> (f64, f64) {
        (self.steepest_climb, self.steepest_descent)
    }
}

#[derive(Debug, Clone, Default)]
struct TurnMetric {
    threshold: f64,
    sharp: usize,
    net: f64,
}

impl TrackMetric for TurnMetric {
    type Score = (usize, f64);
    fn next_segment(&mut self, segment: &Segment) {
        if segment.turning_angle.abs() > self.threshold {
            self.sharp += 1;
        }
        self.net += segment.turning_angle;
    }

    fn finish(&mut self) -> (usize, f64) {
        (self.sharp, self.net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_hand_built_track() {
        let mut segments = vec![
            Segment::straight(100.0, 0.05),
            Segment::straight(100.0, -0.08),
            Segment::straight(200.0, 0.015),
        ];
        segments[1].turning_angle = 0.3;
        segments[2].turning_angle = -0.05;
        segments[2].roughness = 0.9;
        let track = Track::new(segments).unwrap();

        let summary = summarize(&track, 0.08);
        assert_eq!(summary.segments, 3);
        assert!((summary.total_length - 400.0).abs() < 1e-12);
        assert!((summary.elevation_gain - 8.0).abs() < 1e-9);
        assert_eq!(summary.max_climb_slope, 0.05);
        assert_eq!(summary.max_descent_slope, -0.08);
        assert_eq!(summary.sharp_turns, 1);
        assert!((summary.net_turn - 0.25).abs() < 1e-12);
        assert!((summary.mean_roughness - 0.3).abs() < 1e-12);
    }
}
