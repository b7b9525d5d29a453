//! Curves domain: keyframed easing curves.
//!
//! A curve maps normalized animation time to normalized progress. Segments
//! between keys are cubic Hermite splines driven by each key's tangents, so a
//! two-key curve whose tangents equal the slope between the keys is exactly
//! linear.


use serde::{Deserialize, Serialize};

/// A single control point of an [`AnimationCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Key with flat tangents.
    pub fn new(time: f32, value: f32) -> Self {
        Self::with_tangents(time, value, 0.0, 0.0)
    }

    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Time -> progress mapping with both domain and range in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct AnimationCurve {
    pub keys: Vec<Keyframe>,
}

impl AnimationCurve {
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self { keys }
    }

    /// Straight line between two keys.
    pub fn linear(time_start: f32, value_start: f32, time_end: f32, value_end: f32) -> Self {
        let span = time_end - time_start;
        let slope = if span.abs() <= f32::EPSILON {
            0.0
        } else {
            (value_end - value_start) / span
        };

        Self::new(vec![
            Keyframe::with_tangents(time_start, value_start, slope, slope),
            Keyframe::with_tangents(time_end, value_end, slope, slope),
        ])
    }

    /// Smoothstep-shaped curve from 0 to 1 (flat tangents at both ends).
    pub fn ease_in_out() -> Self {
        Self::new(vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 1.0)])
    }

    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value), Keyframe::new(1.0, value)])
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True when key times are strictly increasing.
    pub fn is_sorted(&self) -> bool {
        self.keys.windows(2).all(|pair| pair[0].time < pair[1].time)
    }

    /// Sample the curve at `time`.
    ///
    /// Inputs outside the key range hold the nearest end key. An empty curve
    /// evaluates to `0.0`. The result is clamped to `[0, 1]`.
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };

        if time <= first.time {
            return first.value.clamp(0.0, 1.0);
        }
        if time >= last.time {
            return last.value.clamp(0.0, 1.0);
        }

        // first key strictly after `time`; always in 1..len here
        let next = self.keys.partition_point(|key| key.time <= time);
        let a = self.keys[next - 1];
        let b = self.keys[next];

        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value.clamp(0.0, 1.0);
        }

        hermite(a, b, (time - a.time) / span, span).clamp(0.0, 1.0)
    }
}

fn hermite(a: Keyframe, b: Keyframe, s: f32, span: f32) -> f32 {
    let s2 = s * s;
    let s3 = s2 * s;

    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    h00 * a.value + h10 * span * a.out_tangent + h01 * b.value + h11 * span * b.in_tangent
}
