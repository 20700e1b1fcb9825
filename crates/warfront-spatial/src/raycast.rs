//! Sampled line-of-fire sweeps over the spatial index.
//!
//! [`SpatialIndex::raycast`] walks a segment in fixed steps of
//! [`SpatialConfig::raycast_step`](crate::SpatialConfig::raycast_step) tiles
//! and tests each sample point against entity hit circles: the circle
//! inscribed in each footprint square, radius = half the side. It is an
//! approximation: a hit circle thinner than the sample spacing can be
//! stepped over, and the reported point is the first sample inside the
//! circle rather than the exact entry point.

use crate::index::{EntityRecord, SpatialIndex};
use std::f32::consts::SQRT_2;
use warfront_core::{EntityId, Waypoint};

/// Upper bound on samples per ray, so a runaway segment length cannot stall
/// a tick. Longer rays are sampled more coarsely.
pub const MAX_RAYCAST_SAMPLES: usize = 4096;

/// First entity hit by [`SpatialIndex::raycast`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// The entity hit.
    pub id: EntityId,
    /// Sample point at which the hit was detected.
    pub point: Waypoint,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

impl SpatialIndex {
    /// Sweep from `(x1, y1)` to `(x2, y2)` and return the first entity whose
    /// hit circle contains a sample point and that satisfies `predicate`.
    ///
    /// Samples are taken at `ceil(length / raycast_step)` equal steps
    /// (at least one, at most [`MAX_RAYCAST_SAMPLES`]), both endpoints
    /// included. When several entities contain the same sample, the one
    /// whose footprint center is closest to it wins. Non-finite input yields
    /// `None`.
    pub fn raycast<F>(
        &self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        mut predicate: F,
    ) -> Option<RayHit>
    where
        F: FnMut(&EntityRecord) -> bool,
    {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            tracing::warn!(x1, y1, x2, y2, "raycast with non-finite input ignored");
            return None;
        }
        if self.is_empty() {
            return None;
        }

        let dx = x2 - x1;
        let dy = y2 - y1;
        let length = (dx * dx + dy * dy).sqrt();
        let steps = sample_count(length, self.config().raycast_step);
        // The broad phase measures from recorded corners; a sample inside a
        // hit circle is at most r + r·√2 from its footprint's corner.
        let reach = self.max_footprint().radius() * (1.0 + SQRT_2);

        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            let px = x1 + dx * t;
            let py = y1 + dy * t;

            let mut best: Option<(EntityId, f32)> = None;
            self.scan(px, py, reach, |record| {
                let radius = record.footprint.radius();
                let d2 = record.center_distance_sq(px, py);
                if d2 <= radius * radius
                    && best.map_or(true, |(_, b)| d2 < b)
                    && predicate(record)
                {
                    best = Some((record.id, d2));
                }
            });

            if let Some((id, _)) = best {
                return Some(RayHit {
                    id,
                    point: Waypoint::new(px, py),
                    distance: length * t,
                });
            }
        }
        None
    }
}

fn sample_count(length: f32, step: f32) -> usize {
    if length <= 0.0 {
        return 0;
    }
    let steps = (length / step).ceil();
    if steps >= MAX_RAYCAST_SAMPLES as f32 {
        MAX_RAYCAST_SAMPLES
    } else {
        (steps as usize).max(1)
    }
}
