//! Ring bounds, ring-out detection and positional shaping rewards.

use serde::{Deserialize, Serialize};

use crate::engine::config::BehaviorRewardConfig;
use crate::engine::types::{Vec2, Vec3};

/// Smallest half extent used when normalizing edge distances
const MIN_HALF_EXTENT: f32 = 1e-3;

/// Axis-aligned ring footprint on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub center: Vec3,
    /// Half size along x and z; y is unused
    pub half_extents: Vec3,
}

/// What a fighter knows about its position in the ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingObservation {
    /// Planar (x, z) vector from the fighter to the ring center
    pub to_center: Vec2,
    /// Edge distances normalized by the half extent: +x, −x, +z, −z
    pub edges: [f32; 4],
    pub min_edge: f32,
}

impl ArenaBounds {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self { center, half_extents: half_extents.abs() }
    }

    /// Square ring of the given side length centered at the origin
    pub fn square(side: f32) -> Self {
        let h = side.abs() * 0.5;
        Self::new(Vec3::zeros(), Vec3::new(h, 0.0, h))
    }

    /// Outside the ring footprint by more than `margin`
    pub fn is_out(&self, position: &Vec3, margin: f32) -> bool {
        let d = position - self.center;
        d.x.abs() > self.half_extents.x + margin || d.z.abs() > self.half_extents.z + margin
    }

    pub fn edge_distances01(&self, position: &Vec3) -> [f32; 4] {
        let nx = self.half_extents.x.max(MIN_HALF_EXTENT);
        let nz = self.half_extents.z.max(MIN_HALF_EXTENT);
        let c = self.center;
        let h = self.half_extents;
        [
            ((c.x + h.x) - position.x) / nx,
            (position.x - (c.x - h.x)) / nx,
            ((c.z + h.z) - position.z) / nz,
            (position.z - (c.z - h.z)) / nz,
        ]
    }

    /// 1 at the center, 0 on the closest rope, negative outside
    pub fn min_boundary_distance01(&self, position: &Vec3) -> f32 {
        self.edge_distances01(position).into_iter().fold(f32::INFINITY, f32::min)
    }

    pub fn observe(&self, position: &Vec3) -> RingObservation {
        let edges = self.edge_distances01(position);
        let to_center = self.center - position;
        RingObservation {
            to_center: Vec2::new(to_center.x, to_center.z),
            edges,
            min_edge: edges.into_iter().fold(f32::INFINITY, f32::min),
        }
    }
}

/// Penalty for loitering near the ropes; grows toward the edge.
pub fn edge_camping_penalty(min_edge01: f32, cfg: &BehaviorRewardConfig) -> f32 {
    if !(min_edge01 < cfg.edge_danger_threshold) {
        return 0.0;
    }
    let threshold = cfg.edge_danger_threshold.max(MIN_HALF_EXTENT);
    let k = ((cfg.edge_danger_threshold - min_edge01) / threshold).clamp(0.0, 1.0);
    cfg.edge_camping_penalty * (0.5 + 0.5 * k)
}

/// Penalty for standing too far from or too close to the opponent.
pub fn distance_band_penalty(distance: f32, cfg: &BehaviorRewardConfig) -> f32 {
    let mut penalty = 0.0;
    if distance > cfg.far_distance {
        penalty += cfg.far_penalty;
    }
    if distance < cfg.near_distance {
        penalty += cfg.near_penalty;
    }
    penalty
}
