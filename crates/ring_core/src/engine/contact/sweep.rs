//! Volumetric sweep query.
//!
//! The physics engine normally answers sweeps. `AabbSweepWorld` is a small
//! sphere-vs-AABB implementation for headless runs and tests: each collider
//! is expanded by the sphere radius and the travel segment is slab-tested
//! against it.

use serde::{Deserialize, Serialize};

use crate::engine::types::{BodyRef, SurfaceClass, Vec3};

/// One surface touched by a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub body: BodyRef,
    pub surface: SurfaceClass,
    pub point: Vec3,
    pub normal: Vec3,
    /// Distance along the sweep at first touch
    pub distance: f32,
}

/// Sphere cast against the world.
pub trait SweepQuery {
    /// Cast a sphere of `radius` from `origin` along unit `direction` for
    /// `max_distance`. Returns at most `max_hits` hits, nearest first.
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        max_hits: usize,
    ) -> Vec<SweepHit>;
}

/// Nothing to hit. Useful when the engine reports every contact discretely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSweep;

impl SweepQuery for NoSweep {
    fn sphere_cast(&self, _: Vec3, _: f32, _: Vec3, _: f32, _: usize) -> Vec<SweepHit> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min: min.inf(&max), max: min.sup(&max) }
    }

    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let h = half_extents.abs();
        Self { min: center - h, max: center + h }
    }

    pub fn expanded(&self, r: f32) -> Self {
        let e = Vec3::repeat(r.max(0.0));
        Self { min: self.min - e, max: self.max + e }
    }

    pub fn contains(&self, p: &Vec3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    pub fn closest_point(&self, p: &Vec3) -> Vec3 {
        p.sup(&self.min).inf(&self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepCollider {
    pub body: BodyRef,
    pub surface: SurfaceClass,
    pub bounds: Aabb,
}

#[derive(Debug, Clone, Default)]
pub struct AabbSweepWorld {
    colliders: Vec<SweepCollider>,
}

impl AabbSweepWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, body: BodyRef, surface: SurfaceClass, bounds: Aabb) -> &mut Self {
        self.colliders.push(SweepCollider { body, surface, bounds });
        self
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SweepQuery for AabbSweepWorld {
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        max_hits: usize,
    ) -> Vec<SweepHit> {
        if max_hits == 0 || !max_distance.is_finite() || max_distance < 0.0 {
            return Vec::new();
        }
        let travel = direction * max_distance;

        let mut hits: Vec<(usize, SweepHit)> = self
            .colliders
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                let (t, normal) = sweep_sphere_vs_aabb(&origin, &travel, radius, &c.bounds)?;
                let center = origin + travel * t;
                Some((
                    i,
                    SweepHit {
                        body: c.body,
                        surface: c.surface,
                        point: c.bounds.closest_point(&center),
                        normal,
                        distance: max_distance * t,
                    },
                ))
            })
            .collect();

        // nearest first, collider order breaks ties
        hits.sort_by(|(ia, a), (ib, b)| a.distance.total_cmp(&b.distance).then(ia.cmp(ib)));
        hits.truncate(max_hits);
        hits.into_iter().map(|(_, h)| h).collect()
    }
}

/// Sphere moving by `travel` against a box. Returns the entry fraction in
/// [0, 1] and the face normal; a sphere that starts overlapping reports 0
/// with an up normal.
pub fn sweep_sphere_vs_aabb(origin: &Vec3, travel: &Vec3, radius: f32, aabb: &Aabb) -> Option<(f32, Vec3)> {
    let grown = aabb.expanded(radius);
    if grown.contains(origin) {
        return Some((0.0, Vec3::y()));
    }
    if travel.norm_squared() < 1e-12 {
        return None;
    }
    segment_vs_aabb_slab(origin, travel, &grown)
}

fn segment_vs_aabb_slab(origin: &Vec3, travel: &Vec3, aabb: &Aabb) -> Option<(f32, Vec3)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::y();

    for axis in 0..3 {
        let o = origin[axis];
        let d = travel[axis];
        if d.abs() < 1e-9 {
            if o < aabb.min[axis] || o > aabb.max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t1 = (aabb.min[axis] - o) * inv;
        let mut t2 = (aabb.max[axis] - o) * inv;
        // entering through the min face means the face points toward -axis
        let mut sign = -1.0;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
            sign = 1.0;
        }
        if t1 > t_enter {
            t_enter = t1;
            normal = Vec3::zeros();
            normal[axis] = sign;
        }
        t_exit = t_exit.min(t2);
    }

    if t_enter <= t_exit && t_exit >= 0.0 && (0.0..=1.0).contains(&t_enter) {
        Some((t_enter, normal))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Corner;

    fn unit_box_at(x: f32) -> Aabb {
        Aabb::from_center(Vec3::new(x, 0.0, 0.0), Vec3::repeat(0.5))
    }

    #[test]
    fn test_sweep_hits_face_on_path() {
        let (t, n) = sweep_sphere_vs_aabb(
            &Vec3::new(-2.0, 0.0, 0.0),
            &Vec3::new(4.0, 0.0, 0.0),
            0.1,
            &unit_box_at(0.0),
        )
        .unwrap();
        // enters the grown face at x = -0.6
        assert!((t - 0.35).abs() < 1e-5);
        assert_eq!(n, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_sweep_misses_short_travel() {
        let hit = sweep_sphere_vs_aabb(
            &Vec3::new(-2.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            0.1,
            &unit_box_at(0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_sweep_misses_offset_path() {
        let hit = sweep_sphere_vs_aabb(
            &Vec3::new(-2.0, 2.0, 0.0),
            &Vec3::new(4.0, 0.0, 0.0),
            0.1,
            &unit_box_at(0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_starting_inside_reports_zero() {
        let (t, n) =
            sweep_sphere_vs_aabb(&Vec3::zeros(), &Vec3::zeros(), 0.05, &unit_box_at(0.0)).unwrap();
        assert_eq!(t, 0.0);
        assert_eq!(n, Vec3::y());
    }

    #[test]
    fn test_tunneling_segment_is_caught() {
        // thin target fully crossed within one step
        let thin = Aabb::from_center(Vec3::zeros(), Vec3::new(0.01, 0.3, 0.3));
        let hit = sweep_sphere_vs_aabb(
            &Vec3::new(-0.3, 0.0, 0.0),
            &Vec3::new(0.6, 0.0, 0.0),
            0.06,
            &thin,
        );
        assert!(hit.is_some());
    }

    #[test]
    fn test_world_orders_and_limits_hits() {
        let mut world = AabbSweepWorld::new();
        world
            .add(BodyRef::Fighter(Corner::Blue), SurfaceClass::Torso, unit_box_at(3.0))
            .add(BodyRef::Fighter(Corner::Blue), SurfaceClass::Head, unit_box_at(1.5))
            .add(BodyRef::Environment, SurfaceClass::Wall, unit_box_at(20.0));

        let hits = world.sphere_cast(Vec3::zeros(), 0.05, Vec3::x(), 5.0, 8);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].surface, SurfaceClass::Head);
        assert_eq!(hits[1].surface, SurfaceClass::Torso);
        assert!((hits[0].point.x - 1.0).abs() < 1e-4);

        let one = world.sphere_cast(Vec3::zeros(), 0.05, Vec3::x(), 5.0, 1);
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].surface, SurfaceClass::Head);
    }

    #[test]
    fn test_no_sweep_is_empty() {
        assert!(NoSweep.sphere_cast(Vec3::zeros(), 1.0, Vec3::x(), 10.0, 8).is_empty());
    }
}
