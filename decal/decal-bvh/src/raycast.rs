//! Nearest-hit ray casting against a [`SpatialIndex`].
//!
//! Traversal descends only into boxes the ray enters (slab test), visits the
//! nearer child first, and prunes subtrees that start beyond the best hit so
//! far. Leaf triangles use the Möller–Trumbore test.

// Standard notation for Möller–Trumbore.
#![allow(clippy::many_single_char_names)]

use decal_types::{Point3, Ray, Triangle, Vector3};
use smallvec::SmallVec;

use crate::bvh::{BvhNode, SpatialIndex};

/// Relative tolerance under which two hit distances count as equal.
pub const TIE_TOLERANCE: f64 = 1e-6;

/// A ray-triangle intersection in ray parameter and barycentric form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter of the hit (`origin + t * direction`).
    pub t: f64,
    /// Barycentric weight of `v1`.
    pub u: f64,
    /// Barycentric weight of `v2`.
    pub v: f64,
}

/// Ray-triangle intersection using the Möller–Trumbore algorithm.
///
/// Accepts hits with `t >= 0` (in units of `direction`). Returns `None` for
/// rays parallel to the triangle plane and for hits outside the triangle or
/// behind the origin. `epsilon` is relative: the ray counts as parallel when
/// `|e1 . (d x e2)| <= epsilon * |e1| * |e2| * |d|`.
///
/// # Example
///
/// ```
/// use decal_bvh::ray_triangle_intersect;
/// use decal_types::{Point3, Triangle, Vector3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let hit = ray_triangle_intersect(
///     &Point3::new(0.25, 0.25, 2.0),
///     &-Vector3::z(),
///     &tri,
///     1e-12,
/// )
/// .unwrap();
/// assert!((hit.t - 2.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn ray_triangle_intersect(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    tri: &Triangle,
    epsilon: f64,
) -> Option<TriangleHit> {
    let edge1 = tri.v1 - tri.v0;
    let edge2 = tri.v2 - tri.v0;

    let h = direction.cross(&edge2);
    let a = edge1.dot(&h);

    // Ray is parallel to triangle
    let scale = edge1.norm_squared() * edge2.norm_squared() * direction.norm_squared();
    if a.abs() <= epsilon * scale.sqrt() {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - tri.v0;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    (t >= 0.0).then_some(TriangleHit { t, u, v })
}

/// The closest face struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Id of the struck face in the mesh snapshot.
    pub face: u32,
    /// Distance from the ray origin along the normalized direction.
    pub distance: f64,
    /// World-space hit point.
    pub point: Point3<f64>,
    /// Unit geometric normal of the struck triangle.
    pub normal: Vector3<f64>,
    /// Barycentric weights `[w, u, v]` of the hit point within the struck
    /// fan triangle.
    pub barycentric: [f64; 3],
}

/// Outcome of [`SpatialIndex::cast`].
///
/// A miss is an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CastResult {
    /// The ray struck a face within range.
    Hit(RayHit),
    /// Nothing was struck within range.
    Miss,
}

impl CastResult {
    /// Whether this is a hit.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// The hit, if any.
    #[must_use]
    pub const fn hit(&self) -> Option<&RayHit> {
        match self {
            Self::Hit(hit) => Some(hit),
            Self::Miss => None,
        }
    }

    /// The struck face id, if any.
    #[must_use]
    pub fn face(&self) -> Option<u32> {
        self.hit().map(|h| h.face)
    }
}

/// A triangle hit recorded during traversal.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    t: f64,
    u: f64,
    v: f64,
    face: u32,
    slot: u32,
}

/// Whether `t` is within [`TIE_TOLERANCE`] (relative) of the nearest
/// distance.
fn ties_with(t: f64, nearest: f64) -> bool {
    t - nearest <= TIE_TOLERANCE * nearest.abs()
}

/// The nearest distance seen so far and every hit tied with it.
///
/// The winner is picked only after traversal, so the result does not depend
/// on the order triangles are visited.
#[derive(Debug)]
struct Nearest {
    t: f64,
    tied: SmallVec<[Candidate; 4]>,
}

impl Nearest {
    fn new() -> Self {
        Self {
            t: f64::INFINITY,
            tied: SmallVec::new(),
        }
    }

    fn offer(&mut self, hit: Candidate) {
        if hit.t < self.t {
            let nearest = hit.t;
            self.t = nearest;
            self.tied.retain(|c| ties_with(c.t, nearest));
            self.tied.push(hit);
        } else if ties_with(hit.t, self.t) {
            self.tied.push(hit);
        }
    }

    /// Upper bound on entry distance for a subtree to still matter: a little
    /// beyond the nearest hit so tied faces are still visited.
    fn prune_limit(&self, max_distance: f64) -> f64 {
        if self.tied.is_empty() {
            max_distance
        } else {
            (self.t + TIE_TOLERANCE * self.t.abs()).min(max_distance)
        }
    }

    /// Lowest face id among the tied hits.
    fn winner(&self) -> Option<Candidate> {
        self.tied.iter().copied().min_by_key(|c| (c.face, c.slot))
    }
}

impl SpatialIndex {
    /// Cast a ray and return the closest face hit within `[0, max_distance]`.
    ///
    /// Distances are measured along the normalized ray direction. If two
    /// faces are hit at the same distance (within [`TIE_TOLERANCE`],
    /// relative) the lower face id wins. Rays with a zero or non-finite
    /// direction always miss.
    ///
    /// # Example
    ///
    /// ```
    /// use decal_bvh::{CastResult, IndexParams, SpatialIndex};
    /// use decal_types::{unit_cube, Point3, Ray, Vector3};
    ///
    /// let index = SpatialIndex::build(&unit_cube(), &IndexParams::default()).unwrap();
    ///
    /// // Straight down onto the top of the cube
    /// let ray = Ray::new(Point3::new(0.7, 0.4, 5.0), -Vector3::z());
    /// let hit = index.cast(&ray, 100.0);
    /// assert!(matches!(hit.face(), Some(2 | 3)));
    ///
    /// // Pointing away from the cube
    /// let ray = Ray::new(Point3::new(0.5, 0.5, 5.0), Vector3::z());
    /// assert_eq!(index.cast(&ray, 100.0), CastResult::Miss);
    /// ```
    #[must_use]
    pub fn cast(&self, ray: &Ray, max_distance: f64) -> CastResult {
        if !ray.is_valid() || max_distance.is_nan() || max_distance < 0.0 {
            return CastResult::Miss;
        }

        let ray = ray.normalized();
        let dir_inv = ray.inverse_direction();

        let mut nearest = Nearest::new();
        if let Some((t_near, _)) = self.root.bbox().ray_interval(&ray.origin, &dir_inv) {
            if t_near <= max_distance {
                self.trace(&self.root, &ray, &dir_inv, max_distance, &mut nearest);
            }
        }

        let Some(best) = nearest.winner() else {
            return CastResult::Miss;
        };

        let triangle = &self.triangles[best.slot as usize].triangle;
        CastResult::Hit(RayHit {
            face: best.face,
            distance: best.t,
            point: ray.point_at(best.t),
            normal: triangle.normal().unwrap_or_else(Vector3::zeros),
            barycentric: [1.0 - best.u - best.v, best.u, best.v],
        })
    }

    fn trace(
        &self,
        node: &BvhNode,
        ray: &Ray,
        dir_inv: &Vector3<f64>,
        max_distance: f64,
        nearest: &mut Nearest,
    ) {
        match node {
            BvhNode::Leaf { triangles, .. } => {
                for &slot in triangles {
                    let entry = &self.triangles[slot as usize];
                    let Some(hit) = ray_triangle_intersect(
                        &ray.origin,
                        &ray.direction,
                        &entry.triangle,
                        self.epsilon,
                    ) else {
                        continue;
                    };
                    if hit.t > max_distance {
                        continue;
                    }
                    nearest.offer(Candidate {
                        t: hit.t,
                        u: hit.u,
                        v: hit.v,
                        face: entry.face,
                        slot,
                    });
                }
            }
            BvhNode::Internal { left, right, .. } => {
                let enter_left = left.bbox().ray_interval(&ray.origin, dir_inv);
                let enter_right = right.bbox().ray_interval(&ray.origin, dir_inv);

                let mut order = [(enter_left, left), (enter_right, right)];
                if let (Some((tl, _)), Some((tr, _))) = (enter_left, enter_right) {
                    if tr < tl {
                        order.swap(0, 1);
                    }
                }

                for (interval, child) in order {
                    let Some((t_near, _)) = interval else {
                        continue;
                    };
                    if t_near > nearest.prune_limit(max_distance) {
                        continue;
                    }
                    self.trace(child, ray, dir_inv, max_distance, nearest);
                }
            }
        }
    }
}
