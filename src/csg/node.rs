use crate::geometry::{Aabb, Primitive};
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};

/// Band around zero in which union operands count as meeting.
const SEAM_BAND: f64 = TOLERANCE * 10.0;

/// How far from a union seam the neighborhood is sampled.
const SEAM_REACH: f64 = 1e-5;

/// Largest distance outside the union a seam sample may report.
const SEAM_SLACK: f64 = TOLERANCE / 100.0;

/// A constructive solid geometry tree.
///
/// Membership is decided by a signed distance bound: exact for primitives,
/// `min` for union, `max` for intersection and `max(a, -b)` for difference.
/// The sign is always exact even where the magnitude is only a bound.
///
/// Where two union operands meet face to face, `min` alone reports zero on
/// the shared face. A union point whose whole neighborhood stays in the
/// union is a seam and reports [`SEAM_REACH`] inside instead.
#[derive(Debug, Clone)]
pub enum CsgNode {
    Primitive(Primitive),
    Union(Vec<CsgNode>),
    Intersection(Vec<CsgNode>),
    Difference(Box<CsgNode>, Box<CsgNode>),
    /// A rigid transform. `matrix` maps local to world, `inverse` world to local.
    Transformed {
        node: Box<CsgNode>,
        matrix: Matrix4,
        inverse: Matrix4,
    },
}

impl CsgNode {
    /// Signed distance bound at `point`, negative inside.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        match self {
            Self::Primitive(p) => p.signed_distance(point),
            Self::Union(children) => {
                let mut distance = f64::INFINITY;
                let mut touching = 0;
                for child in children {
                    let d = child.signed_distance(point);
                    if d.abs() <= SEAM_BAND {
                        touching += 1;
                    }
                    distance = distance.min(d);
                }
                if distance.abs() <= SEAM_BAND && touching > 1 && is_seam(children, point) {
                    -SEAM_REACH
                } else {
                    distance
                }
            }
            Self::Intersection(children) => children
                .iter()
                .map(|c| c.signed_distance(point))
                .fold(f64::NEG_INFINITY, f64::max),
            Self::Difference(a, b) => a.signed_distance(point).max(-b.signed_distance(point)),
            Self::Transformed { node, inverse, .. } => {
                node.signed_distance(&inverse.transform_point(point))
            }
        }
    }

    /// Returns `true` if `point` lies strictly inside.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        self.signed_distance(point) < 0.0
    }

    /// Conservative axis-aligned bounds.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        match self {
            Self::Primitive(p) => p.aabb(),
            Self::Union(children) => children
                .iter()
                .fold(Aabb::empty(), |acc, c| acc.union(&c.aabb())),
            Self::Intersection(children) => {
                let mut iter = children.iter();
                match iter.next() {
                    Some(first) => iter.fold(first.aabb(), |acc, c| acc.intersection(&c.aabb())),
                    None => Aabb::empty(),
                }
            }
            Self::Difference(a, _) => a.aabb(),
            Self::Transformed { node, matrix, .. } => node.aabb().transformed(matrix),
        }
    }

    /// Applies a rigid transform, folding into an existing transform node.
    #[must_use]
    pub fn transformed(self, matrix: Matrix4, inverse: Matrix4) -> Self {
        match self {
            Self::Transformed {
                node,
                matrix: inner,
                inverse: inner_inverse,
            } => Self::Transformed {
                node,
                matrix: matrix * inner,
                inverse: inner_inverse * inverse,
            },
            other => Self::Transformed {
                node: Box::new(other),
                matrix,
                inverse,
            },
        }
    }

    /// Union of nodes, flattening nested unions.
    #[must_use]
    pub fn union_of(nodes: Vec<CsgNode>) -> Self {
        let mut flat = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                Self::Union(children) => flat.extend(children),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            return flat.remove(0);
        }
        Self::Union(flat)
    }

    /// Number of primitives in the tree.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        match self {
            Self::Primitive(_) => 1,
            Self::Union(children) | Self::Intersection(children) => {
                children.iter().map(Self::primitive_count).sum()
            }
            Self::Difference(a, b) => a.primitive_count() + b.primitive_count(),
            Self::Transformed { node, .. } => node.primitive_count(),
        }
    }
}

/// Returns `true` if no point [`SEAM_REACH`] away from `point`, along the
/// axes and the cube diagonals, leaves the union of `children`.
fn is_seam(children: &[CsgNode], point: &Point3) -> bool {
    let diagonal = 1.0 / 3.0_f64.sqrt();
    let axes = [
        Vector3::x(),
        -Vector3::x(),
        Vector3::y(),
        -Vector3::y(),
        Vector3::z(),
        -Vector3::z(),
    ];
    let corners = [-1.0, 1.0].into_iter().flat_map(|x| {
        [-1.0, 1.0]
            .into_iter()
            .flat_map(move |y| [-1.0, 1.0].map(|z| Vector3::new(x, y, z) * diagonal))
    });
    axes.into_iter().chain(corners).all(|direction| {
        let sample = point + direction * SEAM_REACH;
        children
            .iter()
            .map(|c| c.signed_distance(&sample))
            .fold(f64::INFINITY, f64::min)
            <= SEAM_SLACK
    })
}
