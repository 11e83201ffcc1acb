use crate::csg::{SolidId, SolidStore};
use crate::error::Result;
use crate::math::{Point3, TOLERANCE};

/// Classification of a point relative to a solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Classifies a point as inside, outside, or on the boundary of a solid.
///
/// Evaluates the solid's signed distance bound; values within a small band
/// around zero count as boundary.
///
/// # Errors
///
/// Returns an error if the solid is not in the store.
pub fn classify_point_in_solid(
    point: &Point3,
    solid_id: SolidId,
    store: &SolidStore,
) -> Result<PointClassification> {
    let solid = store.solid(solid_id)?;
    let d = solid.node.signed_distance(point);
    let boundary_tol = TOLERANCE * 10.0;

    Ok(if d.abs() <= boundary_tol {
        PointClassification::OnBoundary
    } else if d < 0.0 {
        PointClassification::Inside
    } else {
        PointClassification::Outside
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::operations::creation::MakeBox;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn make_box(store: &mut SolidStore) -> SolidId {
        MakeBox::new(p(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn center_is_inside() {
        let mut store = SolidStore::new();
        let solid = make_box(&mut store);
        let result = classify_point_in_solid(&p(1.0, 1.0, 1.0), solid, &store).unwrap();
        assert_eq!(result, PointClassification::Inside);
    }

    #[test]
    fn far_point_is_outside() {
        let mut store = SolidStore::new();
        let solid = make_box(&mut store);
        let result = classify_point_in_solid(&p(5.0, 1.0, 1.0), solid, &store).unwrap();
        assert_eq!(result, PointClassification::Outside);
    }

    #[test]
    fn face_point_is_boundary() {
        let mut store = SolidStore::new();
        let solid = make_box(&mut store);
        let result = classify_point_in_solid(&p(2.0, 1.0, 1.0), solid, &store).unwrap();
        assert_eq!(result, PointClassification::OnBoundary);
    }
}
