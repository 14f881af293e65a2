//! Keeping dynamic bodies above the terrain

use crate::foundation::math::Vec3;
use crate::physics::collider::Collider;
use crate::terrain::Map;

/// Lift a body out of the terrain.
///
/// Every collider is checked against the terrain height under its own
/// center. When the bottom of a box is below the ground the vertical
/// velocity is cleared and the body is raised by the penetration depth.
/// Returns `true` if any collider touched the ground.
pub fn resolve_terrain(
    map: &Map,
    position: &mut Vec3,
    velocity: &mut Vec3,
    colliders: &[Collider],
) -> bool {
    let mut grounded = false;

    for collider in colliders {
        let center = collider.center(*position);
        let height = map.height_at(center.x, center.y);
        let lowest = collider.at(*position).bottom();

        if lowest < height {
            velocity.z = 0.0;
            position.z += height - lowest;
            grounded = true;
        }
    }

    grounded
}
