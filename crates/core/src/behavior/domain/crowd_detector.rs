use std::collections::BTreeSet;

use crate::shared::bounding_box::Point;

/// Ids of everyone standing closer than `distance_threshold` to at least
/// one other person.
///
/// Compares every pair, O(n²); fine for the tens of people a single
/// camera sees. A person near several others is counted once.
pub fn crowd_members(centers: &[(u32, Point)], distance_threshold: f64) -> BTreeSet<u32> {
    let mut members = BTreeSet::new();
    for (i, (id_a, a)) in centers.iter().enumerate() {
        for (id_b, b) in &centers[i + 1..] {
            if a.distance_to(b) < distance_threshold {
                members.insert(*id_a);
                members.insert(*id_b);
            }
        }
    }
    members
}
