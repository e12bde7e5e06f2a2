//! Track-to-detection assignment strategies.
//!
//! Both return one slot per track holding the index of the detection it
//! claimed, if any.

use crate::shared::bounding_box::BoundingBox;

use super::iou_tracker::TrackerError;

/// Padding cost for the dummy rows/columns of the square LAPJV matrix.
const PAD_COST: f64 = 1.0;

/// Greedy IoU assignment in the order `tracks` is given.
///
/// Each track takes the best-scoring detection not yet claimed by an
/// earlier track, and keeps it only if the IoU exceeds `threshold`. The
/// result depends on track order; ties go to the lower detection index.
pub(super) fn greedy_assign(
    tracks: &[BoundingBox],
    detections: &[BoundingBox],
    threshold: f64,
) -> Vec<Option<usize>> {
    let mut claimed = vec![false; detections.len()];
    let mut result = Vec::with_capacity(tracks.len());

    for track in tracks {
        let mut best: Option<(usize, f64)> = None;
        for (di, det) in detections.iter().enumerate() {
            if claimed[di] {
                continue;
            }
            let score = track.iou(det);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((di, score));
            }
        }

        match best {
            Some((di, score)) if score > threshold => {
                claimed[di] = true;
                result.push(Some(di));
            }
            _ => result.push(None),
        }
    }
    result
}

/// Globally optimal assignment minimizing total `1 - IoU`, solved with
/// LAPJV on a square, padded cost matrix. Pairs at or below `threshold`
/// are discarded after solving.
pub(super) fn optimal_assign(
    tracks: &[BoundingBox],
    detections: &[BoundingBox],
    threshold: f64,
) -> Result<Vec<Option<usize>>, TrackerError> {
    use lapjv::{lapjv, Matrix};

    let n = tracks.len();
    let m = detections.len();
    if n == 0 || m == 0 {
        return Ok(vec![None; n]);
    }

    let k = n.max(m);
    let mut data = vec![PAD_COST; k * k];
    for (ti, track) in tracks.iter().enumerate() {
        for (di, det) in detections.iter().enumerate() {
            data[ti * k + di] = 1.0 - track.iou(det);
        }
    }

    let costs = Matrix::from_shape_vec((k, k), data)
        .map_err(|e| TrackerError::Assignment(e.to_string()))?;
    let (row_to_col, _) =
        lapjv(&costs).map_err(|e| TrackerError::Assignment(format!("{e:?}")))?;

    Ok(row_to_col
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(ti, di)| {
            if di < m && tracks[ti].iou(&detections[di]) > threshold {
                Some(di)
            } else {
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x1: i32, y1: i32, x2: i32, y2: i32) -> BoundingBox {
        BoundingBox::new(x1, y1, x2, y2)
    }

    #[test]
    fn test_greedy_empty_inputs() {
        assert!(greedy_assign(&[], &[bbox(0, 0, 10, 10)], 0.3).is_empty());
        assert_eq!(greedy_assign(&[bbox(0, 0, 10, 10)], &[], 0.3), vec![None]);
    }

    #[test]
    fn test_greedy_below_threshold_is_unmatched() {
        let tracks = [bbox(0, 0, 100, 100)];
        let dets = [bbox(80, 80, 180, 180)];
        assert_eq!(greedy_assign(&tracks, &dets, 0.3), vec![None]);
    }

    #[test]
    fn test_greedy_first_track_claims_shared_best() {
        // Both tracks prefer det 0; the first in order wins it, the second
        // falls back to det 1 if that clears the threshold.
        let tracks = [bbox(0, 0, 100, 100), bbox(10, 0, 110, 100)];
        let dets = [bbox(5, 0, 105, 100), bbox(20, 0, 120, 100)];
        assert_eq!(greedy_assign(&tracks, &dets, 0.3), vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_greedy_is_order_sensitive() {
        // Track A overlaps det 0 strongly and det 1 weakly; track B only
        // overlaps det 0. Scanning B first steals det 0 from A.
        let a = bbox(0, 0, 100, 100);
        let b = bbox(40, 0, 140, 100);
        let dets = [bbox(20, 0, 120, 100), bbox(-45, 0, 55, 100)];

        let forward = greedy_assign(&[a, b], &dets, 0.3);
        let reverse = greedy_assign(&[b, a], &dets, 0.3);
        assert_eq!(forward, vec![Some(0), None]);
        assert_eq!(reverse, vec![Some(0), Some(1)]);
    }

    #[test]
    fn test_greedy_tie_goes_to_lower_detection_index() {
        let tracks = [bbox(50, 0, 150, 100)];
        let dets = [bbox(0, 0, 100, 100), bbox(100, 0, 200, 100)];
        assert_eq!(greedy_assign(&tracks, &dets, 0.3), vec![Some(0)]);
    }

    #[test]
    fn test_optimal_resolves_conflict_greedy_loses() {
        let a = bbox(0, 0, 100, 100);
        let b = bbox(40, 0, 140, 100);
        let dets = [bbox(20, 0, 120, 100), bbox(-45, 0, 55, 100)];

        let result = optimal_assign(&[a, b], &dets, 0.3).unwrap();
        assert_eq!(result, vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_optimal_rectangular_more_detections() {
        let tracks = [bbox(0, 0, 50, 50)];
        let dets = [bbox(200, 200, 250, 250), bbox(2, 2, 52, 52)];
        assert_eq!(optimal_assign(&tracks, &dets, 0.3).unwrap(), vec![Some(1)]);
    }

    #[test]
    fn test_optimal_rectangular_more_tracks() {
        let tracks = [bbox(0, 0, 50, 50), bbox(200, 200, 250, 250)];
        let dets = [bbox(201, 201, 251, 251)];
        assert_eq!(
            optimal_assign(&tracks, &dets, 0.3).unwrap(),
            vec![None, Some(0)]
        );
    }

    #[test]
    fn test_optimal_empty_inputs() {
        assert_eq!(optimal_assign(&[bbox(0, 0, 5, 5)], &[], 0.3).unwrap(), vec![None]);
        assert!(optimal_assign(&[], &[bbox(0, 0, 5, 5)], 0.3).unwrap().is_empty());
    }
}
