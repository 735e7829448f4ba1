//! Virtualized rendering window
//!
//! Only items near the offset are materialized. With the default radius of
//! two at most five items are live regardless of catalog size.

use serde::Serialize;
use smallvec::SmallVec;

/// Visible indices; inline for the usual radius
pub type WindowIndices = SmallVec<[usize; 8]>;

/// Opacity of every item that is not exactly on the offset
const DIMMED_OPACITY: f32 = 0.2;
const SCALE_PER_ITEM: f32 = 0.15;
const BLUR_PER_ITEM: f32 = 1.5;
const MAX_BLUR: f32 = 4.0;

/// Indices `i` in `0..n` with `|i - offset| <= radius`, ascending
pub fn visible_window(offset: f32, n: usize, radius: f32) -> WindowIndices {
    let mut indices = WindowIndices::new();
    if n == 0 || !offset.is_finite() || !radius.is_finite() || radius < 0.0 {
        return indices;
    }

    let last = (n - 1) as f32;
    let lo = (offset - radius).ceil().max(0.0);
    let hi = (offset + radius).floor().min(last);
    if lo > hi {
        return indices;
    }
    indices.extend(lo as usize..=hi as usize);
    indices
}

/// Placement of one rendered item relative to the viewport
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTransform {
    pub index: usize,
    /// `index - offset`
    pub relative: f32,
    /// Vertical translation in pixels
    pub translate_y: f32,
    pub opacity: f32,
    pub scale: f32,
    /// Blur radius in pixels, 0 for the nearest items
    pub blur: f32,
    /// The item at the settled index
    pub is_active: bool,
}

impl ItemTransform {
    pub fn new(index: usize, offset: f32, current_index: usize, viewport_height: f32) -> Self {
        let relative = index as f32 - offset;
        let distance = relative.abs();
        Self {
            index,
            relative,
            translate_y: relative * viewport_height,
            opacity: if distance == 0.0 { 1.0 } else { DIMMED_OPACITY },
            scale: 1.0 - distance * SCALE_PER_ITEM,
            blur: if distance > 1.0 {
                (distance * BLUR_PER_ITEM).min(MAX_BLUR)
            } else {
                0.0
            },
            is_active: index == current_index,
        }
    }
}

/// Transforms for every item in the visible window, plus `preload` if it is
/// outside the window
pub fn item_transforms(
    offset: f32,
    current_index: usize,
    n: usize,
    radius: f32,
    viewport_height: f32,
    preload: Option<usize>,
) -> SmallVec<[ItemTransform; 8]> {
    let mut indices = visible_window(offset, n, radius);
    if let Some(extra) = preload.filter(|&i| i < n && !indices.contains(&i)) {
        indices.push(extra);
    }
    indices
        .into_iter()
        .map(|i| ItemTransform::new(i, offset, current_index, viewport_height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(offset: f32, n: usize, radius: f32) -> Vec<usize> {
        visible_window(offset, n, radius).into_vec()
    }

    #[test]
    fn test_window_bounds() {
        assert_eq!(window(0.0, 10, 2.0), vec![0, 1, 2]);
        assert_eq!(window(5.0, 10, 2.0), vec![3, 4, 5, 6, 7]);
        assert_eq!(window(5.5, 10, 2.0), vec![4, 5, 6, 7]);
        assert_eq!(window(9.0, 10, 2.0), vec![7, 8, 9]);
        assert_eq!(window(0.0, 1, 2.0), vec![0]);
    }

    #[test]
    fn test_window_size_is_bounded() {
        for n in [1, 5, 100, 10_000] {
            for step in 0..40 {
                let offset = step as f32 * 0.37;
                assert!(visible_window(offset, n, 2.0).len() <= 5);
            }
        }
    }

    #[test]
    fn test_window_degenerate_input() {
        assert!(window(0.0, 0, 2.0).is_empty());
        assert!(window(f32::NAN, 5, 2.0).is_empty());
        assert!(window(1.0, 5, -1.0).is_empty());
        // Elastic overshoot still shows the edge item
        assert_eq!(window(-0.3, 5, 2.0), vec![0, 1]);
        assert_eq!(window(4.3, 5, 2.0), vec![3, 4]);
    }

    #[test]
    fn test_transform_values() {
        let active = ItemTransform::new(2, 2.0, 2, 800.0);
        assert_eq!(active.opacity, 1.0);
        assert_eq!(active.scale, 1.0);
        assert_eq!(active.blur, 0.0);
        assert_eq!(active.translate_y, 0.0);
        assert!(active.is_active);

        let next = ItemTransform::new(3, 2.0, 2, 800.0);
        assert_eq!(next.translate_y, 800.0);
        assert_eq!(next.opacity, 0.2);
        assert!((next.scale - 0.85).abs() < 1e-6);
        assert_eq!(next.blur, 0.0);

        let far = ItemTransform::new(0, 2.0, 2, 800.0);
        assert_eq!(far.translate_y, -1600.0);
        assert_eq!(far.blur, 3.0);
        assert!(!far.is_active);
    }

    #[test]
    fn test_preload_is_appended() {
        let items = item_transforms(0.0, 0, 20, 2.0, 800.0, Some(12));
        let indices: Vec<usize> = items.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 12]);

        let items = item_transforms(0.0, 0, 20, 2.0, 800.0, Some(1));
        assert_eq!(items.len(), 3);
    }
}
