//! Tests for cluster recoloring and the highlight overlay.

use ndarray::Array2;

use super::{LabelRaster, alpha_at, assert_consistent, gray, raster_from, rgb_at};
use crate::cluster::ClusterMap;
use crate::constants::HIGHLIGHT_ALPHA;
use crate::error::RasterError;

const WHITE: [u8; 3] = [255, 255, 255];

/// 2x2 raster: `[[1, 2], [0, 3]]`.
fn three_segments() -> LabelRaster {
    raster_from(&[vec![1, 2], vec![0, 3]])
}

fn rgb(level: u8) -> [u8; 3] {
    gray(level).into()
}

#[test]
fn test_recolor_uses_cluster_slot_colors() {
    let mut raster = three_segments();

    raster
        .recolor_by_cluster(ClusterMap::new(vec![0, 0, 1]))
        .unwrap();

    assert_eq!(rgb_at(&raster, 0, 0), rgb(1));
    assert_eq!(rgb_at(&raster, 1, 0), rgb(1));
    assert_eq!(rgb_at(&raster, 1, 1), rgb(2));
    assert_eq!(alpha_at(&raster, 0, 1), 0);
    assert_eq!(raster.display_color(3), Some(gray(2)));
    assert_eq!(raster.color_of(3), Some(gray(3)));
    assert_eq!(raster.to_palette(), vec![vec![1, 2], vec![0, 3]]);
    assert_consistent(&raster);
}

#[test]
fn test_recolor_missing_entry_changes_nothing() {
    let mut raster = three_segments();
    let before = raster.pixels().clone();

    let result = raster.recolor_by_cluster(ClusterMap::new(vec![0]));

    assert!(matches!(
        result,
        Err(RasterError::MissingClusterEntry { segment: 2 })
    ));
    assert_eq!(raster.pixels(), &before);
    assert!(raster.cluster_map().is_none());
}

#[test]
fn test_recolor_missing_color_changes_nothing() {
    let mut raster = three_segments();
    let before = raster.pixels().clone();

    let result = raster.recolor_by_cluster(ClusterMap::new(vec![0, 0, 5]));

    assert!(matches!(
        result,
        Err(RasterError::MissingClusterColor { cluster: 5 })
    ));
    assert_eq!(raster.pixels(), &before);
}

#[test]
fn test_recolor_rejects_bad_cluster_on_erased_segment() {
    let mut raster = raster_from(&[vec![1, 2]]);
    raster.erase(1, 0);
    let before = raster.pixels().clone();

    for cluster in [usize::MAX, 1 << 40] {
        let result = raster.recolor_by_cluster(ClusterMap::new(vec![0, cluster]));

        assert!(matches!(
            result,
            Err(RasterError::MissingClusterColor { cluster: c }) if c == cluster
        ));
        assert!(raster.cluster_map().is_none());
        assert_eq!(raster.cluster_areas(), None);
        assert_eq!(raster.pixels(), &before);
    }
}

#[test]
fn test_recolor_skips_erased_segments() {
    let mut raster = three_segments();
    raster.erase(1, 1);

    raster.recolor_by_cluster(ClusterMap::new(vec![1, 1])).unwrap();

    assert_eq!(rgb_at(&raster, 0, 0), rgb(2));
    assert_eq!(rgb_at(&raster, 1, 0), rgb(2));
    assert_consistent(&raster);
}

#[test]
fn test_recolor_is_deterministic() {
    let clusters = ClusterMap::new(vec![1, 0, 1]);
    let mut first = three_segments();
    let mut second = three_segments();

    first.recolor_by_cluster(clusters.clone()).unwrap();
    second.recolor_by_cluster(clusters).unwrap();

    assert_eq!(first.pixels(), second.pixels());
}

#[test]
fn test_recolor_twice_gives_same_pixels() {
    let mut raster = three_segments();
    let clusters = ClusterMap::new(vec![2, 0, 2]);

    raster.recolor_by_cluster(clusters.clone()).unwrap();
    let first = raster.pixels().clone();

    raster.highlight(&[1, 3]);
    raster.recolor_by_cluster(clusters.clone()).unwrap();
    raster.dehighlight(&[1, 3]);
    assert_eq!(raster.pixels(), &first);

    raster.recolor_by_cluster(clusters).unwrap();
    assert_eq!(raster.pixels(), &first);
}

#[test]
fn test_new_segments_use_own_color_after_recolor() {
    let mut raster = raster_from(&[vec![1, 0], vec![0, 2]]);
    raster.recolor_by_cluster(ClusterMap::new(vec![1, 1])).unwrap();

    let mut mask = Array2::<u8>::zeros((2, 2));
    mask[[0, 1]] = 1;
    let id = raster.paint(mask.view(), false).unwrap();

    assert_eq!(id, 3);
    assert_eq!(rgb_at(&raster, 1, 0), rgb(3));
    assert_eq!(rgb_at(&raster, 0, 0), rgb(2));
}

#[test]
fn test_clear_clusters_restores_own_colors() {
    let mut raster = three_segments();
    raster.recolor_by_cluster(ClusterMap::new(vec![2, 2, 2])).unwrap();
    assert_eq!(rgb_at(&raster, 0, 0), rgb(3));

    raster.clear_clusters();

    assert!(raster.cluster_map().is_none());
    assert_eq!(rgb_at(&raster, 0, 0), rgb(1));
    assert_eq!(rgb_at(&raster, 1, 0), rgb(2));
    assert_eq!(rgb_at(&raster, 1, 1), rgb(3));
}

#[test]
fn test_cluster_areas() {
    let mut raster = three_segments();
    assert_eq!(raster.cluster_areas(), None);

    raster.recolor_by_cluster(ClusterMap::new(vec![0, 0, 1])).unwrap();

    assert_eq!(raster.cluster_areas(), Some(vec![2, 1]));
}

#[test]
fn test_highlight_and_dehighlight_restore_cluster_color() {
    let mut raster = three_segments();
    raster.recolor_by_cluster(ClusterMap::new(vec![0, 0, 1])).unwrap();

    assert_eq!(raster.highlight(&[3]), 1);
    assert_eq!(rgb_at(&raster, 1, 1), WHITE);
    assert_eq!(alpha_at(&raster, 1, 1), HIGHLIGHT_ALPHA);
    assert_eq!(raster.highlighted(), vec![3]);

    assert_eq!(raster.dehighlight(&[3]), 1);
    assert_eq!(rgb_at(&raster, 1, 1), rgb(2));
    assert_eq!(alpha_at(&raster, 1, 1), raster.translucent_alpha());
    assert!(raster.highlighted().is_empty());
}

#[test]
fn test_recolor_keeps_highlight() {
    let mut raster = three_segments();
    raster.highlight(&[1]);

    raster.recolor_by_cluster(ClusterMap::new(vec![1, 1, 1])).unwrap();

    assert_eq!(rgb_at(&raster, 0, 0), WHITE);
    assert_eq!(rgb_at(&raster, 1, 0), rgb(2));

    raster.dehighlight(&[1]);
    assert_eq!(rgb_at(&raster, 0, 0), rgb(2));
}

#[test]
fn test_highlight_skips_background_and_missing_ids() {
    let mut raster = three_segments();
    let before = raster.pixels().clone();

    assert_eq!(raster.highlight(&[0, 7]), 0);
    assert_eq!(raster.dehighlight(&[2]), 0);

    assert!(raster.highlighted().is_empty());
    assert_eq!(raster.pixels(), &before);
}

#[test]
fn test_set_unique_replaces_highlight() {
    let mut raster = three_segments();
    raster.highlight(&[1, 3]);

    assert_eq!(raster.set_unique(&[2]), 1);

    assert_eq!(raster.highlighted(), vec![2]);
    assert_eq!(rgb_at(&raster, 0, 0), rgb(1));
    assert_eq!(rgb_at(&raster, 1, 1), rgb(3));
    assert_eq!(rgb_at(&raster, 1, 0), WHITE);
}

#[test]
fn test_full_render_drops_highlight_keeps_clusters() {
    let mut raster = three_segments();
    raster.recolor_by_cluster(ClusterMap::new(vec![0, 0, 0])).unwrap();
    raster.highlight(&[2]);

    raster.full_render();

    assert!(raster.highlighted().is_empty());
    assert_eq!(rgb_at(&raster, 1, 0), rgb(1));
    assert_eq!(rgb_at(&raster, 1, 1), rgb(1));
    assert_consistent(&raster);
}
