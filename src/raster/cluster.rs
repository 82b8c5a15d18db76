//! Recoloring by external cluster assignment.

use super::LabelRaster;
use crate::SegmentId;
use crate::cluster::{self, ClusterMap};
use crate::color::Rgb;
use crate::error::{RasterError, Result};

impl LabelRaster {
    /// Store `clusters` and redraw every segment pixel with the color of its
    /// cluster (`color_table[cluster + 1]`). O(width * height).
    ///
    /// Every live segment must have a cluster entry, and every entry of the
    /// map (live segment or not) must name a cluster with a color; otherwise
    /// nothing changes and the error names the first offender. Labels and
    /// the reverse index are untouched. Highlighted segments keep their tint.
    pub fn recolor_by_cluster(&mut self, clusters: ClusterMap) -> Result<()> {
        if let Some(segment) = self
            .index
            .live_ids()
            .into_iter()
            .find(|&id| clusters.cluster_of(id).is_none())
        {
            return Err(RasterError::MissingClusterEntry { segment });
        }
        if let Some(&cluster) = clusters
            .as_slice()
            .iter()
            .find(|&&cluster| self.cluster_color(cluster).is_none())
        {
            return Err(RasterError::MissingClusterColor { cluster });
        }
        if clusters.len() > usize::try_from(self.max_id).unwrap_or(usize::MAX) {
            log::warn!(
                "LabelRaster: cluster map has {} entries but max segment id is {}",
                clusters.len(),
                self.max_id
            );
        }

        let start = web_time::Instant::now();
        let num_clusters = clusters.num_clusters();
        self.clusters = Some(clusters);
        self.render_all();
        log::info!(
            "LabelRaster: recolored into {} clusters in {:.1?}",
            num_clusters,
            start.elapsed()
        );
        Ok(())
    }

    fn cluster_color(&self, cluster: usize) -> Option<Rgb> {
        cluster
            .checked_add(1)
            .and_then(|slot| SegmentId::try_from(slot).ok())
            .and_then(|slot| self.colors.get(slot))
    }

    /// Forget the cluster assignment and go back to per-segment colors.
    pub fn clear_clusters(&mut self) {
        if self.clusters.take().is_some() {
            self.render_all();
            log::debug!("LabelRaster: cleared cluster colors");
        }
    }

    pub fn cluster_map(&self) -> Option<&ClusterMap> {
        self.clusters.as_ref()
    }

    /// Pixel area per cluster of the current assignment.
    pub fn cluster_areas(&self) -> Option<Vec<u64>> {
        let clusters = self.clusters.as_ref()?;
        Some(cluster::cluster_areas(clusters, &self.stats()))
    }
}
