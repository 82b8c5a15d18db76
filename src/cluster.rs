//! Cluster assignments supplied by the external clustering pass.
//!
//! A [`ClusterMap`] holds one 0-based cluster index per segment id, indexed
//! by `id - 1`. The clustering service replies with JSON of the form
//! `{"labels": [..], "areas": [..]}`; only `labels` is needed here since
//! areas can be recomputed from the raster with [`cluster_areas`].

use serde::{Deserialize, Serialize};

use crate::SegmentId;
use crate::error::Result;
use crate::stats::SegmentStats;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusterMap {
    labels: Vec<usize>,
}

impl ClusterMap {
    /// `labels[i]` is the cluster of segment `i + 1`.
    pub fn new(labels: Vec<usize>) -> Self {
        Self { labels }
    }

    /// Parse a clustering reply; extra fields such as `areas` are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Cluster of `id`, None for background or ids past the assignment.
    pub fn cluster_of(&self, id: SegmentId) -> Option<usize> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.labels.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of distinct cluster slots (largest index + 1), saturating.
    pub fn num_clusters(&self) -> usize {
        self.labels
            .iter()
            .max()
            .map_or(0, |&max| max.saturating_add(1))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.labels
    }
}

impl From<Vec<usize>> for ClusterMap {
    fn from(labels: Vec<usize>) -> Self {
        Self::new(labels)
    }
}

/// Total pixel area per cluster, summed over the segments assigned to it.
///
/// Only clusters of the segments in `stats` get a slot, so stray indices
/// on segments absent from `stats` cannot blow up the result.
pub fn cluster_areas(map: &ClusterMap, stats: &[SegmentStats]) -> Vec<u64> {
    let slots = stats
        .iter()
        .filter_map(|segment| map.cluster_of(segment.id))
        .max()
        .map_or(0, |max| max.saturating_add(1));
    let mut areas = vec![0u64; slots];
    for segment in stats {
        if let Some(slot) = map
            .cluster_of(segment.id)
            .and_then(|cluster| areas.get_mut(cluster))
        {
            *slot += segment.area;
        }
    }
    areas
}
