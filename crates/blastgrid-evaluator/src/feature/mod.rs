//! Fixed-size feature vectors around the observing player.
//!
//! This is the boundary between the threat analysis and whatever policy
//! consumes it (a trained classifier or a hand-written bot). A
//! [`FeatureExtractor`] evaluates an ordered list of [`FeatureSource`]s on the
//! observer's cell and packs the results into a [`FeatureVector`] whose length
//! is fixed at compile time.
//!
//! The source count is checked once, in [`FeatureExtractor::extract`]; a
//! mismatch is reported as [`AnalysisError::FeatureCountMismatch`].
//!
//! # Default features
//!
//! [`source::all_feature_sources`] yields [`DEFAULT_FEATURE_COUNT`] values:
//!
//! - tile codes of the four neighbours at distance 1, then at distance 2
//!   (up, left, right, down)
//! - standing on a bomb
//! - in the blast path of any bomb
//! - safety of the four neighbours
//! - scoring potential of the observer's cell

use arrayvec::ArrayVec;
use blastgrid_engine::{GameSnapshot, PlayerId};
use serde::{Serialize, Serializer};

use crate::{AnalysisError, cell_analysis::CellAnalysis, tile_query::TileQuery};

pub use self::source::{BoxedFeatureSource, FeatureSource, all_feature_sources};

pub mod source;

pub const DEFAULT_FEATURE_COUNT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector<const N: usize> {
    values: [f32; N],
}

impl<const N: usize> FeatureVector<N> {
    #[must_use]
    pub fn as_array(&self) -> &[f32; N] {
        &self.values
    }

    #[must_use]
    pub fn into_array(self) -> [f32; N] {
        self.values
    }
}

impl<const N: usize> Serialize for FeatureVector<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.values)
    }
}

#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    sources: Vec<BoxedFeatureSource>,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(all_feature_sources())
    }
}

impl FeatureExtractor {
    #[must_use]
    pub fn new(sources: Vec<BoxedFeatureSource>) -> Self {
        Self { sources }
    }

    /// Feature ids, in vector order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.id())
    }

    /// Extracts the features of `observer`'s cell.
    pub fn extract<const N: usize>(
        &self,
        snapshot: &GameSnapshot,
        observer: &PlayerId,
    ) -> Result<FeatureVector<N>, AnalysisError> {
        if self.sources.len() != N {
            return Err(AnalysisError::FeatureCountMismatch {
                expected: N,
                actual: self.sources.len(),
            });
        }
        let query = TileQuery::new(snapshot, observer)?;
        let analysis = CellAnalysis::at_observer(query);

        let values: ArrayVec<f32, N> = self.sources.iter().map(|s| s.extract(&analysis)).collect();
        let values = values
            .into_inner()
            .map_err(|partial| AnalysisError::FeatureCountMismatch {
                expected: N,
                actual: partial.len(),
            })?;

        tracing::debug!(
            observer = %observer,
            position = %analysis.position(),
            tick = snapshot.tick(),
            ?values,
            "extracted features"
        );
        Ok(FeatureVector { values })
    }
}
