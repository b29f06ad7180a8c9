use super::series::{AlignedDataset, AlignedSeries};

/// Per-series visibility flags driven by legend clicks.
///
/// Purely presentational: toggling never touches the aligned data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendState {
    visible: Vec<bool>,
}

impl LegendState {
    /// All series start visible.
    pub fn for_dataset(dataset: &AlignedDataset) -> Self {
        Self {
            visible: vec![true; dataset.series.len()],
        }
    }

    /// Flip the visibility of the series at `index`.
    ///
    /// Returns the new visibility, or `None` if the index is out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let flag = self.visible.get_mut(index)?;
        *flag = !*flag;
        Some(*flag)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    /// Series currently shown, in legend order.
    pub fn visible_series<'a>(
        &'a self,
        dataset: &'a AlignedDataset,
    ) -> impl Iterator<Item = &'a AlignedSeries> + 'a {
        dataset
            .series
            .iter()
            .enumerate()
            .filter(move |(i, _)| self.is_visible(*i))
            .map(|(_, s)| s)
    }
}
