// Holds the two live datasets. Each is replaced wholesale after a full
// parse; there is no incremental merge and no partially-populated state.
use shared::models::{Dataset, SourceKind};

pub struct DatasetStore {
    sales: Option<Dataset>,
    funnel: Option<Dataset>,
    generation: u64,
}

impl DatasetStore {
    pub fn new() -> Self {
        DatasetStore {
            sales: None,
            funnel: None,
            generation: 0,
        }
    }

    /// Replaces the dataset of the incoming kind and returns the new store
    /// generation. A caller holding results derived from an older generation
    /// can compare and discard them as stale.
    pub fn replace(&mut self, dataset: Dataset) -> u64 {
        self.generation += 1;
        match dataset.kind {
            SourceKind::Sales => self.sales = Some(dataset),
            SourceKind::Funnel => self.funnel = Some(dataset),
        }
        self.generation
    }

    pub fn get(&self, kind: SourceKind) -> Option<&Dataset> {
        match kind {
            SourceKind::Sales => self.sales.as_ref(),
            SourceKind::Funnel => self.funnel.as_ref(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}
