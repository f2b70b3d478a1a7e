// Top financed models: application counts per model.
use std::collections::HashMap;

use shared::columns;
use shared::models::{ModelCount, Record};

use super::group_label;

/// Counts records per model name ("Unknown" for empty/absent), sorted
/// descending by count with model name ascending on ties, truncated to
/// `top_n`.
pub fn top_models(subset: &[Record], top_n: usize) -> Vec<ModelCount> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in subset {
        let model = group_label(record, columns::PURCHASED_MODEL_NAME);
        *counts.entry(model).or_default() += 1;
    }

    let mut series: Vec<ModelCount> = counts
        .into_iter()
        .map(|(model, count)| ModelCount { model, count })
        .collect();
    series.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.model.cmp(&b.model)));
    series.truncate(top_n);
    series
}
