// Purchase funnel: per-stage totals with stage-over-stage conversion.
use shared::columns::FUNNEL_STAGES;
use shared::models::{FunnelStage, Record};

/// Sums each record's stage columns into the seven fixed stages, then
/// computes each stage's conversion rate as a percentage of the previous
/// stage's total, rounded to one decimal. The rate stays unset for the
/// first stage and whenever the previous total is zero — never NaN or
/// infinity.
pub fn stage_totals(subset: &[Record]) -> Vec<FunnelStage> {
    let mut stages: Vec<FunnelStage> = FUNNEL_STAGES
        .iter()
        .map(|spec| FunnelStage {
            name: spec.name.to_string(),
            total: 0.0,
            conversion_rate: None,
        })
        .collect();

    for record in subset {
        for (stage, spec) in stages.iter_mut().zip(FUNNEL_STAGES.iter()) {
            stage.total += record.number_or_zero(spec.column);
        }
    }

    for index in 1..stages.len() {
        let previous = stages[index - 1].total;
        if previous > 0.0 {
            let rate = stages[index].total / previous * 100.0;
            stages[index].conversion_rate = Some((rate * 10.0).round() / 10.0);
        }
    }
    stages
}
