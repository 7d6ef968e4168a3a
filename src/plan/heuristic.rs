//! Static-mutant slowness heuristic (§4.6): warn when rerunning the whole
//! suite for static mutants dominates the plan's total time disproportionately
//! to their count.

use super::coverage::CoverageClass;
use super::model::PlanRecord;
use super::options::PlanOptions;

/// Emit a warning when static mutants are disproportionately expensive
/// relative to the rest of the plan, per the formula in §4.6:
/// `2 * avg(static) > avg(rest)` and static mutants account for more than
/// 40% of total net time. The message names the static count, its share of
/// the total mutant count, and its share of the total net time, plus the
/// hint to disable `warnings.slow`.
pub fn maybe_warn_static_mutants(plans: &[PlanRecord], options: &PlanOptions, classes: &[(String, CoverageClass)]) {
    if !options.warnings_slow {
        return;
    }

    let mut static_time = 0u64;
    let mut static_count = 0u64;
    let mut rest_time = 0u64;
    let mut rest_count = 0u64;

    for (mutant_id, class) in classes {
        let Some(net_time_ms) = net_time_for(plans, mutant_id) else {
            continue;
        };
        if matches!(class, CoverageClass::Static) {
            static_time += net_time_ms;
            static_count += 1;
        } else {
            rest_time += net_time_ms;
            rest_count += 1;
        }
    }

    if static_count == 0 || rest_count == 0 {
        return;
    }

    let static_avg = static_time as f64 / static_count as f64;
    let rest_avg = rest_time as f64 / rest_count as f64;
    let total_time = (static_time + rest_time) as f64;
    if total_time <= 0.0 {
        return;
    }
    let static_share = static_time as f64 / total_time;

    if 2.0 * static_avg > rest_avg && static_share > 0.4 {
        let total_mutants = plans.len() as f64;
        let mutant_share_pct = if total_mutants > 0.0 { static_count as f64 / total_mutants * 100.0 } else { 0.0 };
        let time_share_pct = static_share * 100.0;
        tracing::warn!(
            static_count,
            total_mutants = plans.len(),
            mutant_share_pct,
            time_share_pct,
            "Detected {static_count} static mutants ({mutant_share_pct:.0}% of total) that are estimated \
             to take {time_share_pct:.0}% of the time running the tests! \
             (disable \"warnings.slow\" to ignore this warning)"
        );
    }
}

fn net_time_for(plans: &[PlanRecord], mutant_id: &str) -> Option<u64> {
    plans.iter().find_map(|plan| match plan {
        PlanRecord::Run { mutant, net_time_ms, .. } if mutant.id == mutant_id => Some(*net_time_ms),
        _ => None,
    })
}
