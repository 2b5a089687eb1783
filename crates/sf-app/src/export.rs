//! CSV export helpers.

use sf_model::Projection;

use crate::evaluation::Evaluation;

/// `step,lane_id,queue,wait_s`, one row per lane per step.
pub fn projection_to_csv(projection: &Projection) -> String {
    let mut csv = String::from("step,lane_id,queue,wait_s\n");
    for (step, samples) in projection.steps.iter().enumerate() {
        for sample in samples {
            csv.push_str(&format!(
                "{},{},{},{:.3}\n",
                step, sample.lane_id, sample.queue, sample.wait_s
            ));
        }
    }
    csv
}

/// Per-lane before/after table.
pub fn metrics_to_csv(evaluation: &Evaluation) -> String {
    let mut csv = String::from(
        "lane_id,name,green_before_s,green_after_s,delay_before_s,delay_after_s,\
         queue_before,queue_after,congestion_before_pct,congestion_after_pct\n",
    );
    for row in evaluation.comparison_rows() {
        csv.push_str(&format!(
            "{},{},{},{},{:.3},{:.3},{},{},{},{}\n",
            row.lane_id,
            escape(&row.name),
            row.green_before_s,
            row.green_after_s,
            row.delay_before_s,
            row.delay_after_s,
            row.queue_before,
            row.queue_after,
            row.congestion_before_pct,
            row.congestion_after_pct
        ));
    }
    csv
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_quotes_only_when_needed() {
        assert_eq!(escape("North"), "North");
        assert_eq!(escape("North, inner"), "\"North, inner\"");
        assert_eq!(escape("the \"fast\" lane"), "\"the \"\"fast\"\" lane\"");
    }

    #[test]
    fn empty_projection_is_header_only() {
        assert_eq!(
            projection_to_csv(&Projection::default()),
            "step,lane_id,queue,wait_s\n"
        );
    }
}
