//! Human-readable status lines for a relocation report.

use std::io::{self, Write};

use loadshift_relocation::{NoTargetReason, RelocationDecision, RelocationReport};

pub fn write_status_lines<W: Write>(out: &mut W, report: &RelocationReport) -> io::Result<()> {
    let source = &report.source;
    writeln!(out, "Source Inventory: {}", source.location)?;

    if let RelocationDecision::NoActionNeeded { source, load, threshold } = &report.decision {
        writeln!(out, "Source inventory {source} is within threshold limits.")?;
        writeln!(out, "Current load: {load}")?;
        writeln!(out, "Threshold: {threshold}")?;
        writeln!(out, "No relocation needed.")?;
        return Ok(());
    }

    writeln!(out, "Current load: {}", source.load)?;
    writeln!(out, "Threshold: {}", source.threshold)?;
    writeln!(out, "Excess load to relocate: {}", source.excess_load)?;

    for c in &report.candidates {
        writeln!(
            out,
            "Inventory {}: Score = {:.3} (Distance: {}, Current Demand: {}, Forecast: {}, Free Space: {})",
            c.location, c.score, c.distance, c.current_demand, c.forecasted_demand, c.volume_free
        )?;
    }

    if let Some(target) = &report.target {
        writeln!(out, "Target Inventory: {}", target.location)?;
        writeln!(out, "Score: {:.3}", target.score)?;
        writeln!(out, "Target inventory {} analysis:", target.location)?;
        writeln!(out, "Current load: {}", target.load)?;
        writeln!(out, "Threshold: {}", target.threshold)?;
        writeln!(out, "Available capacity: {}", target.available_capacity)?;
        writeln!(out, "Free space: {}", target.volume_free)?;
    }

    match &report.decision {
        RelocationDecision::NoValidTarget { reason: NoTargetReason::NoCandidates, .. } => {
            writeln!(out)?;
            writeln!(out, "ERROR: No valid relocation target found!")?;
        }
        RelocationDecision::NoValidTarget {
            reason: NoTargetReason::TargetCannotAccept { .. },
            ..
        } => {
            writeln!(out)?;
            writeln!(out, "WARNING: Target inventory cannot accommodate any load!")?;
        }
        RelocationDecision::Relocated(plan) => {
            writeln!(
                out,
                "Relocating {} units from inventory {} to inventory {}",
                plan.amount, plan.source, plan.target
            )?;
            writeln!(
                out,
                "Source inventory {}: {} units (was {})",
                plan.source, plan.source_load_after, plan.source_load_before
            )?;
            writeln!(
                out,
                "Target inventory {}: {} units (was {})",
                plan.target, plan.target_load_after, plan.target_load_before
            )?;
            if plan.partial {
                writeln!(out)?;
                writeln!(
                    out,
                    "WARNING: Could not relocate all excess load. Remaining excess: {} units",
                    plan.remaining_excess
                )?;
            }
        }
        RelocationDecision::NoActionNeeded { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadshift_core::LocationId;
    use loadshift_relocation::{RelocationPlan, SourceStatus, TargetAnalysis};

    fn render(report: &RelocationReport) -> String {
        let mut buf = Vec::new();
        write_status_lines(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn within_threshold() {
        let report = RelocationReport {
            source: SourceStatus {
                location: LocationId::new(1),
                load: 50,
                threshold: 80,
                exceeded: false,
                excess_load: 0,
            },
            candidates: vec![],
            target: None,
            decision: RelocationDecision::NoActionNeeded {
                source: LocationId::new(1),
                load: 50,
                threshold: 80,
            },
        };

        assert_eq!(
            render(&report),
            "Source Inventory: 1\n\
             Source inventory 1 is within threshold limits.\n\
             Current load: 50\n\
             Threshold: 80\n\
             No relocation needed.\n"
        );
    }

    #[test]
    fn partial_relocation_warns() {
        let report = RelocationReport {
            source: SourceStatus {
                location: LocationId::new(1),
                load: 100,
                threshold: 80,
                exceeded: true,
                excess_load: 20,
            },
            candidates: vec![],
            target: Some(TargetAnalysis {
                location: LocationId::new(2),
                score: 3.0,
                load: 50,
                threshold: 150,
                available_capacity: 100,
                volume_free: 10,
            }),
            decision: RelocationDecision::Relocated(RelocationPlan {
                source: LocationId::new(1),
                target: LocationId::new(2),
                amount: 10,
                excess_load: 20,
                remaining_excess: 10,
                partial: true,
                source_load_before: 100,
                source_load_after: 90,
                target_load_before: 50,
                target_load_after: 60,
            }),
        };

        let text = render(&report);
        assert!(text.contains("Target Inventory: 2\nScore: 3.000\n"));
        assert!(text.contains("Available capacity: 100\nFree space: 10\n"));
        assert!(text.contains("Relocating 10 units from inventory 1 to inventory 2\n"));
        assert!(text.contains("Source inventory 1: 90 units (was 100)\n"));
        assert!(text.contains("Target inventory 2: 60 units (was 50)\n"));
        assert!(text.ends_with(
            "\nWARNING: Could not relocate all excess load. Remaining excess: 10 units\n"
        ));
    }
}
