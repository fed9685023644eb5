/// Plain-text analytics report.
///
/// Terminal rendition of the analytics panel: current parameters, alert
/// banner with recommended actions, counts per category, the detail table
/// ordered by risk, and the elevation profile.
///
/// # Clock injection
/// `render_report_at` takes the timestamp to print so output is fully
/// deterministic in tests. `render_report` stamps the current time.

use crate::analysis::Assessment;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Widest bar in the elevation profile, in characters.
const PROFILE_WIDTH: usize = 30;

pub fn render_report_at(assessment: &Assessment, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    write_report(&mut out, assessment, generated_at).expect("writing to a String cannot fail");
    out
}

pub fn render_report(assessment: &Assessment) -> String {
    render_report_at(assessment, Utc::now())
}

fn write_report(
    out: &mut String,
    assessment: &Assessment,
    generated_at: DateTime<Utc>,
) -> std::fmt::Result {
    let params = assessment.parameters();
    let level = assessment.alert_level();
    let counts = assessment.counts();

    writeln!(out, "Flood risk report - {}", generated_at.format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(
        out,
        "Rainfall {} mm over {} h, river level {} m",
        params.rainfall_mm(),
        params.duration_hours(),
        params.river_level_m()
    )?;
    writeln!(out)?;

    writeln!(out, "== {} ==", level)?;
    for rec in assessment.recommendations() {
        writeln!(out, "  - {}: {}", rec.action, rec.detail)?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "Peligro: {}   Precaución: {}   Seguro: {}",
        counts.danger, counts.caution, counts.safe
    )?;

    if assessment.is_empty() {
        writeln!(out)?;
        writeln!(out, "No zones configured.")?;
        return Ok(());
    }

    let danger = assessment.danger_zone_names();
    if danger.is_empty() {
        writeln!(out, "All zones below danger level.")?;
    } else {
        writeln!(out, "Danger zones: {}", danger.join(", "))?;
    }
    writeln!(out)?;

    let name_width = assessment
        .zones()
        .iter()
        .map(|z| z.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    writeln!(
        out,
        "{:<name_width$}  {:>9}  {:<11}  {:>5}  {:>6}",
        "Zone", "Elevation", "Status", "Level", "Score"
    )?;
    for zone in assessment.sorted_by_risk() {
        writeln!(
            out,
            "{:<name_width$}  {:>8.0}m  {:<11}  {:>5}  {:>6.2}",
            zone.name,
            zone.elevation,
            zone.category.label(),
            zone.risk_level,
            zone.score
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Elevation profile")?;
    let highest = assessment
        .zones()
        .iter()
        .map(|z| z.elevation)
        .fold(0.0_f64, f64::max);
    for zone in assessment.sorted_by_elevation() {
        let bar = if highest > 0.0 {
            ((zone.elevation / highest) * PROFILE_WIDTH as f64).round() as usize
        } else {
            0
        };
        writeln!(
            out,
            "{:<name_width$}  {:>4.0}m  {}",
            zone.name,
            zone.elevation,
            "#".repeat(bar.max(1))
        )?;
    }
    Ok(())
}
