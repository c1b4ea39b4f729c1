//! Terminal lines printed around a load

use std::path::Path;
use std::time::Duration;
use crate::loader::{Stage, StageOutcome};
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Icon shown next to a stage's dump and header
pub fn stage_icon(stage: Stage) -> &'static str {
    match stage {
        Stage::Authors => Icons::PERSON,
        Stage::Works => Icons::BOOK,
    }
}

pub fn banner(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().heading.clone()));
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().heading.clone()));
}

/// `👤 authors dump: /data/ol_dump_authors.txt`
pub fn dump_source(stage: Stage, path: &Path) {
    println!(
        "{} {} {}",
        stage_icon(stage),
        format!("{} dump:", stage).style(theme().label.clone()),
        path.display().style(theme().path.clone())
    );
}

pub fn stage_started(stage: Stage) {
    println!();
    println!(
        "{} {}",
        Icons::GEAR.style(theme().label.clone()),
        format!("Stage: {}", stage).style(theme().heading.clone())
    );
}

/// Counters for a completed stage, or the reason it failed
pub fn stage_outcome(outcome: &StageOutcome) {
    match outcome {
        StageOutcome::Completed(report) => {
            println!(
                "{} {}",
                stage_icon(report.stage),
                format!("{} loaded", report.stage).style(theme().ok.clone())
            );
            count_row("Lines:", report.lines);
            count_row("Saved:", report.saved);
            if report.skipped > 0 {
                println!(
                    "  {} {}",
                    "Skipped:".style(theme().label.clone()),
                    report.skipped.style(theme().skipped.clone())
                );
            } else {
                count_row("Skipped:", 0);
            }
        }
        StageOutcome::Failed { stage, path, error } => {
            eprintln!(
                "{} {} {}: {}",
                Icons::CROSS,
                format!("{} failed", stage).style(theme().failed.clone()),
                path.display().style(theme().path.clone()),
                error
            );
        }
    }
}

fn count_row(label: &str, value: usize) {
    println!("  {} {}", label.style(theme().label.clone()), value);
}

pub fn elapsed(duration: Duration) {
    println!("{} {:.2?}", Icons::CLOCK.style(theme().label.clone()), duration);
}

pub fn success(message: &str) {
    println!("{} {}", Icons::CHECK, message.style(theme().ok.clone()));
}

pub fn notice(message: &str) {
    eprintln!("{} {}", Icons::WARN, message.style(theme().skipped.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_icons() {
        assert_eq!(stage_icon(Stage::Authors), Icons::PERSON);
        assert_eq!(stage_icon(Stage::Works), Icons::BOOK);
    }
}
