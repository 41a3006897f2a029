use std::io::Write;

use journal_finder_core::{FilterCriteria, Journal, LlmModel};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Echo the criteria a search was sent with.
pub fn print_criteria(
    w: &mut dyn Write,
    criteria: &FilterCriteria,
    color: ColorMode,
) -> std::io::Result<()> {
    let publisher = if criteria.publisher.is_empty() {
        "any"
    } else {
        criteria.publisher.as_str()
    };
    let line = format!(
        "Model: {}  |  Impact factor \u{2265} {:.1}  |  First decision \u{2264} {} days  |  Publisher: {}",
        criteria.llm_model.label(),
        criteria.impact_factor,
        criteria.first_decision_time,
        publisher
    );
    if color.enabled() {
        writeln!(w, "{}", line.dimmed())?;
    } else {
        writeln!(w, "{}", line)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print one card per journal in the order the service returned them.
pub fn print_journals(w: &mut dyn Write, journals: &[Journal], color: ColorMode) -> std::io::Result<()> {
    if journals.is_empty() {
        writeln!(w, "No journals found.")?;
        return Ok(());
    }

    for journal in journals {
        print_journal_card(w, journal, color)?;
    }

    let summary = format!("{} journal(s)", journals.len());
    if color.enabled() {
        writeln!(w, "{}", summary.bold())?;
    } else {
        writeln!(w, "{}", summary)?;
    }
    Ok(())
}

fn print_journal_card(w: &mut dyn Write, journal: &Journal, color: ColorMode) -> std::io::Result<()> {
    let rank = format!("#{}", journal.id);
    if color.enabled() {
        writeln!(w, "{} {}", rank.blue(), journal.name.bold())?;
        writeln!(w, "   {} {}", "Publisher:".dimmed(), journal.publisher)?;
        writeln!(
            w,
            "   {} {}   {} {} days",
            "JIF:".dimmed(),
            journal.jif,
            "First decision:".dimmed(),
            journal.decision_time
        )?;
    } else {
        writeln!(w, "{} {}", rank, journal.name)?;
        writeln!(w, "   Publisher: {}", journal.publisher)?;
        writeln!(
            w,
            "   JIF: {}   First decision: {} days",
            journal.jif, journal.decision_time
        )?;
    }
    if !journal.category.is_empty() {
        writeln!(w, "   Category: {}", truncate(&journal.category, 70))?;
    }
    if !journal.keywords.is_empty() {
        writeln!(w, "   Keywords: {}", truncate(&journal.keywords.join(", "), 70))?;
    }
    writeln!(w)?;
    Ok(())
}

/// List the ranking models, marking the default.
pub fn print_models(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    for &model in LlmModel::all() {
        let marker = if model == LlmModel::default() { "*" } else { " " };
        if color.enabled() {
            writeln!(
                w,
                "{} {:<12} {:<12} {}",
                marker.green(),
                model.id().bold(),
                model.label(),
                model.description().dimmed()
            )?;
        } else {
            writeln!(
                w,
                "{} {:<12} {:<12} {}",
                marker,
                model.id(),
                model.label(),
                model.description()
            )?;
        }
    }
    Ok(())
}

/// List publishers, one per line.
pub fn print_publishers(w: &mut dyn Write, publishers: &[&str]) -> std::io::Result<()> {
    if publishers.is_empty() {
        writeln!(w, "No matching publishers.")?;
    }
    for name in publishers {
        writeln!(w, "{}", name)?;
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
        t.push_str("...");
        t
    }
}
