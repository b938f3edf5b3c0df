#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use colored::{ColoredString, Colorize};
use itertools::Itertools;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Panel as TablePanel, Style, Width, object::Rows},
};

use super::{
    panels::{Panel, ResultView},
    score::{ScoreGauge, Tier},
};

/// Column width the detail column wraps at.
const DETAIL_WIDTH: usize = 72;

/// Colors `text` according to `tier`.
fn paint(text: &str, tier: Tier) -> ColoredString {
    match tier {
        Tier::Good => text.green().bold(),
        Tier::Warning => text.yellow().bold(),
        Tier::Critical => text.red().bold(),
    }
}

/// One line summary of the score, colored by tier.
pub fn render_score_line(gauge: &ScoreGauge) -> String {
    let text = format!("Score: {gauge} ({:.0}%)", gauge.percentage);
    paint(&text, gauge.tier).to_string()
}

/// Body text of a panel as it appears in the detail column.
fn panel_body(panel: &Panel) -> String {
    match panel.items() {
        Some(items) => items.iter().map(|item| format!("• {item}")).join("\n"),
        None => panel.text().unwrap_or_default().to_string(),
    }
}

/// Renders a result as a score line followed by a two column table.
pub fn render_result(view: &ResultView) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Reasoning".to_string(), view.reasoning.clone()]);
    for panel in &view.panels {
        builder.push_record([panel.title().to_string(), panel_body(panel)]);
    }

    let mut table = builder.build();
    table
        .with(Style::modern())
        .with(Modify::new(Rows::new(0..)).with(Width::wrap(DETAIL_WIDTH).keep_words(true)))
        .with(TablePanel::header("Evaluation Result"))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        );

    format!("{}\n{table}", render_score_line(&view.gauge))
}

/// Renders an error banner.
pub fn render_error(message: &str) -> String {
    format!("{} {message}", "Error:".red().bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EvaluationResult;

    #[test]
    fn table_lists_every_panel_in_order() {
        colored::control::set_override(false);
        let result = EvaluationResult::builder()
            .score(3)
            .max_score(10)
            .reasoning("Too brief.")
            .feedback("Expand on the process.")
            .missing_points(vec!["Chlorophyll".to_string(), "Equation".to_string()])
            .corrected_answer("Full answer.")
            .build();
        let out = render_result(&ResultView::new(&result));

        assert!(out.starts_with("Score: 3/10 (30%)"));
        let missing = out.find("Missing Key Points").unwrap();
        let corrected = out.find("Corrected Answer").unwrap();
        assert!(missing < corrected);
        assert!(out.find("• Chlorophyll").unwrap() < out.find("• Equation").unwrap());
        assert!(!out.contains("Factual Errors"));
        assert!(!out.contains("Excellent Work!"));
    }
}
