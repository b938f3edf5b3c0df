#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Write as _;

use super::{
    panels::{Panel, ResultView},
    score::ScoreGauge,
};
use crate::{
    constants::{
        APP_FOOTER, APP_SUBTITLE, APP_TITLE, EVALUATION_FAILED_MESSAGE, SCORE_RING_RADIUS,
        SUBMIT_LABEL, SUBMIT_LABEL_PENDING,
    },
    input::Field,
    session::Snapshot,
};

/// Stylesheet embedded in every page.
const STYLE: &str = include_str!("assets/style.css");

/// Script that keeps the submit control in step with the inputs and submits
/// in place, swapping only the outcome so edits made while loading survive.
const SCRIPT: &str = include_str!("assets/form.js");

/// Escapes text for use in HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders the whole page for a session snapshot.
pub fn render_page(snapshot: &Snapshot) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{APP_TITLE}</title>");
    let _ = writeln!(html, "<style>\n{STYLE}</style>");
    html.push_str("</head><body>\n");

    html.push_str("<header>\n");
    let _ = writeln!(html, "  <h1>{APP_TITLE}</h1>");
    let _ = writeln!(html, "  <p class=\"subtitle\">{APP_SUBTITLE}</p>");
    html.push_str("</header>\n<main>\n");

    html.push_str(&render_form(snapshot));

    html.push_str(&render_loading(snapshot.is_loading()));

    html.push_str("<div id=\"outcome\">\n");
    html.push_str(&render_outcome(snapshot));
    html.push_str("</div>\n");

    html.push_str("</main>\n");
    let _ = writeln!(html, "<footer><p>{APP_FOOTER}</p></footer>");
    let _ = writeln!(html, "<script>\n{SCRIPT}</script>");
    html.push_str("</body></html>\n");
    html
}

/// Renders the error banner or the result section of a snapshot, whichever
/// its phase calls for. Idle and loading snapshots render nothing.
pub fn render_outcome(snapshot: &Snapshot) -> String {
    let mut html = String::new();

    if let Some(message) = snapshot.error_message() {
        html.push_str(&render_error(message));
    }

    if let Some(result) = snapshot.result() {
        html.push_str("<section class=\"result\">\n");
        html.push_str("<h2>Evaluation Result</h2>\n");
        html.push_str(&render_result(&ResultView::new(result)));
        html.push_str("</section>\n");
    }

    html
}

/// Renders the two text areas and the submit control.
fn render_form(snapshot: &Snapshot) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<form id=\"evaluate-form\" method=\"post\" action=\"/evaluate\" \
         data-outcome-action=\"/evaluate/outcome\" data-idle-label=\"{}\" \
         data-pending-label=\"{}\" data-failed-message=\"{}\">",
        escape(SUBMIT_LABEL),
        escape(SUBMIT_LABEL_PENDING),
        escape(EVALUATION_FAILED_MESSAGE)
    );
    html.push_str("<div class=\"inputs\">\n");
    html.push_str(&render_text_area(Field::AnswerKey, &snapshot.answer_key));
    html.push_str(&render_text_area(Field::StudentAnswer, &snapshot.student_answer));
    html.push_str("</div>\n");

    let disabled = if snapshot.can_submit { "" } else { " disabled" };
    let _ = writeln!(
        html,
        "<div class=\"actions\"><button type=\"submit\" id=\"submit\"{disabled}>{}</button></div>",
        escape(snapshot.submit_label)
    );
    html.push_str("</form>\n");
    html
}

/// Renders one labelled text area.
fn render_text_area(field: Field, value: &str) -> String {
    let id = field.id();
    format!(
        "<div class=\"input-card\">\n  <label for=\"{id}\">{}</label>\n  <textarea id=\"{id}\" \
         name=\"{id}\" rows=\"12\" placeholder=\"{}\">{}</textarea>\n</div>\n",
        escape(field.label()),
        escape(field.placeholder()),
        escape(value)
    )
}

/// Renders the loading indicator, hidden unless `visible`.
fn render_loading(visible: bool) -> String {
    let hidden = if visible { "" } else { " hidden" };
    format!(
        "<div id=\"loading\" class=\"loading\" role=\"status\"{hidden}><div \
         class=\"spinner\"></div><p>Evaluating the answer...</p></div>\n"
    )
}

/// Renders the error banner.
pub fn render_error(message: &str) -> String {
    format!(
        "<div class=\"error\" role=\"alert\"><p class=\"error-title\">Error</p><p>{}</p></div>\n",
        escape(message)
    )
}

/// Renders the score ring as inline SVG.
pub fn render_gauge(gauge: &ScoreGauge) -> String {
    let circumference = gauge.circumference();
    format!(
        "<div class=\"score {tier}\">\n  <svg viewBox=\"0 0 120 120\" width=\"160\" \
         height=\"160\">\n    <circle class=\"track\" stroke-width=\"10\" fill=\"transparent\" \
         r=\"{radius}\" cx=\"60\" cy=\"60\"/>\n    <circle class=\"ring\" stroke-width=\"10\" \
         stroke-dasharray=\"{circumference:.3}\" stroke-dashoffset=\"{offset:.3}\" \
         stroke-linecap=\"round\" fill=\"transparent\" r=\"{radius}\" cx=\"60\" cy=\"60\" \
         transform=\"rotate(-90 60 60)\"/>\n  </svg>\n  <div class=\"score-label\"><span \
         class=\"score-value\">{score}</span><span class=\"score-max\">/ \
         {max}</span></div>\n</div>\n",
        tier = gauge.tier,
        radius = SCORE_RING_RADIUS,
        offset = gauge.dash_offset(),
        score = gauge.score,
        max = gauge.max_score,
    )
}

/// Renders one feedback panel.
fn render_panel(panel: &Panel) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<div class=\"panel {}\">", panel.key());
    let _ = writeln!(html, "  <h3>{}</h3>", panel.title());

    if let Some(items) = panel.items() {
        html.push_str("  <ul>\n");
        for item in items {
            let _ = writeln!(html, "    <li>{}</li>", escape(item));
        }
        html.push_str("  </ul>\n");
    } else if let Some(text) = panel.text() {
        let _ = writeln!(html, "  <p>{}</p>", escape(text));
    }

    html.push_str("</div>\n");
    html
}

/// Renders the score column and the feedback column of a result.
pub fn render_result(view: &ResultView) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"card\">\n<div class=\"summary\">\n");
    html.push_str(&render_gauge(&view.gauge));
    let _ = writeln!(html, "<p class=\"reasoning\">{}</p>", escape(&view.reasoning));
    html.push_str("</div>\n<div class=\"panels\">\n");
    for panel in &view.panels {
        html.push_str(&render_panel(panel));
    }
    html.push_str("</div>\n</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::session::Session;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn loading_page_shows_spinner_and_disables_submit() {
        let mut session = Session::default();
        session.begin().unwrap();
        let html = render_page(&session.snapshot());

        assert!(html.contains("<div id=\"loading\" class=\"loading\" role=\"status\"><div"));
        assert!(html.contains("id=\"submit\" disabled>Evaluating...</button>"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn idle_page_hides_spinner() {
        let html = render_page(&Session::default().snapshot());
        assert!(html.contains("role=\"status\" hidden>"));
        assert!(html.contains("id=\"submit\">Evaluate Answer</button>"));
    }

    #[test]
    fn gauge_carries_tier_class_and_numbers() {
        let html = render_gauge(&ScoreGauge::new(39, 100));
        assert!(html.contains("class=\"score critical\""));
        assert!(html.contains("<span class=\"score-value\">39</span>"));
        assert!(html.contains("/ 100</span>"));
    }

    #[test]
    fn ring_radius_follows_the_constant() {
        let html = render_gauge(&ScoreGauge::new(5, 10));
        let radius = format!("r=\"{SCORE_RING_RADIUS}\"");
        assert_eq!(html.matches(&radius).count(), 2);
    }

    #[test]
    fn outcome_is_empty_until_there_is_something_to_show() {
        let mut session = Session::default();
        assert_eq!(render_outcome(&session.snapshot()), "");

        session.begin().unwrap();
        assert_eq!(render_outcome(&session.snapshot()), "");
    }

    #[test]
    fn page_wires_the_in_place_submission() {
        let html = render_page(&Session::default().snapshot());
        assert!(html.contains("<div id=\"outcome\">"));
        assert!(html.contains("data-outcome-action=\"/evaluate/outcome\""));
        assert!(html.contains("data-idle-label=\"Evaluate Answer\""));
        assert!(html.contains("addEventListener(\"pageshow\""));
    }

    #[test]
    fn error_banner_escapes_message() {
        let html = render_error("a < b");
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("a &lt; b"));
    }
}
