// src/render.rs
//! Results panel rendering.
//!
//! The panel is a pure function of the form's view state. `ResultsView`
//! resolves the state into exactly one of five displays and the `render_*`
//! functions turn that into terminal text.

use crate::form::{UploadForm, ViewState};
use crate::types::parse_result::KEY_FIELDS;
use crate::types::{AtsDetail, AtsScore, ParseResult};

pub const BAR_WIDTH: usize = 40;

const CATEGORY_HEADER: &str = "Category";
const SCORE_HEADER: &str = "Score (out of 10)";
const COMMENT_HEADER: &str = "Comments";

pub enum ResultsView<'a> {
    Progress,
    Error(&'a str),
    Welcome,
    Unscored,
    Scored {
        result: &'a ParseResult,
        score: AtsScore,
    },
}

impl<'a> ResultsView<'a> {
    pub fn from_state(state: &'a ViewState) -> Self {
        match state {
            ViewState::Loading { .. } => Self::Progress,
            ViewState::Failed(message) => Self::Error(message),
            ViewState::Idle => Self::Welcome,
            ViewState::Parsed(result) => match result.ats_score() {
                Some(score) => Self::Scored { result, score },
                None => Self::Unscored,
            },
        }
    }
}

/// Title block plus the selected file echo
pub fn render_header(form: &UploadForm) -> String {
    let mut out = String::from(
        "Modern Resume Parser\n\
         Upload a resume and job description to get an ATS score.\n",
    );
    if let Some(file) = form.selected_file() {
        out.push_str(&format!("Selected file: {}\n", file.name));
    }
    out
}

pub fn render_footer(year: i32) -> String {
    format!("\u{a9} {} Resume Parser\n", year)
}

/// Render the results panel for the given state
pub fn render_view(state: &ViewState) -> String {
    match ResultsView::from_state(state) {
        ResultsView::Progress => "Parsing resume...\n".to_string(),
        ResultsView::Error(message) => format!("An Error Occurred\n  {}\n", message),
        ResultsView::Welcome => {
            "Welcome!\n  Upload your resume to get started.\n".to_string()
        }
        ResultsView::Unscored => concat!(
            "Parsing Complete\n",
            "  The resume was parsed, but an ATS score could not be calculated.\n",
            "  Re-run with --json, or check the debug log, for the raw data.\n",
        )
        .to_string(),
        ResultsView::Scored { result, score } => {
            let mut out = render_key_fields(result);
            out.push('\n');
            out.push_str(&render_overall_score(&score));
            out.push('\n');
            out.push_str(&render_details_table(&score.details));
            out
        }
    }
}

/// Key-fields card followed by any additional details the service returned
pub fn render_key_fields(result: &ParseResult) -> String {
    let mut out = String::from("Extracted Resume Information\n");

    for (label, key) in KEY_FIELDS {
        out.push_str(&format!("  {:<16} {}\n", label, result.field_text(key)));
    }

    let additional = result.additional_fields();
    if !additional.is_empty() {
        out.push_str("Additional Details\n");
        for (label, text) in additional {
            out.push_str(&format!("  {:<26} {}\n", label, text));
        }
    }

    out
}

pub fn render_overall_score(score: &AtsScore) -> String {
    format!(
        "Your resume scored {} out of 100.\n{}\n",
        score.overall_score,
        progress_bar(score.bar_percent(), BAR_WIDTH)
    )
}

/// Proportional bar, e.g. `[#####-----] 50%`
pub fn progress_bar(percent: f64, width: usize) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

/// Per-category table in service order
pub fn render_details_table(details: &[AtsDetail]) -> String {
    let category_width = details
        .iter()
        .map(|d| d.category.chars().count())
        .chain(std::iter::once(CATEGORY_HEADER.len()))
        .max()
        .unwrap_or(CATEGORY_HEADER.len());
    let score_width = SCORE_HEADER.len();

    let row = |category: &str, score: &str, comment: &str| {
        format!(
            "{:<cw$}  {:>sw$}  {}\n",
            category,
            score,
            comment,
            cw = category_width,
            sw = score_width
        )
    };

    let mut out = row(CATEGORY_HEADER, SCORE_HEADER, COMMENT_HEADER);
    out.push_str(&"-".repeat(category_width + score_width + COMMENT_HEADER.len() + 4));
    out.push('\n');

    for detail in details {
        out.push_str(&row(&detail.category, detail.score_text(), &detail.comment));
    }

    out
}
