//! Display records for job cards. Free text from the server is cleaned here,
//! before anything prints or exports it: HTML-escaped for export, stripped of
//! control characters for the terminal.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::listing::dates::relative_date_label;
use crate::models::JobListing;

pub const NO_MATCHES_MESSAGE: &str = "No jobs match your filters.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCard {
    pub source: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted_label: String,
    pub employment_type: String,
    /// Absent when the source gave no salary.
    pub salary: Option<String>,
    pub description: String,
    pub apply_link: String,
}

/// Renders cards relative to a fixed "now" so a whole page uses one clock reading.
#[derive(Debug, Clone)]
pub struct CardRenderer<'a> {
    now: DateTime<Utc>,
    date_format: &'a str,
    clean: fn(&str) -> String,
}

impl<'a> CardRenderer<'a> {
    /// Cards whose fields can be dropped into markup as-is.
    pub fn html(now: DateTime<Utc>, date_format: &'a str) -> Self {
        Self {
            now,
            date_format,
            clean: escape_html,
        }
    }

    /// Cards for the screen: text stays literal, control characters go.
    pub fn terminal(now: DateTime<Utc>, date_format: &'a str) -> Self {
        Self {
            now,
            date_format,
            clean: strip_controls,
        }
    }

    pub fn card(&self, job: &JobListing) -> JobCard {
        let clean = self.clean;
        JobCard {
            source: clean(&job.source),
            title: clean(&job.title),
            company: clean(&job.company),
            location: clean(&job.location),
            posted_label: relative_date_label(job.posted_at(), self.now, self.date_format),
            employment_type: clean(&job.employment_type),
            salary: job.salary.as_deref().map(clean),
            description: clean(&job.description),
            apply_link: clean(&job.apply_link),
        }
    }

    pub fn cards(&self, jobs: &[JobListing]) -> Vec<JobCard> {
        jobs.iter().map(|job| self.card(job)).collect()
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Drops control characters other than newline, so server text cannot emit
/// escape sequences, bells or carriage returns on the user's terminal.
pub fn strip_controls(input: &str) -> String {
    input
        .chars()
        .filter(|&ch| ch == '\n' || !ch.is_control())
        .collect()
}

/// "N jobs found" when nothing is filtered out, otherwise "N of M jobs".
pub fn results_summary(shown: usize, total: usize) -> String {
    if shown == total {
        format!("{shown} jobs found")
    } else {
        format!("{shown} of {total} jobs")
    }
}

impl JobCard {
    /// Card markup. Only meaningful for cards from `CardRenderer::html`, whose
    /// fields are already escaped and are inserted as-is.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let _ = writeln!(html, r#"<div class="job-card">"#);
        let _ = writeln!(html, r#"  <div class="job-source">{}</div>"#, self.source);
        let _ = writeln!(html, r#"  <h3 class="job-title">{}</h3>"#, self.title);
        let _ = writeln!(html, r#"  <div class="job-company">{}</div>"#, self.company);
        let _ = writeln!(html, r#"  <div class="job-location">{}</div>"#, self.location);
        let _ = writeln!(html, r#"  <div class="job-details">"#);
        let _ = writeln!(
            html,
            r#"    <span class="job-detail-item">{}</span>"#,
            self.posted_label
        );
        let _ = writeln!(
            html,
            r#"    <span class="job-detail-item">{}</span>"#,
            self.employment_type
        );
        if let Some(salary) = &self.salary {
            let _ = writeln!(html, r#"    <span class="job-detail-item">{salary}</span>"#);
        }
        let _ = writeln!(html, "  </div>");
        let _ = writeln!(
            html,
            r#"  <div class="job-description">{}</div>"#,
            self.description
        );
        let _ = writeln!(
            html,
            r#"  <a href="{}" target="_blank" class="apply-btn">Apply Now</a>"#,
            self.apply_link
        );
        let _ = writeln!(html, "</div>");
        html
    }
}

/// A standalone results page for `export`.
pub fn cards_document(title: &str, summary: &str, cards: &[JobCard]) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(title));
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<p class=\"results-count\">{}</p>", escape_html(summary));
    if cards.is_empty() {
        let _ = writeln!(html, "<p>{NO_MATCHES_MESSAGE}</p>");
    }
    for card in cards {
        html.push_str(&card.to_html());
    }
    html.push_str("</body>\n</html>\n");
    html
}
