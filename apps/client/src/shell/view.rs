//! Plain-text rendering of each page. Views only read controller state; they
//! never call the API.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::api::types::{ApiStats, UsageLevel};
use crate::listing::render::{strip_controls, NO_MATCHES_MESSAGE};
use crate::listing::JobCard;
use crate::notice::{Notice, NoticeKind};
use crate::pages::login::LoginPanel;
use crate::pages::{Dashboard, ProfilePage, SettingsPage};
use crate::password::PasswordPolicyResult;

/// Dark mode swaps plain headings for ANSI-styled ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
}

impl Theme {
    fn heading(&self, text: &str) -> String {
        if self.dark {
            format!("\x1b[1;97;100m {text} \x1b[0m")
        } else {
            format!("== {text} ==")
        }
    }
}

pub fn notice_line(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Info => "info",
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    format!("[{tag}] {}", strip_controls(&notice.text))
}

pub fn checklist(result: &PasswordPolicyResult) -> String {
    let mut out = String::new();
    for requirement in result.requirements() {
        let _ = writeln!(out, "  {requirement}");
    }
    out
}

pub fn stats_line(stats: &ApiStats) -> String {
    match stats.usage_level() {
        UsageLevel::Normal => stats.summary(),
        UsageLevel::Warning => format!("{} [running low]", stats.summary()),
        UsageLevel::Critical => format!("{} [almost exhausted]", stats.summary()),
    }
}

/// Expects a card from `CardRenderer::terminal`.
pub fn card(card: &JobCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", card.source, card.title);
    let _ = writeln!(out, "  {} | {}", card.company, card.location);
    let mut details = vec![card.posted_label.as_str(), card.employment_type.as_str()];
    if let Some(salary) = &card.salary {
        details.push(salary);
    }
    let _ = writeln!(out, "  {}", details.join(" | "));
    if !card.description.is_empty() {
        let _ = writeln!(out, "  {}", card.description);
    }
    let _ = writeln!(out, "  Apply: {}", card.apply_link);
    out
}

pub fn login(panel: LoginPanel, reset_email: Option<&str>) -> String {
    let mut out = Theme::default().heading("Job Sphere: Login");
    out.push('\n');
    match panel {
        LoginPanel::Login => {
            out.push_str("login <username> <password>\n");
            out.push_str("forgot           (forgot your password?)\n");
            out.push_str("go signup        (create an account)\n");
        }
        LoginPanel::Forgot => {
            out.push_str("Enter the email you signed up with.\n");
            out.push_str("forgot <email>\nback\n");
        }
        LoginPanel::Reset => {
            if let Some(email) = reset_email {
                let _ = writeln!(out, "Resetting password for {email}");
            }
            out.push_str("reset <code> <new-password> <confirm>\nback\n");
        }
    }
    out
}

pub fn signup() -> String {
    let mut out = Theme::default().heading("Job Sphere: Sign up");
    out.push('\n');
    out.push_str("signup <username> <email> <password> <confirm>\n");
    out.push_str("Password requirements:\n");
    out.push_str(&checklist(&PasswordPolicyResult::default()));
    out
}

pub fn dashboard(dashboard: &Dashboard, now: DateTime<Utc>) -> String {
    let user = dashboard.user();
    let theme = Theme {
        dark: user.dark_mode,
    };
    let mut out = theme.heading("Job Sphere");
    out.push('\n');
    let _ = writeln!(out, "Welcome, {}", strip_controls(&user.username));
    if let Some(stats) = dashboard.stats() {
        let _ = writeln!(out, "{}", stats_line(&stats));
    }
    if dashboard.is_loading() {
        out.push_str("Searching...\n");
    }

    let recommended = dashboard.recommended_cards(now);
    if !recommended.is_empty() {
        let _ = writeln!(out, "\n{}", theme.heading("Recommended for you"));
        for job in &recommended {
            out.push_str(&card(job));
        }
    }

    if !dashboard.controls_visible() {
        return out;
    }

    let set = dashboard.working_set();
    let _ = writeln!(out, "\n{}", theme.heading("Results"));
    let _ = writeln!(out, "{}", dashboard.results_summary());
    let filter = set.filter_state();
    let _ = writeln!(
        out,
        "Filter: type=\"{}\" company=\"{}\" | Sort: {}",
        filter.employment_type_substring,
        filter.company_substring,
        set.sort_key()
    );

    let cards = dashboard.screen_cards(now);
    if cards.is_empty() {
        let _ = writeln!(out, "{NO_MATCHES_MESSAGE}");
    }
    for job in &cards {
        out.push('\n');
        out.push_str(&card(job));
    }
    out
}

pub fn profile(page: &ProfilePage) -> String {
    let user = page.user();
    let theme = Theme {
        dark: user.dark_mode,
    };
    let prefs = &user.preferences;
    let mut out = theme.heading("Profile");
    out.push('\n');
    let list = |items: &[String]| strip_controls(&items.join(", "));
    let _ = writeln!(out, "Username: {}", strip_controls(&user.username));
    let _ = writeln!(out, "Email:    {}", strip_controls(&user.email));
    let _ = writeln!(out, "Preferred titles:    {}", list(&prefs.job_titles));
    let _ = writeln!(out, "Preferred locations: {}", list(&prefs.locations));
    let _ = writeln!(out, "Preferred job types: {}", list(&prefs.job_types));
    out
}

pub fn settings(page: &SettingsPage) -> String {
    let theme = Theme {
        dark: page.dark_mode(),
    };
    let on_off = |on: bool| if on { "on" } else { "off" };
    let mut out = theme.heading("Settings");
    out.push('\n');
    let _ = writeln!(out, "Username: {}", strip_controls(&page.user().username));
    let _ = writeln!(out, "Email:    {}", strip_controls(&page.user().email));
    let _ = writeln!(out, "Dark mode:     {}", on_off(page.dark_mode()));
    let _ = writeln!(
        out,
        "Notifications: {}",
        on_off(page.notifications_enabled())
    );
    out
}
