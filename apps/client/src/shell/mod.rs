//! Line-oriented terminal front end. Reads commands from stdin, hands them to
//! the active page controller, and prints the page plus any live notice.

pub mod commands;
pub mod view;

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::listing::render::cards_document;
use crate::listing::FilterState;
use crate::notice::{Notice, NoticeBoard};
use crate::pages::{
    self, ActionResult, Dashboard, LoginPage, Outcome, Page, ProfilePage, SettingsPage, SignupPage,
};
use crate::password;
use crate::state::ClientState;

use commands::{Command, FilterCommand};

/// The page currently on screen. Leaving a page drops its controller.
enum ActivePage {
    Login(LoginPage),
    Signup(SignupPage),
    Dashboard(Box<Dashboard>),
    Profile(ProfilePage),
    Settings(SettingsPage),
}

impl ActivePage {
    fn page(&self) -> Page {
        match self {
            ActivePage::Login(_) => Page::Login,
            ActivePage::Signup(_) => Page::Signup,
            ActivePage::Dashboard(_) => Page::Dashboard,
            ActivePage::Profile(_) => Page::Profile,
            ActivePage::Settings(_) => Page::Settings,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W: Write> {
    state: ClientState,
    page: ActivePage,
    notices: NoticeBoard,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(state: ClientState, out: W) -> Self {
        let notices = NoticeBoard::new(state.config.notice_duration);
        Self {
            page: ActivePage::Login(LoginPage::new(state.clone())),
            state,
            notices,
            out,
        }
    }

    pub fn current_page(&self) -> Page {
        self.page.page()
    }

    /// Opens `page`. Protected pages fall back to the login page when the
    /// session check fails.
    pub async fn enter(&mut self, page: Page) {
        let state = self.state.clone();
        let entered = match page {
            Page::Login => Some(ActivePage::Login(LoginPage::new(state))),
            Page::Signup => Some(ActivePage::Signup(SignupPage::new(state))),
            Page::Dashboard => Dashboard::open(state)
                .await
                .map(|d| ActivePage::Dashboard(Box::new(d))),
            Page::Profile => ProfilePage::open(state).await.map(ActivePage::Profile),
            Page::Settings => SettingsPage::open(state).await.map(ActivePage::Settings),
        };

        self.page = match entered {
            Some(active) => active,
            None => {
                info!("{page} needs a session, showing login");
                ActivePage::Login(LoginPage::new(self.state.clone()))
            }
        };
        info!("Entered {} page", self.page.page());
    }

    pub fn render(&mut self) -> Result<()> {
        let now = Utc::now();
        let text = match &self.page {
            ActivePage::Login(page) => view::login(page.panel(), page.reset_email()),
            ActivePage::Signup(_) => view::signup(),
            ActivePage::Dashboard(dashboard) => view::dashboard(dashboard, now),
            ActivePage::Profile(page) => view::profile(page),
            ActivePage::Settings(page) => view::settings(page),
        };
        writeln!(self.out, "{text}")?;
        if let Some(notice) = self.notices.current() {
            writeln!(self.out, "{}", view::notice_line(&notice))?;
        }
        Ok(())
    }

    /// Handles one input line and redraws. Action failures become notices;
    /// only output errors propagate.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            // Usage errors and `help` output both arrive here as clap text.
            Err(e) => {
                writeln!(self.out, "{}", e.to_string().trim_end())?;
                return Ok(Flow::Continue);
            }
        };
        debug!("Handling command on {} page", self.page.page());

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Check { password } => {
                self.print_checklist(&password)?;
                return Ok(Flow::Continue);
            }
            Command::Go { page } => {
                self.notices.dismiss();
                self.enter(page).await;
            }
            Command::Show => {}
            command => {
                let result = self.dispatch(command).await;
                self.apply(result).await;
            }
        }

        self.render()?;
        Ok(Flow::Continue)
    }

    async fn apply(&mut self, result: ActionResult) {
        match result {
            Ok(Outcome { notice, navigate }) => {
                if let Some(page) = navigate {
                    self.enter(page).await;
                }
                if let Some(notice) = notice {
                    self.notices.show(notice);
                }
            }
            Err(e) => {
                if !e.is_validation() {
                    warn!("Action failed: {e}");
                }
                self.notices.show(Notice::error(e.user_message()));
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> ActionResult {
        let api = self.state.api.clone();
        let page = self.page.page();

        match (&mut self.page, command) {
            (_, Command::Logout) if page.requires_session() => pages::logout(api.as_ref()).await,

            (ActivePage::Login(login), Command::Login { username, password }) => {
                login.login(&username, &password).await
            }
            (ActivePage::Login(login), Command::Forgot { email: None }) => {
                login.show_forgot();
                Ok(Outcome::none())
            }
            (ActivePage::Login(login), Command::Forgot { email: Some(email) }) => {
                login.forgot_password(&email).await
            }
            (
                ActivePage::Login(login),
                Command::Reset {
                    code,
                    new_password,
                    confirm_password,
                },
            ) => {
                login
                    .reset_password(&code, &new_password, &confirm_password)
                    .await
            }
            (ActivePage::Login(login), Command::Back) => {
                login.show_login();
                Ok(Outcome::none())
            }

            (
                ActivePage::Signup(signup),
                Command::Signup {
                    username,
                    email,
                    password,
                    confirm_password,
                },
            ) => {
                signup
                    .signup(&username, &email, &password, &confirm_password)
                    .await
            }

            (
                ActivePage::Dashboard(dashboard),
                Command::Search {
                    keywords,
                    location,
                    source,
                },
            ) => {
                let query = keywords.join(" ");
                let (ticket, request) = dashboard.begin_search(&query, &location, source)?;
                // Progress line only; a broken stdout shows up on the next render.
                let _ = writeln!(self.out, "Searching... (Ctrl-C to cancel)");
                let _ = self.out.flush();

                let result = tokio::select! {
                    result = api.search(&request) => Some(result),
                    _ = tokio::signal::ctrl_c() => None,
                };
                match result {
                    Some(result) => {
                        let outcome = dashboard.finish_search(ticket, result);
                        dashboard.refresh_stats().await;
                        outcome
                    }
                    None => {
                        dashboard.abandon_search();
                        Ok(Outcome::notice(Notice::info("Search cancelled.")))
                    }
                }
            }
            (ActivePage::Dashboard(dashboard), Command::Filter { field }) => {
                let current = dashboard.working_set().filter_state().clone();
                let next = match field {
                    FilterCommand::EmploymentType { text } => {
                        FilterState::new(text.join(" "), current.company_substring)
                    }
                    FilterCommand::Company { text } => {
                        FilterState::new(current.employment_type_substring, text.join(" "))
                    }
                    FilterCommand::Clear => FilterState::default(),
                };
                dashboard.apply_filter(next);
                Ok(Outcome::none())
            }
            (ActivePage::Dashboard(dashboard), Command::Sort { key }) => {
                dashboard.apply_sort(key.unwrap_or_default());
                Ok(Outcome::none())
            }
            (ActivePage::Dashboard(dashboard), Command::Recommended) => {
                dashboard.load_recommendations().await;
                if dashboard.recommended().is_empty() {
                    Ok(Outcome::notice(Notice::info(
                        "No recommendations yet. Save preferences on your profile and enable notifications in Settings.",
                    )))
                } else {
                    Ok(Outcome::none())
                }
            }
            (ActivePage::Dashboard(dashboard), Command::Stats) => {
                dashboard.refresh_stats().await;
                Ok(Outcome::none())
            }
            (ActivePage::Dashboard(dashboard), Command::Export { path }) => {
                let html = cards_document(
                    "Job Sphere results",
                    &dashboard.results_summary(),
                    &dashboard.cards(Utc::now()),
                );
                match tokio::fs::write(&path, html).await {
                    Ok(()) => {
                        info!("Exported results to {}", path.display());
                        Ok(Outcome::notice(Notice::success(format!(
                            "Saved results to {}",
                            path.display()
                        ))))
                    }
                    Err(e) => {
                        warn!("Export to {} failed: {e}", path.display());
                        Ok(Outcome::notice(Notice::error(format!(
                            "Could not write {}: {e}",
                            path.display()
                        ))))
                    }
                }
            }

            (
                ActivePage::Profile(profile),
                Command::Account {
                    username,
                    email,
                    new_password,
                },
            ) => {
                profile
                    .update_account(&username, &email, &new_password)
                    .await
            }
            (
                ActivePage::Profile(profile),
                Command::Prefs {
                    job_titles,
                    locations,
                    job_types,
                },
            ) => {
                profile
                    .update_preferences(&job_titles, &locations, &job_types)
                    .await
            }

            (ActivePage::Settings(settings), Command::Dark { state }) => {
                settings.set_dark_mode(state.is_on()).await
            }
            (ActivePage::Settings(settings), Command::Notifications { state }) => {
                settings.set_notifications(state.is_on()).await
            }

            (_, _) => Ok(Outcome::notice(Notice::error(format!(
                "That command is not available on the {page} page. Type 'help' for a list."
            )))),
        }
    }

    /// The profile page hides the checklist for an empty password, which
    /// means "keep the current one"; every other form always shows it.
    fn print_checklist(&mut self, candidate: &str) -> Result<()> {
        let result = match &self.page {
            ActivePage::Profile(profile) => profile.check_new_password(candidate),
            _ => Some(password::evaluate(candidate)),
        };
        match result {
            Some(result) => {
                write!(self.out, "{}", view::checklist(&result))?;
                if let Some(rule) = result.first_violation() {
                    writeln!(self.out, "{rule}")?;
                }
            }
            None => writeln!(self.out, "Password unchanged.")?,
        }
        Ok(())
    }
}

/// Runs the shell on stdin/stdout until `quit` or end of input.
pub async fn run(state: ClientState, start: Page) -> Result<()> {
    let mut shell = Shell::new(state, std::io::stdout());
    shell.enter(start).await;
    shell.render()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(shell.out, "{}> ", shell.current_page())?;
        shell.out.flush()?;

        // Ctrl-C at the prompt leaves; during a search it only cancels the search.
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };
        if shell.handle_line(&line).await? == Flow::Quit {
            break;
        }
    }

    info!("Shell closed");
    Ok(())
}
