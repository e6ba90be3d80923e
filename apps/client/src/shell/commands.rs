//! Shell command grammar. Each input line is split shell-style and parsed as a
//! clap multicall command, so the first word names the command and `help`
//! lists them all.

use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::api::types::JobSource;
use crate::listing::SortKey;
use crate::pages::Page;

#[derive(Parser, Debug)]
#[command(
    multicall = true,
    color = ColorChoice::Never,
    help_template = "Commands:\n{subcommands}"
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
    /// Open a page
    Go {
        #[arg(value_enum, ignore_case = true)]
        page: Page,
    },
    /// Redraw the current page
    Show,
    /// Sign out
    Logout,
    /// Sign in (login page)
    Login {
        username: String,
        #[arg(allow_hyphen_values = true)]
        password: String,
    },
    /// Request a reset code; without an email, open the forgot-password panel
    Forgot { email: Option<String> },
    /// Set a new password with the emailed code (login page)
    Reset {
        code: String,
        #[arg(allow_hyphen_values = true)]
        new_password: String,
        #[arg(allow_hyphen_values = true)]
        confirm_password: String,
    },
    /// Return to the login panel
    Back,
    /// Create an account (signup page)
    Signup {
        username: String,
        email: String,
        #[arg(allow_hyphen_values = true)]
        password: String,
        #[arg(allow_hyphen_values = true)]
        confirm_password: String,
    },
    /// Show the password checklist for a candidate password
    Check {
        #[arg(default_value = "", hide_default_value = true, allow_hyphen_values = true)]
        password: String,
    },
    /// Search job boards (dashboard)
    Search {
        /// Job title or keywords
        keywords: Vec<String>,
        #[arg(long, default_value = "", hide_default_value = true)]
        location: String,
        #[arg(long, value_enum, default_value_t, ignore_case = true)]
        source: JobSource,
    },
    /// Narrow the shown results (dashboard)
    Filter {
        #[command(subcommand)]
        field: FilterCommand,
    },
    /// Order the shown results (dashboard)
    Sort {
        #[arg(value_enum, ignore_case = true)]
        key: Option<SortKey>,
    },
    /// List recommended jobs (dashboard)
    Recommended,
    /// Refresh API usage (dashboard)
    Stats,
    /// Save the shown cards as an HTML page (dashboard)
    Export { path: PathBuf },
    /// Update username, email and optionally the password (profile)
    Account {
        username: String,
        email: String,
        /// Leave out to keep the current password
        #[arg(default_value = "", hide_default_value = true, allow_hyphen_values = true)]
        new_password: String,
    },
    /// Save comma-separated job preferences (profile)
    Prefs {
        #[arg(long = "titles", default_value = "", hide_default_value = true)]
        job_titles: String,
        #[arg(long, default_value = "", hide_default_value = true)]
        locations: String,
        #[arg(long = "types", default_value = "", hide_default_value = true)]
        job_types: String,
    },
    /// Switch dark mode (settings)
    Dark {
        #[arg(value_enum, ignore_case = true)]
        state: Switch,
    },
    /// Switch recommendations on the dashboard (settings)
    Notifications {
        #[arg(value_enum, ignore_case = true)]
        state: Switch,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FilterCommand {
    /// Keep jobs whose employment type contains the text
    #[command(name = "type")]
    EmploymentType { text: Vec<String> },
    /// Keep jobs whose company contains the text
    Company { text: Vec<String> },
    /// Drop both filters
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    #[value(aliases = ["true", "yes"])]
    On,
    #[value(aliases = ["false", "no"])]
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("error: unterminated quote")]
    UnterminatedQuote,
    /// Usage errors, and also the text of `help`.
    #[error(transparent)]
    Clap(#[from] clap::Error),
}

/// `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let tokens = shlex::split(line).ok_or(CommandError::UnterminatedQuote)?;
    if tokens.is_empty() {
        return Ok(None);
    }
    Ok(Some(Line::try_parse_from(tokens)?.command))
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn cmd(line: &str) -> Command {
        parse(line).unwrap().unwrap()
    }

    fn error_kind(line: &str) -> ErrorKind {
        match parse(line) {
            Err(CommandError::Clap(e)) => e.kind(),
            other => panic!("expected a clap error for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_command_tree_is_well_formed() {
        use clap::CommandFactory;
        Line::command().debug_assert();
    }

    #[test]
    fn test_blank_line_is_no_command() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(matches!(
            parse("login \"ada"),
            Err(CommandError::UnterminatedQuote)
        ));
    }

    #[test]
    fn test_search_with_options() {
        assert_eq!(
            cmd(r#"search rust backend --location "New York" --source jsearch"#),
            Command::Search {
                keywords: vec!["rust".into(), "backend".into()],
                location: "New York".into(),
                source: JobSource::Jsearch,
            }
        );
        assert_eq!(
            cmd("search"),
            Command::Search {
                keywords: Vec::new(),
                location: String::new(),
                source: JobSource::All,
            }
        );
        assert_eq!(error_kind("search rust --location"), ErrorKind::InvalidValue);
        assert_eq!(error_kind("search rust --source monster"), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_go_is_case_insensitive() {
        assert_eq!(cmd("go Settings"), Command::Go { page: Page::Settings });
        assert_eq!(error_kind("go nowhere"), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_filter_and_sort() {
        assert_eq!(
            cmd("filter company Acme Corp"),
            Command::Filter {
                field: FilterCommand::Company {
                    text: vec!["Acme".into(), "Corp".into()]
                }
            }
        );
        assert_eq!(
            cmd("filter type full"),
            Command::Filter {
                field: FilterCommand::EmploymentType {
                    text: vec!["full".into()]
                }
            }
        );
        assert_eq!(
            cmd("filter clear"),
            Command::Filter {
                field: FilterCommand::Clear
            }
        );
        assert_eq!(
            cmd("sort title-desc"),
            Command::Sort {
                key: Some(SortKey::TitleDesc)
            }
        );
        assert_eq!(cmd("sort"), Command::Sort { key: None });
        assert_eq!(error_kind("sort sideways"), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_passwords_may_start_with_a_dash() {
        assert_eq!(
            cmd("login ada -Secret1!"),
            Command::Login {
                username: "ada".into(),
                password: "-Secret1!".into(),
            }
        );
    }

    #[test]
    fn test_account_password_is_optional() {
        assert_eq!(
            cmd("account ada ada@example.test"),
            Command::Account {
                username: "ada".into(),
                email: "ada@example.test".into(),
                new_password: String::new(),
            }
        );
    }

    #[test]
    fn test_prefs_flags() {
        assert_eq!(
            cmd(r#"prefs --titles "Rust, Go" --types fulltime"#),
            Command::Prefs {
                job_titles: "Rust, Go".into(),
                locations: String::new(),
                job_types: "fulltime".into(),
            }
        );
        assert_eq!(error_kind("prefs --salary lots"), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_switches() {
        assert_eq!(cmd("dark on"), Command::Dark { state: Switch::On });
        assert_eq!(
            cmd("notifications OFF"),
            Command::Notifications { state: Switch::Off }
        );
        assert_eq!(cmd("dark yes"), Command::Dark { state: Switch::On });
        assert_eq!(error_kind("dark maybe"), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_forgot_email_is_optional() {
        assert_eq!(cmd("forgot"), Command::Forgot { email: None });
        assert_eq!(
            cmd("forgot ada@example.test"),
            Command::Forgot {
                email: Some("ada@example.test".into())
            }
        );
    }

    #[test]
    fn test_quit_alias() {
        assert_eq!(cmd("exit"), Command::Quit);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(error_kind("fly away"), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_help_lists_commands() {
        assert_eq!(error_kind("help"), ErrorKind::DisplayHelp);
        let text = parse("help").unwrap_err().to_string();
        assert!(text.contains("search"));
        assert!(text.contains("notifications"));
    }
}
