//! Command-line driver over the session core.

use std::io::Write;

use clap::{Parser, Subcommand};

use crate::api::LoginError;
use crate::guard::{landing_path, navigate, Verdict};
use crate::session::{SessionState, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "shopgate", version, about = "Session and access control for the store dashboards")]
pub struct Cli {
    /// Print the configuration JSON schema and exit.
    #[arg(long)]
    pub schema: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The subcommand to run; `status` when none was given.
    pub fn selected(&self) -> Command {
        self.command.clone().unwrap_or(Command::Status)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print who is logged in.
    Status,
    /// Log in and print where the dashboard continues.
    Login { email: String, password: String },
    Logout,
    /// Ask the guard what happens when navigating to a path.
    Visit { path: String },
}

/// Runs a session command against a restored store, writing user-facing output to `out`.
///
/// Returns `false` when the command failed in a way the user should see
/// reflected in the exit status.
pub async fn execute(
    store: &SessionStore,
    command: &Command,
    out: &mut impl Write,
) -> std::io::Result<bool> {
    match command {
        Command::Status => {
            write_status(&store.state(), out)?;
            Ok(true)
        }
        Command::Login { email, password } => match store.login(email, password).await {
            Ok(claims) => {
                writeln!(
                    out,
                    "Logged in as {} ({}), continue to {}",
                    claims.display_name().unwrap_or(&claims.id),
                    claims.role,
                    landing_path(&claims)
                )?;
                Ok(true)
            }
            Err(e @ LoginError::Network(_)) => {
                writeln!(out, "{}", e)?;
                Ok(false)
            }
            Err(e) => {
                writeln!(out, "Login failed: {}", e)?;
                Ok(false)
            }
        },
        Command::Logout => {
            store.logout().await;
            writeln!(out, "Logged out")?;
            Ok(true)
        }
        Command::Visit { path } => {
            let verdict = navigate(&store.state(), path);
            match verdict {
                Verdict::Render => writeln!(out, "render {}", path)?,
                Verdict::Redirect(target) => writeln!(out, "redirect {} -> {}", path, target)?,
                Verdict::Pending => writeln!(out, "pending")?,
                Verdict::NotFound => writeln!(out, "not found {}", path)?,
            }
            Ok(verdict != Verdict::NotFound)
        }
    }
}

fn write_status(state: &SessionState, out: &mut impl Write) -> std::io::Result<()> {
    match state {
        SessionState::Loading => writeln!(out, "Session is still loading"),
        SessionState::Anonymous => writeln!(out, "Not logged in"),
        SessionState::Authenticated(session) => {
            let claims = &session.claims;
            writeln!(
                out,
                "[{}] {} (id {}, role {}), expires at {}",
                claims.initial(),
                claims.name.as_deref().unwrap_or("-"),
                claims.id,
                claims.role,
                chrono::DateTime::from_timestamp(claims.exp, 0)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| claims.exp.to_string())
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("shopgate").chain(args.iter().copied()))
    }

    #[test]
    fn no_arguments_means_status() {
        let cli = parse(&[]).unwrap();
        assert!(!cli.schema);
        assert_eq!(cli.selected(), Command::Status);
    }

    #[test]
    fn parses_each_command() {
        assert_eq!(
            parse(&["login", "a@b.com", "secret"]).unwrap().selected(),
            Command::Login {
                email: "a@b.com".to_string(),
                password: "secret".to_string()
            }
        );
        assert_eq!(parse(&["logout"]).unwrap().selected(), Command::Logout);
        assert_eq!(
            parse(&["visit", "/owner/dashboard"]).unwrap().selected(),
            Command::Visit {
                path: "/owner/dashboard".to_string()
            }
        );
        assert!(parse(&["--schema"]).unwrap().schema);
    }

    #[test]
    fn rejects_wrong_arity() {
        let err = parse(&["login", "only-email"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
        assert!(parse(&["frobnicate"]).is_err());
    }
}
