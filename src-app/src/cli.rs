//! Command-line definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Admin console shell
///
/// The session persists between invocations; run `login` once and the
/// other commands reuse the stored token until it expires or the API
/// rejects it.
#[derive(Debug, Parser)]
#[command(name = "console", version, about)]
pub struct Cli {
    /// Configuration file (defaults to config.json in the data directory)
    #[arg(long, global = true, env = "CONSOLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Exchange credentials for a session token
    Login(LoginArgs),

    /// End the session and drop the stored token
    Logout,

    /// Show the session status and current route
    Status,

    /// Move the router to a route
    Navigate {
        route: String,
    },

    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),

    /// Inspect permissions
    #[command(subcommand)]
    Permissions(PermissionsCommand),

    /// Inspect countries
    #[command(subcommand)]
    Countries(CountriesCommand),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    pub username: String,

    #[arg(long, env = "CONSOLE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List,
    Show { user_id: i64 },
    /// Create or update a user from a JSON document
    Save { json: String },
    Delete { user_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum PermissionsCommand {
    List,
}

#[derive(Debug, Subcommand)]
pub enum CountriesCommand {
    List,
    Show { country_id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from(["console", "login", "alice", "--password", "secret"]).unwrap();
        match cli.command {
            Command::Login(args) => {
                assert_eq!(args.username, "alice");
                assert_eq!(args.password, "secret");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_nested_with_global_flags() {
        let cli = Cli::try_parse_from(["console", "users", "show", "7", "--compact"]).unwrap();
        assert!(cli.compact);
        assert!(matches!(cli.command, Command::Users(UsersCommand::Show { user_id: 7 })));

        assert!(Cli::try_parse_from(["console", "countries", "show", "abc"]).is_err());
    }
}
