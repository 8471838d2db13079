//! Admin Console - command-line shell
//!
//! Parses a command, runs it against the console core and prints the
//! `CommandResult` as JSON. All state lives in the core; the shell only
//! formats.

pub mod cli;
mod commands;
mod state;

use serde::Serialize;

use cli::{Cli, Command, CountriesCommand, PermissionsCommand, UsersCommand};
use commands::CommandResult;
use state::AppState;

/// Run one command; returns whether it succeeded
pub async fn run(cli: Cli) -> anyhow::Result<bool> {
    console_core::init_logging();

    let state = AppState::new(cli.config.as_deref())?;
    let compact = cli.compact;

    let success = match cli.command {
        Command::Login(args) => emit(
            &commands::auth::login(&state, &args.username, &args.password).await,
            compact,
        )?,
        Command::Logout => emit(&commands::auth::logout(&state), compact)?,
        Command::Status => emit(&commands::auth::status(&state), compact)?,
        Command::Navigate { route } => {
            emit(&commands::navigation::navigate(&state, route), compact)?
        }
        Command::Users(command) => match command {
            UsersCommand::List => emit(&commands::users::list_users(&state).await, compact)?,
            UsersCommand::Show { user_id } => {
                emit(&commands::users::get_user(&state, user_id).await, compact)?
            }
            UsersCommand::Save { json } => {
                emit(&commands::users::save_user(&state, &json).await, compact)?
            }
            UsersCommand::Delete { user_id } => {
                emit(&commands::users::delete_user(&state, user_id).await, compact)?
            }
        },
        Command::Permissions(PermissionsCommand::List) => emit(
            &commands::permissions::list_permissions(&state).await,
            compact,
        )?,
        Command::Countries(command) => match command {
            CountriesCommand::List => emit(
                &commands::countries::list_countries(&state).await,
                compact,
            )?,
            CountriesCommand::Show { country_id } => emit(
                &commands::countries::get_country(&state, country_id).await,
                compact,
            )?,
        },
    };

    tracing::debug!(success, status = %state.console().status(), "Command finished");

    Ok(success)
}

fn emit<T: Serialize>(result: &CommandResult<T>, compact: bool) -> anyhow::Result<bool> {
    let rendered = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    println!("{rendered}");
    Ok(result.success)
}
