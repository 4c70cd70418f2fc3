use crate::cli::actions::Action;
use anyhow::Result;

/// Map parsed CLI matches to an action.
///
/// # Errors
///
/// Returns an error if a required argument is missing
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
    })
}
