//! Command-line definition

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use procura_model::{ModelResult, Role, Session};
use std::path::PathBuf;

/// The `procura` command
#[must_use]
pub fn command() -> Command {
    Command::new("procura")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Procurement reference data and tender reports")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("fixture")
                .long("fixture")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Serve data from a JSON fixture instead of the API"),
        )
        .arg(
            Arg::new("user-id")
                .long("user-id")
                .global(true)
                .default_value("cli")
                .help("Acting user"),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .global(true)
                .default_value("admin")
                .help("Acting role: admin, manager, staff or viewer"),
        )
        .arg(
            Arg::new("office-id")
                .long("office-id")
                .global(true)
                .value_parser(value_parser!(i64))
                .help("Office the user works in"),
        )
        .arg(
            Arg::new("wing-id")
                .long("wing-id")
                .global(true)
                .value_parser(value_parser!(i64))
                .help("Wing the user works in"),
        )
        .subcommand(
            Command::new("tenders")
                .about("List tenders with resolved office, wing and DEC names")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(Command::new("hierarchy").about("Show the office/wing/DEC tree"))
        .subcommand(
            Command::new("stats")
                .about("Dashboard summary")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

/// Session described by the global arguments
///
/// # Errors
/// Unknown role name.
pub fn session_from(matches: &ArgMatches) -> ModelResult<Session> {
    let role: Role = matches
        .get_one::<String>("role")
        .map_or(Ok(Role::Admin), |r| r.parse())?;
    let user = matches
        .get_one::<String>("user-id")
        .map_or("cli", String::as_str);

    let mut session = Session::new(user, role);
    if let Some(office) = matches.get_one::<i64>("office-id") {
        session = session.with_office(*office);
    }
    if let Some(wing) = matches.get_one::<i64>("wing-id") {
        session = session.with_wing(*wing);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use procura_model::{ModelError, OfficeId};

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn defaults_to_admin_session() {
        let matches = command().try_get_matches_from(["procura", "hierarchy"]).unwrap();
        let session = session_from(&matches).unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.user_id, "cli");
    }

    #[test]
    fn global_args_after_subcommand() {
        let matches = command()
            .try_get_matches_from([
                "procura", "tenders", "--json", "--role", "staff", "--office-id", "2",
            ])
            .unwrap();
        let session = session_from(&matches).unwrap();
        assert_eq!(session.role, Role::Staff);
        assert_eq!(session.office_id, Some(OfficeId(2)));

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "tenders");
        assert!(sub.get_flag("json"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let matches = command()
            .try_get_matches_from(["procura", "--role", "owner", "stats"])
            .unwrap();
        assert!(matches!(
            session_from(&matches),
            Err(ModelError::UnknownRole(role)) if role == "owner"
        ));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(command().try_get_matches_from(["procura"]).is_err());
    }
}
