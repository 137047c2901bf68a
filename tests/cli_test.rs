//! Argument parsing and error-to-exit-code mapping

use clap::{CommandFactory, Parser};

use famtree::application::ApplicationError;
use famtree::cli::args::{Cli, Commands, ConfigCommands};
use famtree::cli::CliError;
use famtree::domain::Language;
use famtree::exitcode;

#[test]
fn given_cli_definition_when_asserted_then_valid() {
    Cli::command().debug_assert();
}

#[test]
fn given_multiword_search_when_parsing_then_collects_query_words() {
    let cli = Cli::try_parse_from(["famtree", "search", "Kaduji", "Bhatt", "--json"]).unwrap();
    match cli.command {
        Some(Commands::Search { query, json }) => {
            assert_eq!(query.join(" "), "Kaduji Bhatt");
            assert!(json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn given_global_flags_after_subcommand_when_parsing_then_accepted() {
    let cli = Cli::try_parse_from(["famtree", "show", "--depth", "2", "-l", "gu", "-dd"]).unwrap();
    assert_eq!(cli.lang, Some(Language::Gujarati));
    assert_eq!(cli.debug, 2);
    assert!(matches!(
        cli.command,
        Some(Commands::Show { depth: Some(2), .. })
    ));
}

#[test]
fn given_config_init_force_when_parsing_then_flag_set() {
    let cli = Cli::try_parse_from(["famtree", "config", "init", "--force"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommands::Init { force: true }
        })
    ));
}

#[test]
fn given_search_without_query_when_parsing_then_rejected() {
    assert!(Cli::try_parse_from(["famtree", "search"]).is_err());
}

#[test]
fn given_errors_when_mapping_exit_codes_then_sysexits() {
    assert_eq!(
        CliError::NotFound("x".into()).exit_code(),
        exitcode::NOT_FOUND
    );
    assert_eq!(
        CliError::InvalidArgs("x".into()).exit_code(),
        exitcode::USAGE
    );
    let config: CliError = ApplicationError::Config {
        message: "bad".into(),
    }
    .into();
    assert_eq!(config.exit_code(), exitcode::CONFIG);
    let data: CliError = ApplicationError::UnsupportedFormat("x.yaml".into()).into();
    assert_eq!(data.exit_code(), exitcode::DATAERR);
}
