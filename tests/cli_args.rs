//! CLI argument parsing tests.

use anapi::cli::{Cli, Command, Entity};
use clap::Parser;

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["anapi", "get", "person", "d91b4b2e-ae0e"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id } => {
            assert!(matches!(entity, Entity::Person));
            assert_eq!(id, "d91b4b2e-ae0e");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["anapi", "list", "donations"]);

    assert!(!cli.json);
    match cli.command {
        Command::List { entity } => {
            assert!(matches!(entity, Entity::Donation));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_search_subcommand() {
    let cli = Cli::parse_from(["anapi", "search", "jane@example.com"]);

    match cli.command {
        Command::Search { by, term } => {
            assert_eq!(by, "email_address");
            assert_eq!(term, "jane@example.com");
        }
        _ => panic!("Expected Search command"),
    }

    let cli = Cli::parse_from(["anapi", "search", "--by", "given_name", "Jane"]);
    match cli.command {
        Command::Search { by, term } => {
            assert_eq!(by, "given_name");
            assert_eq!(term, "Jane");
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn test_cli_parses_resources_subcommand() {
    let cli = Cli::parse_from(["anapi", "resources"]);
    assert!(matches!(cli.command, Command::Resources));
}

#[test]
fn test_global_json_flag() {
    // --json before subcommand
    let cli = Cli::parse_from(["anapi", "--json", "list", "tags"]);
    assert!(cli.json);

    // --json after subcommand (global flag)
    let cli = Cli::parse_from(["anapi", "list", "tags", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_entity_plural_aliases() {
    let cli = Cli::parse_from(["anapi", "list", "people"]);
    assert!(matches!(
        cli.command,
        Command::List {
            entity: Entity::Person
        }
    ));

    let cli = Cli::parse_from(["anapi", "list", "tags"]);
    assert!(matches!(
        cli.command,
        Command::List {
            entity: Entity::Tag
        }
    ));

    let cli = Cli::parse_from(["anapi", "get", "tag", "t-1"]);
    assert!(matches!(
        cli.command,
        Command::Get {
            entity: Entity::Tag,
            ..
        }
    ));
}
