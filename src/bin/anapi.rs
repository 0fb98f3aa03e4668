//! Action Network API CLI binary.
//!
//! A command-line interface for interacting with the Action Network API.

use anapi::cli::{Cli, Command, Entity};
use anapi::output::PrettyPrint;
use anapi::{find_people, AnClient, Donation, Get, Identified, List, Person, Tag};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match AnClient::from_env().await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set AN_API_KEY environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &AnClient, cli: Cli) -> anapi::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, cli.json).await,
        Command::List { entity } => handle_list(client, entity, cli.json).await,
        Command::Search { by, term } => handle_search(client, &by, &term, cli.json).await,
        Command::Resources => handle_resources(client, cli.json),
    }
}

async fn handle_get(client: &AnClient, entity: Entity, id: &str, json: bool) -> anapi::Result<()> {
    match entity {
        Entity::Person => {
            let person = Person::get(client, id).await?;
            output_single(&person, json)
        }
        Entity::Tag => {
            let tag = Tag::get(client, id).await?;
            output_single(&tag, json)
        }
        Entity::Donation => {
            eprintln!("Hint: Use 'anapi list donations'");
            Err(anapi::AnError::ApiError {
                message: "donations can only be listed, not retrieved individually".to_string(),
                status_code: None,
            })
        }
    }
}

async fn handle_list(client: &AnClient, entity: Entity, json: bool) -> anapi::Result<()> {
    match entity {
        Entity::Person => {
            let people = Person::list_all(client).await?;
            output_items(&people, json, PersonRow::try_from_person)
        }
        Entity::Donation => {
            let donations = Donation::list_all(client).await?;
            output_items(&donations, json, DonationRow::try_from_donation)
        }
        Entity::Tag => {
            let tags = Tag::list_all(client).await?;
            output_items(&tags, json, TagRow::try_from_tag)
        }
    }
}

async fn handle_search(client: &AnClient, by: &str, term: &str, json: bool) -> anapi::Result<()> {
    let people = find_people(client, by, term).await?;
    output_items(&people, json, PersonRow::try_from_person)
}

fn handle_resources(client: &AnClient, json: bool) -> anapi::Result<()> {
    let links = client.links();
    if json {
        let relations: Vec<&str> = links.relations().collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "motd": links.motd(),
                "base_url": links.base_url().as_str(),
                "relations": relations,
            }))?
        );
    } else {
        if let Some(motd) = links.motd() {
            println!("{motd}\n");
        }
        let mut relations: Vec<&str> = links.relations().collect();
        relations.sort_unstable();
        for relation in relations {
            println!("{relation}");
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> anapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_items<T, R, F>(items: &[T], json: bool, to_row: F) -> anapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> anapi::Result<R>,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect::<anapi::Result<_>>()?;
        println!("{}", Table::new(rows));
        println!("\n{} total", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct PersonRow {
    id: String,
    name: String,
    email: String,
}

impl PersonRow {
    fn try_from_person(p: &Person) -> anapi::Result<Self> {
        Ok(Self {
            id: p.id()?.to_string(),
            name: p.full_name(),
            email: p.primary_email().unwrap_or_default().to_string(),
        })
    }
}

#[derive(Tabled)]
struct DonationRow {
    id: String,
    amount: String,
    created: String,
    recurring: String,
    #[tabled(rename = "next charge")]
    next_charge: String,
}

impl DonationRow {
    fn try_from_donation(d: &Donation) -> anapi::Result<Self> {
        let next_charge = match d.next_donation()? {
            Some(next) => next.format("%Y-%m-%d").to_string(),
            None => String::new(),
        };
        Ok(Self {
            id: d.id()?.to_string(),
            amount: d.amount.clone().unwrap_or_default(),
            created: d.created_date.format("%Y-%m-%d").to_string(),
            recurring: d.period().unwrap_or("no").to_string(),
            next_charge,
        })
    }
}

#[derive(Tabled)]
struct TagRow {
    id: String,
    name: String,
}

impl TagRow {
    fn try_from_tag(t: &Tag) -> anapi::Result<Self> {
        Ok(Self {
            id: t.id()?.to_string(),
            name: t.name.clone().unwrap_or_default(),
        })
    }
}
