//! `clientbook` - CLI for the client registry
//!
//! This binary drives the client book from the command line: each subcommand
//! replays one user action (filling the form, clicking edit or delete,
//! opening the list) and prints the banners the action raised.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use clientbook::cli::{
    AddCommand, CheckCommand, Cli, Command, ConfigCommand, OutputFormat, SaveChangesCommand,
};
use clientbook::form::FieldError;
use clientbook::validate::{is_blank, validate_field};
use clientbook::{
    init_logging, ClientBook, ClientRecord, Config, Field, FileArea, FormMode, NoticeKind,
    RecordStore, SubmitOutcome, View,
};

type Book = ClientBook<RecordStore, FileArea>;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    // Execute the command
    match cli.command {
        Command::Add(cmd) => handle_add(&config, &cmd).await,
        Command::List(cmd) => handle_list(&config, cmd.format).await,
        Command::Show { id } => handle_show(&config, id).await,
        Command::Edit { id } => handle_edit(&config, id).await,
        Command::SaveChanges(cmd) => handle_save_changes(&config, &cmd).await,
        Command::Delete { id } => handle_delete(&config, id).await,
        Command::Check(cmd) => Ok(handle_check(&cmd)),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

async fn open_book(config: &Config, mode: FormMode) -> Option<Book> {
    match ClientBook::start(config, mode).await {
        Ok(book) => Some(book),
        Err(alert) => {
            eprintln!("{alert}");
            None
        }
    }
}

/// Print the banners still on screen. Returns `true` if any is an error.
fn print_notices(book: &mut Book) -> bool {
    let mut failed = false;
    for notice in book.notices() {
        match notice.kind {
            NoticeKind::Success => println!("{notice}"),
            NoticeKind::Error => {
                failed = true;
                eprintln!("{notice}");
            }
        }
    }
    failed
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<ExitCode> {
    let Some(mut book) = open_book(config, FormMode::Create).await else {
        return Ok(ExitCode::FAILURE);
    };

    for (field, value) in cmd.values() {
        book.on_field_blur(field, value);
    }

    let outcome = book.on_submit().await;
    let failed = print_notices(&mut book);
    match outcome {
        SubmitOutcome::Created { id } => {
            println!("Client id: {id}");
            Ok(ExitCode::SUCCESS)
        }
        refused @ (SubmitOutcome::NotReady | SubmitOutcome::Invalid { .. }) => {
            if let Some(reason) = refused.refusal(book.submit_label()) {
                eprintln!("{reason}");
            }
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(exit_code(failed)),
    }
}

async fn handle_list(config: &Config, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let Some(mut book) = open_book(config, FormMode::Create).await else {
        return Ok(ExitCode::FAILURE);
    };

    let clients = book.list_clients().await;
    if let Some(clients) = &clients {
        print_clients(clients, format)?;
    }
    print_notices(&mut book);
    Ok(exit_code(clients.is_none()))
}

async fn handle_show(config: &Config, id: i64) -> anyhow::Result<ExitCode> {
    let Some(mut book) = open_book(config, FormMode::Create).await else {
        return Ok(ExitCode::FAILURE);
    };

    let client = book.show_client(id).await;
    if let Some(client) = &client {
        print_clients(std::slice::from_ref(client), OutputFormat::Plain)?;
    }
    print_notices(&mut book);
    Ok(exit_code(client.is_none()))
}

async fn handle_edit(config: &Config, id: i64) -> anyhow::Result<ExitCode> {
    let Some(mut book) = open_book(config, FormMode::Create).await else {
        return Ok(ExitCode::FAILURE);
    };

    let navigate = book.on_edit_click(id).await;
    let failed = print_notices(&mut book);
    if navigate == Some(View::EditForm) {
        println!("Client {id} is ready for editing; run `clientbook save-changes` to update it");
    }
    Ok(exit_code(failed || navigate.is_none()))
}

async fn handle_save_changes(
    config: &Config,
    cmd: &SaveChangesCommand,
) -> anyhow::Result<ExitCode> {
    let Some(mut book) = open_book(config, FormMode::Edit).await else {
        return Ok(ExitCode::FAILURE);
    };

    if book.load_edit_page().is_none() {
        print_notices(&mut book);
        eprintln!("No client selected for editing; run `clientbook edit <id>` first");
        return Ok(ExitCode::FAILURE);
    }

    for (field, value) in cmd.overrides() {
        book.on_field_blur(field, value);
    }

    let outcome = book.on_submit().await;
    let failed = print_notices(&mut book);
    match outcome {
        SubmitOutcome::Updated {
            navigate: View::List,
            ..
        } => {
            if let Some(clients) = book.list_clients().await {
                print_clients(&clients, OutputFormat::Table)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        refused @ (SubmitOutcome::NotReady | SubmitOutcome::Invalid { .. }) => {
            if let Some(reason) = refused.refusal(book.submit_label()) {
                eprintln!("{reason}");
            }
            Ok(ExitCode::FAILURE)
        }
        _ => Ok(exit_code(failed)),
    }
}

async fn handle_delete(config: &Config, id: i64) -> anyhow::Result<ExitCode> {
    let Some(mut book) = open_book(config, FormMode::Create).await else {
        return Ok(ExitCode::FAILURE);
    };

    let clients = book.on_delete_click(id).await;
    if let Some(clients) = &clients {
        print_clients(clients, OutputFormat::Table)?;
    }
    print_notices(&mut book);
    Ok(exit_code(clients.is_none()))
}

fn handle_check(cmd: &CheckCommand) -> ExitCode {
    let field: Field = cmd.field.into();
    if is_blank(&cmd.value) {
        eprintln!("{}", FieldError::Empty.message(field));
        return ExitCode::FAILURE;
    }
    if validate_field(field, &cmd.value) {
        println!("The {field} is valid");
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", FieldError::Format.message(field));
        ExitCode::FAILURE
    }
}

fn print_clients(clients: &[ClientRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(clients)?);
        }
        OutputFormat::Plain => {
            for client in clients {
                println!("Id:           {}", client.id);
                println!("Name:         {}", client.name);
                println!("Email:        {}", client.email);
                println!("Phone:        {}", client.phone);
                println!("Company code: {}", client.company_code);
                println!();
            }
        }
        OutputFormat::Table => {
            if clients.is_empty() {
                return Ok(());
            }
            println!(
                "{:>5}  {:<24}  {:<30}  {:<18}  {:<7}",
                "ID", "NAME", "EMAIL", "PHONE", "COMPANY"
            );
            for client in clients {
                println!(
                    "{:>5}  {:<24}  {:<30}  {:<18}  {:<7}",
                    client.id, client.name, client.email, client.phone, client.company_code
                );
            }
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Transfer]");
                println!(
                    "  Area path:          {}",
                    config.transfer_area_path().display()
                );
                println!();
                println!("[Notices]");
                println!(
                    "  Dismiss after (ms): {}",
                    config.notices.dismiss_after_ms
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
