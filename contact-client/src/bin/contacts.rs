use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use contact_client::{
    ClientConfig, Confirm, ContactClient, DeleteOutcome, FormField, HttpContactApi, Notice,
    Notifier, SubmitOutcome,
};
use log::info;

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        println!("{}", notice);
    }
}

struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match prompt_line(&format!("{} [y/N] ", prompt)) {
            Ok(Some(answer)) => matches!(answer.as_str(), "y" | "Y" | "yes"),
            _ => false,
        }
    }
}

// None once stdin is closed
fn prompt_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

async fn add_contact(client: &ContactClient<HttpContactApi>) -> Result<()> {
    for (field, label) in [
        (FormField::Name, "Full Name: "),
        (FormField::Email, "Email Address: "),
        (FormField::Phone, "Phone Number: "),
        (FormField::Message, "Message (Optional): "),
    ] {
        let value = prompt_line(label)
            .context("Failed to read form input")?
            .unwrap_or_default();
        client.set_field(field, &value);
    }

    if !client.can_submit() {
        println!("Name, phone and an email containing '@' are required.");
        return Ok(());
    }

    match client.submit().await {
        SubmitOutcome::Saved(contact) => info!("Saved contact {}", contact.id),
        SubmitOutcome::Failed(err) => info!("Save failed: {}", err),
        SubmitOutcome::Blocked => println!("A save is already in progress."),
    }
    print!("{}", client.render());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = ClientConfig::from_env();
    info!("Using contact API at {}", config.api_url);

    let client = ContactClient::new(
        HttpContactApi::new(&config.api_url),
        Arc::new(TerminalNotifier),
    );
    client.activate().await;
    print!("{}", client.render());

    loop {
        let Some(line) = prompt_line("contacts> ").context("Failed to read command")? else {
            break;
        };
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("list"), _) => {
                client.refresh().await;
                print!("{}", client.render());
            }
            (Some("add"), _) => add_contact(&client).await?,
            (Some("delete"), Some(id)) => {
                if let DeleteOutcome::Deleted = client.delete(id, &TerminalConfirm).await {
                    print!("{}", client.render());
                }
            }
            (Some("quit") | Some("exit"), _) => break,
            (None, _) => continue,
            _ => println!("Commands: list | add | delete <id> | quit"),
        }
    }

    Ok(())
}
