//! Interactive chat driver for the assistant core.

use std::env;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use hermes::catalog::CatalogClient;
use hermes::engine::templates;
use hermes::{AssistantConfig, ChatSession, HttpBackend, Role};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default tracing subscriber")?;

    // optional TOML config path as the first argument, env overrides otherwise
    let config = match env::args().nth(1) {
        Some(path) => AssistantConfig::from_file(&path)?,
        None => AssistantConfig::from_env(),
    };

    let catalog = CatalogClient::new(&config.catalog)?;
    let backend = HttpBackend::new(&config.backend)?;
    let mut session = ChatSession::new(Box::new(backend), config.clone());

    println!(
        "{} | {}",
        config.persona.name,
        templates::active_label(chrono::Local::now())
    );
    println!("Commands: /products [keyword], /quit. Anything else goes to the assistant.");
    for message in session.bootstrap().await {
        println!("[{}] {}", role_tag(message.role), message.text);
    }

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    prompt().await?;
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            prompt().await?;
            continue;
        }
        if input == "/quit" {
            break;
        }
        if let Some(keyword) = input.strip_prefix("/products") {
            list_products(&catalog, keyword.trim(), &config.currency.prefix).await;
            prompt().await?;
            continue;
        }

        let turn = session.turn(input).await;
        for message in &turn.messages {
            println!("[ai] {message}");
        }
        for product in &turn.details {
            println!("{}", product.as_text(&config.currency.prefix));
        }
        if let Some(redirect) = turn.redirect {
            tokio::time::sleep(redirect.delay).await;
            println!("Continuing to {}", redirect.url);
            break;
        }
        prompt().await?;
    }
    Ok(())
}

fn role_tag(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Ai => "ai",
    }
}

async fn prompt() -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"> ").await?;
    stdout.flush().await?;
    Ok(())
}

async fn list_products(catalog: &CatalogClient, keyword: &str, currency_prefix: &str) {
    match catalog.search(keyword, false).await {
        Ok(products) if products.is_empty() => println!("No products matched."),
        Ok(products) => {
            for product in products {
                println!("{}", product.as_text(currency_prefix));
            }
        }
        Err(error) => println!("Could not load the catalog: {error}"),
    }
}
