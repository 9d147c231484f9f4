// src/main.rs
//
// Headless entry point: wires the application state the way a UI shell
// would, then prints the home summary and the first page of characters.

use tracing_subscriber::EnvFilter;

use multiverso_hub::application::commands::{home_summary, list_characters};
use multiverso_hub::application::state::AppState;
use multiverso_hub::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. LOGGING (log records are bridged into tracing)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. APPLICATION STATE
    let config = AppConfig::from_env();
    let state = AppState::initialize(config).await?;

    // 3. FIRST SCREENS
    let summary = home_summary(&state).await.map_err(anyhow::Error::msg)?;
    println!(
        "{} characters in the multiverse, {} favorite(s), {}",
        summary.total_characters,
        summary.favorites_count,
        if summary.is_connected { "online" } else { "offline" }
    );

    let list = list_characters(&state).await.map_err(anyhow::Error::msg)?;
    if let Some(error) = &list.error {
        println!("{}", error);
    }
    for character in &list.characters {
        println!(
            "#{:<4} {:<32} {:<8} {}{}",
            character.id,
            character.name,
            character.status,
            character.species,
            if character.is_favorite { "  ♥" } else { "" }
        );
    }
    if list.from_cache {
        println!("(showing {} cached characters)", list.characters.len());
    }

    state.favorites.flush().await;
    Ok(())
}
