//! Sync subcommand for mirroring local data to the hosted backend.
//!
//! Push uploads the tracked-game list and a fresh stats blob per saved
//! player; pull prints what the backend currently holds.

use clap::Subcommand;
use playtrack_core::backend::{BackendSession, UserStore};
use playtrack_core::games::ApiClient;
use playtrack_core::storage::{Config, Database};
use playtrack_core::wellness::WellnessTracker;

#[derive(Subcommand)]
pub enum SyncAction {
    /// Upload game list and per-game stats blobs
    Push,
    /// Print the backend's copy of the data
    Pull,
    /// Show what would be pushed
    Status,
}

pub fn run(action: SyncAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        SyncAction::Push => {
            let session = BackendSession::require()?;
            let store = UserStore::new(&config.backend.base_url, session)?;
            let client = ApiClient::new(&config.stats.base_url)?;

            let entries = config.players.entries();
            let games: Vec<_> = entries.iter().map(|(g, _)| *g).collect();
            store.put_game_list(&games)?;
            println!("pushed game list ({} games)", games.len());

            let db = Database::open()?;
            let tracker = WellnessTracker::load(&db)?;
            for (game, player_id) in &entries {
                let profile = game.provider().fetch_profile(&client, player_id)?;
                let blob = serde_json::json!({
                    "player_id": player_id,
                    "profile": profile,
                    "wellness_balance": tracker.balance(),
                    "pushed_at": chrono::Utc::now().to_rfc3339(),
                });
                store.put_stats(*game, blob)?;
                println!("pushed {} stats for {}", game, player_id);
            }
        }
        SyncAction::Pull => {
            let session = BackendSession::require()?;
            let store = UserStore::new(&config.backend.base_url, session)?;

            let games = store.fetch_game_list()?;
            println!("{} tracked games", games.len());
            for game in games {
                match store.fetch_stats(game)? {
                    Some(blob) => {
                        println!("{}", serde_json::to_string_pretty(&blob)?)
                    }
                    None => println!("{game}: no stored stats"),
                }
            }
        }
        SyncAction::Status => {
            let logged_in = BackendSession::load()?.is_some();
            let entries = config.players.entries();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "logged_in": logged_in,
                    "games_to_push": entries
                        .iter()
                        .map(|(g, id)| serde_json::json!({"game": g, "player_id": id}))
                        .collect::<Vec<_>>(),
                }))?
            );
        }
    }
    Ok(())
}
