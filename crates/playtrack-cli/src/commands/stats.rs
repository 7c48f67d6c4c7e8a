use clap::Args;
use playtrack_core::error::ValidationError;
use playtrack_core::games::{ApiClient, Game};
use playtrack_core::storage::Config;

#[derive(Args)]
pub struct StatsArgs {
    /// Game to query (dota2, overwatch, league, valorant, osrs)
    pub game: String,
    /// Player identifier; falls back to the saved profile for the game
    pub id: Option<String>,
}

pub fn run(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let game: Game = args.game.parse()?;
    let config = Config::load()?;

    let player_id = match args.id.or_else(|| config.players.get(game).map(String::from)) {
        Some(id) => id,
        None => {
            return Err(Box::new(ValidationError::NoSavedPlayer {
                game: game.to_string(),
            }))
        }
    };

    let client = ApiClient::new(&config.stats.base_url)?;
    let profile = game.provider().fetch_profile(&client, &player_id)?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
