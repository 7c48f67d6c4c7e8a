use clap::Subcommand;
use playtrack_core::games::Game;
use playtrack_core::storage::Config;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Save a player identifier for a game
    Set {
        /// Game (dota2, overwatch, league, valorant, osrs)
        game: String,
        /// Player identifier (steam account id, battletag, ...)
        id: String,
    },
    /// List saved player identifiers
    List,
    /// Remove the saved identifier for a game
    Remove { game: String },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;

    match action {
        ProfileAction::Set { game, id } => {
            let game: Game = game.parse()?;
            config.players.set(game, Some(id.clone()));
            config.save()?;
            println!("saved {} for {}", id, game.display_name());
        }
        ProfileAction::List => {
            let entries = config.players.entries();
            if entries.is_empty() {
                println!("no saved players");
            }
            for (game, id) in entries {
                println!("{:<10} {:<24} ({})", game.to_string(), id, game.id_label());
            }
        }
        ProfileAction::Remove { game } => {
            let game: Game = game.parse()?;
            config.players.set(game, None);
            config.save()?;
            println!("removed saved player for {}", game.display_name());
        }
    }
    Ok(())
}
