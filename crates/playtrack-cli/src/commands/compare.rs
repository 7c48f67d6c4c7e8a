use clap::Args;
use playtrack_core::games::{compare_profiles, ApiClient, Game};
use playtrack_core::storage::Config;

#[derive(Args)]
pub struct CompareArgs {
    /// Game to query (dota2, overwatch, league, valorant, osrs)
    pub game: String,
    /// Your player identifier
    pub left: String,
    /// The friend or pro to compare against
    pub right: String,
}

pub fn run(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let game: Game = args.game.parse()?;
    let config = Config::load()?;
    let client = ApiClient::new(&config.stats.base_url)?;

    let provider = game.provider();
    let left = provider.fetch_profile(&client, &args.left)?;
    let right = provider.fetch_profile(&client, &args.right)?;
    let comparison = compare_profiles(&left, &right)?;

    println!("{} vs {} ({})", comparison.left, comparison.right, game.display_name());
    for m in &comparison.metrics {
        match (&m.left_text, &m.right_text) {
            (Some(l), Some(r)) => println!("{:<22} {:>12} | {:<12}", m.label, l, r),
            _ => println!(
                "{:<22} {:>12.1} | {:<12.1} ({:+.1})",
                m.label, m.left, m.right, m.delta
            ),
        }
    }
    Ok(())
}
