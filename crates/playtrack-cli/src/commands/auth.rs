use clap::Subcommand;
use playtrack_core::backend::{AuthClient, BackendSession};
use playtrack_core::storage::Config;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create a backend account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in to the backend
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Remove the stored session
    Logout,
    /// Check authentication status
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Signup { email, password } => {
            let config = Config::load()?;
            let client = AuthClient::new(&config.backend.base_url)?;
            let session = client.sign_up(&email, &password)?;
            println!("signed up as {} (user {})", session.email, session.user_id);
        }
        AuthAction::Login { email, password } => {
            let config = Config::load()?;
            let client = AuthClient::new(&config.backend.base_url)?;
            let session = client.log_in(&email, &password)?;
            println!("logged in as {} (user {})", session.email, session.user_id);
        }
        AuthAction::Logout => {
            BackendSession::clear()?;
            println!("logged out");
        }
        AuthAction::Status => match BackendSession::load()? {
            Some(session) => {
                println!("logged in as {} (user {})", session.email, session.user_id)
            }
            None => println!("not logged in"),
        },
    }
    Ok(())
}
