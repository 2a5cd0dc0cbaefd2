//! `seteuk key`: API key storage.

use clap::Subcommand;

use crate::runtime::Runtime;

#[derive(Subcommand)]
pub enum KeyAction {
    /// Store an API key
    Set { key: String },

    /// Remove the stored API key
    Clear,
}

pub fn run(action: KeyAction) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Runtime::load()?.credentials();
    match action {
        KeyAction::Set { key } => {
            if key.trim().is_empty() {
                return Err("API key must not be empty".into());
            }
            credentials.set(&key)?;
            println!("✅ API key stored");
        }
        KeyAction::Clear => {
            credentials.clear()?;
            println!("✅ API key removed");
        }
    }
    Ok(())
}
