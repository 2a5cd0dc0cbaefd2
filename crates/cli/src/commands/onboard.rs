//! `seteuk onboard`: First-time setup.

use seteuk_config::AppConfig;
use seteuk_core::RecordType;
use seteuk_engine::reference;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("📝 seteuk — First-Time Setup");
    println!("============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    let config = if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
        AppConfig::load_from(&config_path)?
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
        AppConfig::default()
    };

    if !config.documents.is_remote() {
        let documents_dir = std::path::PathBuf::from(&config.documents.source);
        if !documents_dir.exists() {
            std::fs::create_dir_all(&documents_dir)?;
            println!("✅ Created document directory: {}", documents_dir.display());
        }
        println!("\n📄 Place these reference PDFs in {}:", documents_dir.display());
        for record_type in [RecordType::Club, RecordType::Behavior, RecordType::Autonomy] {
            for name in reference::fixed_documents(record_type) {
                let marker = if documents_dir.join(name).exists() { "✅" } else { "  " };
                println!("   {marker} {name}");
            }
        }
    }

    println!("\n📝 Next steps:");
    println!("   1. Run: seteuk key set <GEMINI_API_KEY>");
    println!("   2. Run: seteuk generate --grade 1 --draft \"...\"\n");

    Ok(())
}
