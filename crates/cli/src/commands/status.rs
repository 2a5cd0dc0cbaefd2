//! `seteuk status`: Show system status.

use seteuk_config::AppConfig;
use seteuk_engine::{HistoryStore, KnowledgeBaseCache, RecordCategory};

use crate::runtime::Runtime;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = Runtime::load()?;
    let config = &runtime.config;

    let key_source = if config.has_api_key() {
        "config / environment"
    } else if runtime.credentials().get().is_some() {
        "stored"
    } else {
        "missing"
    };

    println!("📝 seteuk Status");
    println!("================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Model:        {}", config.model);
    println!("  Temperature:  {}", config.temperature);
    println!("  API URL:      {}", config.provider.api_url);
    println!("  API key:      {key_source}");
    println!("  Store:        {}", config.storage.path.display());
    println!(
        "  Documents:    {} ({})",
        config.documents.source,
        if config.documents.is_remote() { "http" } else { "directory" }
    );

    println!("\n  Category      History  KB files");
    for category in RecordCategory::ALL {
        let history = HistoryStore::load(runtime.storage.as_ref(), category.history_key());
        let kb = KnowledgeBaseCache::new(runtime.storage.clone(), category).load();
        println!("  {:<12}  {:>7}  {:>8}", category.label(), history.len(), kb.len());
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `seteuk onboard` first");
    }

    Ok(())
}
