//! `seteuk kb`: Per-category knowledge base.

use clap::Subcommand;
use seteuk_core::FileCategory;
use seteuk_engine::{KnowledgeBaseCache, RecordCategory};
use std::path::PathBuf;

use crate::files;
use crate::runtime::Runtime;

#[derive(Subcommand)]
pub enum KbAction {
    /// Replace the knowledge base with the given files
    Set {
        files: Vec<PathBuf>,
        #[arg(short, long, default_value = "subject")]
        category: RecordCategory,
        /// Subject or activity name used in prompts and history labels
        #[arg(long)]
        subject: Option<String>,
        /// Extra instructions added to every prompt
        #[arg(long)]
        instructions: Option<String>,
    },

    /// Show the stored knowledge base
    Show {
        #[arg(short, long, default_value = "subject")]
        category: RecordCategory,
    },

    /// Remove the stored knowledge base and subject name
    Reset {
        #[arg(short, long, default_value = "subject")]
        category: RecordCategory,
    },
}

fn cache(category: RecordCategory) -> Result<KnowledgeBaseCache, Box<dyn std::error::Error>> {
    let runtime = Runtime::load()?;
    Ok(KnowledgeBaseCache::new(runtime.storage, category))
}

pub fn run(action: KbAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        KbAction::Set {
            files: paths,
            category,
            subject,
            instructions,
        } => {
            let cache = cache(category)?;
            if !paths.is_empty() {
                let uploads = paths
                    .iter()
                    .map(|p| files::load_upload(p, FileCategory::Knowledge))
                    .collect::<Result<Vec<_>, _>>()?;
                cache.save(&uploads)?;
                println!("✅ Stored {} knowledge base file(s) for {category}", uploads.len());
            }
            if let Some(subject) = subject {
                cache.set_subject_name(Some(&subject))?;
                println!("✅ Subject name: {subject}");
            }
            if let Some(instructions) = instructions {
                cache.set_instructions(Some(&instructions))?;
                println!("✅ Custom instructions saved");
            }
        }
        KbAction::Show { category } => {
            let cache = cache(category)?;
            let uploads = cache.load();
            println!("📚 {category} knowledge base");
            if uploads.is_empty() {
                println!("  (none — built-in reference material is used)");
            }
            for file in &uploads {
                println!("  {} ({}, {} bytes of data)", file.name, file.mime_type, file.data.len());
            }
            println!("  Subject:      {}", cache.subject_name().unwrap_or_else(|| "-".into()));
            println!("  Instructions: {}", cache.instructions().unwrap_or_else(|| "-".into()));
        }
        KbAction::Reset { category } => {
            cache(category)?.reset()?;
            println!("✅ Knowledge base for {category} reset");
        }
    }

    Ok(())
}
