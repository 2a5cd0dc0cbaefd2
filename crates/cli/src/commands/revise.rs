//! `seteuk revise`: Spelling and spacing correction.

use clap::Args;
use std::path::PathBuf;

use crate::files;
use crate::runtime::Runtime;

#[derive(Args)]
pub struct ReviseArgs {
    /// Text to correct
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

pub async fn run(args: ReviseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = files::read_text(args.text, args.file.as_deref())?;
    let runtime = Runtime::load()?;

    let revised = runtime
        .record_generator()
        .revise_text(&text, runtime.credential().as_deref())
        .await?;

    println!("{revised}");
    Ok(())
}
