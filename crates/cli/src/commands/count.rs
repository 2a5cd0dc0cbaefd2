//! `seteuk count`: Character and byte counts.

use clap::Args;
use seteuk_core::{GradeLevel, RecordType, TextMetrics};
use seteuk_engine::ConstraintProfile;
use std::path::PathBuf;

use crate::files;

#[derive(Args)]
pub struct CountArgs {
    /// Text to measure
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Measure the contents of a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Also check against the target range of this grade tier
    #[arg(short, long)]
    pub grade: Option<GradeLevel>,

    /// Record type for the target range (byte-based when set)
    #[arg(short, long, requires = "grade")]
    pub record_type: Option<RecordType>,
}

pub fn run(args: CountArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = files::read_text(args.text, args.file.as_deref())?;
    let metrics = TextMetrics::measure(&text);

    println!("  With spaces:     {}", metrics.chars_with_spaces);
    println!("  Without spaces:  {}", metrics.chars_without_spaces);
    println!("  Bytes:           {}", metrics.bytes);

    if let Some(grade) = args.grade {
        let profile = ConstraintProfile::derive(grade, args.record_type);
        let length = profile.measure(&text);
        let verdict = if profile.contains(length) { "✅" } else { "⚠️ " };
        println!("  {verdict} {length}{} against {grade} target {profile}", profile.unit.label());
    }

    Ok(())
}
