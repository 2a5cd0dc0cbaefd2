//! `seteuk generate`: Draft a record.

use chrono::{Local, NaiveDate};
use clap::Args;
use seteuk_core::{DatedActivity, FileCategory, GenerationParams, GradeLevel, RecordType, TextMetrics};
use seteuk_engine::{ConstraintProfile, HistoryStore, KnowledgeBaseCache, RecordCategory};
use std::path::PathBuf;

use crate::files;
use crate::runtime::Runtime;

#[derive(Args)]
pub struct GenerateArgs {
    /// Record category: subject, autonomy, club or behavior
    #[arg(short, long, default_value = "subject")]
    pub category: RecordCategory,

    /// Grade tier: 1 (most detailed) to 3 (most condensed)
    #[arg(short, long, default_value = "1")]
    pub grade: GradeLevel,

    /// Record type within the category (e.g. career under autonomy)
    #[arg(short, long)]
    pub record_type: Option<RecordType>,

    /// Draft text or notes
    #[arg(short, long, conflicts_with = "draft_file")]
    pub draft: Option<String>,

    /// Read the draft from a file
    #[arg(long)]
    pub draft_file: Option<PathBuf>,

    /// Report files (PDF, images or text)
    #[arg(long = "report")]
    pub reports: Vec<PathBuf>,

    /// Code files (always sent as text)
    #[arg(long = "code")]
    pub codes: Vec<PathBuf>,

    /// Subject or activity name (defaults to the stored one)
    #[arg(long)]
    pub subject: Option<String>,

    /// Extra instructions (defaults to the stored ones)
    #[arg(long)]
    pub instructions: Option<String>,

    /// Activity the record must open with
    #[arg(long)]
    pub activity: Option<String>,

    /// Activity date, YYYY-MM-DD (defaults to today)
    #[arg(long, requires = "activity")]
    pub date: Option<NaiveDate>,

    /// Do not add the result to history
    #[arg(long)]
    pub no_history: bool,
}

pub async fn run(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = Runtime::load()?;
    let category = args.category;
    let record_type = category.resolve_record_type(args.record_type)?;
    let cache = KnowledgeBaseCache::new(runtime.storage.clone(), category);

    let mut params = GenerationParams::new(args.grade);
    params.record_type = record_type;
    params.draft_text = match (&args.draft, &args.draft_file) {
        (Some(draft), _) => draft.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::new(),
    };
    params.report_files = args
        .reports
        .iter()
        .map(|p| files::load_upload(p, FileCategory::Report))
        .collect::<Result<_, _>>()?;
    params.code_files = args
        .codes
        .iter()
        .map(|p| files::load_code(p))
        .collect::<Result<_, _>>()?;
    params.custom_knowledge_base = cache.entries();
    params.custom_subject_name = args.subject.or_else(|| cache.subject_name());
    params.custom_instructions = args.instructions.or_else(|| cache.instructions());
    params.activity = dated_activity(args.activity, args.date);

    if !params.has_material() {
        eprintln!("⚠️  No draft, report, code or activity supplied; the record will rest on the knowledge base alone.");
    }

    let engine = runtime.record_generator();
    let credential = runtime.credential();
    let result = engine.generate(&params, credential.as_deref()).await?;

    let profile = ConstraintProfile::derive(params.grade_level, params.record_type);
    let metrics = TextMetrics::measure(&result.grade_version);
    let length = profile.measure(&result.grade_version);

    println!("{}\n", result.grade_version);
    println!(
        "📏 {} chars (with spaces) · {} chars (without) · {} bytes",
        metrics.chars_with_spaces, metrics.chars_without_spaces, metrics.bytes
    );
    if profile.contains(length) {
        println!("  ✅ Within target {profile}");
    } else {
        println!("  ⚠️  {length}{} is outside target {profile}", profile.unit.label());
    }

    if !args.no_history {
        let label = category.history_label(
            params.custom_subject_name.as_deref(),
            params.grade_level,
            params.record_type,
        );
        let mut history = HistoryStore::open(runtime.storage.clone(), category.history_key());
        let id = history.add(result, Some(label));
        println!("  🗂  Saved to {} history as {id}", category);
    }

    Ok(())
}

/// The `--activity` flag as a dated activity; blank descriptions are dropped.
fn dated_activity(description: Option<String>, date: Option<NaiveDate>) -> Option<DatedActivity> {
    let description = description?.trim().to_string();
    if description.is_empty() {
        return None;
    }
    Some(DatedActivity {
        description,
        date: date.unwrap_or_else(|| Local::now().date_naive()),
    })
}
