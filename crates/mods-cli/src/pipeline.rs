//! Generation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Load the dataset and extract records
//! 2. **Assemble**: Map each record's fields into a MODS document
//! 3. **Output**: Serialize each document to a .mods file
//!
//! Records fail independently: a malformed path or unreadable parent
//! aborts that record, not the run.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use mods_ingest::{Dataset, DatasetOptions, RecordKind};
use mods_map::{Record, assemble};
use mods_model::Mods;

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub dataset: PathBuf,
    pub output_dir: PathBuf,
    pub kind: RecordKind,
    pub ctrl_row: usize,
    pub force_dates: bool,
    /// Merge each record into a copy of its parent's document, looked
    /// up in the output directory by the record's id.
    pub copy_parent_to_children: bool,
    pub separator: String,
    pub dry_run: bool,
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub records: Vec<RecordOutcome>,
    pub elapsed_ms: u128,
    pub dry_run: bool,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.records
            .iter()
            .any(|outcome| matches!(outcome.status, RecordStatus::Failed(_)))
    }

    pub fn written_count(&self) -> usize {
        self.records
            .iter()
            .filter(|outcome| matches!(outcome.status, RecordStatus::Written))
            .count()
    }
}

/// Per-record outcome, in dataset row order.
#[derive(Debug)]
pub struct RecordOutcome {
    pub mapped_id: String,
    pub output_name: String,
    pub fields: usize,
    pub status: RecordStatus,
}

#[derive(Debug)]
pub enum RecordStatus {
    Written,
    /// Assembled but not written (dry run).
    Assembled,
    Failed(String),
}

/// Run the full generation pipeline.
pub fn run(options: &RunOptions) -> Result<RunResult> {
    let start = Instant::now();
    let span = info_span!("run", dataset = %options.dataset.display());
    let _guard = span.enter();

    let dataset = Dataset::open(
        &options.dataset,
        DatasetOptions {
            ctrl_row: options.ctrl_row,
            force_dates: options.force_dates,
            kind: options.kind,
        },
    )
    .with_context(|| format!("open dataset {}", options.dataset.display()))?;
    let records = dataset.records().context("extract records")?;
    info!(
        records = records.len(),
        columns = dataset.mapped_columns().len(),
        "dataset loaded"
    );

    if !options.dry_run {
        fs::create_dir_all(&options.output_dir).with_context(|| {
            format!("create output directory {}", options.output_dir.display())
        })?;
    }

    let mut taken: BTreeSet<String> = BTreeSet::new();
    let mut outcomes = Vec::with_capacity(records.len());
    for record in &records {
        let outcome = process_record(record, options, &mut taken);
        if let RecordStatus::Failed(reason) = &outcome.status {
            warn!(record = %outcome.mapped_id, %reason, "record failed");
        }
        outcomes.push(outcome);
    }

    let written = outcomes
        .iter()
        .filter(|o| matches!(o.status, RecordStatus::Written))
        .count();
    info!(written, total = outcomes.len(), "run complete");

    Ok(RunResult {
        output_dir: options.output_dir.clone(),
        records: outcomes,
        elapsed_ms: start.elapsed().as_millis(),
        dry_run: options.dry_run,
    })
}

fn process_record(
    record: &Record,
    options: &RunOptions,
    taken: &mut BTreeSet<String>,
) -> RecordOutcome {
    let mut outcome = RecordOutcome {
        mapped_id: record.mapped_id.clone(),
        output_name: String::new(),
        fields: record.fields.len(),
        status: RecordStatus::Written,
    };

    let parent = if options.copy_parent_to_children {
        match load_parent(&options.output_dir, record) {
            Ok(parent) => Some(parent),
            Err(error) => {
                outcome.status = RecordStatus::Failed(format!("{error:#}"));
                return outcome;
            }
        }
    } else {
        None
    };

    if !record.attached_files.is_empty() {
        debug!(
            record = %record.mapped_id,
            files = record.attached_files.len(),
            "record references attached data files"
        );
    }

    let mods = match assemble(record, parent, &options.separator) {
        Ok(mods) => mods,
        Err(error) => {
            outcome.status = RecordStatus::Failed(error.to_string());
            return outcome;
        }
    };

    let name = match output_name(&record.mapped_id, &options.output_dir, taken) {
        Ok(name) => name,
        Err(error) => {
            outcome.status = RecordStatus::Failed(format!("{error:#}"));
            return outcome;
        }
    };
    taken.insert(name.clone());
    outcome.output_name = name.clone();

    if options.dry_run {
        outcome.status = RecordStatus::Assembled;
        return outcome;
    }

    let path = options.output_dir.join(&name);
    match write_document(&mods, &path) {
        Ok(()) => debug!(record = %record.mapped_id, file = %name, "wrote document"),
        Err(error) => outcome.status = RecordStatus::Failed(format!("{error:#}")),
    }
    outcome
}

fn load_parent(output_dir: &Path, record: &Record) -> Result<Mods> {
    let path = output_dir.join(record.parent_output_name());
    let xml = fs::read_to_string(&path)
        .with_context(|| format!("read parent document {}", path.display()))?;
    Mods::from_xml(&xml).with_context(|| format!("parse parent document {}", path.display()))
}

fn write_document(mods: &Mods, path: &Path) -> Result<()> {
    let xml = mods.to_xml(true).context("serialize document")?;
    fs::write(path, xml).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Pick this record's output file name.
///
/// When several records in the same run resolve to the same mapped id,
/// later ones get `_1`, `_2`, ... suffixes. A file already on disk is
/// an error, never silently renamed around: re-running over the same
/// output directory would otherwise duplicate every record.
fn output_name(mapped_id: &str, output_dir: &Path, taken: &BTreeSet<String>) -> Result<String> {
    let mut candidate = format!("{mapped_id}.mods");
    let mut counter = 1u32;
    while taken.contains(&candidate) {
        candidate = format!("{mapped_id}_{counter}.mods");
        counter += 1;
    }
    if output_dir.join(&candidate).exists() {
        bail!("{} already exists in {}", candidate, output_dir.display());
    }
    Ok(candidate)
}
