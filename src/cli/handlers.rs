use std::io::{self, Read};
use std::path::PathBuf;

use chrono::{SubsecRound, Utc};

use crate::config::{collection_path, IngestConfig};
use crate::entity::{Note, NoteCandidate, NotePriority, NoteStatus};
use crate::error::{NotekeepError, Result};
use crate::llm::{ChatClient, LlmError, RetryingModel};
use crate::pipeline::{commit_candidate, IngestPipeline, IngestReport, RunCounters, SourceContext};
use crate::source;
use crate::storage::NoteStore;
use crate::warnings::{check_thresholds, format_warning};

use super::commands::IngestArgs;

fn print_size_warnings(store: &NoteStore) {
    for warning in check_thresholds(store.len(), store.file_size()) {
        eprintln!("{}", format_warning(&warning));
    }
}

fn apply_overrides(config: &mut IngestConfig, args: &IngestArgs) {
    if !args.extensions.is_empty() {
        config.extensions = args.extensions.clone();
    }
    if let Some(model) = &args.model {
        config.model.model = model.clone();
    }
    if let Some(base) = &args.api_base {
        config.model.api_base = base.trim_end_matches('/').to_string();
    }
    if let Some(attempts) = args.max_attempts {
        config.max_attempts = attempts.clamp(1, 10);
    }
    if let Some(ms) = args.retry_delay_ms {
        config.retry_delay_ms = ms;
    }
    if let Some(ms) = args.pace_ms {
        config.pace_ms = ms;
    }
}

pub fn handle_ingest(file: Option<PathBuf>, args: IngestArgs) -> Result<()> {
    let mut config = IngestConfig::from_env();
    apply_overrides(&mut config, &args);

    let items = source::discover(&args.root, &config.extensions)?;
    let path = collection_path(file);
    let mut store = NoteStore::load(&path);
    tracing::debug!(
        root = %args.root.display(),
        items = items.len(),
        collection = %store.path().display(),
        state = ?store.load_state(),
        "starting ingestion"
    );

    let report = if items.is_empty() {
        IngestReport::default()
    } else {
        let client = ChatClient::new(config.model.clone()).map_err(|e| match e {
            LlmError::MissingApiKey => NotekeepError::Config(
                "no API key: set NOTEKEEP_API_KEY or OPENAI_API_KEY".to_string(),
            ),
            other => NotekeepError::Llm(other),
        })?;
        let model = RetryingModel::new(client, config.retry_policy());
        let pipeline = IngestPipeline::new(&model).with_pacing(config.pacing());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(pipeline.run(&items, &mut store))
    };

    let saved = if args.dry_run {
        tracing::info!(path = %path.display(), "dry run, collection not written");
        Ok(())
    } else {
        store.save()
    };

    println!(
        "Processed {} files, added {} notes.",
        report.seen, report.added
    );
    saved?;
    if !args.dry_run {
        print_size_warnings(&store);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_add(
    file: Option<PathBuf>,
    text: Option<String>,
    title: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    private: bool,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let text = if stdin {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        content
    } else {
        text.unwrap_or_default()
    };
    if text.trim().is_empty() {
        return Err(NotekeepError::EmptyText);
    }

    // Explicit user input is validated up front instead of falling back.
    let status: Option<NoteStatus> = status
        .map(|s| s.parse().map_err(NotekeepError::InvalidValue))
        .transpose()?;
    let priority: Option<NotePriority> = priority
        .map(|p| p.parse().map_err(NotekeepError::InvalidValue))
        .transpose()?;

    let mut store = NoteStore::load(&collection_path(file));
    let mut counters = RunCounters::from_notes(store.notes());

    let candidate = NoteCandidate {
        title: title.filter(|t| !t.trim().is_empty()),
        text: Some(text.clone()),
        status: status.map(|s| s.to_string()),
        priority: priority.map(|p| p.to_string()),
        is_private: Some(private),
        ..NoteCandidate::default()
    };
    let source = SourceContext {
        text: &text,
        name_hint: None,
        created_at: Utc::now().trunc_subsecs(3),
    };
    let note = commit_candidate(candidate, &source, &mut store, &mut counters)?;
    store.save()?;
    print_size_warnings(&store);

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note {} - {}", note.id, note.title);
    }

    Ok(())
}

pub fn handle_list(file: Option<PathBuf>, status: Option<String>, json: bool) -> Result<()> {
    let wanted: Option<NoteStatus> = status
        .map(|s| s.parse().map_err(NotekeepError::InvalidValue))
        .transpose()?;

    let store = NoteStore::load(&collection_path(file));
    let notes: Vec<&Note> = store
        .notes()
        .iter()
        .filter(|n| wanted.map_or(true, |s| n.status == s))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        for note in notes {
            let lock = if note.is_private { " (private)" } else { "" };
            println!(
                "{} [{}|{}] {}{}",
                note.id, note.status, note.priority, note.title, lock
            );
        }
    }

    Ok(())
}

pub fn handle_get(file: Option<PathBuf>, id: String, json: bool) -> Result<()> {
    let store = NoteStore::load(&collection_path(file));
    let note = store
        .get(&id)
        .ok_or_else(|| NotekeepError::NoteNotFound(id.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
        return Ok(());
    }

    println!("Note {}", note.id);
    println!("Title: {}", note.title);
    println!("Status: {}", note.status);
    println!("Priority: {}", note.priority);
    if note.is_private {
        println!("Private: yes");
    }
    if let Some(created) = note.created_at {
        println!("Created: {}", created.format("%Y-%m-%d %H:%M"));
    }
    if let Some(order) = note.order {
        println!("Order: {}", order);
    }
    println!("\n{}", note.text);

    Ok(())
}
