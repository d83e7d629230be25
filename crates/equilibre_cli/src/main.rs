//! Command-line companion for the Equilibre core.
//!
//! # Responsibility
//! - Inspect and edit a SQLite-backed record store from a terminal.
//! - Print the merged timeline once, or watch it refresh live.

use clap::{Args, Parser, Subcommand};
use equilibre_core::{
    core_version, default_log_level, describe, erase_all_data, init_logging, start_polling,
    AppConfig, AudioNoteService, DiaryService, RecordId, RenderIcon, SqliteRecordStore,
    TaskService, TimelineAggregator, TimelineSnapshot, EMOTIONS,
};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

type CliResult<T> = Result<T, Box<dyn Error>>;

#[derive(Debug, Parser)]
#[command(name = "equilibre", version, about = "Mood journal, audio notes and tasks on one timeline")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database file (overrides the config file).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the merged timeline once.
    Timeline,
    /// Keep refreshing the timeline and print every change until Ctrl-C.
    Watch,
    #[command(subcommand)]
    Task(TaskCommand),
    #[command(subcommand)]
    Diary(DiaryCommand),
    #[command(subcommand)]
    Audio(AudioCommand),
    /// Delete every stored record.
    Erase,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    Add { text: String },
    Toggle(IdArg),
    Delete(IdArg),
    List,
}

#[derive(Debug, Subcommand)]
enum DiaryCommand {
    Add {
        emotion: String,
        #[arg(default_value = "")]
        note: String,
    },
    Delete(IdArg),
    List,
    /// List selectable emotions.
    Emotions,
}

#[derive(Debug, Subcommand)]
enum AudioCommand {
    Add { uri: String },
    Delete(IdArg),
    List,
}

#[derive(Debug, Args)]
struct IdArg {
    id: RecordId,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }
    if let Some(log_dir) = cli.log_dir {
        config.log_dir = Some(log_dir);
    }
    if let Some(level) = cli.log_level {
        config.log_level = Some(level);
    }

    if let Some(log_dir) = &config.log_dir {
        let level = config.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let store = Arc::new(SqliteRecordStore::open(config.db_path_or_default())?);

    match cli.command {
        Command::Timeline => {
            let timeline = TimelineAggregator::new(Arc::clone(&store), config.timeline.clone());
            timeline.refresh().await;
            print_snapshot(&timeline.current());
        }
        Command::Watch => watch(store, &config).await?,
        Command::Task(action) => run_task(TaskService::new(store), action).await?,
        Command::Diary(action) => run_diary(DiaryService::new(store), action).await?,
        Command::Audio(action) => run_audio(AudioNoteService::new(store), action).await?,
        Command::Erase => {
            erase_all_data(store.as_ref()).await?;
            println!("all records erased");
        }
    }

    Ok(())
}

async fn watch(store: Arc<SqliteRecordStore>, config: &AppConfig) -> CliResult<()> {
    let timeline = Arc::new(TimelineAggregator::new(store, config.timeline.clone()));
    let mut feed = timeline.subscribe();
    let poller = start_polling(&timeline);
    println!(
        "watching timeline every {} ms (Ctrl-C to stop)",
        config.timeline.poll_interval_ms
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            snapshot = feed.changed() => match snapshot {
                Some(snapshot) => print_snapshot(&snapshot),
                None => break,
            },
        }
    }

    poller.deactivate().await;
    Ok(())
}

async fn run_task(service: TaskService<Arc<SqliteRecordStore>>, action: TaskCommand) -> CliResult<()> {
    match action {
        TaskCommand::Add { text } => {
            let task = service.add_task(text).await?;
            println!("added task {} ({})", task.id, task.created_at);
        }
        TaskCommand::Toggle(IdArg { id }) => {
            let task = service.toggle_task(id).await?;
            let state = if task.completed { "done" } else { "open" };
            println!("task {} is now {state}", task.id);
        }
        TaskCommand::Delete(IdArg { id }) => {
            service.delete_task(id).await?;
            println!("deleted task {id}");
        }
        TaskCommand::List => {
            for task in service.list_tasks().await? {
                let mark = if task.completed { "x" } else { " " };
                println!("[{mark}] {:>14}  {}  ({})", task.id, task.text, task.created_at);
            }
        }
    }
    Ok(())
}

async fn run_diary(
    service: DiaryService<Arc<SqliteRecordStore>>,
    action: DiaryCommand,
) -> CliResult<()> {
    match action {
        DiaryCommand::Add { emotion, note } => {
            let entry = service.add_entry(&emotion, note).await?;
            println!("recorded {} at {} {}", entry.emotion, entry.date, entry.time);
        }
        DiaryCommand::Delete(IdArg { id }) => {
            service.delete_entry(id).await?;
            println!("deleted entry {id}");
        }
        DiaryCommand::List => {
            for entry in service.list_entries().await? {
                println!(
                    "{:>14}  {}  {} {}  {}",
                    entry.id, entry.emotion, entry.date, entry.time, entry.note
                );
            }
        }
        DiaryCommand::Emotions => {
            for emotion in EMOTIONS {
                println!("{}  {}", emotion.symbol, emotion.name);
            }
        }
    }
    Ok(())
}

async fn run_audio(
    service: AudioNoteService<Arc<SqliteRecordStore>>,
    action: AudioCommand,
) -> CliResult<()> {
    match action {
        AudioCommand::Add { uri } => {
            let note = service.record_note(uri).await?;
            println!("stored audio note {} ({} {})", note.id, note.date, note.time);
        }
        AudioCommand::Delete(IdArg { id }) => {
            service.delete_note(id).await?;
            println!("deleted audio note {id}");
        }
        AudioCommand::List => {
            for note in service.list_notes().await? {
                println!("{:>14}  {} {}  {}", note.id, note.date, note.time, note.uri);
            }
        }
    }
    Ok(())
}

fn print_snapshot(snapshot: &TimelineSnapshot) {
    println!("-- timeline revision {} --", snapshot.revision);
    if snapshot.entries.is_empty() {
        println!("(empty)");
        return;
    }
    for entry in &snapshot.entries {
        let Some(description) = describe(entry) else {
            continue;
        };
        let icon = match &description.icon {
            RenderIcon::Microphone => "🎤".to_string(),
            RenderIcon::CheckCircle => "✔".to_string(),
            RenderIcon::Symbol(symbol) => symbol.clone(),
        };
        println!("{icon}  {}", description.summary);
        for line in [&description.added_line, &description.secondary]
            .into_iter()
            .flatten()
        {
            println!("    {line}");
        }
    }
}
