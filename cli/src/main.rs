//! `tasks`: command-line front end for the task service.
//!
//! Every command refreshes the store, performs at most one operation, and
//! prints the resulting list. Failures print the store's display message.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use clap::{Parser, Subcommand};
use task_core::config::ENV_API_URL;
use task_core::{ClientConfig, Draft, Priority, Task, TaskId, TaskStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasks", about = "Create, list, complete and delete tasks")]
struct Cli {
    /// Base URL of the task service
    #[arg(long, env = ENV_API_URL)]
    api_url: Option<String>,

    /// Log requests and store activity
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all tasks
    List,
    /// Create a task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// LOW, MEDIUM or HIGH (default MEDIUM)
        #[arg(short, long)]
        priority: Option<Priority>,
        /// RFC 3339 timestamp, or "YYYY-MM-DD HH:MM" in local time
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a task completed
    Done { id: TaskId },
    /// Mark a task not completed
    Undo { id: TaskId },
    /// Delete a task
    Rm { id: TaskId },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("task_core=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    debug!(base_url = %config.base_url, timeout = ?config.timeout, "connecting");
    let store = TaskStore::connect(&config)?;

    store.refresh().await?;

    match cli.command {
        Commands::List => {}
        Commands::Add {
            title,
            description,
            priority,
            due,
        } => {
            let mut draft = Draft::new(title).description(description);
            draft.priority = priority;
            draft.due_date = due.as_deref().map(parse_due).transpose()?;
            let created = store.create(&draft).await?;
            println!("Created task {}", created.id);
        }
        Commands::Done { id } => set_completed(&store, id, true).await?,
        Commands::Undo { id } => set_completed(&store, id, false).await?,
        Commands::Rm { id } => {
            store.remove(id).await?;
            println!("Deleted task {id}");
        }
    }

    render(&store.tasks());
    Ok(())
}

async fn set_completed(store: &TaskStore, id: TaskId, completed: bool) -> Result<()> {
    let task = store
        .tasks()
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or_else(|| anyhow!("task {id} not found"))?;
    store.set_completed(&task, completed).await?;
    Ok(())
}

fn parse_due(raw: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant);
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .with_context(|| format!("invalid due date `{raw}`"))?;
    match Local.from_local_datetime(&naive).single() {
        Some(local) => Ok(local.fixed_offset()),
        None => bail!("due date `{raw}` is ambiguous or skipped in the local time zone"),
    }
}

fn render(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    for task in tasks {
        let mark = if task.completed { "x" } else { " " };
        let mut line = format!(
            "[{mark}] {:>4}  {:<6}  {}",
            task.id.to_string(),
            task.priority.ui_token(),
            task.title
        );
        if let Some(due) = task.due_date {
            let local = due.with_timezone(&Local);
            line.push_str(&format!("  (due {})", local.format("%b %-d, %Y %-I:%M %p")));
        }
        println!("{line}");
        if !task.description.is_empty() {
            println!("{:14}{}", "", task.description);
        }
    }
}
