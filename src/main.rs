use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use timeliner::web::{run_server, AppState};
use timeliner::{util, Config, Database, Editor, FileStore, RemoteStore};

#[derive(Parser)]
#[command(name = "timeliner", version, about = "Process timeline editor")]
struct Cli {
    /// Path to the config file (defaults to ~/.timeliner/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (defaults to ~/.timeliner)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the snapshot server
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
    /// Flatten a structured-form snapshot file and print it as TSV
    Flatten {
        /// Snapshot file (JSON array of interval records)
        input: PathBuf,
    },
    /// Inspect or write the local snapshot history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
    /// Talk to the configured snapshot server
    Remote {
        #[command(subcommand)]
        command: RemoteCommand,
    },
    /// Print an example config file to stdout
    ExampleConfig,
}

#[derive(Subcommand)]
enum RemoteCommand {
    /// List snapshots on the server
    List,
    /// Print a stored snapshot
    Load { name: String },
    /// Push a local history slot to the server under a name
    Save { pointer: i64, name: String },
    /// Delete a snapshot from the server
    Delete { name: String },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List stored snapshots, newest first
    List,
    /// Print the snapshot stored in a slot
    Show { pointer: i64 },
    /// Save a snapshot file into the history ring
    Save { input: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timeliner=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    match cli.command {
        Command::Serve { host, port } => {
            let mut server_config = config.server.clone();
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }

            let store = FileStore::open(&config.store_dir)
                .with_context(|| format!("opening store at {}", config.store_dir.display()))?;
            run_server(AppState::new(store), server_config).await
        }
        Command::Flatten { input } => {
            let json = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let records = timeliner::from_json(&json)?;
            let flat = timeliner::flatten(
                &records,
                config.editor.time_scale,
                &config.editor.required_columns,
            )?;
            print!("{}", timeliner::to_tsv(&flat));
            Ok(())
        }
        Command::History { command } => match command {
            HistoryCommand::List => {
                let editor = open_editor(&config)?;
                for entry in editor.history().list_most_recent_first()? {
                    println!("{}\t{}", entry.pointer, entry.timestamp);
                }
                Ok(())
            }
            HistoryCommand::Show { pointer } => {
                let editor = open_editor(&config)?;
                if let Some(json) = editor.history().load(pointer)? {
                    println!("{json}");
                }
                Ok(())
            }
            HistoryCommand::Save { input } => {
                let mut editor = open_editor(&config)?;
                let json = fs::read_to_string(&input)
                    .with_context(|| format!("reading {}", input.display()))?;
                editor
                    .load_snapshot(&json)
                    .context("snapshot did not parse")?;
                let pointer = editor.save()?;
                println!("saved to slot {pointer}");
                Ok(())
            }
        },
        Command::Remote { command } => {
            let url = config.remote_url.clone().ok_or_else(|| {
                anyhow::anyhow!("no snapshot server configured; set [store].remote_url")
            })?;
            let remote = RemoteStore::new(url);
            match command {
                RemoteCommand::List => {
                    for name in remote.list().await? {
                        println!("{name}");
                    }
                }
                RemoteCommand::Load { name } => {
                    print!("{}", remote.load(&name).await?);
                }
                RemoteCommand::Save { pointer, name } => {
                    let editor = open_editor(&config)?;
                    if editor.push_history_entry(&remote, pointer, &name).await? {
                        println!("saved {name}");
                    } else {
                        anyhow::bail!("history slot {pointer} is empty");
                    }
                }
                RemoteCommand::Delete { name } => {
                    remote.delete(&name).await?;
                }
            }
            Ok(())
        }
        Command::ExampleConfig => {
            print!("{}", timeliner::config::EXAMPLE_CONFIG);
            Ok(())
        }
    }
}

fn open_editor(config: &Config) -> Result<Editor<Database>> {
    let db = Database::open_default().context("opening history database")?;
    Ok(Editor::new(config.editor.clone(), db))
}
