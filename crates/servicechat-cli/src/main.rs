use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::Result;
use jiff::Timestamp;
use servicechat_cli::commands::{self, Command};
use servicechat_cli::config::{self, ENDPOINT_ENV, Overrides, Settings};
use servicechat_cli::offline::OfflineShell;
use servicechat_cli::shell::{Shell, Step};
use servicechat_cli::{logging, startup};
use servicechat_conversation::Event;
use servicechat_conversation::driver::execute_chat;
use servicechat_storage::conversation::ConversationStore;
use servicechat_storage::identity::get_or_create_id;
use servicechat_storage::kv::{FileStore, KeyValueStore, MemoryStore};
use servicechat_transport::chat::{ChatTransport, HttpChatTransport, HttpTransportConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Chat with the NSW government services assistant.
#[derive(Debug, Parser)]
#[command(name = "servicechat", version)]
struct Args {
    /// Chat endpoint URL (overrides the config file and SERVICECHAT_ENDPOINT).
    #[arg(long)]
    endpoint: Option<String>,

    /// Directory for conversation logs.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Use the scripted question flow instead of the assistant.
    #[arg(long)]
    offline: bool,

    /// Log as JSON lines.
    #[arg(long)]
    json_logs: bool,

    /// Scenario to open on start; a custom conversation when omitted.
    #[arg(long)]
    scenario: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let log_filter = logging::init(args.json_logs);

    let settings = startup::prepare(
        &config::config_dir()?,
        std::env::var(ENDPOINT_ENV).ok(),
        Overrides {
            endpoint: args.endpoint.clone(),
            data_dir: args.data_dir.clone(),
            timeout_secs: args.timeout,
            offline: args.offline,
        },
        config::default_data_dir()?,
        Timestamp::now(),
    )?;
    logging::apply_level(&log_filter, &settings.log_level)?;
    tracing::info!(
        endpoint = settings.endpoint.as_deref().unwrap_or("offline"),
        data_dir = %settings.data_dir.display(),
        "starting servicechat"
    );

    let scenario = args.scenario.filter(|s| s != "custom");
    match settings.endpoint.clone() {
        Some(endpoint) => run_live(&settings, endpoint, scenario).await,
        None => run_offline(scenario).await,
    }
}

/// The file store under `data_dir`, or memory only if it cannot be opened.
fn open_store(settings: &Settings) -> Arc<dyn KeyValueStore> {
    match FileStore::open(&settings.data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, data_dir = %settings.data_dir.display(), "storage unavailable, keeping conversations in memory");
            Arc::new(MemoryStore::new())
        }
    }
}

async fn run_live(settings: &Settings, endpoint: String, scenario: Option<String>) -> Result<()> {
    let transport: Arc<dyn ChatTransport> = Arc::new(HttpChatTransport::new(HttpTransportConfig {
        endpoint,
        timeout: settings.timeout,
        bypass_interstitial: settings.bypass_tunnel_interstitial,
    })?);
    let kv = open_store(settings);
    let session_id = get_or_create_id(kv.as_ref());
    let mut shell = Shell::new(session_id, ConversationStore::new(kv));

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let spawn_jobs = |step: &mut Step, session_id: &str| {
        for job in step.jobs.drain(..) {
            let transport = transport.clone();
            let tx = tx.clone();
            let session_id = session_id.to_string();
            tokio::task::spawn_blocking(move || {
                let event = execute_chat(transport.as_ref(), &session_id, job);
                if tx.send(event).is_err() {
                    tracing::debug!("reply arrived after shutdown");
                }
            });
        }
    };

    let mut step = shell.apply(Command::Open(scenario), Timestamp::now());
    print_step(&step);
    spawn_jobs(&mut step, shell.session_id());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = match commands::parse(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        println!("! {e}");
                        continue;
                    }
                };
                let mut step = shell.apply(command, Timestamp::now());
                print_step(&step);
                if step.quit {
                    break;
                }
                spawn_jobs(&mut step, shell.session_id());
            }
            Some(event) = rx.recv() => {
                let mut step = shell.deliver(event, Timestamp::now());
                print_step(&step);
                spawn_jobs(&mut step, shell.session_id());
            }
        }
    }
    Ok(())
}

async fn run_offline(scenario: Option<String>) -> Result<()> {
    let mut shell = OfflineShell::open(scenario.as_deref(), Timestamp::now())?;
    println!("{}", shell.intro());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("! {e}");
                continue;
            }
        };
        let step = shell.apply(command, Timestamp::now());
        print_step(&step);
        if step.quit {
            break;
        }
    }
    Ok(())
}

fn print_step(step: &Step) {
    if !step.output.is_empty() {
        println!("{}", step.output);
    }
}
