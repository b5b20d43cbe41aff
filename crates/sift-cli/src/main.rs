//! sift - 対話型の discover セッション
//!
//! # フロー
//! 1. 設定を読み込み、エンジン・FetchWorker を組み立てる
//! 2. `engine-start` で最初のページを取得
//! 3. stdin（または `--script`）から1行1コマンドで操作
//! 4. 各コマンドの後に EngineView を JSON で出力

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::watch;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use sift_core::domain::Result;
use sift_core::impls::{ChannelDispatcher, InMemoryCandidateSource, InMemoryDecisionLedger};
use sift_core::ports::{CandidateSource, DecisionLedger};
use sift_core::{
    DiscoverEngine, EngineView, FetchWorker, GestureOutcome, InboundEvent, SharedEngine,
    SiftConfig,
};

/// How long to wait for an in-flight fetch before printing an empty view.
const SETTLE_TIMEOUT: Duration = Duration::from_millis(500);

/// Sift - one-at-a-time candidate triage
#[derive(Parser)]
#[command(name = "sift")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Seed for the candidate source (reproducible sessions)
    #[arg(long)]
    seed: Option<u64>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Event(InboundEvent),
    Show,
    Liked,
    Seen,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let word = line.trim();
    if word.is_empty() || word.starts_with('#') {
        return Ok(None);
    }
    let gesture = |outcome| Command::Event(InboundEvent::GestureEnd { outcome });
    let command = match word.to_ascii_lowercase().as_str() {
        "left" | "l" => gesture(GestureOutcome::Left),
        "right" | "r" => gesture(GestureOutcome::Right),
        "none" | "n" => gesture(GestureOutcome::None),
        "reject" | "x" => Command::Event(InboundEvent::ManualReject),
        "undo" | "u" => Command::Event(InboundEvent::UndoTap),
        "reset" => Command::Event(InboundEvent::ResetTap),
        "show" => Command::Show,
        "liked" => Command::Liked,
        "seen" => Command::Seen,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

enum Input {
    Script(std::vec::IntoIter<String>),
    Stdin(Lines<BufReader<Stdin>>),
}

impl Input {
    fn open(script: Option<&PathBuf>) -> Result<Self> {
        match script {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let lines: Vec<String> = raw.lines().map(str::to_string).collect();
                Ok(Self::Script(lines.into_iter()))
            }
            None => Ok(Self::Stdin(BufReader::new(tokio::io::stdin()).lines())),
        }
    }

    async fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            Self::Script(lines) => Ok(lines.next()),
            Self::Stdin(lines) => Ok(lines.next_line().await?),
        }
    }
}

/// Give a pending fetch a moment to land when the queue is empty.
async fn settle(views: &mut watch::Receiver<EngineView>) -> EngineView {
    let _ = tokio::time::timeout(SETTLE_TIMEOUT, async {
        while views.borrow_and_update().size == 0 {
            if views.changed().await.is_err() {
                break;
            }
        }
    })
    .await;
    *views.borrow()
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(err) => eprintln!("cannot encode output: {err}"),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = SiftConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.source.seed = Some(seed);
    }
    info!(
        low_water_mark = config.replenish.low_water_mark,
        page_size = config.source.page_size,
        "starting session"
    );

    let (dispatcher, intents) = ChannelDispatcher::new();
    let engine = SharedEngine::new(DiscoverEngine::new(dispatcher).with_policy(config.policy()));
    let ledger = Arc::new(InMemoryDecisionLedger::new());
    let source: Arc<dyn CandidateSource> = Arc::new(InMemoryCandidateSource::new(&config.source));
    let worker = FetchWorker::spawn(
        intents,
        engine.clone(),
        source,
        Arc::clone(&ledger) as Arc<dyn DecisionLedger>,
    );

    let mut views = engine.subscribe();
    engine.apply(InboundEvent::EngineStart).await;
    print_json(&settle(&mut views).await);

    let mut input = Input::open(cli.script.as_ref())?;
    let outcome = loop {
        let line = match input.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break Ok(()),
            Err(err) => break Err(err),
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            Command::Event(event) => {
                let applied = engine.apply(event).await;
                debug!(?applied, "event applied");
                print_json(&settle(&mut views).await);
            }
            Command::Show => print_json(&engine.view().await),
            Command::Liked => match ledger.liked().await {
                Ok(ids) => print_json(&ids),
                Err(err) => break Err(err),
            },
            Command::Seen => match ledger.seen().await {
                Ok(ids) => print_json(&ids),
                Err(err) => break Err(err),
            },
            Command::Quit => break Ok(()),
        }
    };

    worker.shutdown_and_join().await;
    outcome
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn gestures_and_aliases_parse() {
        assert_eq!(
            parse_command("Left").unwrap(),
            Some(Command::Event(InboundEvent::GestureEnd {
                outcome: GestureOutcome::Left
            }))
        );
        assert_eq!(
            parse_command(" r ").unwrap(),
            Some(Command::Event(InboundEvent::GestureEnd {
                outcome: GestureOutcome::Right
            }))
        );
        assert_eq!(
            parse_command("x").unwrap(),
            Some(Command::Event(InboundEvent::ManualReject))
        );
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("# warm-up").unwrap(), None);
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = parse_command("swipe").unwrap_err();
        assert!(err.contains("swipe"));
    }

    #[test]
    fn seed_flag_is_parsed() {
        let cli = Cli::parse_from(["sift", "--seed", "9", "--script", "session.txt"]);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.script, Some(PathBuf::from("session.txt")));
    }
}
