use std::{fs::File, io::IsTerminal, path::PathBuf, sync::Mutex, time::Instant};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use wordtrie::{load_into, DictionaryTrie, FileSource, LoadReport, StdinSource, WordSource};

/// Word lookup and shortest-first autocomplete over a word list.
#[derive(Parser, Debug)]
#[command(version, about = "Look up words and complete prefixes from a word list.")]
struct Cli {
    /// Word list with one word per line. Read from stdin when omitted.
    #[arg(short, long, global = true)]
    words: Option<PathBuf>,
    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the shortest stored words starting with a prefix.
    Complete(CompleteArgs),
    /// Report whether each word is in the list.
    Check(CheckArgs),
    /// Print word and node counts.
    Stats,
    /// Print every trie node, for debugging.
    Tree,
}

#[derive(Args, Debug)]
struct CompleteArgs {
    #[arg(name = "PREFIX", default_value = "")]
    prefix: String,
    /// Maximum number of completions.
    #[arg(short = 'n', long = "max", default_value_t = 10)]
    max: usize,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[arg(name = "WORD", required = true)]
    words: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize, Debug)]
struct CheckResult<'a> {
    word: &'a str,
    is_word: bool,
}

#[derive(Serialize, Debug)]
struct Stats {
    words: usize,
    nodes: usize,
    load: LoadReport,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let (trie, report) = load_trie(cli.words.as_deref()).await?;

    match cli.command {
        Command::Complete(args) => {
            let start = Instant::now();
            let completions = trie.predict_completions(&args.prefix, args.max);
            debug!("Completion took {} us", start.elapsed().as_micros());

            match cli.format {
                Format::Text => completions.iter().for_each(|word| println!("{}", word)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&completions)?),
            }
        }
        Command::Check(args) => {
            let results: Vec<CheckResult> = args
                .words
                .iter()
                .map(|word| CheckResult {
                    word: word.as_str(),
                    is_word: trie.is_word(word),
                })
                .collect();

            match cli.format {
                Format::Text => results
                    .iter()
                    .for_each(|r| println!("{}: {}", r.word, r.is_word)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&results)?),
            }
        }
        Command::Stats => {
            let stats = Stats {
                words: trie.size(),
                nodes: trie.node_count(),
                load: report,
            };

            match cli.format {
                Format::Text => print!("{}", stats_text(&stats)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
            }
        }
        Command::Tree => print!("{}", trie.dump()),
    }

    Ok(())
}

fn stats_text(stats: &Stats) -> String {
    format!(
        "words: {}\nnodes: {}\nwords read: {} (duplicates: {})\n",
        stats.words, stats.nodes, stats.load.read, stats.load.duplicates
    )
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let (writer, ansi) = match &cli.log_file {
        Some(path) => (BoxMakeWriter::new(Mutex::new(File::create(path)?)), false),
        None => (
            BoxMakeWriter::new(std::io::stderr),
            std::io::stderr().is_terminal(),
        ),
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(ansi)
        .with_writer(writer)
        .init();
    Ok(())
}

async fn load_trie(
    words: Option<&std::path::Path>,
) -> anyhow::Result<(DictionaryTrie, LoadReport)> {
    let mut source: Box<dyn WordSource + Send> = match words {
        Some(path) => Box::new(FileSource::new(path)),
        None if !std::io::stdin().is_terminal() => Box::new(StdinSource),
        None => anyhow::bail!("no word list given: pass --words <FILE> or pipe words on stdin"),
    };

    let start = Instant::now();
    let mut trie = DictionaryTrie::new();
    let report = load_into(&mut trie, source.as_mut()).await?;
    info!(
        "Built trie with {} words and {} nodes in {} ms",
        trie.size(),
        trie.node_count(),
        start.elapsed().as_millis()
    );

    Ok((trie, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_text() {
        let stats = Stats {
            words: 3,
            nodes: 5,
            load: LoadReport {
                read: 4,
                added: 3,
                duplicates: 1,
            },
        };
        assert_eq!(
            stats_text(&stats),
            "words: 3\nnodes: 5\nwords read: 4 (duplicates: 1)\n"
        );
    }
}
