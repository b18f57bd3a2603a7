use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use ytsum::config::{self, YtsumConfig};
use ytsum::export;
use ytsum::output::{json as json_out, text as text_out};
use ytsum::source::youtube::YouTubeSource;
use ytsum::source::TranscriptSource;
use ytsum::summarize::stopwords::StopwordFilter;
use ytsum::summarize::Summarizer;
use ytsum::url::extract_video_id;
use ytsum::Error;

#[derive(Parser)]
#[command(name = "ytsum", version, about = "YouTube transcript summarizer — frequency-based extractive summaries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a video's transcript and print an extractive summary
    Summarize {
        /// Video URL or bare 11-character video id
        url: String,

        /// Number of sentences in the summary
        #[arg(long, short = 'n')]
        sentences: Option<usize>,

        /// Stopword language tag (en, de, fr, es, it, pt, nl)
        #[arg(long)]
        language: Option<String>,

        /// Also write the full transcript to this file
        #[arg(long)]
        save_transcript: Option<PathBuf>,

        /// Also write the summary to this file
        #[arg(long)]
        save_summary: Option<PathBuf>,
    },

    /// Fetch and print the full transcript without summarizing
    Transcript {
        /// Video URL or bare 11-character video id
        url: String,

        /// Write the transcript to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Summarize local text from a file or stdin
    Text {
        /// Input file (omit when using --stdin)
        file: Option<PathBuf>,

        /// Read from stdin
        #[arg(long)]
        stdin: bool,

        /// Number of sentences in the summary
        #[arg(long, short = 'n')]
        sentences: Option<usize>,

        /// Stopword language tag
        #[arg(long)]
        language: Option<String>,

        /// Show the full sentence ranking with scores
        #[arg(long)]
        scores: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a commented template to ~/.ytsum/config.toml
    Init,
    /// Print the parsed config
    Show,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let json_output = cli.json;
    let cfg = YtsumConfig::load()?;

    match cli.command {
        Commands::Summarize {
            url,
            sentences,
            language,
            save_transcript,
            save_summary,
        } => {
            let video_id = resolve_video_id(&url)?;
            let source = YouTubeSource::with_base_url(cfg.youtube_base_url());
            info!(video_id = %video_id, source = source.name(), "fetching transcript");
            let transcript = source
                .fetch_transcript(&video_id)
                .map_err(Error::Fetch)?;

            let count = cfg.effective_sentences(sentences);
            let summarizer = build_summarizer(&cfg, language.as_deref());
            let summary = summarizer.summarize(&transcript, count)?;

            if let Some(ref path) = save_transcript {
                export::write_text(path, &transcript)?;
            }
            if let Some(ref path) = save_summary {
                export::write_text(path, &summary)?;
            }

            if json_output {
                json_out::print_json(&serde_json::json!({
                    "video_id": video_id,
                    "source": source.name(),
                    "sentences": count,
                    "summary": summary,
                }))?;
            } else {
                text_out::print_summary(&summary);
                if let Some(path) = save_transcript {
                    eprintln!("Transcript saved to: {}", path.display());
                }
                if let Some(path) = save_summary {
                    eprintln!("Summary saved to: {}", path.display());
                }
            }
        }

        Commands::Transcript { url, out } => {
            let video_id = resolve_video_id(&url)?;
            let source = YouTubeSource::with_base_url(cfg.youtube_base_url());
            info!(video_id = %video_id, source = source.name(), "fetching transcript");
            let transcript = source
                .fetch_transcript(&video_id)
                .map_err(Error::Fetch)?;

            match out {
                Some(path) => {
                    export::write_text(&path, &transcript)?;
                    println!("Transcript saved to: {}", path.display());
                }
                None if json_output => {
                    json_out::print_json(&serde_json::json!({
                        "video_id": video_id,
                        "source": source.name(),
                        "transcript": transcript,
                    }))?;
                }
                None => println!("{transcript}"),
            }
        }

        Commands::Text {
            file,
            stdin,
            sentences,
            language,
            scores,
        } => {
            let text = if stdin {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                buf
            } else if let Some(ref path) = file {
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read: {}", path.display()))?
            } else {
                bail!("No input given. Pass a file path or use --stdin.");
            };

            let count = cfg.effective_sentences(sentences);
            let summarizer = build_summarizer(&cfg, language.as_deref());

            if scores {
                let ranked = summarizer.rank_sentences(&text)?;
                if json_output {
                    json_out::print_json(&serde_json::json!({
                        "total": ranked.len(),
                        "sentences": ranked,
                    }))?;
                } else {
                    text_out::print_ranking(&ranked);
                }
            } else {
                let summary = summarizer.summarize(&text, count)?;
                if json_output {
                    json_out::print_json(&serde_json::json!({
                        "sentences": count,
                        "summary": summary,
                    }))?;
                } else {
                    text_out::print_summary(&summary);
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Init => {
                let created = config::init_config()?;
                let path = config::config_path()?;
                if created {
                    println!("Created: {}", path.display());
                } else {
                    println!("Already exists: {}", path.display());
                }
            }
            ConfigAction::Show => {
                if json_output {
                    json_out::print_json(&cfg)?;
                } else {
                    println!("{}", cfg.display());
                }
            }
        },
    }

    Ok(())
}

/// Accept either a full URL or a bare 11-character video id.
fn resolve_video_id(input: &str) -> Result<String, Error> {
    let is_bare_id = input.len() == 11
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if is_bare_id {
        return Ok(input.to_string());
    }
    extract_video_id(input).ok_or_else(|| Error::InvalidIdentifier(input.to_string()))
}

fn build_summarizer(cfg: &YtsumConfig, language: Option<&str>) -> Summarizer {
    let mut stopwords = StopwordFilter::for_language(&cfg.effective_language(language));
    if let Some(ref extra) = cfg.extra_stopwords {
        stopwords.add_words(extra);
    }
    Summarizer::new().with_stopwords(stopwords)
}
