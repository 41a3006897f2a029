use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use journal_finder_core::filter::{
    DECISION_TIME_MAX, DECISION_TIME_MIN, IMPACT_FACTOR_MAX, IMPACT_FACTOR_MIN,
};
use journal_finder_core::{
    Config, ENDPOINT_ENV, FilterState, HttpRankingService, LlmModel, ResultPresenter,
    SearchOrchestrator, SearchPhase, config_file,
};

mod output;

use output::ColorMode;

/// Journal Finder - rank journals that fit a paper abstract
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log request diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find journals for an abstract
    Search {
        /// Abstract text (omit to read from --file or stdin)
        #[arg(value_name = "ABSTRACT")]
        abstract_text: Option<String>,

        /// Read the abstract from a file
        #[arg(short, long, conflicts_with = "abstract_text")]
        file: Option<PathBuf>,

        /// Minimum journal impact factor (0-50)
        #[arg(long)]
        impact_factor: Option<f64>,

        /// Maximum days to first decision (1-90)
        #[arg(long)]
        decision_time: Option<u32>,

        /// Publisher to include; repeat or comma-separate for several
        #[arg(long = "publisher", value_delimiter = ',')]
        publishers: Vec<String>,

        /// Ranking model (faiss, gemini-pro, groq, mixtral, openai)
        #[arg(long)]
        model: Option<LlmModel>,

        /// Ranking service endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Print the raw journal list as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the available ranking models
    Models {
        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List known publishers, optionally filtered by a search string
    Publishers {
        /// Case-insensitive substring to match
        query: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "journal_finder_core=info,journal_finder=info"
    } else {
        "journal_finder_core=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Models { no_color } => {
            let color = ColorMode(!no_color && std::io::stdout().is_terminal());
            output::print_models(&mut std::io::stdout(), color)?;
            Ok(())
        }
        Command::Publishers { query } => {
            let publishers = match query.as_deref() {
                Some(q) => journal_finder_core::filter::matching_publishers(q),
                None => journal_finder_core::PUBLISHERS.to_vec(),
            };
            output::print_publishers(&mut std::io::stdout(), &publishers)?;
            Ok(())
        }
        Command::Search {
            abstract_text,
            file,
            impact_factor,
            decision_time,
            publishers,
            model,
            endpoint,
            timeout,
            json,
            no_color,
        } => {
            let text = read_abstract(abstract_text, file)?;
            let filters = FilterFlags {
                impact_factor,
                decision_time,
                publishers,
                model,
            };
            search(text, filters, endpoint, timeout, json, no_color).await
        }
    }
}

/// Filter values given on the command line; unset ones fall back to config.
#[derive(Debug, Default)]
struct FilterFlags {
    impact_factor: Option<f64>,
    decision_time: Option<u32>,
    publishers: Vec<String>,
    model: Option<LlmModel>,
}

impl FilterFlags {
    /// Apply flags over `state`, rejecting out-of-range values.
    fn apply(self, state: &mut FilterState) -> anyhow::Result<()> {
        if let Some(v) = self.impact_factor {
            if !(IMPACT_FACTOR_MIN..=IMPACT_FACTOR_MAX).contains(&v) {
                anyhow::bail!(
                    "impact factor must be between {IMPACT_FACTOR_MIN} and {IMPACT_FACTOR_MAX}, got {v}"
                );
            }
            state.set_impact_factor(v);
        }
        if let Some(d) = self.decision_time {
            if !(DECISION_TIME_MIN..=DECISION_TIME_MAX).contains(&d) {
                anyhow::bail!(
                    "decision time must be between {DECISION_TIME_MIN} and {DECISION_TIME_MAX} days, got {d}"
                );
            }
            state.set_decision_time(d);
        }
        if !self.publishers.is_empty() {
            for existing in state.publishers().to_vec() {
                state.remove_publisher(&existing);
            }
            for name in &self.publishers {
                let name = name.trim();
                if !name.is_empty() {
                    state.add_publisher(name);
                }
            }
        }
        if let Some(model) = self.model {
            state.select_model(model);
        }
        Ok(())
    }
}

/// Abstract from the argument, a file, or piped stdin (in that order).
fn read_abstract(arg: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read abstract from {}", path.display()));
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut text = String::new();
    stdin
        .lock()
        .read_to_string(&mut text)
        .context("failed to read abstract from stdin")?;
    Ok(text)
}

async fn search(
    text: String,
    flags: FilterFlags,
    endpoint: Option<String>,
    timeout: Option<u64>,
    json: bool,
    no_color: bool,
) -> anyhow::Result<()> {
    // Resolve configuration: CLI flags > env vars > config file > defaults
    let endpoint = endpoint.or_else(|| std::env::var(ENDPOINT_ENV).ok());
    let config = Config::from_file(&config_file::load_config()).with_overrides(endpoint, timeout);
    tracing::info!(endpoint = %config.endpoint, timeout_secs = config.timeout_secs, "resolved configuration");

    let mut filters = FilterState::from_defaults(&config.defaults);
    flags.apply(&mut filters)?;
    let criteria = filters.commit();

    let stdout = std::io::stdout();
    let interactive = stdout.is_terminal();
    let color = ColorMode(!no_color && interactive && !json);
    let mut writer = stdout.lock();

    if !json {
        output::print_criteria(&mut writer, &criteria, color)?;
    }

    let service = HttpRankingService::new(config.endpoint.clone(), config.timeout())?;
    let mut orchestrator = SearchOrchestrator::new();
    let mut presenter = ResultPresenter::new();

    let spinner = if interactive && !json {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        pb.set_message("Finding journals...");
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    orchestrator
        .search(&service, &mut presenter, &text, criteria)
        .await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if let SearchPhase::Failed(err) = orchestrator.phase() {
        anyhow::bail!("search failed: {err}");
    }

    if json {
        serde_json::to_writer_pretty(&mut writer, presenter.journals())?;
        writeln!(writer)?;
    } else {
        output::print_journals(&mut writer, presenter.journals(), color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_flags() {
        let cli = Cli::try_parse_from([
            "journal-finder",
            "search",
            "Deep learning for protein folding",
            "--impact-factor",
            "2.5",
            "--publisher",
            "Elsevier,Wiley",
            "--model",
            "gemini-pro",
        ])
        .unwrap();
        match cli.command {
            Command::Search {
                abstract_text,
                impact_factor,
                publishers,
                model,
                ..
            } => {
                assert_eq!(abstract_text.as_deref(), Some("Deep learning for protein folding"));
                assert_eq!(impact_factor, Some(2.5));
                assert_eq!(publishers, ["Elsevier", "Wiley"]);
                assert_eq!(model, Some(LlmModel::GeminiPro));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_model() {
        let parsed = Cli::try_parse_from(["journal-finder", "search", "x", "--model", "gpt-9"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn abstract_and_file_conflict() {
        let parsed = Cli::try_parse_from(["journal-finder", "search", "x", "--file", "a.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let mut state = FilterState::default();
        state.add_publisher("MDPI");
        FilterFlags {
            impact_factor: Some(5.0),
            decision_time: Some(14),
            publishers: vec!["IEEE".into(), " ".into(), "SAGE".into()],
            model: Some(LlmModel::Mixtral),
        }
        .apply(&mut state)
        .unwrap();

        let criteria = state.commit();
        assert_eq!(criteria.impact_factor, 5.0);
        assert_eq!(criteria.first_decision_time, 14);
        assert_eq!(criteria.publisher, "IEEE, SAGE");
        assert_eq!(criteria.llm_model, LlmModel::Mixtral);
    }

    #[test]
    fn unset_flags_keep_defaults() {
        let mut state = FilterState::default();
        state.add_publisher("MDPI");
        FilterFlags::default().apply(&mut state).unwrap();
        assert_eq!(state.commit().publisher, "MDPI");
    }

    #[test]
    fn out_of_range_flags_are_rejected() {
        let mut state = FilterState::default();
        let err = FilterFlags {
            impact_factor: Some(51.0),
            ..Default::default()
        }
        .apply(&mut state);
        assert!(err.is_err());

        let err = FilterFlags {
            decision_time: Some(0),
            ..Default::default()
        }
        .apply(&mut state);
        assert!(err.is_err());
    }

    #[test]
    fn abstract_argument_wins() {
        let text = read_abstract(Some("inline".into()), None).unwrap();
        assert_eq!(text, "inline");
    }
}
