//! CLI entrypoint for Debate Arena
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context, Result};
use arena_application::{
    DebateOrchestrator, DebatePresenter, PersonaClients, RunDebateError, SearchDecisionAgent,
    SearchSettings, TextExtractor, TranscriptWriter,
};
use arena_domain::Role;
use arena_infrastructure::{
    create_client, ConfigLoader, DuckDuckGoSearch, FileConfig, FileTextExtractor,
    FileTranscriptWriter, ModelSpec,
};
use arena_presentation::{Cli, ConsoleFormatter, ConsolePresenter, QuietPresenter};
use clap::Parser;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Debate Arena");

    // Load configuration and apply CLI overrides
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    if let Some(spec) = &cli.strategist {
        config.models.strategist = spec.clone();
    }
    if let Some(spec) = &cli.critic {
        config.models.critic = spec.clone();
    }
    if let Some(spec) = &cli.judge {
        config.models.judge = spec.clone();
    }
    if let Some(max_turns) = cli.max_turns {
        config.debate.max_turns = max_turns;
    }
    if cli.no_search {
        config.search.enabled = false;
    }
    if let Some(dir) = &cli.export_dir {
        config.export.dir = dir.display().to_string();
    }

    // Validate everything before the session starts: a bad model spec
    // or missing API key must never surface mid-debate.
    let settings = config.to_settings()?;
    let models = config.resolve_models()?;
    let env: HashMap<String, String> = std::env::vars().collect();
    let keys = FileConfig::resolve_api_keys(&models, &env)?;

    let key_for = |spec: &ModelSpec| -> &str {
        keys.get(spec.provider.api_key_env())
            .map(String::as_str)
            .unwrap_or_default()
    };

    let generation_timeout = config.timeouts.generation();
    let strategist = create_client(
        &models.strategist,
        key_for(&models.strategist),
        generation_timeout,
    );
    let clients = PersonaClients {
        strategist: Arc::clone(&strategist),
        critic: create_client(&models.critic, key_for(&models.critic), generation_timeout),
        judge: create_client(&models.judge, key_for(&models.judge), generation_timeout),
    };

    // The search decision call prefers the judge's backend (or the
    // configured override) and falls back to the strategist's.
    let decision = if config.search.enabled {
        let primary = if models.search_decision == models.judge {
            Arc::clone(&clients.judge)
        } else {
            create_client(
                &models.search_decision,
                key_for(&models.search_decision),
                generation_timeout,
            )
        };
        SearchDecisionAgent::new(Some(primary), Some(strategist))
    } else {
        SearchDecisionAgent::disabled()
    };

    let mut orchestrator = DebateOrchestrator::new(
        settings,
        clients,
        Arc::new(DuckDuckGoSearch::with_timeout(config.timeouts.search())),
        decision,
        SearchSettings {
            enabled: config.search.enabled,
            max_results: config.search.max_results,
        },
    );

    // Ctrl-C ends the exchange at the next cycle boundary and hands
    // the debate to the judge.
    let stop = orchestrator.stop_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Stop requested; the judge will rule after the current turn");
            stop.cancel();
        }
    });

    // Attachment must extract cleanly before it can join the question
    let attachment = match &cli.file {
        Some(path) => {
            let text = FileTextExtractor::new()
                .extract(path)
                .with_context(|| format!("Could not read attachment {}", path.display()))?;
            Some(text)
        }
        None => None,
    };

    let question = match cli.question.clone() {
        Some(q) => q,
        None => prompt_line("Question to debate: ")?,
    };
    if question.trim().is_empty() {
        bail!("A question is required to start a debate");
    }

    orchestrator.submit(&question, attachment.as_deref())?;

    let presenter: Box<dyn DebatePresenter> = if cli.quiet {
        Box::new(QuietPresenter)
    } else {
        Box::new(ConsolePresenter::new())
    };

    orchestrator.run(presenter.as_ref()).await?;

    // Verdict, retried only on explicit user confirmation
    if !cli.quiet {
        print!("{}", ConsoleFormatter::verdict_header());
    }
    let verdict = loop {
        match orchestrator.execute_verdict(presenter.as_ref()).await {
            Ok(turn) => break turn.content.clone(),
            Err(RunDebateError::Verdict(e)) => {
                eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
                let answer = prompt_line("Retry the verdict? [Y/n] ")?;
                if answer.trim().eq_ignore_ascii_case("n") {
                    bail!("Debate ended without a verdict");
                }
            }
            Err(e) => return Err(e.into()),
        }
    };
    if cli.quiet {
        println!("{}", verdict);
    }

    // Round-by-round comparison of the two debaters
    if cli.rounds {
        for (i, (for_case, against_case)) in
            orchestrator.session().rounds().into_iter().enumerate()
        {
            print!("{}", ConsoleFormatter::round_header(i + 1));
            println!(
                "{} {}",
                ConsoleFormatter::role_label(Role::Strategist),
                for_case
            );
            println!(
                "{} {}",
                ConsoleFormatter::role_label(Role::Critic),
                against_case
            );
        }
    }

    // Summary report
    if !cli.no_summary {
        match orchestrator.summarize().await {
            Ok(report) => {
                println!("{}", ConsoleFormatter::summary_header());
                println!("{}", report);
            }
            Err(e) => {
                warn!("Summary generation failed: {}", e);
            }
        }
    }

    // Persist the transcript
    let writer = FileTranscriptWriter::new(&config.export.dir);
    match writer.write(&orchestrator.export()) {
        Ok(path) => println!("\n{}", ConsoleFormatter::export_note(&path)),
        Err(e) => warn!("Could not export transcript: {}", e),
    }

    let judge_turns = orchestrator
        .session()
        .transcript()
        .iter()
        .filter(|t| t.speaker == Role::Judge)
        .count();
    info!(
        turns = orchestrator.session().turn_count(),
        judge_turns, "Debate finished"
    );

    Ok(())
}

/// Read one line from stdin after printing a prompt.
fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Could not read from stdin")?;
    Ok(line.trim().to_string())
}
