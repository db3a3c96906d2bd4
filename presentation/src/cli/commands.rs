//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for debate-arena
#[derive(Parser, Debug)]
#[command(name = "debate-arena")]
#[command(author, version, about = "Adversarial debate between two AI personas, settled by a judge")]
#[command(long_about = r#"
Debate Arena pits two scripted personas against each other over your question:
the Strategist argues for bold action, the Critic attacks every weak point.
They alternate until one concedes, the turn cap is hit, or you stop the
debate; a Judge then delivers a verdict anchored to your original question.

Personas may consult web search for evidence before a turn. Attach a text,
markdown, or PDF file to put extra material in front of the debaters.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./arena.toml        Project-level config
3. ~/.config/debate-arena/config.toml   Global config

API keys come from the environment: OPENAI_API_KEY, ANTHROPIC_API_KEY,
GEMINI_API_KEY (only the providers you configure are required).

Example:
  debate-arena "Should we rewrite the billing service?"
  debate-arena --file q3_report.md "Should we enter the Japanese market?"
  debate-arena --max-turns 6 --no-search "Is microservices worth it for us?"
"#)]
pub struct Cli {
    /// The question to debate (prompted for interactively if omitted)
    pub question: Option<String>,

    /// Attach a file (.txt, .md, .pdf) as supporting material
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Override the strategist backend (e.g. "openai:gpt-4o")
    #[arg(long, value_name = "SPEC")]
    pub strategist: Option<String>,

    /// Override the critic backend
    #[arg(long, value_name = "SPEC")]
    pub critic: Option<String>,

    /// Override the judge backend
    #[arg(long, value_name = "SPEC")]
    pub judge: Option<String>,

    /// Maximum number of debater turns before the judge steps in
    #[arg(long, value_name = "N")]
    pub max_turns: Option<u32>,

    /// Disable web search augmentation
    #[arg(long)]
    pub no_search: bool,

    /// Skip the post-debate summary report
    #[arg(long)]
    pub no_summary: bool,

    /// Print a round-by-round comparison of the two debaters at the end
    #[arg(long)]
    pub rounds: bool,

    /// Export the transcript to this directory when the debate ends
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress streaming output and progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_question_and_flags() {
        let cli = Cli::parse_from([
            "debate-arena",
            "--max-turns",
            "6",
            "--no-search",
            "-vv",
            "Should we pivot?",
        ]);
        assert_eq!(cli.question.as_deref(), Some("Should we pivot?"));
        assert_eq!(cli.max_turns, Some(6));
        assert!(cli.no_search);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn question_is_optional() {
        let cli = Cli::parse_from(["debate-arena"]);
        assert!(cli.question.is_none());
        assert!(!cli.no_search);
        assert!(cli.max_turns.is_none());
        assert!(!cli.rounds);
    }

    #[test]
    fn rounds_flag_parses() {
        let cli = Cli::parse_from(["debate-arena", "--rounds", "q"]);
        assert!(cli.rounds);
    }

    #[test]
    fn model_overrides_parse() {
        let cli = Cli::parse_from([
            "debate-arena",
            "--strategist",
            "openai:gpt-4o",
            "--judge",
            "anthropic:claude-sonnet-4-5",
            "q",
        ]);
        assert_eq!(cli.strategist.as_deref(), Some("openai:gpt-4o"));
        assert!(cli.critic.is_none());
        assert_eq!(cli.judge.as_deref(), Some("anthropic:claude-sonnet-4-5"));
    }
}
