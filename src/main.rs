//! lexrule CLI: interview a user until a legal goal is decided.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use lexrule::config::InterviewConfig;
use lexrule::demo::{demo_questions, demo_rules};
use lexrule::engine::Engine;
use lexrule::entity::Entity;
use lexrule::facts::Factlet;
use lexrule::interview::{AnswerError, AnswerSource, PendingQuestion, parse_answer};
use lexrule::timeline::AnyTimeline;

#[derive(Parser)]
#[command(name = "lexrule", version, about = "Temporal rule engine with guided interviews")]
struct Cli {
    /// Interview config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the relationships that can be used as goals.
    Goals,

    /// Ask questions until the goal is decided.
    Interview {
        /// Goal relationship, e.g. "isEligible".
        goal: String,

        /// One to three entities the goal is about.
        #[arg(required = true, num_args = 1..=3)]
        entities: Vec<String>,

        /// Facts known up front, as "relationship:subject=answer" (repeatable).
        #[arg(long = "given")]
        given: Vec<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Write the default config to a file.
    InitConfig {
        /// Where to write the config.
        path: PathBuf,
    },
}

/// Reads answers from standard input.
struct StdinSource<R> {
    input: R,
}

impl<R: BufRead> AnswerSource for StdinSource<R> {
    fn ask(&mut self, question: &PendingQuestion, attempt: usize, percent_complete: u8) -> Option<String> {
        if attempt == 1 {
            println!();
            println!("Percent complete: {percent_complete}%");
            if let Some(note) = &question.question.explanation {
                println!("Note: {note}");
            }
        }
        print!("{} ", question.text);
        std::io::stdout().flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }

    fn reject(&mut self, _question: &PendingQuestion, error: &AnswerError) {
        println!("{error}");
        if let AnswerError::InvalidValue { hint, .. } = error {
            println!("{hint}");
        }
    }
}

/// Parse "relationship:subject=answer" into a fact for `engine`.
fn parse_given(engine: &Engine, raw: &str) -> Result<(Factlet, AnyTimeline)> {
    let (fact, answer) = raw
        .split_once('=')
        .ok_or_else(|| miette::miette!("expected relationship:subject=answer, got \"{raw}\""))?;
    let (relationship, subject) = fact
        .split_once(':')
        .ok_or_else(|| miette::miette!("expected relationship:subject, got \"{fact}\""))?;
    let kind = engine.questions().describe(relationship).kind;
    let value = parse_answer(kind, answer)?;
    Ok((Factlet::new(Entity::new(subject), relationship), value))
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => InterviewConfig::load(path)?,
        None => InterviewConfig::default(),
    };

    match cli.command {
        Commands::Goals => {
            let engine = Engine::new(config.clone(), demo_rules(&config), demo_questions())?;
            println!("Goals ({}):", engine.rules().len());
            for name in engine.rules().names() {
                if let Some(rule) = engine.rules().get(name) {
                    println!("  {:<20} {}", rule.name, rule.kind);
                }
            }
        }

        Commands::Interview {
            goal,
            entities,
            given,
            json,
        } => {
            let engine = Engine::new(config.clone(), demo_rules(&config), demo_questions())?;
            let entities: Vec<Entity> = entities.into_iter().map(Entity::new).collect();
            let goal = engine.goal(&goal, &entities)?;

            let mut interview = engine.interview(goal);
            for raw in &given {
                let (factlet, value) = parse_given(&engine, raw)?;
                interview.session_mut().assert_any(factlet, value);
            }

            let stdin = std::io::stdin();
            let mut source = StdinSource {
                input: stdin.lock(),
            };
            let value = interview.run(&mut source)?;

            if json {
                let out = serde_json::json!({
                    "goal": interview.goal(),
                    "value": value,
                    "facts": interview
                        .session()
                        .facts()
                        .iter()
                        .map(|(f, v)| serde_json::json!({ "fact": f, "value": v }))
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&out).into_diagnostic()?);
            } else {
                println!();
                println!(
                    "{}({}) = {}",
                    interview.goal().relationship,
                    interview.goal().args,
                    value
                );
            }
        }

        Commands::InitConfig { path } => {
            InterviewConfig::default().save(&path)?;
            println!("Wrote default config to {}", path.display());
        }
    }

    Ok(())
}
