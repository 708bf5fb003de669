mod driver;
mod terminal;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use env_logger::Env;
use quiz_core::model::AnswerKeyPolicy;
use services::providers::{BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_QUESTIONS_PATH, PATH_ENV};
use services::{
    Clock, FixtureQuestionProvider, HttpQuestionProvider, ProviderConfig, QuestionProvider,
    QuizSession, SessionOptions,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use driver::{Flow, Input};
use terminal::TerminalPresenter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSample { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSample { raw } => write!(f, "invalid --sample value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [--base-url <url>] [--path <path>] [--strict-answers]");
    eprintln!("  quiz --fixture <file|bundled> [--shuffle] [--sample <n>] [--strict-answers]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --base-url {DEFAULT_BASE_URL}");
    eprintln!("  --path {DEFAULT_QUESTIONS_PATH}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_BASE_URL, QUIZ_API_PATH, QUIZ_FIXTURE, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Http { base_url: String, path: String },
    Fixture { path: Option<PathBuf> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    source: Source,
    shuffle: bool,
    sample: Option<usize>,
    answer_key: AnswerKeyPolicy,
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());
        let mut base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let mut path = lookup(PATH_ENV).unwrap_or_else(|| DEFAULT_QUESTIONS_PATH.into());
        let mut fixture = lookup("QUIZ_FIXTURE");
        let mut shuffle = false;
        let mut sample = None;
        let mut answer_key = AnswerKeyPolicy::Permissive;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--base-url" => base_url = require_value(args, "--base-url")?,
                "--path" => path = require_value(args, "--path")?,
                "--fixture" => fixture = Some(require_value(args, "--fixture")?),
                "--shuffle" => shuffle = true,
                "--sample" => {
                    let value = require_value(args, "--sample")?;
                    let parsed: usize = value
                        .parse()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| ArgsError::InvalidSample { raw: value.clone() })?;
                    sample = Some(parsed);
                }
                "--strict-answers" => answer_key = AnswerKeyPolicy::ExactlyOne,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let source = match fixture {
            Some(raw) if raw == "bundled" => Source::Fixture { path: None },
            Some(raw) => Source::Fixture {
                path: Some(PathBuf::from(raw)),
            },
            None => Source::Http { base_url, path },
        };

        Ok(Parsed::Run(Self {
            source,
            shuffle,
            sample,
            answer_key,
        }))
    }

    fn provider(&self) -> Result<Arc<dyn QuestionProvider>, Box<dyn std::error::Error>> {
        match &self.source {
            Source::Http { base_url, path } => {
                let config = ProviderConfig::new(base_url, path)?;
                log::info!("questions from {}", config.endpoint());
                Ok(Arc::new(HttpQuestionProvider::new(config)))
            }
            Source::Fixture { path } => {
                let mut fixture = match path {
                    Some(path) => {
                        log::info!("questions from fixture {}", path.display());
                        FixtureQuestionProvider::from_path(path)?
                    }
                    None => {
                        log::info!("questions from bundled fixture");
                        FixtureQuestionProvider::bundled()?
                    }
                };
                fixture = fixture.with_shuffle(self.shuffle);
                if let Some(sample) = self.sample {
                    fixture = fixture.with_sample(sample);
                }
                Ok(Arc::new(fixture))
            }
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = match Args::parse(&mut argv, |key| std::env::var(key).ok()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return Err(e.into());
        }
    };

    let provider = args.provider()?;
    let options = SessionOptions {
        answer_key: args.answer_key,
        clock: Clock::system(),
    };
    let mut session =
        QuizSession::new(provider, Arc::new(TerminalPresenter::new())).with_options(options);
    session.present();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if driver::handle(&mut session, Input::parse(&line)).await? == Flow::Quit {
            break;
        }
    }

    if let Some(summary) = session.summary() {
        log::info!(
            "last run scored {} in {}s",
            summary.score(),
            summary.duration().num_seconds()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str], env: &[(&str, &str)]) -> Result<Parsed, ArgsError> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut iter = argv.iter().map(|arg| (*arg).to_string());
        Args::parse(&mut iter, move |key| {
            env.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
    }

    fn run_args(parsed: Result<Parsed, ArgsError>) -> Args {
        match parsed.unwrap() {
            Parsed::Run(args) => args,
            Parsed::Help => panic!("expected run args"),
        }
    }

    #[test]
    fn defaults_to_local_random_endpoint() {
        let args = run_args(parse(&[], &[]));
        assert_eq!(
            args.source,
            Source::Http {
                base_url: DEFAULT_BASE_URL.into(),
                path: DEFAULT_QUESTIONS_PATH.into(),
            }
        );
        assert_eq!(args.answer_key, AnswerKeyPolicy::Permissive);
    }

    #[test]
    fn flags_override_environment() {
        let args = run_args(parse(
            &["--base-url", "http://quiz.local:8080", "--strict-answers"],
            &[
                ("QUIZ_API_BASE_URL", "http://env.local"),
                ("QUIZ_API_PATH", "/api/questions"),
            ],
        ));
        assert_eq!(
            args.source,
            Source::Http {
                base_url: "http://quiz.local:8080".into(),
                path: "/api/questions".into(),
            }
        );
        assert_eq!(args.answer_key, AnswerKeyPolicy::ExactlyOne);
    }

    #[test]
    fn fixture_selects_offline_source() {
        let args = run_args(parse(&["--fixture", "bundled", "--shuffle", "--sample", "5"], &[]));
        assert_eq!(args.source, Source::Fixture { path: None });
        assert!(args.shuffle);
        assert_eq!(args.sample, Some(5));

        let args = run_args(parse(&[], &[("QUIZ_FIXTURE", "questions.json")]));
        assert_eq!(
            args.source,
            Source::Fixture {
                path: Some(PathBuf::from("questions.json"))
            }
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(
            parse(&["--sample", "0"], &[]),
            Err(ArgsError::InvalidSample { .. })
        ));
        assert!(matches!(
            parse(&["--path"], &[]),
            Err(ArgsError::MissingValue { flag: "--path" })
        ));
        assert!(matches!(
            parse(&["--verbose"], &[]),
            Err(ArgsError::UnknownArg(arg)) if arg == "--verbose"
        ));
        assert!(matches!(parse(&["-h"], &[]), Ok(Parsed::Help)));
    }
}
