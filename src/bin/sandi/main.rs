use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod generate;
mod settings;
mod table;

#[derive(Parser)]
#[command(version, about = "Generate passwords and passphrases from secure randomness.")]
struct Args {
    /// YAML file with default generator settings.
    #[arg(long, global = true, env = "SANDI_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a random password that contains every selected character class.
    #[command(alias = "pw")]
    Password(generate::PasswordArgs),
    /// Generate a passphrase of random dictionary words.
    #[command(alias = "pp")]
    Passphrase(generate::PassphraseArgs),
    /// List the separators a passphrase may use.
    Separators,
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();
    let settings = settings::Settings::load(args.config.as_deref())?;

    match args.command {
        Command::Password(password_args) => generate::password(&settings, password_args)?,
        Command::Passphrase(passphrase_args) => {
            generate::passphrase(&settings, passphrase_args)?
        }
        Command::Separators => generate::list_separators()?,
    }

    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "sandi=warn".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("Passphrase generation is disabled: {0}")]
    PassphraseDisabled(#[source] sandi::Error),
    #[error("{0}")]
    Generation(#[source] sandi::Error),
    #[error("{0:#}")]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<sandi::Error> for ProgError {
    fn from(err: sandi::Error) -> ProgError {
        match err {
            sandi::Error::DictionaryTooSmall { .. } => ProgError::PassphraseDisabled(err),
            err => ProgError::Generation(err),
        }
    }
}
