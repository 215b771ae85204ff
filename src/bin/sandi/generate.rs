use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use rand::rngs::OsRng;
use serde::Serialize;

use sandi::{Dictionary, LengthPolicy, PassphraseConfig, PasswordConfig, Secret, Separator};

use crate::settings::{PassphraseSettings, PasswordSettings, Settings};
use crate::ProgError;

#[derive(clap::Args)]
pub(crate) struct PasswordArgs {
    /// Number of characters in the password.
    #[arg(short = 'L', long)]
    length: Option<usize>,
    /// Include uppercase letters.
    #[arg(long, overrides_with = "no_uppercase")]
    uppercase: bool,
    /// Leave out uppercase letters.
    #[arg(long, overrides_with = "uppercase")]
    no_uppercase: bool,
    /// Include lowercase letters.
    #[arg(long, overrides_with = "no_lowercase")]
    lowercase: bool,
    /// Leave out lowercase letters.
    #[arg(long, overrides_with = "lowercase")]
    no_lowercase: bool,
    /// Include digits.
    #[arg(long, overrides_with = "no_digits")]
    digits: bool,
    /// Leave out digits.
    #[arg(long, overrides_with = "digits")]
    no_digits: bool,
    /// Include symbols.
    #[arg(long, overrides_with = "no_symbols")]
    symbols: bool,
    /// Leave out symbols.
    #[arg(long, overrides_with = "symbols")]
    no_symbols: bool,
    /// Fail instead of lengthening a password too short to hold every selected class.
    #[arg(long, overrides_with = "no_strict_length")]
    strict_length: bool,
    /// Lengthen a password too short to hold every selected class.
    #[arg(long, overrides_with = "strict_length")]
    no_strict_length: bool,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
pub(crate) struct PassphraseArgs {
    /// Number of words in the passphrase.
    #[arg(short = 'w', long)]
    words: Option<usize>,
    /// Separator between words, either the character itself or its name (see `separators`).
    #[arg(short = 's', long)]
    separator: Option<Separator>,
    /// Capitalize the first letter of every word.
    #[arg(long, overrides_with = "no_capitalize")]
    capitalize: bool,
    /// Keep every word lowercase.
    #[arg(long, overrides_with = "capitalize")]
    no_capitalize: bool,
    /// Insert a random number between 0 and 9999 among the words.
    #[arg(long, overrides_with = "no_add_number")]
    add_number: bool,
    /// Do not insert a number.
    #[arg(long, overrides_with = "add_number")]
    no_add_number: bool,
    /// Newline-separated word list to use instead of the bundled one.
    #[arg(long)]
    wordlist: Option<PathBuf>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// How many secrets to generate.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
    /// Print each secret as a JSON object.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct PasswordOutput<'a> {
    password: &'a Secret,
    length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    adjusted_from: Option<usize>,
}

#[derive(Serialize)]
struct PassphraseOutput<'a> {
    passphrase: &'a Secret,
    words: usize,
    separator: Separator,
}

pub(crate) fn password(settings: &Settings, args: PasswordArgs) -> Result<(), ProgError> {
    let config = password_config(&settings.password, &args)?;

    let mut stdout = io::stdout().lock();
    for _ in 0..args.output.count {
        let generated = sandi::generate_password(&mut OsRng, &config)?;
        if args.output.json {
            let output = PasswordOutput {
                password: generated.secret(),
                length: generated.length(),
                adjusted_from: generated.adjusted_from(),
            };
            serde_json::to_writer(&mut stdout, &output).context("failed to write JSON output")?;
            writeln!(stdout).context("failed to write output")?;
        } else {
            if let Some(requested) = generated.adjusted_from() {
                eprintln!(
                    "Note: password length raised from {} to {} to fit every selected \
                     character class.",
                    requested,
                    generated.length()
                );
            }
            writeln!(stdout, "{}", generated.secret().as_str()).context("failed to write output")?;
        }
    }
    Ok(())
}

pub(crate) fn passphrase(settings: &Settings, args: PassphraseArgs) -> Result<(), ProgError> {
    let defaults = &settings.passphrase;
    let config = passphrase_config(defaults, &args)?;
    let dictionary = match args.wordlist.as_ref().or(defaults.wordlist.as_ref()) {
        Some(path) => load_wordlist(path)?,
        None => Dictionary::builtin(),
    };
    tracing::debug!(words = dictionary.len(), "word list ready");

    let mut stdout = io::stdout().lock();
    for _ in 0..args.output.count {
        let phrase = sandi::generate_passphrase(&mut OsRng, &config, &dictionary)?;
        if args.output.json {
            let output = PassphraseOutput {
                passphrase: &phrase,
                words: config.word_count(),
                separator: config.separator(),
            };
            serde_json::to_writer(&mut stdout, &output).context("failed to write JSON output")?;
            writeln!(stdout).context("failed to write output")?;
        } else {
            writeln!(stdout, "{}", phrase.as_str()).context("failed to write output")?;
        }
    }
    Ok(())
}

/// Resolve a `--X`/`--no-X` pair: `None` when neither was given.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Settings-file values, overridden by whatever the command line states explicitly.
fn password_config(
    defaults: &PasswordSettings,
    args: &PasswordArgs,
) -> sandi::Result<PasswordConfig> {
    let merged = PasswordSettings {
        length: args.length.unwrap_or(defaults.length),
        uppercase: toggle(args.uppercase, args.no_uppercase).unwrap_or(defaults.uppercase),
        lowercase: toggle(args.lowercase, args.no_lowercase).unwrap_or(defaults.lowercase),
        digits: toggle(args.digits, args.no_digits).unwrap_or(defaults.digits),
        symbols: toggle(args.symbols, args.no_symbols).unwrap_or(defaults.symbols),
        length_policy: match toggle(args.strict_length, args.no_strict_length) {
            Some(true) => LengthPolicy::Reject,
            Some(false) => LengthPolicy::Raise,
            None => defaults.length_policy,
        },
    };
    Ok(PasswordConfig::new(merged.length, merged.classes())?
        .with_length_policy(merged.length_policy))
}

fn passphrase_config(
    defaults: &PassphraseSettings,
    args: &PassphraseArgs,
) -> sandi::Result<PassphraseConfig> {
    Ok(PassphraseConfig::new(
        args.words.unwrap_or(defaults.words),
        args.separator.unwrap_or(defaults.separator),
        &defaults.policy(),
    )?
    .capitalize(toggle(args.capitalize, args.no_capitalize).unwrap_or(defaults.capitalize))
    .add_number(toggle(args.add_number, args.no_add_number).unwrap_or(defaults.add_number)))
}

fn load_wordlist(path: &Path) -> anyhow::Result<Dictionary> {
    let file = File::open(path)
        .with_context(|| format!("failed to open word list {}", path.display()))?;
    Dictionary::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to read word list {}", path.display()))
}

pub(crate) fn list_separators() -> Result<(), ProgError> {
    struct SeparatorRow {
        shown: String,
        name: &'static str,
    }

    impl crate::table::TableDisplay for SeparatorRow {
        fn columns() -> usize {
            2
        }

        fn column_name(column_index: usize) -> &'static str {
            match column_index {
                0 => "Separator",
                1 => "Name",
                _ => panic!(),
            }
        }

        fn item(&self, column_index: usize) -> &str {
            match column_index {
                0 => &self.shown,
                1 => self.name,
                _ => panic!(),
            }
        }
    }

    let rows = Separator::ALL
        .into_iter()
        .map(|sep| SeparatorRow {
            shown: format!("{:?}", sep.as_str()),
            name: sep.name(),
        })
        .collect::<Vec<_>>();
    crate::table::display_table(&rows, io::stdout()).context("failed to output table")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use sandi::CharacterClass;

    #[derive(Parser)]
    struct PasswordCommand {
        #[command(flatten)]
        args: PasswordArgs,
    }

    #[derive(Parser)]
    struct PassphraseCommand {
        #[command(flatten)]
        args: PassphraseArgs,
    }

    fn password_args(flags: &[&str]) -> PasswordArgs {
        PasswordCommand::try_parse_from(std::iter::once("password").chain(flags.iter().copied()))
            .unwrap()
            .args
    }

    fn passphrase_args(flags: &[&str]) -> PassphraseArgs {
        PassphraseCommand::try_parse_from(
            std::iter::once("passphrase").chain(flags.iter().copied()),
        )
        .unwrap()
        .args
    }

    #[test]
    fn settings_apply_when_no_flags_are_given() {
        let defaults = PasswordSettings {
            length: 20,
            symbols: false,
            length_policy: LengthPolicy::Reject,
            ..PasswordSettings::default()
        };
        let config = password_config(&defaults, &password_args(&[])).unwrap();
        assert_eq!(config.length(), 20);
        assert_eq!(config.length_policy(), LengthPolicy::Reject);
        assert!(!config.classes().any(|class| class == CharacterClass::Symbols));
    }

    #[test]
    fn flags_turn_classes_back_on_and_off() {
        let defaults = PasswordSettings {
            symbols: false,
            ..PasswordSettings::default()
        };
        let config = password_config(&defaults, &password_args(&["--symbols", "--no-digits"]))
            .unwrap();
        assert_eq!(
            config.classes().collect::<Vec<_>>(),
            vec![
                CharacterClass::Uppercase,
                CharacterClass::Lowercase,
                CharacterClass::Symbols
            ]
        );
    }

    #[test]
    fn last_of_a_flag_pair_wins() {
        let defaults = PasswordSettings::default();
        let args = password_args(&["--no-symbols", "--symbols", "--strict-length"]);
        let config = password_config(&defaults, &args).unwrap();
        assert!(config.classes().any(|class| class == CharacterClass::Symbols));
        assert_eq!(config.length_policy(), LengthPolicy::Reject);

        let args = password_args(&["--strict-length", "--no-strict-length", "--no-symbols"]);
        let config = password_config(&defaults, &args).unwrap();
        assert!(!config.classes().any(|class| class == CharacterClass::Symbols));
        assert_eq!(config.length_policy(), LengthPolicy::Raise);
    }

    #[test]
    fn passphrase_flags_override_enabled_settings() {
        let defaults = PassphraseSettings {
            capitalize: true,
            add_number: true,
            min_dictionary_size: 50,
            ..PassphraseSettings::default()
        };
        let config = passphrase_config(&defaults, &passphrase_args(&[])).unwrap();
        assert!(config.capitalizes());
        assert!(config.adds_number());
        assert_eq!(config.min_dictionary_size(), 50);

        let args = passphrase_args(&[
            "--no-capitalize",
            "--no-add-number",
            "-w",
            "7",
            "-s",
            "period",
        ]);
        let config = passphrase_config(&defaults, &args).unwrap();
        assert!(!config.capitalizes());
        assert!(!config.adds_number());
        assert_eq!(config.word_count(), 7);
        assert_eq!(config.separator(), Separator::Period);
    }

    #[test]
    fn passphrase_flags_enable_disabled_settings() {
        let args = passphrase_args(&["--capitalize", "--add-number"]);
        let config = passphrase_config(&PassphraseSettings::default(), &args).unwrap();
        assert!(config.capitalizes());
        assert!(config.adds_number());
    }
}
