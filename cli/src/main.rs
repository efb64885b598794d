//! Interactive terminal frontend for the libenglish engine.
//!
//! The REPL reads a line at a time and feeds it through the engine
//! char-by-char as simulated key events, printing the preedit, candidate
//! list, and commits after each step. A literal tab toggles suggestion
//! mode; digits select candidates while suggesting; space and punctuation
//! end the word.
//!
//! Run with: `libenglish --dict words.txt`

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use libenglish_core::{Config, Dictionary, Engine, KeyEvent, Mode, Outcome};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "libenglish", about = "Incremental English completion engine")]
struct Cli {
    /// Word list, one word per line (or a compiled .bin image)
    #[arg(long, default_value = "words.txt")]
    dict: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Compile the word list into a bincode image for faster startup
    Compile {
        /// Output path for the compiled image
        #[arg(long, default_value = "words.bin")]
        out: PathBuf,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn load_dictionary(cli: &Cli, config: &Config) -> Result<Dictionary> {
    if cli.dict.extension().is_some_and(|ext| ext == "bin") {
        Dictionary::load_bincode(&cli.dict)
    } else {
        Dictionary::load(&cli.dict, config.max_word_len)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let dictionary = load_dictionary(&cli, &config)?;
    if dictionary.is_empty() {
        bail!("dictionary {} holds no usable words", cli.dict.display());
    }
    println!("Loaded {} words from {}", dictionary.len(), cli.dict.display());

    if let Some(Command::Compile { out }) = &cli.command {
        dictionary.save_bincode(out)?;
        println!("Wrote compiled dictionary to {}", out.display());
        return Ok(());
    }

    repl(Engine::new(Arc::new(dictionary), config))
}

fn repl(mut engine: Engine) -> Result<()> {
    println!();
    println!("Type to compose a word; keys are simulated per character:");
    println!("  Tab        toggle suggestions (needs 3+ buffered chars)");
    println!("  1-9, 0     select a candidate while suggesting");
    println!("  space/./,  end the word and commit it");
    println!("  :quit      exit");
    println!();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line == ":quit" || line == ":q" {
            break;
        }

        for ch in line.chars() {
            let key = match ch {
                '\t' => KeyEvent::Toggle,
                other => KeyEvent::Char(other),
            };
            step(&mut engine, key);
        }
        // End of line acts as Enter.
        step(&mut engine, KeyEvent::Enter);
    }
    Ok(())
}

fn step(engine: &mut Engine, key: KeyEvent) {
    let outcome = engine.process_key(key);
    match outcome {
        Outcome::PassThrough => {}
        Outcome::ClearAndReset => println!("  (cancelled)"),
        Outcome::Commit(_) => {
            let text = engine.context_mut().take_commit();
            println!("  => committed {text:?}");
        }
        Outcome::Redisplay => {
            let context = engine.context();
            let mode = match engine.session().mode() {
                Mode::Editing => "edit",
                Mode::Suggesting => "suggest",
            };
            print!(
                "  [{mode}] {}|{}",
                &context.preedit_text[..byte_offset(&context.preedit_text, context.preedit_cursor)],
                &context.preedit_text[byte_offset(&context.preedit_text, context.preedit_cursor)..],
            );
            if !context.candidates.is_empty() {
                print!("   candidates:");
                for (i, cand) in context.candidates.iter().enumerate() {
                    let marker = if i == context.candidate_cursor { "*" } else { "" };
                    print!(" {}.{marker}{}", i + 1, cand.trim_end());
                }
            }
            println!();
        }
    }
}

/// Convert a char offset into a byte offset within `text`.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
