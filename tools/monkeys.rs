//! Monkeys: generate sentences from a Markov chain trained on a play.
//!
//! Usage: monkeys [--config <file.ron>] [--memory <n>] [--seed <n>] [--count <n>]
//!                [--input <file.html>] [--url <url>] [--cache <path>] [--chain <file.ron>]
//!
//! With no options the dialogue of "Hamlet" is downloaded (and cached under
//! `data/`), a chain with a two-word memory is trained, and one sentence is
//! printed. A chain loaded with `--chain` keeps its own memory; `--memory` and
//! the config's memory then only print a warning if they disagree with it.
//! Set `RUST_LOG=debug` for training details.

use infinite_monkeys::config::GeneratorConfig;
use infinite_monkeys::core::word_chain::{load_word_chain, WordChain};
use infinite_monkeys::corpus::dialogue::parse_dialogue;
use infinite_monkeys::corpus::source::load_cached_or_download;
use std::path::{Path, PathBuf};
use std::process;

const USAGE: &str = "Usage: monkeys [--config <file.ron>] [--memory <n>] [--seed <n>] \
[--count <n>] [--input <file.html>] [--url <url>] [--cache <path>] [--chain <file.ron>]\n\
(--chain uses the saved chain's memory; --memory then has no effect)";

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut config_path = None;
    let mut memory = None;
    let mut seed = None;
    let mut count = None;
    let mut input = None;
    let mut url = None;
    let mut cache = None;
    let mut chain_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--memory" if i + 1 < args.len() => {
                i += 1;
                memory = Some(parse_number(&args[i], "--memory"));
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = Some(parse_number(&args[i], "--seed"));
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = Some(parse_number(&args[i], "--count"));
            }
            "--input" if i + 1 < args.len() => {
                i += 1;
                input = Some(args[i].clone());
            }
            "--url" if i + 1 < args.len() => {
                i += 1;
                url = Some(args[i].clone());
            }
            "--cache" if i + 1 < args.len() => {
                i += 1;
                cache = Some(PathBuf::from(&args[i]));
            }
            "--chain" if i + 1 < args.len() => {
                i += 1;
                chain_path = Some(args[i].clone());
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("{}", USAGE);
                process::exit(1);
            }
        }
        i += 1;
    }

    let memory_requested = memory.is_some() || config_path.is_some();
    let mut config = match config_path {
        Some(ref path) => GeneratorConfig::load_from_ron(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => GeneratorConfig::default(),
    };
    if let Some(memory) = memory {
        config.memory = memory as usize;
    }
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    if let Some(count) = count {
        config.sentences = count as usize;
    }
    if let Some(url) = url {
        config.source_url = url;
    }
    if let Some(cache) = cache {
        config.cache_path = cache;
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let chain = match chain_path {
        Some(ref path) => {
            let chain = load_word_chain(Path::new(path)).unwrap_or_else(|e| {
                eprintln!("Error loading chain '{}': {}", path, e);
                process::exit(1);
            });
            let saved = chain.chain().memory();
            if memory_requested && saved != config.memory {
                eprintln!(
                    "Warning: ignoring memory {}: chain '{}' was trained with memory {}",
                    config.memory, path, saved
                );
            }
            chain
        }
        None => train_from_play(&config, input.as_deref()),
    };

    let mut rng = config.rng();
    for _ in 0..config.sentences {
        match chain.sentence(&mut rng) {
            Ok(sentence) => println!("{}", sentence),
            Err(e) => {
                eprintln!("Error generating sentence: {}", e);
                process::exit(1);
            }
        }
    }
}

fn train_from_play(config: &GeneratorConfig, input: Option<&str>) -> WordChain {
    let html = match input {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading input file '{}': {}", path, e);
            process::exit(1);
        }),
        None => load_cached_or_download(&config.source_url, &config.cache_path).unwrap_or_else(
            |e| {
                eprintln!("Error fetching '{}': {}", config.source_url, e);
                process::exit(1);
            },
        ),
    };

    WordChain::new(parse_dialogue(&html), config.memory).unwrap_or_else(|e| {
        eprintln!("Error training chain: {}", e);
        process::exit(1);
    })
}

fn parse_number(value: &str, flag: &str) -> u64 {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Error: {} expects a non-negative integer, got '{}'", flag, value);
        process::exit(1);
    })
}
