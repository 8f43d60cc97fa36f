//! Chain Trainer: trains a word chain from a text file and saves it as RON.
//!
//! Usage: chain_trainer --input <file> --output <chain.ron> [--memory <n>] [--html]
use infinite_monkeys::core::word_chain::{save_word_chain, words_from_text, WordChain};
use infinite_monkeys::corpus::dialogue::parse_dialogue;
use std::env;
use std::process;

const USAGE: &str =
    "Usage: chain_trainer --input <file> --output <chain.ron> [--memory <n>] [--html]";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut output = None;
    let mut memory = 2usize;
    let mut html = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" if i + 1 < args.len() => {
                i += 1;
                input = Some(args[i].clone());
            }
            "--output" if i + 1 < args.len() => {
                i += 1;
                output = Some(args[i].clone());
            }
            "--memory" if i + 1 < args.len() => {
                i += 1;
                memory = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --memory must be a positive integer");
                    process::exit(1);
                });
            }
            "--html" => html = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input_path = input.unwrap_or_else(|| {
        eprintln!("Error: --input is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });

    let output_path = output.unwrap_or_else(|| {
        eprintln!("Error: --output is required");
        eprintln!("{}", USAGE);
        process::exit(1);
    });

    let text = std::fs::read_to_string(&input_path).unwrap_or_else(|e| {
        eprintln!("Error reading input file '{}': {}", input_path, e);
        process::exit(1);
    });

    println!("Training memory-{} chain from '{}'...", memory, input_path);
    let trained = if html {
        WordChain::new(parse_dialogue(&text), memory)
    } else {
        WordChain::new(words_from_text(text.lines()), memory)
    };
    let chain = trained.unwrap_or_else(|e| {
        eprintln!("Error training chain: {}", e);
        process::exit(1);
    });

    let states = chain.chain();
    println!(
        "Chain trained: {} states, {} transitions, {} distinct words, {} sentence starts",
        states.len(),
        states.transition_count(),
        states.events().len(),
        chain.capitalized().len()
    );
    match states.randomness() {
        Ok(randomness) => println!("Randomness: {:.3}", randomness),
        Err(e) => println!("Randomness: n/a ({})", e),
    }

    save_word_chain(&chain, std::path::Path::new(&output_path)).unwrap_or_else(|e| {
        eprintln!("Error saving chain to '{}': {}", output_path, e);
        process::exit(1);
    });

    println!("Chain saved to '{}'", output_path);
}
