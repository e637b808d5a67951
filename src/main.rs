use std::{
    path::{Path, PathBuf},
    process::exit,
    time::Instant,
};

use clap::{Parser, Subcommand};

use automata_toolkit::{
    accepts_string, compile,
    parse::{read_automaton, read_lexer},
    subset, to_regex, Automaton, Error, Minimizer, Options, Production, Strategy,
};

/// Command line tools for finite automata and regexes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks which of the given words the automaton accepts
    Check {
        /// The automaton description file, NFAs are determinized first
        file: PathBuf,
        words: Vec<String>,
    },
    /// Prints the minimal DFA of an automaton description
    Minimize {
        file: PathBuf,
        /// The minimization algorithm
        #[arg(long, short, value_enum, default_value_t = Strategy::default())]
        strategy: Strategy,
    },
    /// Prints a regex in prefix notation accepting the language of the automaton
    ToRegex {
        file: PathBuf,
        /// Skip simplifying the resulting regex
        #[arg(long)]
        skip_simp: bool,
    },
    /// Compiles a regex in prefix notation into a DFA and checks the given words
    Compile {
        regex: String,
        /// The minimization algorithm
        #[arg(long, short, value_enum, default_value_t = Strategy::default())]
        strategy: Strategy,
        /// Print the DFA produced by the subset construction without minimizing it
        #[arg(long)]
        skip_min: bool,
        words: Vec<String>,
    },
    /// Splits the content of a file into tokens according to a lexical description
    Scan { lexer: PathBuf, input: PathBuf },
}

fn main() {
    env_logger::init();
    let ts = Instant::now();
    let cli = Args::parse();

    match run(cli.command) {
        Ok(()) => (),
        Err(err) => {
            log::error!("Error: {}", err);
            exit(1);
        }
    }

    log::info!("Done ({}ms).", ts.elapsed().as_millis());
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Check { file, words } => {
            let dfa = load_dfa(&file)?;
            classify(&dfa, &words);
        }
        Command::Minimize { file, strategy } => {
            let dfa = load_dfa(&file)?;
            let min = strategy.minimize(&dfa);
            log::info!("Minimized {} states to {}", dfa.len(), min.len());
            println!("{}", min);
        }
        Command::ToRegex { file, skip_simp } => {
            let dfa = load_dfa(&file)?;
            let options = Options {
                simplify: !skip_simp,
                ..Default::default()
            };
            println!("{}", to_regex(&dfa, &options));
        }
        Command::Compile {
            regex,
            strategy,
            skip_min,
            words,
        } => {
            let regex: Production = regex.parse()?;
            let options = Options {
                minimize: !skip_min,
                ..Default::default()
            }
            .with_minimizer(strategy);
            let dfa = compile(&regex, &options);
            println!("{}", dfa);
            classify(&dfa, &words);
        }
        Command::Scan { lexer, input } => {
            let lexer = read_lexer(&lexer)?;
            let text = std::fs::read_to_string(input)?;
            for token in lexer.scan(&text)? {
                println!("{}\t{}\t{}", token.class, token.relevance, token.text.escape_debug());
            }
        }
    }
    Ok(())
}

fn load_dfa(file: &Path) -> Result<Automaton, Error> {
    let automaton = read_automaton(file)?;
    if automaton.is_deterministic() {
        Ok(automaton)
    } else {
        log::info!("Determinizing NFA with {} states", automaton.len());
        Ok(subset::convert(&automaton))
    }
}

fn classify(dfa: &Automaton, words: &[String]) {
    for word in words {
        let verdict = if accepts_string(dfa, word) {
            "accept"
        } else {
            "reject"
        };
        println!("{}\t{}", word, verdict);
    }
}
