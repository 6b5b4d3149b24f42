use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::info;
use logos::Logos;

use tally_keys::Token;
use tally_session::{Calculator, KeyboardStyle};

#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "An interactive keypad calculator",
    long_about = "tally drives the calculator engine from a terminal.\n\n\
        Each line of input is a key sequence: digits, . + - * / ( ) % = ,\n\
        the glyphs × ÷ ±, ~ for sign toggle, c to clear, and d to delete.\n\n\
        EXAMPLES:\n\
        \n  tally --keys '12+3='        Evaluate a sequence and exit\n\
        \n  tally --style fast          Start a REPL with fast percent handling\n\
        \n  echo '2(3+4)=' | tally      Read key sequences from stdin"
)]
struct Cli {
    /// Percent-key behavior
    #[arg(long, value_enum, default_value_t = StyleArg::Classic)]
    style: StyleArg,

    /// Apply a single key sequence, print the display, and exit
    #[arg(long)]
    keys: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Classic,
    Fast,
}

impl From<StyleArg> for KeyboardStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Classic => KeyboardStyle::Classic,
            StyleArg::Fast => KeyboardStyle::Fast,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let mut calculator = Calculator::new(cli.style.into());

    if let Some(keys) = cli.keys.as_deref() {
        return match lex_line(keys) {
            Ok(tokens) => {
                for token in tokens {
                    calculator.apply(token);
                }
                println!("{}", calculator.display());
                for line in calculator.history_entries() {
                    println!("{line}");
                }
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("{message}");
                ExitCode::from(2)
            }
        };
    }

    repl(&mut calculator)
}

/// Lex a whole line up front so a typo applies none of its keys.
fn lex_line(line: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(line).spanned() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(format!(
                    "unrecognized input {:?} at column {}",
                    &line[span.clone()],
                    span.start + 1
                ))
            }
        }
    }
    Ok(tokens)
}

fn repl(calculator: &mut Calculator) -> ExitCode {
    info!("starting REPL");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            return ExitCode::FAILURE;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {}
            Err(error) => {
                eprintln!("read error: {error}");
                return ExitCode::FAILURE;
            }
        }
        let line = line.trim();

        if let Some(command) = line.strip_prefix(':') {
            match command {
                "quit" | "q" => return ExitCode::SUCCESS,
                "history" => {
                    if calculator.history().is_empty() {
                        println!("(no history)");
                    }
                    for entry in calculator.history_entries() {
                        println!("{entry}");
                    }
                }
                "clear" => {
                    calculator.clear_history();
                    println!("history cleared");
                }
                _ => println!("commands: :history  :clear  :quit"),
            }
            continue;
        }

        match lex_line(line) {
            Ok(tokens) => {
                for token in tokens {
                    calculator.apply(token);
                }
                println!("{}", calculator.display());
            }
            Err(message) => eprintln!("{message}"),
        }
    }
}
