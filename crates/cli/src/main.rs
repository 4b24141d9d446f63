//! # CLI - lexbag interactive shell
//!
//! A REPL over one in-memory word index: a table of names whose pointer and
//! frame sections live in two shared bags. Reads commands from stdin and
//! prints one reply per command to stdout, so it can be scripted by piping
//! commands in.
//!
//! ## Commands
//!
//! ```text
//! ADD name type synset     Append a row; type is a number or a lex name (noun.act.3)
//! PTR row key value        Add a pointer entry
//! FRAME row key value      Add a frame entry
//! GET row key              Pointer values stored under key
//! RANGE row lo [hi]        Pointer values with lo <= key < hi (hi defaults to 256)
//! UNPTR row key value      Remove one pointer entry
//! UNKEY row key            Remove every pointer entry under key
//! DEL row                  Wipe the row's sections and tombstone it
//! SHOW row                 Print a row with its entries
//! STATS                    Table and bag occupancy
//! DUMP                     Print the index as JSON
//! EXIT / QUIT              Leave the shell
//! ```
//!
//! ## Configuration
//!
//! ```text
//! LEXBAG_RESERVE   initial capacity of each bag      (default: 4096)
//! LEXBAG_CHECKED   reject invalid entries with ERR    (default: true)
//! RUST_LOG         tracing filter, logs go to stderr (default: warn)
//! ```
//!
//! ## Example
//!
//! ```text
//! $ cargo run -p cli
//! lexbag started (reserve=4096, checked=true)
//! > ADD dog noun.animal.0 2084
//! row 0
//! > PTR 0 1 20
//! OK
//! > GET 0 1
//! 20
//! > EXIT
//! bye
//! ```

mod shell;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use config::Settings;
use shell::{Outcome, Shell};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let settings = Settings::from_env();
    let mut shell = Shell::new(&settings);

    println!(
        "lexbag started (reserve={}, checked={})",
        settings.reserve, settings.checked
    );
    println!("Commands: ADD | PTR | FRAME | GET | RANGE | UNPTR | UNKEY | DEL | SHOW");
    println!("          STATS | DUMP | EXIT");
    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        match shell.exec(&line) {
            Ok(Outcome::Reply(reply)) => {
                if !reply.is_empty() {
                    println!("{reply}");
                }
            }
            Ok(Outcome::Exit) => {
                println!("bye");
                break;
            }
            Err(e) => {
                tracing::debug!(target: "cli", line = %line, error = %e, "command failed");
                println!("ERR {e:#}");
            }
        }

        print!("> ");
        io::stdout().flush().ok();
    }

    Ok(())
}
