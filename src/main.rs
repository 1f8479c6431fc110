use std::path::PathBuf;
use std::{env, process};

use home::home_dir;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use lox::Lox;

const HISTORY_FILE: &str = ".lox_history";

fn history_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(HISTORY_FILE))
}

fn run_prompt() {
    let mut lox = Lox::new_stdout();
    let mut editor = DefaultEditor::new().expect("failed to initialize line editor");

    let history_path = history_path();
    if let Some(path) = &history_path {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "exit" || trimmed == "quit" {
                    break;
                }

                editor.add_history_entry(line.as_str()).ok();
                lox.run_repl_line(&line);
            },
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error reading input: {err}");
                break;
            },
        }
    }

    if let Some(path) = &history_path {
        let _ = editor.save_history(path);
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        n if n > 2 => {
            eprintln!("Usage: lox [script]");
            process::exit(22);
        },
        2 => Lox::new_stdout().run_file(&args[1]),
        _ => run_prompt(),
    }
}
