use clap::Parser;
use sandbox_js::{inspect, Globals, Sandbox, Value};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

mod history;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run sandboxed scripts, or start an interactive session")]
struct Cli {
  /// Script to execute; reads statements interactively when omitted.
  file: Option<PathBuf>,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  match cli.file {
    Some(file) => futures::executor::block_on(run_file(&file)),
    None => futures::executor::block_on(run_repl()),
  }
}

fn default_globals() -> Globals {
  let mut globals = Globals::new();
  globals.seed_console();
  globals
}

async fn run_file(file: &PathBuf) -> ExitCode {
  let source = match std::fs::read_to_string(file) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("sandbox-js: cannot read {}: {err}", file.display());
      return ExitCode::FAILURE;
    }
  };

  let sandbox = Sandbox::with_globals(&default_globals());
  match sandbox.eval(&source).await {
    Ok(Value::Undefined) => ExitCode::SUCCESS,
    Ok(value) => {
      println!("{}", inspect(&value));
      ExitCode::SUCCESS
    }
    Err(err) => {
      eprintln!("{err}");
      ExitCode::FAILURE
    }
  }
}

async fn run_repl() -> ExitCode {
  let sandbox = Sandbox::with_globals(&default_globals());
  let mut history = history::History::load();

  let stdin = io::stdin();
  let mut lines = stdin.lock().lines();
  loop {
    print!("> ");
    let _ = io::stdout().flush();

    let Some(Ok(line)) = lines.next() else {
      break;
    };
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }
    if trimmed == ".exit" {
      break;
    }
    history.push(trimmed);

    match sandbox.eval(&line).await {
      Ok(Value::Undefined) => {}
      Ok(value) => println!("{}", inspect(&value)),
      Err(err) => eprintln!("{err}"),
    }
  }

  history.save();
  ExitCode::SUCCESS
}
