mod cmd;
mod dispatch;
mod display;
mod err;
mod store;
mod value;

use cmd::parser::parse;
use dispatch::Dispatcher;
use display::{Console, Sink};
use err::MultimapError;
use store::Store;
use value::Reply;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use clap::Parser;

static WELCOME: &str = "Welcome to the Multi-Value Dictionary Manager!\n";
static PROMPT: &str = "Please enter a Command (type HELP for usage)";
static FAREWELL: &str = "\nThank you for playing! We have some lovely parting gifts for you.";

#[derive(clap::Parser)]
struct Cli {
  /// Read commands from this file instead of standard input
  script: Option<PathBuf>,
  /// Log level: off, error, warn, info, debug or trace
  #[arg(long, default_value = "warn")]
  log_level: LevelFilter,
  /// Do not print the prompt before each command
  #[arg(long)]
  quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
  let args = Cli::parse();

  SimpleLogger::new().with_level(args.log_level).init()?;

  let mut console = Console::new(tokio::io::stdout());
  console.print_message(WELCOME, true).await?;

  let outcome = match open_input(args.script.as_deref()).await {
    Ok(input) => Session::new(input, &mut console, !args.quiet).run().await,
    Err(e) => Err(e),
  };

  if let Err(e) = outcome {
    report_failure(&mut console, &e).await?;
    process::exit(1);
  }

  console.print_message(FAREWELL, true).await?;
  Ok(())
}

async fn open_input(
  script: Option<&Path>,
) -> Result<Box<dyn AsyncRead + Unpin + Send>, MultimapError> {
  match script {
    Some(path) => {
      info!("reading commands from {}", path.display());
      Ok(Box::new(File::open(path).await?))
    }
    None => Ok(Box::new(tokio::io::stdin())),
  }
}

/// Last words of a session that could not go on.
async fn report_failure<S: Sink>(sink: &mut S, e: &MultimapError) -> Result<(), MultimapError> {
  sink
    .print_message(&format!("Run time ERROR: {e}"), true)
    .await
}

/// Reads one raw line; `None` once the input is exhausted.
async fn read_cmd<T: AsyncRead + Unpin>(
  read: &mut BufReader<T>,
) -> Result<Option<String>, MultimapError> {
  let mut line = String::new();
  if read.read_line(&mut line).await? == 0 {
    return Ok(None);
  }
  Ok(Some(line))
}

struct Session<'a, R, S> {
  read: BufReader<R>,
  sink: &'a mut S,
  dispatcher: Dispatcher,
  prompt: bool,
}

impl<'a, R: AsyncRead + Unpin, S: Sink> Session<'a, R, S> {
  pub fn new(input: R, sink: &'a mut S, prompt: bool) -> Session<'a, R, S> {
    Session {
      read: BufReader::new(input),
      sink,
      dispatcher: Dispatcher::new(Store::new()),
      prompt,
    }
  }

  /// Prompts until a non-blank line arrives.
  async fn next_line(&mut self) -> Result<Option<String>, MultimapError> {
    loop {
      if self.prompt {
        self.sink.print_message(PROMPT, true).await?;
      }
      match read_cmd(&mut self.read).await? {
        Some(line) if line.trim().is_empty() => continue,
        line => return Ok(line),
      }
    }
  }

  pub async fn run(&mut self) -> Result<(), MultimapError> {
    info!("session started");

    while let Some(line) = self.next_line().await? {
      let command = parse(&line);
      let reply = self.dispatcher.dispatch(&command);

      if let Some(message) = reply.message() {
        self.sink.print_message(&message, true).await?;
      }

      match reply {
        Reply::Exit => {
          info!("session ended, keys_len={}", self.dispatcher.store().len());
          return Ok(());
        }
        Reply::List(items) if !items.is_empty() => self.sink.print_list(&items).await?,
        _ => {}
      }
    }

    info!("end of input, closing session");
    Ok(())
  }
}
