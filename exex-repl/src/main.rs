mod bench;
mod error;

use bench::Submission;
use error::Error;
use exex_parser::ExpressionDescription;
use log::info;
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};
use std::{fs, io::{self, IsTerminal, Read}, process};

/// Tracks the target expression between lines.
#[derive(Default)]
struct Session {
    target: Option<ExpressionDescription>,
}

impl Session {
    /// Handles one line of input.
    ///
    /// A line starting with `:coins` builds the listed coin terms into an expression and submits
    /// it against the current target. Any other non-empty line sets the target.
    fn process(&mut self, line: &str) -> Result<(), Error> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix(":coins") {
            let target = self.target.as_ref().ok_or(Error::NoTarget)?;
            let coins = bench::parse_coins(rest.split_whitespace())?;
            match bench::build_and_submit(target, &coins)? {
                Submission::Collected => println!("collected: matches {}", target),
                Submission::Rejected => println!("rejected: does not match {}", target),
                Submission::Empty { matches: true } => println!("every coin cancelled out, as wanted"),
                Submission::Empty { matches: false } => println!("every coin cancelled out"),
            }
            return Ok(());
        }

        let description = ExpressionDescription::new(line)
            .map_err(|error| Error::Parse { source: line.to_string(), error })?;
        println!("{}", description);
        info!("target has {} term(s)", description.terms().len());
        self.target = Some(description);
        Ok(())
    }

    fn process_all(&mut self, input: &str) {
        for line in input.lines() {
            if let Err(err) = self.process(line) {
                err.report_to_stderr();
            }
        }
    }
}

fn init_logging() {
    let level = std::env::var("EXEX_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Warn);
    let logger = TermLogger::new(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
    if let Err(err) = CombinedLogger::init(vec![logger]) {
        eprintln!("could not start logging: {}", err);
    }
}

fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
    let input = rl.readline("> ")?;
    if input.trim().is_empty() {
        return Ok(());
    }

    rl.add_history_entry(&input)?;
    if let Err(err) = session.process(&input) {
        err.report_to_stderr();
    }

    Ok(())
}

fn main() {
    init_logging();
    let mut session = Session::default();

    if let Some(path) = std::env::args().nth(1) {
        match fs::read_to_string(&path) {
            Ok(input) => session.process_all(&input),
            Err(err) => {
                eprintln!("could not read {}: {}", path, err);
                process::exit(1);
            },
        }
        return;
    }

    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            process::exit(1);
        }
        session.process_all(&input);
        return;
    }

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("could not start the editor: {}", err);
            process::exit(1);
        },
    };

    loop {
        if let Err(err) = process_line(&mut rl, &mut session) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
}
