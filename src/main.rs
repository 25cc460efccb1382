use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser as ClapParser;

use lox::driver::Lox;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Script to execute; starts an interactive session when omitted.
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Cli = Cli::parse();

    match args.script {
        Some(path) => run_file(path),

        None => run_prompt(),
    }
}

fn run_file(path: PathBuf) -> anyhow::Result<()> {
    let mut buf: Vec<u8> = Vec::new();
    let mut reader: BufReader<File> = BufReader::new(File::open(path)?);
    reader.read_to_end(&mut buf)?;

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let mut lox = Lox::new(&mut stdout, &mut stderr);

    lox.run(&buf);

    if lox.had_error() {
        std::process::exit(65);
    }

    if lox.had_runtime_error() {
        std::process::exit(70);
    }

    Ok(())
}

fn run_prompt() -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let mut lox = Lox::new(&mut stdout, &mut stderr);

    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();

        // EOF on input ends the session.
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        lox.run(line.as_bytes());

        // Diagnostics never end a session; start the next line clean.
        lox.reset();
    }

    Ok(())
}
