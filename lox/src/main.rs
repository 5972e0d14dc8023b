use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use lox_syntax::Lexer;

mod reporter;

use reporter::ConsoleReporter;

// sysexits.h
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_IOERR: u8 = 74;

#[derive(Parser)]
#[command(name = "lox")]
#[command(about = "Scans Lox source into tokens", long_about = None)]
#[command(override_usage = "lox [script]")]
struct Cli {
    /// Script to scan; starts an interactive prompt when omitted
    script: Option<PathBuf>,

    /// Only report errors, don't print tokens
    #[arg(long)]
    check: bool,
}

/// Scans `src`, printing tokens to `out` unless `check` is set. Returns the number of errors.
fn run(src: &str, check: bool, out: &mut impl Write) -> Result<usize> {
    let mut reporter = ConsoleReporter::new(src);
    let tokens = Lexer::new(src).scan_tokens_with(&mut reporter);

    if !check {
        for token in &tokens {
            writeln!(out, "{token}")?;
        }
    }

    Ok(reporter.errors())
}

fn run_file(path: &Path, check: bool) -> Result<ExitCode> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read source file {}", path.display()))?;
    info!("scanning {} ({} bytes)", path.display(), src.len());

    let errors = run(&src, check, &mut io::stdout().lock())?;

    if errors > 0 {
        debug!("{errors} errors in {}", path.display());
        Ok(ExitCode::from(EX_DATAERR))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn repl(check: bool) -> Result<ExitCode> {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // Ctrl-D
            println!();
            return Ok(ExitCode::SUCCESS);
        }

        let line = line.trim_end_matches(&['\n', '\r'][..]);
        if line == ":q" {
            return Ok(ExitCode::SUCCESS);
        }

        // Errors only affect the line they came from.
        let errors = run(line, check, &mut stdout)?;
        if errors > 0 {
            debug!("{errors} errors on this line");
        }
    }
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EX_USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let result = match &cli.script {
        Some(path) => run_file(path, cli.check),
        None => repl(cli.check),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EX_IOERR)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn output(src: &str, check: bool) -> (String, usize) {
        let mut out = Vec::new();
        let errors = run(src, check, &mut out).unwrap();

        (String::from_utf8(out).unwrap(), errors)
    }

    #[test]
    fn prints_tokens() {
        let (out, errors) = output("var x = 12.5;", false);

        assert_eq!(errors, 0);
        assert_eq!(
            out,
            "VAR var\nIDENTIFIER x\nEQUAL =\nNUMBER 12.5 12.5\nSEMICOLON ;\nEOF \n"
        );
    }

    #[test]
    fn prints_string_literal() {
        let (out, _) = output("\"hi\"", false);

        assert_eq!(out, "STRING \"hi\" hi\nEOF \n");
    }

    #[test]
    fn counts_errors() {
        let (out, errors) = output("1 @ 2 # \"x", false);

        assert_eq!(errors, 3);
        assert_eq!(out, "NUMBER 1 1.0\nNUMBER 2 2.0\nEOF \n");
    }

    #[test]
    fn check_mode_prints_nothing() {
        let (out, errors) = output("a @", true);

        assert_eq!(errors, 1);
        assert_eq!(out, "");
    }

    #[test]
    fn parses_arguments() {
        let cli = Cli::try_parse_from(["lox", "main.lox", "--check"]).unwrap();
        assert_eq!(cli.script, Some(PathBuf::from("main.lox")));
        assert!(cli.check);

        let cli = Cli::try_parse_from(["lox"]).unwrap();
        assert_eq!(cli.script, None);
        assert!(!cli.check);

        assert!(Cli::try_parse_from(["lox", "a.lox", "b.lox"]).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = run_file(Path::new("does/not/exist.lox"), false).unwrap_err();

        assert!(err.to_string().contains("does/not/exist.lox"));
    }
}
