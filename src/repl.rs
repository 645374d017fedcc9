use crate::Action;

use std::io;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use linefeed::{Interface, ReadResult};

/// One line of REPL input, parsed like the command line without the binary name
#[derive(Debug, Parser)]
#[clap(no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[clap(subcommand)]
    action: Action,
}

pub fn run(seed: Option<u64>) -> io::Result<()> {
    let reader = Interface::new("yahtzee-strategies")?;
    reader.set_prompt(">>> ")?;
    while let ReadResult::Input(input) = reader.read_line()? {
        let input = input.trim();
        match input {
            "" => continue,
            "exit" | "quit" => break,
            _ => reader.add_history_unique(input.to_string()),
        }
        println!(
            "{}",
            match evaluate(input, seed) {
                Ok(out) => out,
                Err(err) => format!("Error: {}", err),
            }
        );
    }
    Ok(())
}

fn evaluate(input: &str, seed: Option<u64>) -> Result<String> {
    let line = match Line::try_parse_from(input.split_whitespace()) {
        Ok(line) => line,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp) => return Ok(err.to_string()),
        Err(err) => return Err(err.into()),
    };
    match line.action {
        Action::Repl => Ok(String::from("Already in the REPL.")),
        action => crate::execute(action, seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list() {
        let out = evaluate("list", None).unwrap();
        assert!(out.contains("adaptive"));
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn test_head_to_head() {
        let out = evaluate("h2h adaptive yahtzee-or-bust -n 6", Some(5)).unwrap();
        assert!(out.starts_with("results after 6 games:\nadaptive strategy wins:"));
        assert_eq!(out, evaluate("head-to-head adaptive yahtzee-or-bust --games 6", Some(5)).unwrap());
    }

    #[test]
    fn test_help() {
        assert!(evaluate("help", None).unwrap().contains("tournament"));
    }

    #[test]
    fn test_errors() {
        assert!(evaluate("play optimal", None).is_err());
        assert!(evaluate("roll", None).is_err());
        assert!(evaluate("consistency adaptive -n 0", None).is_err());
        assert_eq!(evaluate("repl", None).unwrap(), "Already in the REPL.");
    }
}
