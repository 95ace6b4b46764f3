//! Command line arguments

use clap::Parser as ClapParser;

/// Parse JavaScript source and print its syntax tree as JSON
#[derive(Debug, ClapParser)]
#[command(name = "corten-parse", version)]
pub struct Cli {
    /// JavaScript file to parse
    #[arg(short, long, conflicts_with = "eval")]
    pub file: Option<String>,

    /// Inline JavaScript source to parse
    #[arg(short, long)]
    pub eval: Option<String>,

    /// Start interactive REPL
    #[arg(short, long)]
    pub repl: bool,

    /// Print the token stream instead of the syntax tree
    #[arg(short, long)]
    pub tokens: bool,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Only validate the source and print `ok`
    #[arg(long, conflicts_with = "tokens")]
    pub check: bool,
}

impl Cli {
    /// Output mode selected by the flags
    pub fn output_mode(&self) -> crate::OutputMode {
        if self.check {
            crate::OutputMode::Check
        } else if self.tokens {
            crate::OutputMode::Tokens
        } else {
            crate::OutputMode::Ast
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputMode;

    #[test]
    fn test_output_mode_defaults_to_ast() {
        let cli = Cli::try_parse_from(["corten-parse", "-e", "1"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Ast);
    }

    #[test]
    fn test_output_mode_check_wins() {
        let cli = Cli::try_parse_from(["corten-parse", "--check", "-e", "1"]).unwrap();
        assert_eq!(cli.output_mode(), OutputMode::Check);
    }
}
