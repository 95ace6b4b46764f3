//! REPL (Read-Parse-Print Loop) implementation

use crate::driver::{Driver, OutputMode};
use crate::error::{CliError, CliResult};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive REPL
///
/// # Arguments
/// * `driver` - The Driver used to parse and render each entry
///
/// # Returns
/// `Ok(())` when REPL exits normally
pub fn run_repl(driver: &mut Driver) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;

    println!("Corten JavaScript Parser v{}", env!("CARGO_PKG_VERSION"));
    println!("Type JavaScript code or .help for commands.");
    println!();

    let mut line_buffer = String::new();
    let mut in_multiline = false;

    loop {
        let prompt = if in_multiline { "... " } else { "> " };

        match editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if !in_multiline && trimmed.starts_with('.') {
                    if handle_repl_command(trimmed, driver) == Command::Exit {
                        break;
                    }
                    continue;
                }

                if in_multiline {
                    line_buffer.push('\n');
                }
                line_buffer.push_str(&line);

                if !is_input_complete(&line_buffer) {
                    in_multiline = true;
                    continue;
                }

                match driver.run_source(&line_buffer) {
                    Ok(output) => println!("{}", output),
                    // Balanced brackets can still end mid-statement, e.g. `let x =`
                    Err(e) if e.is_incomplete_input() => {
                        in_multiline = true;
                        continue;
                    }
                    Err(e) => eprintln!("{}", e),
                }

                let _ = editor.add_history_entry(line_buffer.as_str());
                line_buffer.clear();
                in_multiline = false;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C
                if in_multiline {
                    println!("^C");
                    line_buffer.clear();
                    in_multiline = false;
                } else {
                    println!("Press Ctrl-D or type .exit to quit");
                }
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                return Err(CliError::Repl(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Continue,
    Exit,
}

/// Handle special REPL commands
fn handle_repl_command(command: &str, driver: &mut Driver) -> Command {
    match command {
        ".help" => {
            println!("REPL Commands:");
            println!("  .help     - Show this help message");
            println!("  .ast      - Print the syntax tree of each entry");
            println!("  .tokens   - Print the token stream of each entry");
            println!("  .exit     - Exit the REPL");
        }
        ".ast" => {
            driver.set_mode(OutputMode::Ast);
            println!("Printing syntax trees");
        }
        ".tokens" => {
            driver.set_mode(OutputMode::Tokens);
            println!("Printing tokens");
        }
        ".exit" => return Command::Exit,
        _ => {
            println!("Unknown command: {}", command);
            println!("Type .help for available commands");
        }
    }
    Command::Continue
}

/// Check if the input appears to be complete
///
/// Counts brackets outside of string, template and comment text.
fn is_input_complete(input: &str) -> bool {
    let mut depth: i32 = 0;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => {
                let mut closed = false;
                while let Some(s) = chars.next() {
                    if s == '\\' {
                        chars.next();
                    } else if s == c {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return false;
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.peek().is_some_and(|&n| n != '\n') {
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut closed = false;
                while let Some(s) = chars.next() {
                    if s == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return false;
                }
            }
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth -= 1,
            _ => {}
        }
    }

    // Surplus closers are a syntax error for the parser to report
    depth <= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_input_complete_simple() {
        assert!(is_input_complete("let x = 42;"));
        assert!(is_input_complete("foo(bar[0]);"));
    }

    #[test]
    fn test_is_input_complete_incomplete_brace() {
        assert!(!is_input_complete("function test() {"));
        assert!(!is_input_complete("if (true) {"));
        assert!(!is_input_complete("let a = [1,"));
    }

    #[test]
    fn test_is_input_complete_with_strings() {
        assert!(is_input_complete(r#"let s = "hello {"; "#));
        assert!(is_input_complete(r#"let s = 'it\'s ('; "#));
        assert!(!is_input_complete(r#"let s = "unclosed"#));
    }

    #[test]
    fn test_is_input_complete_with_comments() {
        assert!(is_input_complete("x; // trailing {"));
        assert!(!is_input_complete("/* open comment"));
        assert!(is_input_complete("/* ( */ y;"));
    }

    #[test]
    fn test_is_input_complete_surplus_closer() {
        assert!(is_input_complete("a)"));
    }

    #[test]
    fn test_commands_switch_mode() {
        let mut driver = Driver::new(OutputMode::Ast);
        assert_eq!(handle_repl_command(".tokens", &mut driver), Command::Continue);
        assert_eq!(driver.mode(), OutputMode::Tokens);
        assert_eq!(handle_repl_command(".ast", &mut driver), Command::Continue);
        assert_eq!(driver.mode(), OutputMode::Ast);
        assert_eq!(handle_repl_command(".exit", &mut driver), Command::Exit);
    }
}
