use crate::formatter::Formatter;
use anyhow::{bail, Context, Result};
use inquire::error::InquireError;
use inquire::Text;
use tally::Sheet;

/// One instruction typed at the interactive prompt
#[derive(Debug, PartialEq)]
enum Command {
    Append(String),
    /// 1-based line number
    Set(usize, String),
    Insert(usize, String),
    Remove(usize),
    Clear,
    Vars,
    Show,
    Help,
    Quit,
}

const HELP: &str = "\
  <text>          append a line
  :set N text     replace line N
  :insert N text  insert before line N
  :remove N       remove line N
  :clear          start over with one blank line
  :vars           list variables
  :show           print the sheet
  :quit           leave";

pub fn run_interactive(sheet: &mut Sheet) -> Result<()> {
    let formatter = Formatter::default();
    print!("{}", formatter.format_sheet(sheet.lines()));
    println!("Type a line to append it, or :help for commands.");

    loop {
        let input = match Text::new(&format!("{}>", sheet.len() + 1))
            .with_help_message(":help lists the commands")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(())
            }
            Err(e) => return Err(e).context("Failed to read input"),
        };

        let command = match parse_command(&input) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        if let Some(line_count) = grown_length(&command, sheet.len()) {
            if !sheet.can_hold(line_count) {
                eprintln!("Sheet is limited to {} line(s)", sheet.limits().max_lines);
                continue;
            }
        }

        let lines = match command {
            Command::Append(text) => sheet.append_line(&text),
            Command::Set(line, text) => sheet.update_line(line - 1, &text),
            Command::Insert(line, text) => sheet.insert_line(line - 1, &text),
            Command::Remove(line) => sheet.remove_line(line - 1),
            Command::Clear => sheet.clear(),
            Command::Vars => {
                print!("{}", formatter.format_variables(sheet.scope()));
                continue;
            }
            Command::Show => sheet.lines().to_vec(),
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => return Ok(()),
        };

        print!("{}", formatter.format_sheet(&lines));
    }
}

/// Line count after `command` when it may grow the sheet
fn grown_length(command: &Command, len: usize) -> Option<usize> {
    match command {
        Command::Append(_) | Command::Insert(..) => Some(len + 1),
        Command::Set(line, _) => Some(len.max(*line)),
        _ => None,
    }
}

fn parse_command(input: &str) -> Result<Command> {
    let Some(rest) = input.trim_start().strip_prefix(':') else {
        return Ok(Command::Append(input.to_string()));
    };

    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim_start()),
        None => (rest.trim_end(), ""),
    };

    match name {
        "set" | "s" => {
            let (line, text) = line_and_text(argument)?;
            Ok(Command::Set(line, text))
        }
        "insert" | "i" => {
            let (line, text) = line_and_text(argument)?;
            Ok(Command::Insert(line, text))
        }
        "remove" | "rm" => Ok(Command::Remove(line_number(argument.trim())?)),
        "clear" => Ok(Command::Clear),
        "vars" => Ok(Command::Vars),
        "show" => Ok(Command::Show),
        "help" | "h" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => bail!("Unknown command ':{}'", other),
    }
}

fn line_and_text(argument: &str) -> Result<(usize, String)> {
    let (number, text) = argument.split_once(' ').unwrap_or((argument, ""));
    Ok((line_number(number)?, text.to_string()))
}

fn line_number(text: &str) -> Result<usize> {
    let line: usize = text
        .parse()
        .with_context(|| format!("Expected a line number, got '{}'", text))?;
    if line == 0 {
        bail!("Lines are numbered from 1");
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_input_appends() {
        assert_eq!(
            parse_command("$a = 2 * 3").unwrap(),
            Command::Append("$a = 2 * 3".to_string())
        );
        assert_eq!(parse_command("").unwrap(), Command::Append(String::new()));
    }

    #[test]
    fn test_line_commands() {
        assert_eq!(
            parse_command(":set 2 $1 * 4").unwrap(),
            Command::Set(2, "$1 * 4".to_string())
        );
        assert_eq!(
            parse_command(":insert 1 # heading").unwrap(),
            Command::Insert(1, "# heading".to_string())
        );
        assert_eq!(parse_command(":set 3").unwrap(), Command::Set(3, String::new()));
        assert_eq!(parse_command(":remove 4").unwrap(), Command::Remove(4));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command(":clear").unwrap(), Command::Clear);
        assert_eq!(parse_command(":vars ").unwrap(), Command::Vars);
        assert_eq!(parse_command(":show").unwrap(), Command::Show);
        assert_eq!(parse_command(":help").unwrap(), Command::Help);
        assert_eq!(parse_command(":q").unwrap(), Command::Quit);
    }

    #[test]
    fn test_grown_length() {
        assert_eq!(grown_length(&Command::Append("1".into()), 2), Some(3));
        assert_eq!(grown_length(&Command::Insert(1, "1".into()), 2), Some(3));
        assert_eq!(grown_length(&Command::Set(1, "1".into()), 2), Some(2));
        assert_eq!(grown_length(&Command::Set(5, "1".into()), 2), Some(5));
        assert_eq!(grown_length(&Command::Remove(1), 2), None);
    }

    #[test]
    fn test_invalid_commands() {
        assert!(parse_command(":remove").is_err());
        assert!(parse_command(":remove 0").is_err());
        assert!(parse_command(":set two 5").is_err());
        assert!(parse_command(":frobnicate").is_err());
    }
}
