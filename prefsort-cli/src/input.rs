/// Parsing of the interactive commands typed during a session.
///
/// A bare number picks that entry of the displayed group (1-based). Letters
/// map to the other actions; full words are accepted too.

/// One line of user input, resolved against the current group size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 0-based index into the displayed group.
    Choose(usize),
    Skip,
    Undo,
    Finish,
    Quit,
    Help,
}

pub const HELP: &str = "\
  1-6     pick the image you prefer
  s       skip: none of these (each skipped twice is dropped)
  u       undo the last decision
  f       finish now and show results
  q       quit without results
  ?       show this help";

/// Parse a line. `group_len` bounds the accepted numbers.
pub fn parse_command(line: &str, group_len: usize) -> Result<Command, String> {
    let token = line.trim().to_lowercase();
    if token.is_empty() {
        return Err("Type a number to pick, or ? for help.".to_string());
    }

    if let Ok(n) = token.parse::<usize>() {
        if n == 0 || n > group_len {
            return Err(format!("Pick a number between 1 and {group_len}."));
        }
        return Ok(Command::Choose(n - 1));
    }

    match token.as_str() {
        "s" | "skip" | "pass" => Ok(Command::Skip),
        "u" | "undo" => Ok(Command::Undo),
        "f" | "finish" | "done" => Ok(Command::Finish),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        "?" | "h" | "help" => Ok(Command::Help),
        other => Err(format!("Unknown command \"{other}\". Type ? for help.")),
    }
}
