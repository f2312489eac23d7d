//! Command parsing for the interactive play loop

/// Parsed command from the play prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Draw the next question: empty line, n or next
    Next,
    /// Limit drawing to named categories: scope <name>, <name>
    Scope(Vec<String>),
    /// Add or remove one category from the scope: toggle <name>
    Toggle(String),
    /// Draw from every category again: all
    All,
    /// List categories and what is left in each: list
    List,
    /// Forget which questions were shown: reset
    Reset,
    /// Show help: help or h
    Help,
    /// Leave the play loop: q or quit
    Quit,
}

/// Result of parsing a command
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
}

/// Help text listing every command
pub const HELP: &str = "\
Enter, n, next        draw a question
scope <a>, <b>        only draw from the named categories
toggle <name>         add or remove one category from the scope
all                   draw from every category
list                  show categories and unseen counts
reset                 start over with every question unseen
help                  show this help
q, quit               stop playing";

/// Parse one line typed at the play prompt
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Next);
    }

    // Split into command and arguments
    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "n" | "next" | "draw" => ParseResult::Ok(Command::Next),
        "scope" | "s" => {
            let names: Vec<String> = args
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            if names.is_empty() {
                ParseResult::MissingArgument("scope".to_string())
            } else {
                ParseResult::Ok(Command::Scope(names))
            }
        }
        "toggle" | "t" => {
            if args.is_empty() {
                ParseResult::MissingArgument("toggle".to_string())
            } else {
                ParseResult::Ok(Command::Toggle(args.to_string()))
            }
        }
        "all" | "a" => ParseResult::Ok(Command::All),
        "list" | "ls" | "l" => ParseResult::Ok(Command::List),
        "reset" => ParseResult::Ok(Command::Reset),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        "quit" | "q" | "exit" => ParseResult::Ok(Command::Quit),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}
