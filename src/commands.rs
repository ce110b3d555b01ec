use crate::errors::{ShellError, ShellErrorType};

/// Language used for the "command not found" message.
#[derive(Debug, Clone, Copy, PartialEq, Default, clap::ValueEnum)]
pub enum Language {
    En,
    #[default]
    Ru,
}

pub(crate) fn command_not_found(verb: &str, language: Language) -> ShellError {
    let message = match language {
        Language::En => format!("Command '{}' not found", verb),
        Language::Ru => format!("Команда '{}' не найдена", verb),
    };
    ShellError::new(ShellErrorType::CommandNotRecognized, message)
}

// Commands are a verb followed by whitespace separated arguments. There is
// no quoting, and arguments beyond the ones a verb uses are ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ls(Option<String>),
    Cd(Option<String>),
    Tree,
    Wc(Option<String>),
    Uname,
    Exit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let mut parts = line.split_whitespace();
    let verb = match parts.next() {
        Some(verb) => verb,
        None => return Command::Empty,
    };
    let first_arg = parts.next().map(|arg| arg.to_string());
    match verb {
        "ls" => Command::Ls(first_arg),
        "cd" => Command::Cd(first_arg),
        "tree" => Command::Tree,
        "wc" => Command::Wc(first_arg),
        "uname" => Command::Uname,
        "exit" => Command::Exit,
        _ => Command::Unknown(verb.to_string()),
    }
}
