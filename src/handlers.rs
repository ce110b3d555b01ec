use crate::commands::{command_not_found, Language};
use crate::errors::ShellError;
use crate::fsystem::{paths, VirtualFileSystem};
use crate::hostinfo::HostInfo;

use tracing::instrument;

/// Result of running one command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub output: String,
    pub cwd: String,
    pub terminate: bool,
}

impl Outcome {
    pub(crate) fn new(output: String, cwd: &str) -> Outcome {
        Outcome {
            output,
            cwd: cwd.to_string(),
            terminate: false,
        }
    }

    pub(crate) fn silent(cwd: &str) -> Outcome {
        Outcome::new(String::new(), cwd)
    }
}

impl ShellError {
    /// Recoverable errors become output; the working directory is untouched.
    pub(crate) fn into_outcome(self, cwd: &str) -> Outcome {
        Outcome::new(self.message, cwd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Counts {
    pub(crate) lines: usize,
    pub(crate) words: usize,
    pub(crate) bytes: usize,
}

// Line boundaries: \r\n counts once; the ASCII separators and the Unicode
// line and paragraph separators all end a line too.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_word_break(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\x1c'..='\x1f')
}

/// Number of lines; a terminator at the very end does not start a new one.
fn count_lines(text: &str) -> usize {
    let mut lines = 0;
    let mut open = false;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if is_line_break(c) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            lines += 1;
            open = false;
        } else {
            open = true;
        }
    }
    lines + usize::from(open)
}

pub(crate) fn count(data: &[u8]) -> Counts {
    let text = String::from_utf8_lossy(data);
    Counts {
        lines: count_lines(&text),
        words: text.split(is_word_break).filter(|w| !w.is_empty()).count(),
        bytes: data.len(),
    }
}

#[instrument(name = "handlers.ls", level = "info", skip(fs))]
pub(crate) fn ls(fs: &VirtualFileSystem, path: Option<&str>, cwd: &str) -> Outcome {
    let target = path.unwrap_or(cwd);
    match fs.list(target, cwd) {
        Ok(names) => Outcome::new(names.join("\n"), cwd),
        Err(e) => e.into_outcome(cwd),
    }
}

#[instrument(name = "handlers.cd", level = "info", skip(fs))]
pub(crate) fn cd(fs: &VirtualFileSystem, path: Option<&str>, cwd: &str) -> Outcome {
    let path = match path {
        Some(path) => path,
        None => return Outcome::silent(cwd),
    };
    match fs.change_directory(path, cwd) {
        Ok(new_cwd) => {
            tracing::info!("Changed directory to {}", new_cwd);
            Outcome::silent(&new_cwd)
        }
        Err(e) => e.into_outcome(cwd),
    }
}

#[instrument(name = "handlers.tree", level = "info", skip(fs))]
pub(crate) fn tree(fs: &VirtualFileSystem, cwd: &str) -> Outcome {
    let rendered = fs.render();
    Outcome::new(rendered.trim_end_matches('\n').to_string(), cwd)
}

#[instrument(name = "handlers.wc", level = "info", skip(fs))]
pub(crate) fn wc(fs: &mut VirtualFileSystem, path: Option<&str>, cwd: &str) -> Outcome {
    let path = match path {
        Some(path) => path,
        None => return Outcome::silent(cwd),
    };
    match fs.read_member(path, cwd) {
        Ok(data) => {
            let counts = count(&data);
            let absolute = paths::normalize(path, cwd);
            Outcome::new(
                format!(
                    "{} {} {} {}",
                    counts.lines,
                    counts.words,
                    counts.bytes,
                    paths::basename(&absolute)
                ),
                cwd,
            )
        }
        Err(e) => e.into_outcome(cwd),
    }
}

#[instrument(name = "handlers.uname", level = "info", skip(host))]
pub(crate) fn uname(host: &dyn HostInfo, cwd: &str) -> Outcome {
    Outcome::new(
        format!("{} {}", host.system_name(), host.release_version()),
        cwd,
    )
}

pub(crate) fn exit(cwd: &str) -> Outcome {
    tracing::info!("Session asked to terminate");
    Outcome {
        terminate: true,
        ..Outcome::silent(cwd)
    }
}

#[instrument(name = "handlers.unknown", level = "info")]
pub(crate) fn unknown(verb: &str, language: Language, cwd: &str) -> Outcome {
    command_not_found(verb, language).into_outcome(cwd)
}
