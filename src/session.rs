use std::io::Write;
use std::path::Path;
use tracing::instrument;

use crate::archive::{open_archive, ArchiveReader};
use crate::commands::{parse_command, Command, Language};
use crate::errors::Result;
use crate::fsystem::{paths, VirtualFileSystem};
use crate::handlers::{self, Outcome};
use crate::hostinfo::HostInfo;

/// One interactive session over an archive. The session owns the file system
/// view (and with it the open archive) and the current working directory.
pub struct Session {
    fs: VirtualFileSystem,
    host: Box<dyn HostInfo>,
    language: Language,
    cwd: String,
}

impl Session {
    #[instrument(skip(host))]
    pub fn open(
        archive_path: &Path,
        host: Box<dyn HostInfo>,
        language: Language,
    ) -> Result<Session> {
        let archive = open_archive(archive_path)?;
        tracing::info!("Opened archive {}", archive_path.display());
        Ok(Session::from_archive(Box::new(archive), host, language))
    }

    pub fn from_archive(
        archive: Box<dyn ArchiveReader>,
        host: Box<dyn HostInfo>,
        language: Language,
    ) -> Session {
        Session {
            fs: VirtualFileSystem::new(archive),
            host,
            language,
            cwd: paths::ROOT.to_string(),
        }
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn file_system(&self) -> &VirtualFileSystem {
        &self.fs
    }

    /// Run `line` as if `cwd` were the working directory. The session's own
    /// working directory is not touched.
    pub fn execute(&mut self, line: &str, cwd: &str) -> Outcome {
        match parse_command(line) {
            Command::Ls(path) => handlers::ls(&self.fs, path.as_deref(), cwd),
            Command::Cd(path) => handlers::cd(&self.fs, path.as_deref(), cwd),
            Command::Tree => handlers::tree(&self.fs, cwd),
            Command::Wc(path) => handlers::wc(&mut self.fs, path.as_deref(), cwd),
            Command::Uname => handlers::uname(self.host.as_ref(), cwd),
            Command::Exit => handlers::exit(cwd),
            Command::Empty => Outcome::silent(cwd),
            Command::Unknown(verb) => handlers::unknown(&verb, self.language, cwd),
        }
    }

    /// Run `line` in the session's working directory and keep the result.
    pub fn run(&mut self, line: &str) -> Outcome {
        let cwd = self.cwd.clone();
        let outcome = self.execute(line, &cwd);
        self.cwd = outcome.cwd.clone();
        outcome
    }

    pub fn prompt(&self, username: &str, computername: &str) -> String {
        format!("{}@{}:{}$ ", username, computername, self.cwd)
    }

    /// Replay a script as if it were typed: every non-blank line is echoed
    /// after its prompt, followed by any output. Stops at `exit` and returns
    /// false in that case.
    #[instrument(skip(self, script, out))]
    pub fn replay<W: Write>(
        &mut self,
        script: &str,
        username: &str,
        computername: &str,
        out: &mut W,
    ) -> std::io::Result<bool> {
        for line in script.lines().filter(|line| !line.trim().is_empty()) {
            writeln!(out, "{}{}", self.prompt(username, computername), line)?;
            let outcome = self.run(line);
            if !outcome.output.is_empty() {
                writeln!(out, "{}", outcome.output)?;
            }
            if outcome.terminate {
                tracing::info!("Script ended the session");
                return Ok(false);
            }
        }
        Ok(true)
    }
}
