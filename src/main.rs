use clap::Parser;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tarsh::{Language, Outcome, Session, SystemHost};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[clap(about = "Browse a tar archive with a handful of shell commands")]
struct Opts {
    /// Username shown in the prompt
    #[clap(short, long, required_unless_present = "version")]
    username: Option<String>,
    /// Computer name shown in the prompt
    #[clap(short, long, required_unless_present = "version")]
    computername: Option<String>,
    /// Path to the archive holding the virtual file system
    #[clap(short, long, required_unless_present = "version")]
    path: Option<PathBuf>,
    /// Commands to run before reading from stdin, one per line
    #[clap(short, long)]
    script: Option<PathBuf>,
    /// Language of the "command not found" message
    #[clap(short, long, value_enum, default_value_t = Language::default())]
    lang: Language,
    #[clap(short, long)]
    debug: bool,
    #[clap(short, long)]
    version: bool,
}

struct Frontend {
    session: Session,
    username: String,
    computername: String,
}

impl Frontend {
    fn prompt(&self) -> String {
        self.session.prompt(&self.username, &self.computername)
    }

    fn show(&self, outcome: &Outcome) {
        if !outcome.output.is_empty() {
            println!("{}", outcome.output);
        }
    }

    /// Returns false if the script ended the session.
    fn run_script(&mut self, script: &Path) -> std::io::Result<bool> {
        let contents = std::fs::read_to_string(script)?;
        tracing::info!("Running startup script {}", script.display());
        let stdout = std::io::stdout();
        self.session.replay(
            &contents,
            &self.username,
            &self.computername,
            &mut stdout.lock(),
        )
    }

    fn interact(&mut self) -> std::io::Result<()> {
        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("{}", self.prompt());
            std::io::stdout().flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    println!();
                    return Ok(());
                }
            };
            let outcome = self.session.run(&line);
            self.show(&outcome);
            if outcome.terminate {
                return Ok(());
            }
        }
    }
}

fn main() -> ExitCode {
    let opts: Opts = Opts::parse();
    if opts.version {
        println!("{}", VERSION);
        return ExitCode::SUCCESS;
    }

    // Keep going without a logfile rather than refusing to start.
    let _guard = match tarsh::log::init_logging(opts.debug) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    let (Some(username), Some(computername), Some(path)) =
        (opts.username, opts.computername, opts.path)
    else {
        return ExitCode::FAILURE;
    };

    let session = match Session::open(&path, Box::new(SystemHost), opts.lang) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Could not open {}: {}", path.display(), e);
            eprintln!("{}", e.message);
            return ExitCode::FAILURE;
        }
    };
    let mut frontend = Frontend {
        session,
        username,
        computername,
    };

    if let Some(script) = &opts.script {
        match frontend.run_script(script) {
            Ok(true) => (),
            Ok(false) => return ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Could not run script {}: {}", script.display(), e);
                eprintln!("Could not run script {}: {}", script.display(), e);
                return ExitCode::FAILURE;
            }
        }
    }

    match frontend.interact() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Input error: {}", e);
            ExitCode::FAILURE
        }
    }
}
