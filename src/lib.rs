//! A read-only shell over the contents of an archive.
//!
//! The archive's member list is turned into a directory tree once, when a
//! [`Session`] is opened. Each command line is then run against that tree with
//! [`Session::execute`] (explicit working directory) or [`Session::run`]
//! (the session's own working directory).

pub mod archive;
pub mod commands;
pub mod errors;
pub mod fsystem;
mod handlers;
pub mod hostinfo;
mod locations;
pub mod log;
pub mod session;

pub use archive::{open_archive, ArchiveReader, TarArchive};
pub use commands::{parse_command, Command, Language};
pub use errors::{Result, ShellError, ShellErrorType};
pub use fsystem::{TreeNode, VirtualFileSystem};
pub use handlers::Outcome;
pub use hostinfo::{HostInfo, SystemHost};
pub use session::Session;
