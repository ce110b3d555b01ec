// Access to the archive backing the virtual file system. The archive is
// indexed once when it is opened: we remember where each member's data
// starts so that later reads only need to seek within the open handle.

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::instrument;
use xz2::read::XzDecoder;

use crate::errors::{Result, ShellError, ShellErrorType};

/// The two things the shell needs from an archive.
pub trait ArchiveReader {
    /// Every member name, '/'-separated, without leading or trailing separators.
    fn list_members(&self) -> &[String];

    /// Raw contents of the regular-file member with exactly this name.
    fn read_member(&mut self, path: &str) -> Result<Vec<u8>>;
}

trait Source: Read + Seek {}
impl<T: Read + Seek> Source for T {}

#[derive(Clone, Copy, Debug)]
struct MemberRecord {
    offset: u64,
    size: u64,
    is_file: bool,
}

pub struct TarArchive {
    source: Box<dyn Source>,
    names: Vec<String>,
    records: HashMap<String, MemberRecord>,
}

fn unreadable(error: std::io::Error) -> ShellError {
    ShellError::new(
        ShellErrorType::ArchiveUnreadable,
        format!("Failed to read archive: {}", error),
    )
}

/// Tar writers disagree on "./" prefixes and trailing slashes on folders.
fn canonical_name(raw: &str) -> Option<String> {
    let mut name = raw.trim_start_matches('/');
    while let Some(rest) = name.strip_prefix("./") {
        name = rest.trim_start_matches('/');
    }
    let name = name.trim_end_matches('/');
    if name.is_empty() || name == "." {
        return None;
    }
    Some(name.to_string())
}

impl TarArchive {
    pub fn new<R: Read + Seek + 'static>(source: R) -> Result<TarArchive> {
        let mut archive = tar::Archive::new(source);
        let mut names = Vec::new();
        let mut records = HashMap::new();

        for entry in archive.entries_with_seek().map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            let raw_name = entry.path().map_err(unreadable)?;
            let name = match canonical_name(&raw_name.to_string_lossy()) {
                Some(name) => name,
                None => continue,
            };
            let record = MemberRecord {
                offset: entry.raw_file_position(),
                size: entry.size(),
                is_file: entry.header().entry_type().is_file(),
            };
            // A name listed twice resolves to its last occurrence.
            records.insert(name.clone(), record);
            names.push(name);
        }
        tracing::info!("Indexed {} archive members", names.len());

        Ok(TarArchive {
            source: Box::new(archive.into_inner()),
            names,
            records,
        })
    }
}

impl ArchiveReader for TarArchive {
    fn list_members(&self) -> &[String] {
        &self.names
    }

    fn read_member(&mut self, path: &str) -> Result<Vec<u8>> {
        let record = match self.records.get(path) {
            Some(record) if record.is_file => *record,
            _ => {
                tracing::info!("No regular file {} in archive", path);
                return Err(ShellError::file_not_found());
            }
        };
        self.source
            .seek(SeekFrom::Start(record.offset))
            .map_err(unreadable)?;
        let mut data = Vec::with_capacity(record.size as usize);
        Read::by_ref(&mut self.source)
            .take(record.size)
            .read_to_end(&mut data)
            .map_err(unreadable)?;
        Ok(data)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Compression {
    None,
    Gzip,
    Xz,
    Bzip2,
}

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const XZ_MAGIC: &[u8] = &[0xfd, b'7', b'z', b'X', b'Z', 0x00];
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Compression is recognised from the leading bytes, whatever the file is called.
fn detect_compression(magic: &[u8]) -> Compression {
    if magic.starts_with(GZIP_MAGIC) {
        Compression::Gzip
    } else if magic.starts_with(XZ_MAGIC) {
        Compression::Xz
    } else if magic.starts_with(BZIP2_MAGIC) {
        Compression::Bzip2
    } else {
        Compression::None
    }
}

#[instrument]
pub fn open_archive(path: &Path) -> Result<TarArchive> {
    if !path.exists() {
        tracing::error!("Archive not found at {}", path.display());
        return Err(ShellError::new(
            ShellErrorType::ArchiveNotFound,
            format!("Archive not found at path: {}", path.display()),
        ));
    }
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Err(ShellError::new(
            ShellErrorType::ArchiveUnreadable,
            format!("Archive {} is empty", path.display()),
        ));
    }

    let mut magic = Vec::with_capacity(XZ_MAGIC.len());
    Read::by_ref(&mut file)
        .take(XZ_MAGIC.len() as u64)
        .read_to_end(&mut magic)
        .map_err(unreadable)?;
    file.seek(SeekFrom::Start(0)).map_err(unreadable)?;

    let compression = detect_compression(&magic);
    tracing::info!("Opening {} as {:?} tar", path.display(), compression);
    let mut decoder: Box<dyn Read> = match compression {
        Compression::None => return TarArchive::new(file),
        Compression::Gzip => Box::new(GzDecoder::new(file)),
        Compression::Xz => Box::new(XzDecoder::new(file)),
        Compression::Bzip2 => Box::new(BzDecoder::new(file)),
    };
    // Compressed streams cannot seek, so they are inflated once up front.
    let mut buffer = Vec::new();
    decoder.read_to_end(&mut buffer).map_err(unreadable)?;
    TarArchive::new(Cursor::new(buffer))
}
