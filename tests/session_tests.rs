use std::io::Cursor;
use std::path::PathBuf;

use tarsh::{HostInfo, Language, Session, ShellErrorType, TarArchive};

struct FixedHost;

impl HostInfo for FixedHost {
    fn system_name(&self) -> String {
        "Linux".to_string()
    }

    fn release_version(&self) -> String {
        "6.1.0-test".to_string()
    }
}

fn sample_tar() -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in [
        ("some.txt", &b"This is a test file.\n"[..]),
        ("test_dir/test_file.txt", &b"Hello, World!"[..]),
    ] {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, data).unwrap();
    }
    builder.into_inner().unwrap()
}

fn session_with(language: Language) -> Session {
    let archive = TarArchive::new(Cursor::new(sample_tar())).unwrap();
    Session::from_archive(Box::new(archive), Box::new(FixedHost), language)
}

fn session() -> Session {
    session_with(Language::En)
}

// Entries as `tar -cf x.tar .` writes them: a "./" entry for the archive
// root, "./" prefixes, and folders listed with a trailing slash.
fn dot_prefixed_tar() -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, entry_type, data) in [
        ("./", tar::EntryType::Directory, &b""[..]),
        ("./README", tar::EntryType::Regular, &b"read me first\n"[..]),
        ("./empty_dir/", tar::EntryType::Directory, &b""[..]),
    ] {
        let mut header = tar::Header::new_gnu();
        header.as_old_mut().name[..name.len()].copy_from_slice(name.as_bytes());
        header.set_entry_type(entry_type);
        header.set_size(data.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append(&header, data).unwrap();
    }
    builder.into_inner().unwrap()
}

fn write_archive(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("test_vfs.tar");
    std::fs::write(&path, sample_tar()).unwrap();
    path
}

#[test]
fn ls_lists_the_root() {
    let mut session = session();
    let outcome = session.execute("ls", "/");
    assert_eq!(outcome.output, "some.txt\ntest_dir");
    assert_eq!(outcome.cwd, "/");
    assert!(!outcome.terminate);
}

#[test]
fn ls_with_path_and_errors() {
    let mut session = session();
    assert_eq!(session.execute("ls test_dir", "/").output, "test_file.txt");
    assert_eq!(session.execute("ls ..", "/test_dir").output, "some.txt\ntest_dir");
    assert_eq!(session.execute("ls nowhere", "/").output, "Directory not found.");
    assert_eq!(session.execute("ls some.txt", "/").output, "Directory not found.");
}

#[test]
fn cd_threads_the_working_directory() {
    let mut session = session();
    let outcome = session.execute("cd test_dir", "/");
    assert_eq!(outcome.output, "");
    assert_eq!(outcome.cwd, "/test_dir");

    let outcome = session.execute("cd ..", "/test_dir");
    assert_eq!(outcome.cwd, "/");

    let outcome = session.execute("cd non_existing_dir", "/");
    assert_eq!(outcome.output, "Directory not found.");
    assert_eq!(outcome.cwd, "/");

    let outcome = session.execute("cd", "/test_dir");
    assert_eq!(outcome.output, "");
    assert_eq!(outcome.cwd, "/test_dir");
}

#[test]
fn execute_does_not_move_the_session() {
    let mut session = session();
    session.execute("cd test_dir", "/");
    assert_eq!(session.cwd(), "/");
}

#[test]
fn run_keeps_the_working_directory() {
    let mut session = session();
    session.run("cd test_dir");
    assert_eq!(session.cwd(), "/test_dir");
    assert_eq!(session.prompt("test_user", "test_computer"), "test_user@test_computer:/test_dir$ ");
    assert_eq!(session.run("ls").output, "test_file.txt");
    assert_eq!(session.run("wc test_file.txt").output, "1 2 13 test_file.txt");
    session.run("cd /");
    assert_eq!(session.cwd(), "/");
}

#[test]
fn tree_renders_everything() {
    let mut session = session();
    let output = session.execute("tree", "/test_dir").output;
    assert!(output.contains("some.txt"));
    assert!(output.contains("test_dir/"));
    assert!(output.contains("test_file.txt"));
    assert!(output.find("test_dir/").unwrap() < output.find("some.txt").unwrap());
}

#[test]
fn wc_counts_lines_words_and_bytes() {
    let mut session = session();
    assert_eq!(session.execute("wc some.txt", "/").output, "1 5 21 some.txt");
    assert_eq!(session.execute("wc ../some.txt", "/test_dir").output, "1 5 21 some.txt");
    assert_eq!(session.execute("wc missing.txt", "/").output, "File not found.");
    assert_eq!(session.execute("wc test_dir", "/").output, "File not found.");
    assert_eq!(session.execute("wc", "/").output, "");
}

#[test]
fn uname_uses_the_host() {
    let mut session = session();
    assert_eq!(session.execute("uname", "/").output, "Linux 6.1.0-test");
}

#[test]
fn exit_asks_to_terminate() {
    let mut session = session();
    let outcome = session.execute("exit", "/test_dir");
    assert!(outcome.terminate);
    assert_eq!(outcome.cwd, "/test_dir");
}

#[test]
fn unknown_commands_leave_cwd_alone() {
    let mut session = session();
    let outcome = session.execute("foo", "/test_dir");
    assert!(outcome.output.contains("foo"));
    assert!(outcome.output.contains("not found"));
    assert_eq!(outcome.cwd, "/test_dir");
}

#[test]
fn unknown_commands_default_to_russian() {
    assert_eq!(Language::default(), Language::Ru);
    let mut session = session_with(Language::default());
    let outcome = session.execute("foo", "/test_dir");
    assert_eq!(outcome.output, "Команда 'foo' не найдена");
    assert_eq!(outcome.cwd, "/test_dir");
}

#[test]
fn blank_lines_do_nothing() {
    let mut session = session();
    let outcome = session.execute("   ", "/test_dir");
    assert_eq!(outcome.output, "");
    assert_eq!(outcome.cwd, "/test_dir");
    assert!(!outcome.terminate);
}

#[test]
fn open_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(&dir);
    let mut session = Session::open(&path, Box::new(FixedHost), Language::En).unwrap();
    assert_eq!(session.run("wc some.txt").output, "1 5 21 some.txt");
    assert_eq!(session.file_system().members().len(), 2);
}

#[test]
fn open_fails_for_missing_archive() {
    let dir = tempfile::tempdir().unwrap();
    let result = Session::open(&dir.path().join("nope.tar"), Box::new(FixedHost), Language::En);
    let err = result.err().unwrap();
    assert_eq!(err.error_type, ShellErrorType::ArchiveNotFound);
    assert!(err.error_type.is_fatal());
}

#[test]
fn dot_prefixed_archive_keeps_its_quirks() {
    let archive = TarArchive::new(Cursor::new(dot_prefixed_tar())).unwrap();
    let mut session = Session::from_archive(Box::new(archive), Box::new(FixedHost), Language::En);
    assert_eq!(session.file_system().members().to_vec(), vec!["README", "empty_dir"]);

    assert_eq!(session.execute("ls", "/").output, "README\nempty_dir");
    // An empty folder lists the same as a missing one.
    assert_eq!(session.execute("ls empty_dir", "/").output, "Directory not found.");
    assert_eq!(session.execute("cd empty_dir", "/").cwd, "/empty_dir");

    // No extension, so README is treated as a folder but still reads as a file.
    let outcome = session.execute("cd README", "/");
    assert_eq!(outcome.output, "");
    assert_eq!(outcome.cwd, "/README");
    assert_eq!(session.execute("wc README", "/").output, "1 3 14 README");
    assert_eq!(session.execute("wc empty_dir", "/").output, "File not found.");

    assert_eq!(session.execute("tree", "/").output, "/\n|-- README/\n|__ empty_dir/");
}
