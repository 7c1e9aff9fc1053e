use crate::common::STORE_DIR;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

#[fixture]
pub fn staged_repository_dir(init_repository_dir: TempDir) -> TempDir {
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_vcs_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    init_repository_dir
}

pub fn run_vcs_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("vcs").expect("Failed to find vcs binary");
    cmd.current_dir(dir).args(args).env_remove("VCS_LOG");
    cmd
}

pub fn vcs_commit(dir: &Path, message: &str) -> Command {
    run_vcs_command(dir, &["commit", "-m", message])
}

pub fn read_index(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(STORE_DIR).join("index")).expect("Failed to read index")
}

pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(STORE_DIR).join("HEAD")).expect("Failed to read HEAD")
}

/// Entries of the store's objects directory, sorted by name
pub fn list_objects_dir(dir: &Path) -> Vec<String> {
    let mut names = std::fs::read_dir(dir.join(STORE_DIR).join("objects"))
        .expect("Failed to read objects directory")
        .map(|entry| {
            entry
                .expect("Failed to read directory entry")
                .file_name()
                .to_string_lossy()
                .to_string()
        })
        .collect::<Vec<_>>();
    names.sort();
    names
}

/// Paths listed under a section of the index record
pub fn index_section(index: &str, section: &str) -> Vec<String> {
    let header = format!("{section} (");

    index
        .lines()
        .skip_while(|line| !line.starts_with(&header))
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(|line| {
            line.rsplit_once(' ')
                .map(|(_, path)| path.to_string())
                .unwrap_or_default()
        })
        .collect()
}
