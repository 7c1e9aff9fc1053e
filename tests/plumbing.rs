use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use predicates::prelude::predicate;
use rstest::rstest;

mod common;
use common::command::{init_repository_dir, list_objects_dir, run_vcs_command};
use common::sha1_hex;

#[rstest]
fn write_blob_object_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let file_name = format!("{}.txt", Word().fake::<String>());
    let file_content = Words(5..10).fake::<Vec<String>>().join(" ");
    init_repository_dir.child(&file_name).write_str(&file_content)?;
    let digest = sha1_hex(file_content.as_bytes());

    run_vcs_command(init_repository_dir.path(), &["hash-object", "-w", &file_name])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{40}\n$")?)
        .stdout(format!("{digest}\n"));

    run_vcs_command(init_repository_dir.path(), &["cat-file", "-p", &digest])
        .assert()
        .success()
        .stdout(file_content);

    Ok(())
}

#[rstest]
fn hash_object_without_write_stores_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("a.txt").write_str("hello")?;

    run_vcs_command(init_repository_dir.path(), &["hash-object", "a.txt"])
        .assert()
        .success()
        .stdout("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d\n");

    assert!(list_objects_dir(init_repository_dir.path()).is_empty());

    Ok(())
}

#[rstest]
#[case("zz", "invalid object id")]
#[case("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d", "not found")]
fn cat_file_rejects_unknown_objects(
    init_repository_dir: TempDir,
    #[case] object_id: &str,
    #[case] message: &str,
) {
    run_vcs_command(init_repository_dir.path(), &["cat-file", "-p", object_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains(message));
}
