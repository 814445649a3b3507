use assert_fs::TempDir;
use bytes::Bytes;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use ruck::artifacts::objects::object::Object;

mod common;
use common::command::{init_repository_dir, repository_dir, run_ruck_command};
use common::file::{FileSpec, write_file};

#[rstest]
fn added_files_are_listed_in_path_order(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_ruck_command(init_repository_dir.path(), &["ls-files"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, "1.txt\na/2.txt\na/b/3.txt\n");

    Ok(())
}

#[rstest]
fn add_stores_each_file_as_a_blob(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = Object::blob(Bytes::from_static(b"one")).object_id();

    let output = run_ruck_command(
        init_repository_dir.path(),
        &["cat-file", "blob", id.as_ref()],
    )
    .assert()
    .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, "one");

    Ok(())
}

#[rstest]
fn ls_files_stage_shows_mode_address_and_stage(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = Object::blob(Bytes::from_static(b"one")).object_id();

    let output = run_ruck_command(init_repository_dir.path(), &["ls-files", "--stage"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    let first_line = stdout.lines().next().unwrap();
    assert_eq!(first_line, format!("100644 {id} 0\t1.txt"));

    Ok(())
}

#[rstest]
fn re_adding_a_modified_file_replaces_its_entry(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "one, revised".to_string(),
    ));
    run_ruck_command(init_repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    let revised = Object::blob(Bytes::from_static(b"one, revised")).object_id();

    let output = run_ruck_command(init_repository_dir.path(), &["ls-files", "--stage"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    // still three entries, with 1.txt now pointing at the new blob
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.contains(&format!("100644 {revised} 0\t1.txt")));

    Ok(())
}

#[rstest]
fn adding_a_missing_path_fails(repository_dir: TempDir) {
    run_ruck_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_ruck_command(repository_dir.path(), &["add", "no-such-file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not match any files"));
}

#[rstest]
fn the_index_survives_a_round_trip_on_disk(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    // a second add of the same tree must leave the listing unchanged
    let before = run_ruck_command(init_repository_dir.path(), &["ls-files", "--stage"])
        .assert()
        .success();
    let before = String::from_utf8(before.get_output().stdout.clone())?;

    run_ruck_command(init_repository_dir.path(), &["add", "."])
        .assert()
        .success();

    let after = run_ruck_command(init_repository_dir.path(), &["ls-files", "--stage"])
        .assert()
        .success();
    let after = String::from_utf8(after.get_output().stdout.clone())?;

    assert_eq!(before, after);

    Ok(())
}
