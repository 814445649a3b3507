use assert_fs::TempDir;
use bytes::Bytes;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use ruck::artifacts::objects::object::Object;

mod common;
use common::command::{repository_dir, run_ruck_command};
use common::file::{FileSpec, write_file};

#[rstest]
fn hash_object_prints_the_content_address(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_ruck_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("greeting.txt"),
        "hello ruck".to_string(),
    ));

    let expected = Object::blob(Bytes::from_static(b"hello ruck")).object_id();

    let output = run_ruck_command(repository_dir.path(), &["hash-object", "greeting.txt"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, format!("{expected}\n"));

    Ok(())
}

#[rstest]
fn hashing_an_empty_file_yields_the_well_known_blob_address(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_ruck_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("empty.txt"),
        String::new(),
    ));

    let output = run_ruck_command(repository_dir.path(), &["hash-object", "empty.txt"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391\n");

    Ok(())
}

#[rstest]
fn written_objects_read_back_through_cat_file(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_ruck_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("payload.txt"),
        "round trip me".to_string(),
    ));

    let id = Object::blob(Bytes::from_static(b"round trip me")).object_id();
    run_ruck_command(
        repository_dir.path(),
        &["hash-object", "--write", "payload.txt"],
    )
    .assert()
    .success();

    // an abbreviated prefix is enough once the object is unique
    let output = run_ruck_command(
        repository_dir.path(),
        &["cat-file", "pretty", &id.to_short_id()],
    )
    .assert()
    .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, "round trip me");

    Ok(())
}

#[rstest]
fn cat_file_reports_kind_and_size(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_ruck_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("sized.txt"),
        "12345".to_string(),
    ));

    let id = Object::blob(Bytes::from_static(b"12345")).object_id();
    run_ruck_command(
        repository_dir.path(),
        &["hash-object", "--write", "sized.txt"],
    )
    .assert()
    .success();

    let output = run_ruck_command(repository_dir.path(), &["cat-file", "type", id.as_ref()])
        .assert()
        .success();
    assert_eq!(String::from_utf8(output.get_output().stdout.clone())?, "blob\n");

    let output = run_ruck_command(repository_dir.path(), &["cat-file", "size", id.as_ref()])
        .assert()
        .success();
    assert_eq!(String::from_utf8(output.get_output().stdout.clone())?, "5\n");

    Ok(())
}

#[rstest]
fn cat_file_enforces_the_requested_kind(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_ruck_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("typed.txt"),
        "typed content".to_string(),
    ));

    let id = Object::blob(Bytes::from_static(b"typed content")).object_id();
    run_ruck_command(
        repository_dir.path(),
        &["hash-object", "--write", "typed.txt"],
    )
    .assert()
    .success();

    run_ruck_command(repository_dir.path(), &["cat-file", "tree", id.as_ref()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a tree"));

    Ok(())
}

#[rstest]
fn cat_file_on_a_missing_object_fails(repository_dir: TempDir) {
    run_ruck_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_ruck_command(repository_dir.path(), &["cat-file", "pretty", "abcd12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[rstest]
fn hash_object_rejects_an_unknown_kind(repository_dir: TempDir) {
    run_ruck_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("f.txt"),
        "x".to_string(),
    ));

    run_ruck_command(
        repository_dir.path(),
        &["hash-object", "-t", "blobber", "f.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown object kind"));
}
