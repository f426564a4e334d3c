use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CargoError;
use assert_cmd::cargo::CommandCargoExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

// Creates the peach command working in the given home directory.
fn peach(home: &Path) -> Result<Command, CargoError> {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME"))?;
    cmd.env_remove("PEACH_HOME").arg("--quiet").arg("--home").arg(home);
    Ok(cmd)
}

// Creates a fake installation with `php` and `apache` folders.
fn create_install(dir: &Path, version: &str) {
    fs::create_dir_all(dir.join("php")).unwrap();
    fs::create_dir_all(dir.join("apache")).unwrap();
    fs::write(dir.join("php").join("snapshot.txt"), format!("Version: {version}\r\n")).unwrap();
}

#[test]
fn test_cli_version() -> Result<(), CargoError> {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME"))?;
    cmd.arg("-V");
    cmd.assert().success().stdout(contains(env!("CARGO_PKG_VERSION")));

    Ok(())
}

#[test]
fn test_cli_help() -> Result<(), CargoError> {
    let home = tempdir().unwrap();
    peach(home.path())?.assert().success().stdout(contains("peach download <version>"));
    peach(home.path())?.arg("help").assert().success().stdout(contains("peach load <version>"));

    Ok(())
}

#[test]
fn test_cli_unknown_command() -> Result<(), CargoError> {
    let home = tempdir().unwrap();
    peach(home.path())?.arg("frobnicate").assert().success().stdout(contains("Command frobnicate is not found!"));

    Ok(())
}

#[test]
fn test_cli_without_setup() -> Result<(), CargoError> {
    let home = tempdir().unwrap();
    peach(home.path())?.arg("list").assert().code(1).stderr(contains("Use \"setup\" command!"));

    Ok(())
}

#[test]
fn test_cli_argument_count() -> Result<(), CargoError> {
    let home = tempdir().unwrap();
    peach(home.path())?.arg("load").assert().code(1).stderr(contains("there must be one argument: load <argument>"));

    Ok(())
}

#[test]
fn test_cli_usage_error() -> Result<(), CargoError> {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME"))?;
    cmd.env_remove("PEACH_HOME").arg("--quiet").arg("--home");
    cmd.assert().code(1).stderr(contains("[error]")).stderr(contains("--home <dir>"));

    Ok(())
}

#[test]
fn test_cli_hyphen_argument() -> Result<(), CargoError> {
    let home = tempdir().unwrap();
    peach(home.path())?.arg("setup").assert().success();
    peach(home.path())?.arg("xampp").arg("-weird").assert().code(1).stderr(contains("invalid path -weird"));

    Ok(())
}

#[test]
fn test_cli_setup_and_info() -> Result<(), CargoError> {
    let home = tempdir().unwrap();
    peach(home.path())?.arg("setup").assert().success();
    peach(home.path())?.arg("setup").assert().success();
    assert!(home.path().join("config.json").is_file());
    assert!(home.path().join("php_versions").is_dir());
    assert!(home.path().join("temps").is_dir());

    peach(home.path())?
        .arg("info")
        .assert()
        .success()
        .stdout(contains("Set up: YES"))
        .stdout(contains("Php versions folder: DEFAULT"))
        .stdout(contains("IS NOT SET"));

    Ok(())
}

#[test]
fn test_cli_xampp_with_invalid_path() -> Result<(), CargoError> {
    let home = tempdir().unwrap();
    peach(home.path())?.arg("setup").assert().success();
    let before = fs::read(home.path().join("config.json")).unwrap();

    peach(home.path())?.arg("xampp").arg(home.path().join("missing")).assert().code(1).stderr(contains("invalid path"));
    assert_eq!(before, fs::read(home.path().join("config.json")).unwrap());

    Ok(())
}

#[test]
fn test_cli_load_and_list() -> Result<(), CargoError> {
    let home = tempdir().unwrap();
    let active = home.path().join("active");
    create_install(&active, "8.0.25");
    create_install(&home.path().join("php_versions").join("8.1.12"), "8.1.12");

    peach(home.path())?.arg("setup").assert().success();
    peach(home.path())?.arg("xampp").arg(&active).assert().success();
    peach(home.path())?.arg("load").arg("8.1.12").assert().success().stdout(contains("PHP saved"));

    let output = peach(home.path())?.arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let (current, rest) = stdout.split_once("Has been loaded:").unwrap();
    let (loaded, _popular) = rest.split_once("Popular versions for download:").unwrap();
    assert!(current.contains("8.1.12"));
    assert!(loaded.contains("8.0.25"));
    assert!(!loaded.contains("8.1.12"));
    assert!(fs::read_to_string(active.join("php").join("snapshot.txt")).unwrap().contains("8.1.12"));

    Ok(())
}
