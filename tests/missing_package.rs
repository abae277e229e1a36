//! Fatal startup precondition, checked through the real binaries:
//! a missing package must exit with status 1 before any socket is bound.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn serve_apk_exits_1_when_package_missing() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("serve_apk")
        .unwrap()
        .env_clear()
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "APK file not found at build/app/outputs/flutter-apk/app-release.apk",
        ))
        .stderr(predicate::str::contains("flutter build apk --release"));
}

#[test]
fn simple_share_exits_1_when_package_missing() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("simple_share")
        .unwrap()
        .env_clear()
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "APK file not found at build/app/outputs/flutter-apk/app-release.apk",
        ))
        // The simple variant deliberately omits the build hint
        .stderr(predicate::str::contains("flutter build").not());
}
