//! Stamps the binary with git state so `rescomp --version` can tell release
//! builds (`0.3.0`) from development builds (`dev@<hash>`).

use std::process::{Command, Output};

fn git(args: &[&str]) -> Option<Output> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let hash = git(&["rev-parse", "--short", "HEAD"])
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();
    let on_tag = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();

    println!("cargo:rustc-env=RESCOMP_GIT_HASH={hash}");
    println!("cargo:rustc-env=RESCOMP_ON_RELEASE_TAG={on_tag}");
}
