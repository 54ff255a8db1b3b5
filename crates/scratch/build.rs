use std::process::Command;

/// Run a git command, returning trimmed stdout or an empty string outside a checkout.
fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");

    let hash = git(&["rev-parse", "--short", "HEAD"]);
    let commit_date = git(&["log", "-1", "--format=%cd", "--date=format:%Y-%m-%d %H:%M"]);
    let is_dirty = !git(&["status", "--porcelain"]).is_empty();

    // A release build is a clean tree with HEAD on the version tag.
    let version = env!("CARGO_PKG_VERSION");
    let tag_at_head = git(&["tag", "--points-at", "HEAD"])
        .lines()
        .any(|tag| tag == format!("v{}", version) || tag == version);

    println!("cargo:rustc-env=GIT_HASH={}", hash);
    println!("cargo:rustc-env=GIT_COMMIT_DATE={}", commit_date);
    println!("cargo:rustc-env=IS_RELEASE={}", tag_at_head && !is_dirty);
}
