mod common;

use common::TestContext;
use std::fs;
use std::path::PathBuf;

fn formula() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Formula").join("serpent.rb");
    fs::read_to_string(path).expect("Failed to read Formula/serpent.rb")
}

fn quoted_value(line: &str, keyword: &str) -> Option<String> {
    let rest = line.trim().strip_prefix(keyword)?.trim();
    rest.strip_prefix('"')?.strip_suffix('"').map(str::to_string)
}

#[test]
fn every_url_is_followed_by_a_sha256() {
    let content = formula();
    let lines: Vec<&str> = content.lines().collect();

    let mut urls = 0;
    for (index, line) in lines.iter().enumerate() {
        let Some(url) = quoted_value(line, "url") else { continue };
        urls += 1;
        assert!(url.starts_with("https://"), "url must be https: {url}");

        let checksum = lines
            .get(index + 1)
            .and_then(|next| quoted_value(next, "sha256"))
            .unwrap_or_else(|| panic!("url {url} has no sha256 on the next line"));
        assert_eq!(checksum.len(), 64, "sha256 for {url} must be 64 characters");
        assert!(
            checksum.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "sha256 for {url} must be lowercase hex"
        );
    }
    assert_eq!(urls, 2, "one archive per platform");
}

#[test]
fn formula_installs_the_serpent_binary() {
    let content = formula();

    assert!(content.contains("class Serpent < Formula"));
    assert!(content.contains("OS.mac?"));
    assert!(content.contains("OS.linux?"));
    assert!(content.contains(r#"bin.install "serpent""#));
}

#[test]
fn formula_test_step_is_accepted_by_the_binary() {
    let content = formula();
    assert!(content.contains(r##"system "#{bin}/serpent", "version""##));

    TestContext::new().cli().arg("version").assert().success();
}

#[test]
fn formula_archives_match_the_crate_version() {
    let content = formula();
    let release = format!("/releases/download/{0}/serpent_{0}_", env!("CARGO_PKG_VERSION"));

    for line in content.lines() {
        if let Some(url) = quoted_value(line, "url") {
            assert!(url.contains(&release), "{url} is not the {} release", env!("CARGO_PKG_VERSION"));
        }
    }
}
