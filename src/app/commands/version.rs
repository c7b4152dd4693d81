/// `serpent <version>`, as printed by `serpent version`.
pub fn version_line() -> String {
    format!("serpent {}", env!("CARGO_PKG_VERSION"))
}
