//! Binary that runs every fixture world through the search engine
//! and prints deterministic output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: key=value lines, see [`lock_tests::fixture_lines`].

fn main() {
    for line in lock_tests::fixture_lines() {
        println!("{line}");
    }
}
