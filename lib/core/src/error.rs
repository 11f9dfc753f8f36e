//! Result alias shared by the KRX chat crates.
//!
//! Domain errors stay plain enums in the crate that raises them
//! (`RequestError`, `StoreError`, `CliError`). Code that wants a report chain
//! returns this alias and lifts the enum with `?`.

use rootcause::Report;

/// A `Result` whose error is a rootcause [`Report`] with current context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Unreachable;

    impl fmt::Display for Unreachable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("backend unreachable")
        }
    }

    impl std::error::Error for Unreachable {}

    fn probe(up: bool) -> Result<u16, Unreachable> {
        let status = if up { Ok(200) } else { Err(Unreachable) };
        Ok(status?)
    }

    #[test]
    fn domain_error_lifts_into_report() {
        assert_eq!(probe(true).expect("backend up"), 200);
        assert!(probe(false).is_err());
    }
}
