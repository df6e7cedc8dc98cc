mod catalog;
mod names;
mod rules;

pub use catalog::*;
pub use names::*;
pub use rules::*;

use log::warn;
use serde::de::DeserializeOwned;

/// Embedded documents are parsed once; a broken document is logged and
/// replaced by its default.
pub(crate) fn parse_or_default<T: DeserializeOwned + Default>(document: &str, json: &str) -> T {
    match serde_json::from_str(json) {
        Ok(value) => value,
        Err(error) => {
            warn!("database: {} could not be read ({}), using defaults", document, error);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_document_falls_back_to_default() {
        let parsed: Vec<u32> = parse_or_default("numbers", "[1, 2,");

        assert!(parsed.is_empty());
        assert_eq!(parse_or_default::<Vec<u32>>("numbers", "[1, 2]"), vec![1, 2]);
    }
}
