//! Repository configuration parsed from `git config --list`.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Key-value view of the repository configuration.
///
/// A key may be set multiple times; values are kept in the order parsed.
/// Lookups never fail on absence - an unset key is a common, valid state.
#[derive(Debug, Clone, Default)]
pub struct GitConfig {
    values: BTreeMap<String, Vec<String>>,
}

impl GitConfig {
    /// Parse the output of `git config --list`.
    ///
    /// # Errors
    /// A line without a `=` separator is a hard parse failure: it means
    /// the tool output format is not what we expect.
    pub(crate) fn parse(listing: &str, command: &str) -> Result<Self> {
        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for line in listing.lines() {
            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::Parse {
                    line: line.to_string(),
                    command: command.to_string(),
                    expected: "key=value",
                });
            };
            values
                .entry(key.to_string())
                .or_default()
                .push(value.to_string());
        }

        Ok(Self { values })
    }

    /// All values for `key` joined with commas, or `""` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.values
            .get(key)
            .map(|values| values.join(","))
            .unwrap_or_default()
    }

    /// The single value for `key`, or `None` when absent.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateConfigKey`] if the key is set more than
    /// once. Use [`GitConfig::get`] for keys that are legitimately
    /// multi-valued.
    pub fn get_single(&self, key: &str) -> Result<Option<&str>> {
        match self.values.get(key).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([value]) => Ok(Some(value.as_str())),
            Some(_) => Err(Error::DuplicateConfigKey(key.to_string())),
        }
    }

    /// Update the cached entry after a successful write-through.
    pub(crate) fn set_cached(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), vec![value.to_string()]);
    }
}
