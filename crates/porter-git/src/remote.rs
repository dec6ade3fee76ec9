//! Remote discovery via `git remote -v`.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::forge::ForgeInfo;

/// A configured remote: name plus fetch and push URLs.
///
/// At most one fetch URL and one push URL per name; a second entry of
/// either kind in the tool output is a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    /// Remote name, unique within a repository.
    pub name: String,
    /// URL used for fetches.
    pub fetch_url: String,
    /// URL used for pushes.
    pub push_url: String,
}

impl Remote {
    /// Forge identification for this remote's fetch URL.
    #[must_use]
    pub fn forge(&self) -> ForgeInfo {
        ForgeInfo::parse_url(&self.fetch_url)
    }
}

/// Whether fork-remote resolution may rewrite the remote's URLs to the
/// canonical HTTPS-fetch/SSH-push form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlPolicy {
    /// Rewrite URLs when the organization matches the local identity.
    Correct,
    /// Leave URLs untouched.
    #[default]
    Leave,
}

/// Parse the output of `git remote -v` into a remote map.
///
/// Never returns a partial map: any unparseable line fails the whole
/// listing.
pub(crate) fn parse_remote_listing(stdout: &str, command: &str) -> Result<BTreeMap<String, Remote>> {
    let mut remotes: BTreeMap<String, Remote> = BTreeMap::new();

    for line in stdout.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let &[name, url, kind] = tokens.as_slice() else {
            return Err(Error::Parse {
                line: line.to_string(),
                command: command.to_string(),
                expected: "three fields",
            });
        };

        let remote = remotes.entry(name.to_string()).or_insert_with(|| Remote {
            name: name.to_string(),
            fetch_url: String::new(),
            push_url: String::new(),
        });

        match kind {
            "(fetch)" => {
                if !remote.fetch_url.is_empty() {
                    return Err(Error::DuplicateRemoteUrl {
                        remote: name.to_string(),
                        kind: "fetch",
                    });
                }
                remote.fetch_url = url.to_string();
            }
            "(push)" => {
                if !remote.push_url.is_empty() {
                    return Err(Error::DuplicateRemoteUrl {
                        remote: name.to_string(),
                        kind: "push",
                    });
                }
                remote.push_url = url.to_string();
            }
            _ => {
                return Err(Error::Parse {
                    line: line.to_string(),
                    command: command.to_string(),
                    expected: "(fetch) or (push)",
                });
            }
        }
    }

    Ok(remotes)
}
