//! Repository handle built on subprocess git invocations.
//!
//! The handle owns a memoized view of the repository configuration and the
//! remote map. Both caches follow the same rules: a write-through updates
//! the cached entry atomically, and a listing never partially populates
//! the cache on error.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::branch::Branch;
use crate::config::GitConfig;
use crate::error::{Error, Result};
use crate::exec::{ExecResult, GitRunner, Runner};
use crate::forge::ForgeInfo;
use crate::identity::Identity;
use crate::remote::{Remote, UrlPolicy, parse_remote_listing};
use crate::traits::GitOps;

/// Config key naming the contributor's fork remote.
pub const FORK_REMOTE_KEY: &str = "gitflow.fork.remote";

/// Config key naming the canonical upstream remote.
pub const UPSTREAM_REMOTE_KEY: &str = "gitflow.upstream.remote";

/// Options for pushing a branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct PushOptions {
    /// Pass `--set-upstream` so the new branch tracks the remote.
    pub set_upstream: bool,
}

/// A git repository rooted at a working directory.
///
/// One handle per command invocation; all state is memoized in memory for
/// that lifetime only and is never shared across processes.
pub struct Repository {
    dir: PathBuf,
    runner: Box<dyn Runner>,
    config: RefCell<GitConfig>,
    remotes: RefCell<Option<BTreeMap<String, Remote>>>,
}

impl Repository {
    /// Open a repository at the given directory.
    ///
    /// Listing the configuration doubles as the probe that this is a real
    /// git directory.
    ///
    /// # Errors
    /// Returns [`Error::NotARepository`] if the probe fails, or a parse
    /// error if the configuration listing is malformed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let runner = Box::new(GitRunner::new(&dir));
        Self::with_runner(dir, runner)
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if the current directory is unavailable or is not
    /// inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(std::env::current_dir()?)
    }

    /// Open with a caller-supplied [`Runner`] (scripted runners in tests,
    /// dry-run wrappers).
    ///
    /// # Errors
    /// Same failure modes as [`Repository::open`].
    pub fn with_runner(dir: impl Into<PathBuf>, runner: Box<dyn Runner>) -> Result<Self> {
        let dir = dir.into();
        let listing = runner
            .run(&["config", "--list"])
            .map_err(|source| Error::NotARepository {
                dir: dir.clone(),
                source: Box::new(source),
            })?;
        let config = GitConfig::parse(&listing.stdout, "git config --list")?;

        Ok(Self {
            dir,
            runner,
            config: RefCell::new(config),
            remotes: RefCell::new(None),
        })
    }

    /// The working directory this handle is rooted at.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // === Configuration ===

    /// All values for a config key, comma-joined; `""` when absent.
    #[must_use]
    pub fn config_get(&self, key: &str) -> String {
        self.config.borrow().get(key)
    }

    /// The single value for a config key.
    ///
    /// # Errors
    /// Fails if the key is set more than once.
    pub fn config_get_single(&self, key: &str) -> Result<Option<String>> {
        self.config
            .borrow()
            .get_single(key)
            .map(|value| value.map(str::to_string))
    }

    /// Write a config value through to the repository and update the
    /// cached entry.
    ///
    /// # Errors
    /// Fails if the underlying `git config` invocation fails; the cache is
    /// left untouched in that case.
    pub fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.runner.run(&["config", key, value])?;
        self.config.borrow_mut().set_cached(key, value);
        Ok(())
    }

    // === Remotes ===

    /// All configured remotes, memoized after the first listing.
    ///
    /// # Errors
    /// Fails on an unparseable listing; the cache stays empty.
    pub fn list_remotes(&self) -> Result<BTreeMap<String, Remote>> {
        if let Some(remotes) = self.remotes.borrow().as_ref() {
            return Ok(remotes.clone());
        }

        let result = self.runner.run(&["remote", "-v"])?;
        let remotes = parse_remote_listing(&result.stdout, "git remote -v")?;
        *self.remotes.borrow_mut() = Some(remotes.clone());
        Ok(remotes)
    }

    /// Look up a remote by name.
    ///
    /// # Errors
    /// Returns [`Error::RemoteNotFound`] if absent.
    pub fn get_remote(&self, name: &str) -> Result<Remote> {
        let remotes = self.list_remotes()?;
        remotes
            .get(name)
            .cloned()
            .ok_or_else(|| Error::RemoteNotFound(name.to_string()))
    }

    /// Rename a remote, keeping the in-memory mirror consistent with the
    /// tool state. A no-op when the name already matches.
    ///
    /// # Errors
    /// Fails if the underlying `git remote rename` fails.
    pub fn rename_remote(&self, remote: &mut Remote, new_name: &str) -> Result<()> {
        if remote.name == new_name {
            return Ok(());
        }

        tracing::info!(old_name = %remote.name, new_name, "renaming remote");
        self.runner
            .run(&["remote", "rename", &remote.name, new_name])?;

        if let Some(remotes) = self.remotes.borrow_mut().as_mut() {
            if let Some(mut cached) = remotes.remove(&remote.name) {
                cached.name = new_name.to_string();
                remotes.insert(new_name.to_string(), cached);
            }
        }
        remote.name = new_name.to_string();
        Ok(())
    }

    /// Update a remote's fetch and push URLs independently, skipping any
    /// call whose target already matches. Changing only the fetch URL
    /// preserves the push URL's prior value.
    ///
    /// # Errors
    /// Fails if an underlying `git remote set-url` fails.
    pub fn update_remote_urls(
        &self,
        remote: &mut Remote,
        fetch_url: &str,
        push_url: &str,
    ) -> Result<()> {
        if remote.fetch_url != fetch_url {
            tracing::info!(remote = %remote.name, url = fetch_url, "setting url");
            self.runner
                .run(&["remote", "set-url", &remote.name, fetch_url])?;
            remote.fetch_url = fetch_url.to_string();
        }

        if remote.push_url != push_url {
            tracing::info!(remote = %remote.name, url = push_url, "setting push url");
            self.runner
                .run(&["remote", "set-url", "--push", &remote.name, push_url])?;
            remote.push_url = push_url.to_string();
        }

        if let Some(remotes) = self.remotes.borrow_mut().as_mut() {
            remotes.insert(remote.name.clone(), remote.clone());
        }
        Ok(())
    }

    /// Fetch a remote.
    ///
    /// # Errors
    /// Fails if the underlying fetch fails.
    pub fn fetch_remote(&self, remote: &Remote) -> Result<()> {
        self.runner.run(&["fetch", &remote.name])?;
        Ok(())
    }

    // === Remote resolution ===

    /// Resolve the canonical upstream remote.
    ///
    /// Consults `gitflow.upstream.remote` first; otherwise the remote
    /// literally named `upstream` is the only accepted candidate, and the
    /// choice is persisted back into configuration so future invocations
    /// skip enumeration.
    ///
    /// # Errors
    /// Fails with a descriptive error naming the config key when zero or
    /// several candidates exist, or when a configured name is gone.
    pub fn upstream_remote(&self) -> Result<Remote> {
        if let Some(name) = self.config_get_single(UPSTREAM_REMOTE_KEY)? {
            if !name.is_empty() {
                return self.get_remote(&name);
            }
        }

        let remotes = self.list_remotes()?;
        let candidates: Vec<&Remote> = remotes
            .values()
            .filter(|remote| remote.name == "upstream")
            .collect();

        match candidates.as_slice() {
            [only] => {
                let remote = (*only).clone();
                self.set_config(UPSTREAM_REMOTE_KEY, &remote.name)?;
                Ok(remote)
            }
            [] => Err(Error::NoRemoteCandidate {
                role: "upstream",
                config_key: UPSTREAM_REMOTE_KEY,
            }),
            many => Err(Error::AmbiguousRemote {
                role: "upstream",
                candidates: many.iter().map(|remote| remote.name.clone()).collect(),
                config_key: UPSTREAM_REMOTE_KEY,
            }),
        }
    }

    /// Resolve the contributor's fork remote.
    ///
    /// Consults `gitflow.fork.remote` first; otherwise every remote whose
    /// GitHub organization equals the local identity is a candidate, and
    /// exactly one is required. First-time resolution renames the remote
    /// to the identity when the names differ, optionally rewrites its URLs
    /// to canonical HTTPS-fetch/SSH-push form, and persists the choice.
    ///
    /// # Errors
    /// Fails with a descriptive error naming the config key when zero or
    /// several candidates exist, or when a configured name is gone.
    pub fn fork_remote(&self, identity: &Identity, urls: UrlPolicy) -> Result<Remote> {
        if let Some(name) = self.config_get_single(FORK_REMOTE_KEY)? {
            if !name.is_empty() {
                return self.get_remote(&name);
            }
        }

        let Some(user) = identity.user() else {
            return Err(Error::NoRemoteCandidate {
                role: "fork",
                config_key: FORK_REMOTE_KEY,
            });
        };

        let remotes = self.list_remotes()?;
        let mut candidates: Vec<Remote> = remotes
            .values()
            .filter(|remote| match remote.forge() {
                ForgeInfo::Github { org, .. } => org == user,
                ForgeInfo::Unknown => false,
            })
            .cloned()
            .collect();

        let mut remote = match candidates.len() {
            1 => candidates.remove(0),
            0 => {
                return Err(Error::NoRemoteCandidate {
                    role: "fork",
                    config_key: FORK_REMOTE_KEY,
                });
            }
            _ => {
                return Err(Error::AmbiguousRemote {
                    role: "fork",
                    candidates: candidates.into_iter().map(|remote| remote.name).collect(),
                    config_key: FORK_REMOTE_KEY,
                });
            }
        };

        if remote.name != user {
            self.rename_remote(&mut remote, user)?;
        }

        if urls == UrlPolicy::Correct {
            if let ForgeInfo::Github { org, repo } = remote.forge() {
                if org == user {
                    let fetch_url = ForgeInfo::https_url(&org, &repo);
                    let push_url = ForgeInfo::ssh_url(&org, &repo);
                    self.update_remote_urls(&mut remote, &fetch_url, &push_url)?;
                } else {
                    tracing::warn!(url = %remote.fetch_url, "cannot determine correct urls");
                }
            }
        }

        self.set_config(FORK_REMOTE_KEY, &remote.name)?;
        Ok(remote)
    }

    // === Branches ===

    /// Remote-tracking branches of one remote, from `git show-ref`.
    ///
    /// # Errors
    /// Fails on an unparseable ref line.
    pub fn list_remote_branches(&self, remote: &Remote) -> Result<Vec<Branch>> {
        let result = self.runner.run(&["show-ref"])?;

        let prefix = format!("refs/remotes/{}/", remote.name);
        let mut branches = Vec::new();
        for line in result.stdout.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let &[_sha, ref_name] = tokens.as_slice() else {
                return Err(Error::Parse {
                    line: line.to_string(),
                    command: "git show-ref".to_string(),
                    expected: "two fields",
                });
            };

            let Some(short_name) = ref_name.strip_prefix(&prefix) else {
                continue;
            };

            branches.push(Branch {
                name: format!("{}/{short_name}", remote.name),
                short_name: short_name.to_string(),
                remote: Some(remote.name.clone()),
            });
        }

        Ok(branches)
    }

    /// The branch HEAD currently points at.
    ///
    /// # Errors
    /// Returns [`Error::UnbornHead`] when the symbolic resolution yields
    /// empty output.
    pub fn current_branch(&self) -> Result<Branch> {
        let result = self.runner.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let name = result.stdout.trim().to_string();
        if name.is_empty() {
            return Err(Error::UnbornHead {
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }
        Ok(Branch::local(name))
    }

    /// The upstream remote's `main` or `master` branch; exactly one must
    /// exist.
    ///
    /// # Errors
    /// Fails when the upstream remote cannot be resolved, or when zero or
    /// both of `main`/`master` exist.
    pub fn find_upstream_branch(&self) -> Result<Branch> {
        let upstream = self.upstream_remote()?;
        let branches = self.list_remote_branches(&upstream)?;

        let candidates: Vec<&Branch> = branches
            .iter()
            .filter(|branch| branch.short_name == "main" || branch.short_name == "master")
            .collect();

        match candidates.as_slice() {
            [only] => Ok((*only).clone()),
            [] => Err(Error::NoUpstreamBranch {
                remote: upstream.name,
            }),
            many => Err(Error::AmbiguousUpstreamBranch {
                candidates: many.iter().map(|branch| branch.name.clone()).collect(),
            }),
        }
    }

    /// Create a branch starting at `from` and switch to it.
    ///
    /// # Errors
    /// Fails if checkout fails (e.g. the name already exists); the tool's
    /// captured output is surfaced.
    pub fn checkout_new_branch(&self, name: &str, from: &Branch) -> Result<Branch> {
        self.runner.run(&["checkout", "-b", name, &from.name])?;
        Ok(Branch::local(name))
    }

    /// Checkout an existing branch.
    ///
    /// # Errors
    /// Fails if checkout fails.
    pub fn checkout(&self, branch: &Branch) -> Result<()> {
        self.runner.run(&["checkout", &branch.name])?;
        Ok(())
    }

    /// Force-delete a local branch.
    ///
    /// # Errors
    /// Fails if the deletion fails.
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        self.runner.run(&["branch", "-D", name])?;
        Ok(())
    }

    /// Cherry-pick the given commits, oldest first. A conflict surfaces
    /// the tool's own diagnostic through the error.
    ///
    /// # Errors
    /// Fails if any pick fails; no rollback is attempted.
    pub fn cherry_pick(&self, shas: &[String]) -> Result<()> {
        let mut args = vec!["cherry-pick"];
        args.extend(shas.iter().map(String::as_str));
        self.runner.run(&args)?;
        Ok(())
    }

    /// Push the current branch to a remote.
    ///
    /// # Errors
    /// Fails if the push fails.
    pub fn push(&self, remote: &Remote, options: PushOptions) -> Result<()> {
        let mut args = vec!["push"];
        if options.set_upstream {
            args.push("--set-upstream");
        }
        args.push(&remote.name);
        self.runner.run(&args)?;
        Ok(())
    }

    /// Local branches already merged into `target`, from
    /// `git branch --merged`.
    ///
    /// Includes branches checked out in another worktree; the current
    /// branch is skipped.
    ///
    /// # Errors
    /// Any line that is not empty, a worktree marker, the current-branch
    /// marker, or a bare branch name is a parse error.
    pub fn merged_branches(&self, target: &Branch) -> Result<Vec<String>> {
        let args = ["branch", "--merged", target.name.as_str()];
        let result = self.runner.run(&args)?;

        let mut merged = Vec::new();
        for line in result.stdout.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [] => {}
                ["+", name] => merged.push((*name).to_string()),
                ["*", name] => tracing::debug!("skipping current branch {name:?}"),
                [name] => merged.push((*name).to_string()),
                _ => {
                    return Err(Error::Parse {
                        line: line.to_string(),
                        command: format!("git {}", args.join(" ")),
                        expected: "a branch name",
                    });
                }
            }
        }

        Ok(merged)
    }

    // === Index ===

    /// The working-tree diff with zero lines of context.
    ///
    /// # Errors
    /// Fails if `git diff` fails.
    pub fn unstaged_diff(&self) -> Result<String> {
        let result = self.runner.run(&["diff", "-U0"])?;
        Ok(result.stdout)
    }

    /// Apply a zero-context patch to the index.
    ///
    /// # Errors
    /// Fails if `git apply` rejects the patch.
    pub fn apply_to_index(&self, patch: &str) -> Result<()> {
        self.runner
            .run_with_input(&["apply", "--cached", "--unidiff-zero", "-"], patch)?;
        Ok(())
    }

    // === Interactive passthrough ===

    /// Run git attached to the caller's terminal (pager, editor, live
    /// rebase).
    ///
    /// # Errors
    /// Fails on non-zero exit; output is not captured.
    pub fn run_interactive(&self, args: &[&str]) -> Result<ExecResult> {
        self.runner.run_interactive(args)
    }
}

impl GitOps for Repository {
    fn current_branch(&self) -> Result<Branch> {
        Self::current_branch(self)
    }

    fn checkout(&self, branch: &Branch) -> Result<()> {
        Self::checkout(self, branch)
    }

    fn checkout_new_branch(&self, name: &str, from: &Branch) -> Result<Branch> {
        Self::checkout_new_branch(self, name, from)
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        Self::delete_branch(self, name)
    }

    fn cherry_pick(&self, shas: &[String]) -> Result<()> {
        Self::cherry_pick(self, shas)
    }

    fn push(&self, remote: &Remote, options: PushOptions) -> Result<()> {
        Self::push(self, remote, options)
    }

    fn fetch_remote(&self, remote: &Remote) -> Result<()> {
        Self::fetch_remote(self, remote)
    }

    fn fork_remote(&self, identity: &Identity, urls: UrlPolicy) -> Result<Remote> {
        Self::fork_remote(self, identity, urls)
    }

    fn upstream_remote(&self) -> Result<Remote> {
        Self::upstream_remote(self)
    }

    fn find_upstream_branch(&self) -> Result<Branch> {
        Self::find_upstream_branch(self)
    }

    fn list_remote_branches(&self, remote: &Remote) -> Result<Vec<Branch>> {
        Self::list_remote_branches(self, remote)
    }

    fn merged_branches(&self, target: &Branch) -> Result<Vec<String>> {
        Self::merged_branches(self, target)
    }

    fn unstaged_diff(&self) -> Result<String> {
        Self::unstaged_diff(self)
    }

    fn apply_to_index(&self, patch: &str) -> Result<()> {
        Self::apply_to_index(self, patch)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}
