//! Mock implementations for testing services.
//!
//! These mocks implement the traits from porter-git and porter-github to
//! enable unit testing of service logic without real git repos or network.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use porter_git::{
    Branch, Error as GitError, GitOps, Identity, PushOptions, Remote, Result as GitResult,
    UrlPolicy,
};
use porter_github::{
    Error as ApiError, ForgeApi, PullRequest, PullRequestCommit, Result as ApiResult,
};

use super::gh::{PrCreator, PrRequest};

/// Mock implementation of `GitOps` for testing.
///
/// Every mutating call is appended to `calls` as a one-line summary;
/// assertions read that log.
pub struct MockGitOps {
    pub calls: RefCell<Vec<String>>,
    pub current_branch: RefCell<String>,
    pub fork: Remote,
    pub upstream: Remote,
    pub upstream_branch: Branch,
    pub remote_branches: Vec<Branch>,
    pub merged: HashMap<String, Vec<String>>,
    pub diff: String,
    pub applied: RefCell<Vec<String>>,
    pub failing_deletes: BTreeSet<String>,
}

impl Default for MockGitOps {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitOps {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            current_branch: RefCell::new("main".to_string()),
            fork: Remote {
                name: "alice".to_string(),
                fetch_url: "https://github.com/alice/widget".to_string(),
                push_url: "git@github.com:alice/widget".to_string(),
            },
            upstream: Remote {
                name: "upstream".to_string(),
                fetch_url: "https://github.com/widgets/widget".to_string(),
                push_url: "https://github.com/widgets/widget".to_string(),
            },
            upstream_branch: Branch {
                name: "upstream/main".to_string(),
                short_name: "main".to_string(),
                remote: Some("upstream".to_string()),
            },
            remote_branches: Vec::new(),
            merged: HashMap::new(),
            diff: String::new(),
            applied: RefCell::new(Vec::new()),
            failing_deletes: BTreeSet::new(),
        }
    }

    pub fn with_current_branch(self, name: &str) -> Self {
        *self.current_branch.borrow_mut() = name.to_string();
        self
    }

    pub fn with_remote_branches(mut self, branches: Vec<Branch>) -> Self {
        self.remote_branches = branches;
        self
    }

    pub fn with_merged(mut self, target: &str, branches: &[&str]) -> Self {
        self.merged.insert(
            target.to_string(),
            branches.iter().map(ToString::to_string).collect(),
        );
        self
    }

    #[allow(dead_code)]
    pub fn with_diff(mut self, diff: &str) -> Self {
        self.diff = diff.to_string();
        self
    }

    #[allow(dead_code)]
    pub fn with_failing_delete(mut self, name: &str) -> Self {
        self.failing_deletes.insert(name.to_string());
        self
    }

    fn log(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl GitOps for MockGitOps {
    fn current_branch(&self) -> GitResult<Branch> {
        Ok(Branch::local(self.current_branch.borrow().clone()))
    }

    fn checkout(&self, branch: &Branch) -> GitResult<()> {
        self.log(format!("checkout {}", branch.name));
        *self.current_branch.borrow_mut() = branch.name.clone();
        Ok(())
    }

    fn checkout_new_branch(&self, name: &str, from: &Branch) -> GitResult<Branch> {
        self.log(format!("checkout-new {name} from {}", from.name));
        *self.current_branch.borrow_mut() = name.to_string();
        Ok(Branch::local(name))
    }

    fn delete_branch(&self, name: &str) -> GitResult<()> {
        self.log(format!("delete {name}"));
        if self.failing_deletes.contains(name) {
            return Err(GitError::CommandFailed {
                command: format!("git branch -D {name}"),
                exit_code: 1,
                stdout: String::new(),
                stderr: format!("error: branch '{name}' not found"),
            });
        }
        Ok(())
    }

    fn cherry_pick(&self, shas: &[String]) -> GitResult<()> {
        self.log(format!("cherry-pick {}", shas.join(" ")));
        Ok(())
    }

    fn push(&self, remote: &Remote, options: PushOptions) -> GitResult<()> {
        self.log(format!(
            "push {} set_upstream={}",
            remote.name, options.set_upstream
        ));
        Ok(())
    }

    fn fetch_remote(&self, remote: &Remote) -> GitResult<()> {
        self.log(format!("fetch {}", remote.name));
        Ok(())
    }

    fn fork_remote(&self, _identity: &Identity, _urls: UrlPolicy) -> GitResult<Remote> {
        Ok(self.fork.clone())
    }

    fn upstream_remote(&self) -> GitResult<Remote> {
        Ok(self.upstream.clone())
    }

    fn find_upstream_branch(&self) -> GitResult<Branch> {
        Ok(self.upstream_branch.clone())
    }

    fn list_remote_branches(&self, _remote: &Remote) -> GitResult<Vec<Branch>> {
        Ok(self.remote_branches.clone())
    }

    fn merged_branches(&self, target: &Branch) -> GitResult<Vec<String>> {
        Ok(self.merged.get(&target.name).cloned().unwrap_or_default())
    }

    fn unstaged_diff(&self) -> GitResult<String> {
        Ok(self.diff.clone())
    }

    fn apply_to_index(&self, patch: &str) -> GitResult<()> {
        self.applied.borrow_mut().push(patch.to_string());
        Ok(())
    }
}

/// Mock implementation of `ForgeApi` with canned pull requests.
#[derive(Default)]
pub struct MockForge {
    prs: HashMap<u64, (String, Vec<String>)>,
}

impl MockForge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pr(mut self, number: u64, title: &str, shas: &[&str]) -> Self {
        self.prs.insert(
            number,
            (
                title.to_string(),
                shas.iter().map(ToString::to_string).collect(),
            ),
        );
        self
    }
}

impl ForgeApi for MockForge {
    fn get_pr(&self, org: &str, repo: &str, number: u64) -> ApiResult<PullRequest> {
        let (title, _) = self.prs.get(&number).ok_or(ApiError::PrNotFound(number))?;
        Ok(PullRequest {
            number,
            title: title.clone(),
            body: None,
            html_url: format!("https://github.com/{org}/{repo}/pull/{number}"),
        })
    }

    fn list_pr_commits(
        &self,
        _org: &str,
        _repo: &str,
        number: u64,
    ) -> ApiResult<Vec<PullRequestCommit>> {
        let (_, shas) = self.prs.get(&number).ok_or(ApiError::PrNotFound(number))?;
        Ok(shas
            .iter()
            .map(|sha| PullRequestCommit { sha: sha.clone() })
            .collect())
    }
}

/// Mock implementation of `PrCreator` recording every request.
#[derive(Default)]
pub struct MockPrCreator {
    pub requests: RefCell<Vec<PrRequest>>,
}

impl PrCreator for MockPrCreator {
    fn create(&self, request: &PrRequest) -> anyhow::Result<()> {
        self.requests.borrow_mut().push(request.clone());
        Ok(())
    }
}
