// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account-centric views derived from the job lists.

use jw_core::{AccountId, Job};
use std::collections::{HashMap, HashSet};

use super::JobLists;

/// Busy accounts and their active job. Always rebuilt, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobIndex {
    busy: HashSet<AccountId>,
    active: HashMap<AccountId, Job>,
}

impl JobIndex {
    pub fn build(lists: &JobLists) -> Self {
        let mut busy = HashSet::with_capacity(lists.active_len());
        let mut active: HashMap<AccountId, Job> = HashMap::with_capacity(lists.active_len());
        // Running first so it wins over queued for the same account
        for job in lists.running.iter().chain(lists.queued.iter()) {
            busy.insert(job.account_id.clone());
            active.entry(job.account_id.clone()).or_insert_with(|| job.clone());
        }
        Self { busy, active }
    }

    pub fn is_account_busy(&self, account_id: &str) -> bool {
        self.busy.contains(account_id)
    }

    /// The account's running job, else its queued job.
    pub fn account_job(&self, account_id: &str) -> Option<&Job> {
        self.active.get(account_id)
    }

    pub fn busy_accounts(&self) -> impl Iterator<Item = &AccountId> {
        self.busy.iter()
    }

    pub fn busy_count(&self) -> usize {
        self.busy.len()
    }
}

/// Lists plus the index computed from them; what subscribers observe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobView {
    lists: JobLists,
    index: JobIndex,
}

impl JobView {
    pub fn new(lists: JobLists) -> Self {
        let index = JobIndex::build(&lists);
        Self { lists, index }
    }

    pub fn lists(&self) -> &JobLists {
        &self.lists
    }

    pub fn index(&self) -> &JobIndex {
        &self.index
    }

    pub fn is_account_busy(&self, account_id: &str) -> bool {
        self.index.is_account_busy(account_id)
    }

    pub fn account_job(&self, account_id: &str) -> Option<&Job> {
        self.index.account_job(account_id)
    }
}
