// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property tests: invariants hold for every reachable state.

use super::*;
use jw_core::test_support::strategies::{arb_job_event, arb_snapshot_event};
use proptest::prelude::*;
use std::collections::HashSet;

fn assert_disjoint(state: &JobLists) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for job in state.iter() {
        prop_assert!(seen.insert(job.id.clone()), "duplicate job id {}", job.id);
    }
    Ok(())
}

proptest! {
    #[test]
    fn lists_stay_disjoint_and_capped(events in prop::collection::vec(arb_job_event(), 0..60)) {
        let mut state = JobLists::default();
        for event in &events {
            if let Some(next) = state.apply(event).next {
                state = next;
            }
            assert_disjoint(&state)?;
            prop_assert!(state.completed.len() <= COMPLETED_CAP);
        }
    }

    #[test]
    fn snapshot_is_a_full_barrier(
        prefix in prop::collection::vec(arb_job_event(), 0..30),
        snapshot in arb_snapshot_event(),
    ) {
        let from_scratch = JobLists::default().apply(&snapshot).next;
        let after_prefix = replay(&prefix).apply(&snapshot).next;
        prop_assert_eq!(from_scratch, after_prefix);
    }

    #[test]
    fn apply_is_idempotent(
        prefix in prop::collection::vec(arb_job_event(), 0..30),
        event in arb_job_event(),
    ) {
        let once = replay(&prefix);
        let once = once.apply(&event).next.unwrap_or(once);
        let twice = once.apply(&event).next.unwrap_or_else(|| once.clone());
        prop_assert_eq!(once, twice);
    }
}
