// This file is part of zash, a POSIX-compatible shell.
// Copyright (C) 2026 The zash authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Type definitions for job management
//!
//! The job set records the background jobs the shell has started. Process
//! supervision itself belongs to the external job-control layer reached
//! through [`System::reap_jobs`](crate::system::System::reap_jobs); this
//! module only keeps the bookkeeping the expander and executor need: job
//! entries, their last known status, and the process ID of the most recent
//! asynchronous command for `$!`.

use crate::semantics::ExitStatus;
use crate::system::System;
use slab::Slab;

/// Status of a [`Job`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum JobStatus {
    /// The job is running or stopped.
    Running,
    /// The job has terminated with the given exit status.
    Done(ExitStatus),
}

/// Set of one or more processes executing a pipeline
///
/// The shell tracks one process per job: the last command of the pipeline.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct Job {
    /// Process ID
    pub pid: i64,
    /// Last known status of the process
    pub status: JobStatus,
    /// String representation of this job for messages
    pub name: String,
}

impl Job {
    /// Creates a new running job.
    #[must_use]
    pub fn new(pid: i64) -> Job {
        Job {
            pid,
            status: JobStatus::Running,
            name: String::new(),
        }
    }
}

/// Collection of jobs
#[derive(Clone, Debug, Default)]
pub struct JobSet {
    jobs: Slab<Job>,
    /// Process ID of the most recently started asynchronous command
    last_async_pid: i64,
}

impl JobSet {
    /// Creates an empty job set.
    #[must_use]
    pub fn new() -> JobSet {
        JobSet::default()
    }

    /// Adds a job, returning its index.
    pub fn add(&mut self, job: Job) -> usize {
        self.jobs.insert(job)
    }

    /// Returns the job at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Job> {
        self.jobs.get(index)
    }

    /// Removes the job at the given index.
    pub fn remove(&mut self, index: usize) -> Option<Job> {
        self.jobs.try_remove(index)
    }

    /// Number of jobs in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the set contains no jobs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Iterates over the jobs with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Job)> {
        self.jobs.iter()
    }

    /// Returns the process ID of the most recently started asynchronous
    /// command (`$!`), or 0 if none has been started.
    #[must_use]
    pub fn last_async_pid(&self) -> i64 {
        self.last_async_pid
    }

    /// Records the process ID of an asynchronous command that just started.
    pub fn set_last_async_pid(&mut self, pid: i64) {
        self.last_async_pid = pid;
    }

    /// Updates job statuses with the results reported by the system.
    ///
    /// With `wait` false, the system is polled without blocking. With `wait`
    /// true, the call blocks until every job has completed. Returns whether
    /// any job changed state.
    pub fn reap(&mut self, system: &mut dyn System, wait: bool) -> bool {
        let mut changed = false;
        loop {
            let results = system.reap_jobs(wait);
            if results.is_empty() {
                return changed;
            }
            for (pid, status) in results {
                for (_, job) in self.jobs.iter_mut() {
                    if job.pid == pid && job.status == JobStatus::Running {
                        job.status = JobStatus::Done(ExitStatus(status));
                        changed = true;
                    }
                }
            }
            let all_done = self
                .jobs
                .iter()
                .all(|(_, job)| job.status != JobStatus::Running);
            if !wait || all_done {
                return changed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::VirtualSystem;

    #[test]
    fn add_get_remove() {
        let mut jobs = JobSet::new();
        let index = jobs.add(Job::new(42));
        assert_eq!(jobs.get(index).unwrap().pid, 42);
        assert_eq!(jobs.len(), 1);
        let removed = jobs.remove(index).unwrap();
        assert_eq!(removed.pid, 42);
        assert!(jobs.is_empty());
    }

    #[test]
    fn last_async_pid_defaults_to_zero() {
        let mut jobs = JobSet::new();
        assert_eq!(jobs.last_async_pid(), 0);
        jobs.set_last_async_pid(99);
        assert_eq!(jobs.last_async_pid(), 99);
    }

    #[test]
    fn reap_applies_reported_statuses() {
        let mut system = VirtualSystem::default();
        let mut jobs = JobSet::new();
        let index = jobs.add(Job::new(10));
        jobs.add(Job::new(11));

        assert!(!jobs.reap(&mut system, false));

        system.report_job_result(10, 0);
        assert!(jobs.reap(&mut system, false));
        assert_eq!(
            jobs.get(index).unwrap().status,
            JobStatus::Done(ExitStatus::SUCCESS)
        );
    }

    #[test]
    fn waiting_reap_drains_all_jobs() {
        let mut system = VirtualSystem::default();
        let mut jobs = JobSet::new();
        jobs.add(Job::new(10));
        jobs.add(Job::new(11));
        system.report_job_result(10, 0);
        system.report_job_result(11, 1);

        assert!(jobs.reap(&mut system, true));
        assert!(jobs
            .iter()
            .all(|(_, job)| matches!(job.status, JobStatus::Done(_))));
    }
}
