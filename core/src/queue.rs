use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::submission::Submission;

/// A bounded, blocking FIFO mailbox of submissions shared between the
/// supervisor (the sole producer) and the worker pool (the consumers).
///
/// Producers block in `enqueue` while the queue is full; consumers block in
/// `dequeue` while it is empty. Both sides tolerate spurious wakeups by
/// re-checking their predicate in a loop, as `Condvar::wait` requires.
pub struct JobQueue {
    capacity: usize,
    state: Mutex<VecDeque<Submission>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl JobQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Blocks until there is room, then appends `submission` and wakes one
    /// waiting consumer.
    pub fn enqueue(&self, submission: Submission) {
        let mut queue = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        while queue.len() >= self.capacity {
            queue = self
                .not_full
                .wait(queue)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        queue.push_back(submission);
        self.not_empty.notify_one();
    }

    /// Blocks until an item is available, then removes and returns the
    /// oldest one and wakes one waiting producer.
    pub fn dequeue(&self) -> Submission {
        let mut queue = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        while queue.is_empty() {
            queue = self
                .not_empty
                .wait(queue)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        let submission = match queue.pop_front() {
            Some(submission) => submission,
            None => unreachable!("loop above only exits once the queue is non-empty"),
        };
        self.not_full.notify_one();
        submission
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn dequeue_returns_items_in_fifo_order() {
        let queue = JobQueue::new(4);
        for i in 1..=3 {
            queue.enqueue(Submission::new(i, PathBuf::from(format!("job{i}.c"))));
        }
        for i in 1..=3 {
            let s = queue.dequeue();
            assert_eq!(s.job_id, i);
        }
    }

    #[test]
    fn enqueue_blocks_until_space_and_dequeue_blocks_until_item() {
        let queue = Arc::new(JobQueue::new(1));
        queue.enqueue(Submission::new(1, PathBuf::from("a.c")));

        let producer_queue = Arc::clone(&queue);
        let producer = thread::spawn(move || {
            // This call blocks until the consumer below drains the single slot.
            producer_queue.enqueue(Submission::new(2, PathBuf::from("b.c")));
        });

        let first = queue.dequeue();
        assert_eq!(first.job_id, 1);
        producer.join().unwrap();

        let second = queue.dequeue();
        assert_eq!(second.job_id, 2);
    }

    #[test]
    fn no_item_is_lost_or_duplicated_under_concurrency() {
        let queue = Arc::new(JobQueue::new(8));
        let total = 200i64;

        let producer_queue = Arc::clone(&queue);
        let producer = thread::spawn(move || {
            for i in 1..=total {
                producer_queue.enqueue(Submission::new(i, PathBuf::from("x.c")));
            }
        });

        let mut seen = Vec::with_capacity(total as usize);
        for _ in 0..total {
            seen.push(queue.dequeue().job_id);
        }
        producer.join().unwrap();

        seen.sort_unstable();
        let expected: Vec<i64> = (1..=total).collect();
        assert_eq!(seen, expected);
    }
}
