//! Bounded work queue between the accept loop and the worker pool.
//!
//! A fixed-capacity queue with blocking semantics on both ends: `push` waits
//! while the queue is full, `pop` waits while it is empty. The accept loop
//! therefore stalls, instead of buffering unbounded work, when all workers
//! are busy and the queue is at capacity.

use std::collections::VecDeque;

use tokio::sync::{Mutex, Notify};

/// A bounded multi-producer multi-consumer queue.
///
/// Waiting is implemented with two [`Notify`] conditions, one per direction.
/// A `Notify` stores at most one permit, so after every successful push or
/// pop the operation re-signals its condition if it still holds; a woken
/// waiter that finds work left behind passes the wakeup along.
#[derive(Debug)]
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: usize,
    not_empty: Notify,
    not_full: Notify,
}

impl<T> WorkQueue<T> {
    /// Creates a queue holding at most `capacity` items.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        let capacity = capacity as usize;
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            not_empty: Notify::new(),
            not_full: Notify::new(),
        }
    }

    /// Appends an item, waiting for space while the queue is full.
    pub async fn push(&self, item: T) {
        loop {
            // Register interest before checking, so a pop that lands between
            // the check and the await leaves a permit for us.
            let vacancy = self.not_full.notified();
            {
                let mut items = self.items.lock().await;
                if items.len() < self.capacity {
                    items.push_back(item);
                    if items.len() < self.capacity {
                        self.not_full.notify_one();
                    }
                    drop(items);
                    self.not_empty.notify_one();
                    return;
                }
            }
            vacancy.await;
        }
    }

    /// Removes the oldest item, waiting while the queue is empty.
    pub async fn pop(&self) -> T {
        loop {
            let arrival = self.not_empty.notified();
            {
                let mut items = self.items.lock().await;
                if let Some(item) = items.pop_front() {
                    if !items.is_empty() {
                        self.not_empty.notify_one();
                    }
                    drop(items);
                    self.not_full.notify_one();
                    return item;
                }
            }
            arrival.await;
        }
    }

    /// Current queue depth.
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    /// True if no items are queued.
    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn test_push_pop_fifo() {
        let queue = WorkQueue::new(4);
        queue.push(1_u32).await;
        queue.push(2).await;
        queue.push(3).await;

        assert_eq!(queue.pop().await, 1);
        assert_eq!(queue.pop().await, 2);
        assert_eq!(queue.pop().await, 3);
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn test_pop_blocks_until_push() {
        let queue = Arc::new(WorkQueue::new(4));

        let consumer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.pop().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!consumer.is_finished());

        queue.push(7_u32).await;
        let got = timeout(Duration::from_secs(1), consumer)
            .await
            .expect("consumer should wake")
            .expect("consumer task should not panic");
        assert_eq!(got, 7);
    }

    #[tokio::test]
    async fn test_push_blocks_at_capacity() {
        let queue = Arc::new(WorkQueue::new(2));
        queue.push(1_u32).await;
        queue.push(2).await;

        let producer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.push(3).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!producer.is_finished());
        assert_eq!(queue.len().await, 2);

        // Freeing one slot unblocks the stalled producer.
        assert_eq!(queue.pop().await, 1);
        timeout(Duration::from_secs(1), producer)
            .await
            .expect("producer should wake")
            .expect("producer task should not panic");

        assert_eq!(queue.pop().await, 2);
        assert_eq!(queue.pop().await, 3);
    }

    #[tokio::test]
    async fn test_many_producers_many_consumers() {
        const ITEMS: u32 = 200;

        let queue = Arc::new(WorkQueue::new(5));
        let mut handles = Vec::new();

        for producer in 0..4_u32 {
            let queue = Arc::clone(&queue);
            handles.push(tokio::spawn(async move {
                for i in 0..ITEMS / 4 {
                    queue.push(producer * 1000 + i).await;
                }
            }));
        }

        let mut consumers = Vec::new();
        for _ in 0..4 {
            let queue = Arc::clone(&queue);
            consumers.push(tokio::spawn(async move {
                let mut seen = Vec::new();
                for _ in 0..ITEMS / 4 {
                    seen.push(queue.pop().await);
                }
                seen
            }));
        }

        for handle in handles {
            handle.await.expect("producer should finish");
        }
        let mut all = Vec::new();
        for consumer in consumers {
            let seen = timeout(Duration::from_secs(5), consumer)
                .await
                .expect("consumers should drain the queue")
                .expect("consumer task should not panic");
            all.extend(seen);
        }

        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), ITEMS as usize, "every item seen exactly once");
    }
}
