use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// State container shared by the client components.
///
/// Every mutation goes through [`Store::update`]. Once the closure returns,
/// the new state is committed, published to `watch` subscribers and handed
/// to every registered listener before `update` itself returns. Commits are
/// serialized, so listeners see snapshots in commit order.
///
/// Listeners may read the store (`read`, `snapshot`) but must not call
/// `update`, `update_if` or `listen` on it; that deadlocks.
pub struct Store<T> {
    commit: Mutex<()>,
    state: Mutex<T>,
    tx: watch::Sender<T>,
    listeners: Mutex<Vec<Listener<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(initial.clone());
        Self {
            commit: Mutex::new(()),
            state: Mutex::new(initial),
            tx,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let _commit = lock(&self.commit);
        let (result, snapshot) = {
            let mut state = lock(&self.state);
            let result = f(&mut state);
            let snapshot = state.clone();
            self.tx.send_replace(snapshot.clone());
            (result, snapshot)
        };

        // State lock is released so listeners can read; the commit lock
        // keeps the next update from notifying ahead of this one.
        self.notify(&snapshot);
        result
    }

    /// Like [`Store::update`], but nothing is published when `f` returns false.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let _commit = lock(&self.commit);
        let snapshot = {
            let mut state = lock(&self.state);
            if !f(&mut state) {
                return false;
            }
            let snapshot = state.clone();
            self.tx.send_replace(snapshot.clone());
            snapshot
        };

        self.notify(&snapshot);
        true
    }

    fn notify(&self, snapshot: &T) {
        for listener in lock(&self.listeners).iter() {
            listener(snapshot);
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&lock(&self.state))
    }

    pub fn snapshot(&self) -> T {
        lock(&self.state).clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Registers a synchronous observer called after every committed update.
    pub fn listen(&self, listener: impl Fn(&T) + Send + Sync + 'static) {
        lock(&self.listeners).push(Box::new(listener));
    }
}

impl<T: Clone + Default + Send + Sync + 'static> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn update_returns_closure_result() {
        let store = Store::new(vec![1, 2]);
        let len = store.update(|v| {
            v.push(3);
            v.len()
        });

        assert_eq!(len, 3);
        assert_eq!(store.snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn listeners_see_committed_state() {
        let store = Arc::new(Store::new(0u32));
        let calls = Arc::new(AtomicUsize::new(0));

        let seen = calls.clone();
        let reader = store.clone();
        store.listen(move |value| {
            // re-entrant read must not deadlock
            assert_eq!(reader.snapshot(), *value);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.update(|v| *v += 5);
        store.update(|v| *v += 1);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.read(|v| *v), 6);
    }

    #[test]
    fn rejected_update_if_is_silent() {
        let store = Store::new(1u8);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        store.listen(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!store.update_if(|v| *v == 0));
        assert!(store.update_if(|v| {
            *v = 2;
            true
        }));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.snapshot(), 2);
    }

    #[test]
    fn concurrent_updates_notify_in_commit_order() {
        for _ in 0..50 {
            let store = Arc::new(Store::new(0u32));
            let seen = Arc::new(Mutex::new(Vec::new()));
            let sink = seen.clone();
            store.listen(move |value| sink.lock().unwrap().push(*value));

            let writers: Vec<_> = (0..4)
                .map(|_| {
                    let store = store.clone();
                    std::thread::spawn(move || {
                        for _ in 0..200 {
                            store.update(|v| *v += 1);
                        }
                    })
                })
                .collect();
            for writer in writers {
                writer.join().unwrap();
            }

            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 800);
            assert!(seen.windows(2).all(|w| w[0] < w[1]), "listener saw an older state");
            assert_eq!(seen.last(), Some(&store.snapshot()));
        }
    }

    #[tokio::test]
    async fn watch_subscribers_are_woken() {
        let store = Store::new(String::new());
        let mut rx = store.subscribe();

        store.update(|s| s.push_str("hello"));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "hello");
    }
}
