use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Something holding cached facts that can be told to drop them.
pub trait Invalidate: Send + Sync {
    fn invalidate(&self);
}

/// Registry of caches that are cleared together on an invalidation signal.
#[derive(Default)]
pub struct CacheManager {
    subscribers: Mutex<Vec<Weak<dyn Invalidate>>>,
}

impl CacheManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `target`. Returns `false` if it was already registered.
    pub fn register(&self, target: Weak<dyn Invalidate>) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|s| s.strong_count() > 0);

        if subscribers.iter().any(|s| Weak::ptr_eq(s, &target)) {
            return false;
        }
        subscribers.push(target);
        true
    }

    /// Clear every live subscriber.
    pub fn invalidate_all(&self) {
        // Callbacks take the subscriber's own lock, so ours must be released first.
        let live: Vec<Arc<dyn Invalidate>> = {
            let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
            subscribers.retain(|s| s.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        log::info!("Invalidating {} cached resolver(s)", live.len());
        for target in live {
            target.invalidate();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|s| s.strong_count() > 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl Invalidate for Counter {
        fn invalidate(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn register_is_idempotent() {
        let manager = CacheManager::new();
        let counter: Arc<dyn Invalidate> = Arc::new(Counter::default());

        assert!(manager.register(Arc::downgrade(&counter)));
        assert!(!manager.register(Arc::downgrade(&counter)));
        assert_eq!(manager.subscriber_count(), 1);
    }

    #[test]
    fn invalidate_all_notifies_each_subscriber_once() {
        let manager = CacheManager::new();
        let a = Arc::new(Counter::default());
        let b = Arc::new(Counter::default());
        let a_dyn: Arc<dyn Invalidate> = a.clone();
        let b_dyn: Arc<dyn Invalidate> = b.clone();

        manager.register(Arc::downgrade(&a_dyn));
        manager.register(Arc::downgrade(&a_dyn));
        manager.register(Arc::downgrade(&b_dyn));
        manager.invalidate_all();

        assert_eq!(a.0.load(Ordering::SeqCst), 1);
        assert_eq!(b.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let manager = CacheManager::new();
        {
            let counter: Arc<dyn Invalidate> = Arc::new(Counter::default());
            manager.register(Arc::downgrade(&counter));
            assert_eq!(manager.subscriber_count(), 1);
        }
        assert_eq!(manager.subscriber_count(), 0);
        manager.invalidate_all();
    }
}
