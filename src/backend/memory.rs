use crate::backend::manager::{CacheManager, Invalidate};
use crate::backend::meminfo;
use crate::backend::source::{FileSource, MeminfoSource};
use crate::config::ResolverConfig;
use crate::error::MemoryError;
use crate::model::{FactName, FactValue, MemoryFactSet, MemoryFacts};
use once_cell::sync::OnceCell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Query interface for memory facts, so callers can hold a fake in tests.
pub trait MemoryFactsProvider: Send + Sync {
    fn resolve(&self, name: &str) -> Result<FactValue, MemoryError>;

    fn resolve_fact(&self, name: FactName) -> Result<FactValue, MemoryError>;
}

/// Lazily populated memory fact cache backed by `/proc/meminfo`.
///
/// The whole check-then-populate sequence runs under one lock, so concurrent
/// callers trigger a single read and never observe a partially filled cache.
pub struct MemoryResolver {
    core: Arc<ResolverCore>,
    manager: Option<Arc<CacheManager>>,
    subscription: OnceCell<()>,
}

struct ResolverCore {
    source: Box<dyn MeminfoSource>,
    cache: Mutex<Option<MemoryFactSet>>,
}

impl ResolverCore {
    fn lock(&self) -> MutexGuard<'_, Option<MemoryFactSet>> {
        // The cache is only ever replaced whole, so a poisoned guard is still consistent.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read, parse and commit. Must be called with the cache lock held.
    fn refresh<'a>(
        &self,
        cache: &'a mut Option<MemoryFactSet>,
    ) -> Result<&'a MemoryFactSet, MemoryError> {
        log::debug!("Memory fact cache empty, reading meminfo");
        let content = self.source.read_meminfo()?;
        let facts = meminfo::parse(&content)?.into_fact_set();

        log::info!(
            "Memory facts loaded: total={} used={} ({}) swap_total={} swap_used={} ({})",
            facts.total,
            facts.used_bytes,
            facts.capacity,
            facts.swap_total,
            facts.swap_used_bytes,
            facts.swap_capacity
        );
        Ok(cache.insert(facts))
    }
}

impl Invalidate for ResolverCore {
    fn invalidate(&self) {
        let mut cache = self.lock();
        if cache.take().is_some() {
            log::info!("Memory fact cache invalidated");
        }
    }
}

impl MemoryResolver {
    pub fn new(source: impl MeminfoSource + 'static) -> Self {
        Self {
            core: Arc::new(ResolverCore {
                source: Box::new(source),
                cache: Mutex::new(None),
            }),
            manager: None,
            subscription: OnceCell::new(),
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(FileSource::new(config.meminfo_path.clone()))
    }

    /// Attach the manager whose invalidation signals should clear this cache.
    pub fn with_manager(mut self, manager: Arc<CacheManager>) -> Self {
        self.manager = Some(manager);
        self
    }

    pub fn resolve(&self, name: &str) -> Result<FactValue, MemoryError> {
        let name: FactName = name.parse()?;
        self.resolve_fact(name)
    }

    pub fn resolve_fact(&self, name: FactName) -> Result<FactValue, MemoryError> {
        self.with_facts(|facts| facts.get(name))
    }

    /// The structured `memory` fact, served from the same cache.
    pub fn memory_facts(&self) -> Result<MemoryFacts, MemoryError> {
        self.with_facts(|facts| MemoryFacts::from(facts))
    }

    /// Register with the manager, if any. Safe to call repeatedly.
    pub fn subscribe_to_manager(&self) {
        let Some(manager) = &self.manager else {
            return;
        };
        self.subscription.get_or_init(|| {
            let core: Weak<ResolverCore> = Arc::downgrade(&self.core);
            if manager.register(core) {
                log::debug!("Memory resolver subscribed to cache manager");
            }
        });
    }

    /// Drop all cached facts; the next query re-reads meminfo.
    pub fn invalidate(&self) {
        self.core.invalidate();
    }

    pub fn is_cached(&self) -> bool {
        self.core.lock().is_some()
    }

    fn with_facts<T>(&self, f: impl FnOnce(&MemoryFactSet) -> T) -> Result<T, MemoryError> {
        let mut cache = self.core.lock();
        self.subscribe_to_manager();

        if let Some(facts) = cache.as_ref() {
            log::debug!("Memory fact cache hit");
            return Ok(f(facts));
        }
        let facts = self.core.refresh(&mut cache)?;
        Ok(f(facts))
    }
}

impl Default for MemoryResolver {
    fn default() -> Self {
        Self::new(FileSource::default())
    }
}

impl MemoryFactsProvider for MemoryResolver {
    fn resolve(&self, name: &str) -> Result<FactValue, MemoryError> {
        MemoryResolver::resolve(self, name)
    }

    fn resolve_fact(&self, name: FactName) -> Result<FactValue, MemoryError> {
        MemoryResolver::resolve_fact(self, name)
    }
}
