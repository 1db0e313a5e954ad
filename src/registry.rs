//! Process-wide engine instances, one per value type.
//!
//! Callers that want every part of a program to add to the same deferred
//! list ask for [`Scope::Shared`]; the instance is created on first lookup,
//! lives for the rest of the process and is never reset by later lookups.
//! [`Scope::Fresh`] hands out an unregistered instance with the same handle
//! type, which keeps tests independent of each other.
//!
//! A shared instance is shared mutable state. Its mutex serializes access,
//! but a deferred predicate that locks its own shared instance while that
//! instance is replaying will deadlock.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::engine::UnitTest;
use crate::error::{AssertError, AssertResult};

/// Handle to an engine that may be shared between callers.
pub type SharedUnitTest<T> = Arc<Mutex<UnitTest<T>>>;

/// Whether [`obtain`] returns the per-type shared instance or a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// A new, unregistered instance.
    #[default]
    Fresh,
    /// The process-wide instance for the value type.
    Shared,
}

static ENGINES: OnceLock<Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>> = OnceLock::new();

/// Returns an engine handle for `T` in the requested scope.
pub fn obtain<T: 'static>(scope: Scope) -> AssertResult<SharedUnitTest<T>> {
    match scope {
        Scope::Fresh => Ok(Arc::new(Mutex::new(UnitTest::new()))),
        Scope::Shared => shared::<T>(),
    }
}

/// Returns the shared engine for `T`, creating it with defaults on first use.
pub fn shared<T: 'static>() -> AssertResult<SharedUnitTest<T>> {
    shared_or_init(UnitTest::new)
}

/// Returns the shared engine for `T`, creating it with `init` on first use.
///
/// `init` runs at most once per type and only when no instance exists yet.
/// It runs under the registry lock, so it must not look up shared engines
/// itself.
///
/// ```
/// use unitcheck::registry;
/// use unitcheck::UnitTest;
///
/// struct Celsius(f64);
///
/// let a = registry::shared_or_init(|| UnitTest::<Celsius>::new()).unwrap();
/// let b = registry::shared::<Celsius>().unwrap();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
pub fn shared_or_init<T: 'static>(
    init: impl FnOnce() -> UnitTest<T>,
) -> AssertResult<SharedUnitTest<T>> {
    let engines = ENGINES.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = engines
        .lock()
        .map_err(|_| AssertError::internal("engine registry lock poisoned"))?;

    let entry = guard.entry(TypeId::of::<T>()).or_insert_with(|| {
        tracing::debug!(type_name = type_name::<T>(), "creating shared engine");
        let handle: SharedUnitTest<T> = Arc::new(Mutex::new(init()));
        Box::new(handle)
    });

    entry
        .downcast_ref::<SharedUnitTest<T>>()
        .cloned()
        .ok_or_else(|| {
            AssertError::internal(format!(
                "registry entry for {} has the wrong type",
                type_name::<T>()
            ))
        })
}

/// Locks an engine handle.
pub fn lock<T>(handle: &SharedUnitTest<T>) -> AssertResult<MutexGuard<'_, UnitTest<T>>> {
    handle
        .lock()
        .map_err(|_| {
            AssertError::internal(format!("engine lock poisoned for {}", type_name::<T>()))
        })
}
