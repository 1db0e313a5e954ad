use std::sync::Arc;
use std::thread;

use unitcheck::registry::{self, Scope};
use unitcheck::{MemoryReporter, UnitTest};

#[derive(Debug, Clone, PartialEq)]
struct Token(u32);

#[derive(Debug, Clone, PartialEq)]
struct Ticket(u32);

#[test]
fn shared_instance_accumulates_across_call_sites() {
    let sink = Arc::new(MemoryReporter::new());
    let reporter = sink.clone();
    let handle =
        registry::shared_or_init(move || UnitTest::<Token>::new().with_reporter(reporter))
            .unwrap();

    fn first_call_site() {
        let handle = registry::shared::<Token>().unwrap();
        let mut engine = registry::lock(&handle).unwrap();
        engine.defer(UnitTest::<Token>::assert_equal, (Token(1), Token(1)));
    }

    fn second_call_site() {
        let handle = registry::obtain::<Token>(Scope::Shared).unwrap();
        let mut engine = registry::lock(&handle).unwrap();
        engine.defer(UnitTest::<Token>::assert_not_equal, (Token(1), Token(2)));
    }

    first_call_site();
    second_call_site();

    let engine = registry::lock(&handle).unwrap();
    assert_eq!(engine.len(), 2);
    let summary = engine.replay().unwrap();
    assert_eq!(summary.passed, 2);
    assert_eq!(sink.len(), 2);
}

#[test]
fn shared_instance_is_reachable_from_other_threads() {
    let handle = registry::shared::<Ticket>().unwrap();

    let workers: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let handle = registry::shared::<Ticket>().unwrap();
                let mut engine = registry::lock(&handle).unwrap();
                engine.defer(UnitTest::<Ticket>::assert_equal, (Ticket(i), Ticket(i)));
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let mut engine = registry::lock(&handle).unwrap();
    engine.set_reporter(Arc::new(MemoryReporter::new()));
    assert_eq!(engine.len(), 4);
    assert!(engine.replay().unwrap().all_passed());
}

#[test]
fn fresh_scope_never_touches_the_shared_instance() {
    #[derive(PartialEq)]
    struct Local(u8);

    let fresh = registry::obtain::<Local>(Scope::Fresh).unwrap();
    registry::lock(&fresh)
        .unwrap()
        .defer(UnitTest::<Local>::assert_equal, (Local(1), Local(1)));

    let shared = registry::shared::<Local>().unwrap();
    assert!(registry::lock(&shared).unwrap().is_empty());
}
