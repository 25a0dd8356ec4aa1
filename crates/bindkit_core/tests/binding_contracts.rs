use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use bindkit_core::error::Result;
use bindkit_core::lifecycle::{handshake, EndpointRegistrar, Handshake, LifecycleController, State};
use bindkit_core::DependencySlot;

struct Component {
    connector: DependencySlot<Registrar>,
    api: DependencySlot<Api>,
    lifecycle: LifecycleController<String, ()>,
}

struct Api(&'static str);

#[derive(Default)]
struct Registrar {
    seen: Mutex<Vec<Option<&'static str>>>,
}

impl EndpointRegistrar<Component, Api> for Registrar {
    fn register_endpoint(
        &self,
        _endpoint: Arc<Component>,
        secondary: Option<Arc<Api>>,
    ) -> Result<()> {
        self.seen.lock().unwrap().push(secondary.map(|api| api.0));
        Ok(())
    }
}

impl Component {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            connector: DependencySlot::new("connector"),
            api: DependencySlot::new("api"),
            lifecycle: LifecycleController::new(),
        })
    }

    fn activate(self: &Arc<Self>, ctx: &str) -> Result<Handshake> {
        let this = Arc::clone(self);
        let activation = self.lifecycle.activate(Arc::new(ctx.to_string()), (), move || {
            handshake(Arc::clone(&this), &this.connector, &this.api)
        });
        activation.handshake
    }
}

#[test]
fn last_unmatched_set_wins_across_threads() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 200;

    let slot = Arc::new(DependencySlot::<usize>::new("api"));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let slot = Arc::clone(&slot);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for r in 0..ROUNDS {
                    let mine = Arc::new(t * ROUNDS + r);
                    slot.set(Arc::clone(&mine));
                    // Every instance is unbound exactly once, like the host does.
                    slot.clear_if_equal(&mine);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    // Each set was followed by a matching clear from the same thread; a clear
    // only succeeds on its own instance, so nothing may survive.
    assert!(slot.get().is_none());
}

#[test]
fn last_unmatched_set_survives_concurrent_churn_and_stale_clears() {
    const THREADS: usize = 8;
    const ROUNDS: usize = 200;

    let slot = Arc::new(DependencySlot::<usize>::new("api"));
    let barrier = Arc::new(Barrier::new(THREADS));

    // Each thread churns its own instances, then leaves its last one bound.
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let slot = Arc::clone(&slot);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut retired = Vec::with_capacity(ROUNDS);
                for r in 0..ROUNDS {
                    let mine = Arc::new(t * (ROUNDS + 1) + r);
                    slot.set(Arc::clone(&mine));
                    slot.clear_if_equal(&mine);
                    retired.push(mine);
                }
                let last = Arc::new(t * (ROUNDS + 1) + ROUNDS);
                slot.set(Arc::clone(&last));
                (last, retired)
            })
        })
        .collect();

    let finished: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let survivor = slot.get().expect("one final set must survive");
    assert!(finished
        .iter()
        .any(|(last, _)| Arc::ptr_eq(last, &survivor)));

    // Late unbinds of everything else race each other and must all miss.
    let barrier = Arc::new(Barrier::new(THREADS));
    let stale: Vec<_> = finished
        .into_iter()
        .map(|(last, retired)| {
            let slot = Arc::clone(&slot);
            let barrier = Arc::clone(&barrier);
            let survivor = Arc::clone(&survivor);
            thread::spawn(move || {
                barrier.wait();
                let mut cleared = 0;
                for old in &retired {
                    if slot.clear_if_equal(old) {
                        cleared += 1;
                    }
                }
                if !Arc::ptr_eq(&last, &survivor) && slot.clear_if_equal(&last) {
                    cleared += 1;
                }
                cleared
            })
        })
        .collect();

    for h in stale {
        assert_eq!(h.join().unwrap(), 0);
    }
    assert!(Arc::ptr_eq(&slot.get().unwrap(), &survivor));

    assert!(slot.clear_if_equal(&survivor));
    assert!(slot.get().is_none());
}

#[test]
fn stale_unbinds_never_change_state() {
    let slot = DependencySlot::new("api");
    let stale: Vec<Arc<u32>> = (0..16).map(Arc::new).collect();
    let current = Arc::new(99u32);

    for s in &stale {
        slot.set(Arc::clone(s));
    }
    slot.set(Arc::clone(&current));

    for s in stale.iter().rev() {
        assert!(!slot.clear_if_equal(s));
        assert!(Arc::ptr_eq(&slot.get().unwrap(), &current));
    }
}

#[test]
fn handshake_scenario_bind_activate_unbind_reactivate() {
    let component = Component::new();
    let a = Arc::new(Registrar::default());
    let b = Arc::new(Api("b"));

    component.connector.set(Arc::clone(&a));
    component.api.set(Arc::clone(&b));

    let outcome = component.activate("host").unwrap();
    assert_eq!(outcome, Handshake::Registered { secondary_bound: true });
    assert_eq!(*a.seen.lock().unwrap(), vec![Some("b")]);

    let c = Arc::new(Registrar::default());
    assert!(!component.connector.clear_if_equal(&c));
    assert!(Arc::ptr_eq(&component.connector.get().unwrap(), &a));

    assert!(component.connector.clear_if_equal(&a));
    assert!(component.connector.get().is_none());

    assert_eq!(component.lifecycle.deactivate(), Some(State::Active));
    assert_eq!(component.lifecycle.state(), State::Inactive);

    let outcome = component.activate("host").unwrap();
    assert_eq!(outcome, Handshake::Skipped { missing: "connector" });
    assert_eq!(a.seen.lock().unwrap().len(), 1);
    assert!(c.seen.lock().unwrap().is_empty());
}

#[test]
fn unbind_after_activation_keeps_component_active() {
    let component = Component::new();
    let a = Arc::new(Registrar::default());
    component.connector.set(Arc::clone(&a));

    component.activate("host").unwrap();
    assert!(component.connector.clear_if_equal(&a));

    assert!(component.lifecycle.is_active());
    assert_eq!(a.seen.lock().unwrap().len(), 1);
}
