/// Callback notified synchronously after any state change.
///
/// Listeners receive no payload; they re-read engine state through its
/// accessors.
pub trait SimulationObserver {
    fn on_simulation_updated(&self);
}

/// Handle returned by `add_observer`, used for removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Listener registry with synchronous, registration-order multicast.
#[derive(Default)]
pub(crate) struct ObserverHub {
    observers: Vec<(ObserverId, Box<dyn SimulationObserver>)>,
    next_id: u64,
}

impl ObserverHub {
    pub fn add(&mut self, observer: Box<dyn SimulationObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false if no observer with the given handle is registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn notify_all(&self) {
        for (_, observer) in &self.observers {
            observer.on_simulation_updated();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl SimulationObserver for Recorder {
        fn on_simulation_updated(&self) {
            self.log.borrow_mut().push(self.label);
        }
    }

    #[test]
    fn notifies_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = ObserverHub::default();
        hub.add(Box::new(Recorder {
            label: "first",
            log: Rc::clone(&log),
        }));
        hub.add(Box::new(Recorder {
            label: "second",
            log: Rc::clone(&log),
        }));

        hub.notify_all();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn removal_by_handle() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = ObserverHub::default();
        let first = hub.add(Box::new(Recorder {
            label: "first",
            log: Rc::clone(&log),
        }));
        hub.add(Box::new(Recorder {
            label: "second",
            log: Rc::clone(&log),
        }));

        assert!(hub.remove(first));
        assert!(!hub.remove(first));

        hub.notify_all();
        assert_eq!(*log.borrow(), vec!["second"]);
    }
}
