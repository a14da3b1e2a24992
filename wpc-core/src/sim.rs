use crate::bits::Word;
use crate::circuit::{PortCollection, PortID};
use crate::components::Component;

/// Drives a design cycle by cycle while recording a set of watched ports.
///
/// The design is built by the caller against the tracer's port collection,
/// so wiring happens exactly as it would by hand:
///
/// ```
/// use wpc_core::components::Counter;
/// use wpc_core::sim::Tracer;
///
/// let mut tracer = Tracer::new(|ports| Counter::new(ports, 4, String::from("ctr")));
/// let out = tracer.design().output_port;
/// tracer.watch(out);
/// tracer.run(3);
/// assert_eq!(tracer.peek(out), 3);
/// ```
pub struct Tracer<D: Component> {
    port_collection: PortCollection,
    design: D,

    watched: Vec<PortID>,
    history: Vec<Vec<Word>>,
    cycle: u64,
}

impl<D: Component> Tracer<D> {
    pub fn new(build_design: impl FnOnce(&mut PortCollection) -> D) -> Self {
        let mut port_collection = PortCollection::new();
        let design = build_design(&mut port_collection);

        Self {
            port_collection,
            design,
            watched: Vec::new(),
            history: Vec::new(),
            cycle: 0,
        }
    }

    /// Adds a port to the set sampled after every cycle.
    pub fn watch(&mut self, port: PortID) {
        self.watched.push(port);
    }

    /// Processes a single clock cycle and samples the watched ports.
    pub fn tick(&mut self) {
        self.design.process_cycle(&mut self.port_collection);
        self.cycle += 1;

        if !self.watched.is_empty() {
            let sample = self
                .watched
                .iter()
                .map(|port| self.port_collection.get_port_data(*port))
                .collect();
            self.history.push(sample);
        }
    }

    pub fn run(&mut self, cycles: u32) {
        for _ in 0..cycles {
            self.tick();
        }
    }

    /// Runs until the predicate holds, up to a cycle timeout. Returns whether
    /// the predicate was reached in time.
    pub fn run_until(
        &mut self,
        mut done: impl FnMut(&PortCollection) -> bool,
        timeout: u32,
    ) -> bool {
        let mut remaining = timeout;

        while !done(&self.port_collection) {
            if remaining == 0 {
                return false;
            }
            remaining -= 1;

            self.tick();
        }

        true
    }

    pub fn peek(&self, port: PortID) -> Word {
        self.port_collection.get_port_data(port)
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn design(&self) -> &D {
        &self.design
    }

    pub fn design_mut(&mut self) -> &mut D {
        &mut self.design
    }

    pub fn port_collection(&self) -> &PortCollection {
        &self.port_collection
    }

    pub fn port_collection_mut(&mut self) -> &mut PortCollection {
        &mut self.port_collection
    }

    /// Samples recorded so far, one row per cycle, one column per watched
    /// port in watch order.
    pub fn history(&self) -> &[Vec<Word>] {
        &self.history
    }
}

#[test]
fn test_tracer_records_watched_ports() {
    use crate::components::Counter;

    let mut tracer = Tracer::new(|ports| Counter::new(ports, 3, String::from("ctr")));
    let out = tracer.design().output_port;
    tracer.watch(out);

    tracer.run(4);

    assert_eq!(tracer.cycle(), 4);
    assert_eq!(tracer.peek(out), 4);
    assert_eq!(
        tracer.history(),
        &[vec![1], vec![2], vec![3], vec![4]]
    );
}

#[test]
fn test_tracer_run_until_timeout() {
    use crate::components::Counter;

    let mut tracer = Tracer::new(|ports| Counter::new(ports, 4, String::from("ctr")));
    let out = tracer.design().output_port;

    // Reachable target
    assert!(tracer.run_until(|ports| ports.get_port_data(out) == 5, 10));
    assert_eq!(tracer.peek(out), 5);

    // A 4-bit counter never reaches 16
    assert!(!tracer.run_until(|ports| ports.get_port_data(out) == 16, 100));
}
