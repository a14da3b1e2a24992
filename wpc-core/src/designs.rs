use crate::bits::{lut_input, Word};
use crate::circuit::{expect_width, PortCollection, PortID, PORT_NULL_ID};
use crate::components::*;

/*
Population counter
 */

/// One compressor instance inside a reduction stage.
pub enum Compressor {
    Two(HalfAdder),
    Three(FullAdder),
}

impl Component for Compressor {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        match self {
            Compressor::Two(half_adder) => half_adder.process_cycle(port_collection),
            Compressor::Three(full_adder) => full_adder.process_cycle(port_collection),
        }
    }
}

/// Carry-save population counter over single-wire inputs.
///
/// The constructor lays out the same reduction network the functional core
/// computes: compressors are instantiated column by column, stage by stage,
/// until every weight column is down to one wire. Creation order doubles as
/// topological order, so a single `process_cycle` settles the whole network.
pub struct PopCounter {
    /// Compressors in evaluation order (stage by stage, low weight first).
    compressors: Vec<Compressor>,

    /// Settled weight columns, lowest weight first. A structurally empty
    /// column maps to the NULL port and reads as 0.
    output_ports: Vec<PortID>,

    /// Number of reduction stages the network needed.
    num_stages: usize,

    pub name: String,
}

impl PopCounter {
    pub fn new(port_collection: &mut PortCollection, inputs: &[PortID], name: String) -> Self {
        for input in inputs {
            expect_width(port_collection, *input, 1);
        }

        let mut compressors = Vec::new();
        let mut columns: Vec<Vec<PortID>> = vec![inputs.to_vec()];

        let mut num_stages = 0;
        while columns.iter().any(|column| column.len() > 1) {
            columns = Self::build_stage(
                port_collection,
                &mut compressors,
                &columns,
                num_stages,
                &name,
            );
            num_stages += 1;
        }

        let output_ports = columns
            .iter()
            .map(|column| column.first().copied().unwrap_or(PORT_NULL_ID))
            .collect();

        Self {
            compressors,
            output_ports,
            num_stages,
            name,
        }
    }

    /// Instantiates the compressors for one reduction stage and returns the
    /// next stage's columns. Carries promoted out of column `i - 1` land in
    /// front of the bits staying at weight `i`; carries leaving the highest
    /// column open a new column at the top.
    fn build_stage(
        port_collection: &mut PortCollection,
        compressors: &mut Vec<Compressor>,
        columns: &[Vec<PortID>],
        stage: usize,
        name: &str,
    ) -> Vec<Vec<PortID>> {
        let mut next: Vec<Vec<PortID>> = Vec::with_capacity(columns.len() + 1);
        let mut promoted: Vec<PortID> = Vec::new();

        for (weight, column) in columns.iter().enumerate() {
            let mut ones: Vec<PortID> = Vec::new();
            let mut twos: Vec<PortID> = Vec::new();

            let mut rest: &[PortID] = column;
            while !rest.is_empty() {
                let group = format!("{}_s{}_w{}_c{}", name, stage, weight, ones.len());

                match rest {
                    [a, b, c, ..] => {
                        let full_adder = FullAdder::new(port_collection, *a, *b, *c, group);
                        ones.push(full_adder.output_sum);
                        twos.push(full_adder.output_carry);
                        compressors.push(Compressor::Three(full_adder));
                        rest = &rest[3..];
                    }
                    [a, b] => {
                        let half_adder = HalfAdder::new(port_collection, *a, *b, group);
                        ones.push(half_adder.output_sum);
                        twos.push(half_adder.output_carry);
                        compressors.push(Compressor::Two(half_adder));
                        rest = &rest[2..];
                    }
                    [a] => {
                        // Lone wire passes through to the next stage untouched
                        ones.push(*a);
                        rest = &rest[1..];
                    }
                    [] => unreachable!(),
                }
            }

            let mut merged = promoted;
            merged.extend(ones);
            next.push(merged);

            promoted = twos;
        }

        if !promoted.is_empty() {
            next.push(promoted);
        }

        next
    }

    /// Output wires, least-significant weight first.
    pub fn output_ports(&self) -> &[PortID] {
        &self.output_ports
    }

    /// Reads the settled columns as a binary count.
    pub fn count(&self, port_collection: &PortCollection) -> Word {
        let mut count: Word = 0;
        for (weight, port) in self.output_ports.iter().enumerate() {
            count |= (port_collection.get_port_data(*port) & 1) << weight;
        }

        count
    }

    pub fn num_compressors(&self) -> usize {
        self.compressors.len()
    }

    pub fn num_stages(&self) -> usize {
        self.num_stages
    }

    pub fn print_state(&self, port_collection: &PortCollection) {
        println!(
            "PopCounter '{}': {} compressors over {} stages, count: {}",
            self.name,
            self.compressors.len(),
            self.num_stages,
            self.count(port_collection)
        );
    }
}

impl Component for PopCounter {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        for compressor in self.compressors.iter_mut() {
            compressor.process_cycle(port_collection);
        }
    }
}

/*
Sequential building blocks
 */

/// Toggle flip-flop: flips its state on every cycle in which the toggle
/// input is high.
pub struct Tff {
    /// XOR of the toggle input and the current state
    lut: Lut<2>,

    /// State register
    ff: Register,

    pub output_port: PortID,
    pub name: String,
}

impl Tff {
    pub fn new(port_collection: &mut PortCollection, toggle_input: PortID, name: String) -> Self {
        expect_width(port_collection, toggle_input, 1);

        let mut ff = Register::new(port_collection, 1, PORT_NULL_ID, format!("{}_ff", name));
        let lut = Lut::<2>::new(
            port_collection,
            &[toggle_input, ff.output_port],
            lut_input::I0 ^ lut_input::I1,
            format!("{}_xor", name),
        );

        // Close the feedback loop
        ff.input = lut.output_port;

        let output_port = ff.output_port;

        Self {
            lut,
            ff,
            output_port,
            name,
        }
    }
}

impl Component for Tff {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        // Next state from the current toggle and state, then latch it
        self.lut.process_cycle(port_collection);
        self.ff.process_cycle(port_collection);
    }
}

/// Serial-in shift register built from a chain of clock-enabled registers.
///
/// Every tap is exposed for parallel read-out; the serial output is the last
/// tap in the chain.
pub struct ShiftRegister {
    /// Chain of registers; index 0 receives the serial input
    stages: Vec<GuardedRegister>,

    pub output_ports: Vec<PortID>,
    pub serial_output_port: PortID,
    pub name: String,
}

impl ShiftRegister {
    pub fn new(
        port_collection: &mut PortCollection,
        length: usize,
        serial_input: PortID,
        enable_input: PortID,
        name: String,
    ) -> Self {
        assert!(length >= 1, "Zero-length shift register: '{}'", name);
        expect_width(port_collection, serial_input, 1);

        let mut stages = Vec::with_capacity(length);
        let mut previous = serial_input;

        for i in 0..length {
            let stage = GuardedRegister::new(
                port_collection,
                1,
                previous,
                enable_input,
                format!("{}_ff{}", name, i),
            );
            previous = stage.output_port;
            stages.push(stage);
        }

        let output_ports: Vec<PortID> = stages.iter().map(|stage| stage.output_port).collect();
        let serial_output_port = previous;

        Self {
            stages,
            output_ports,
            serial_output_port,
            name,
        }
    }

    /// Reads the taps as a word, with the first stage at the lowest weight.
    pub fn parallel_output(&self, port_collection: &PortCollection) -> Word {
        let mut value: Word = 0;
        for (i, port) in self.output_ports.iter().enumerate() {
            value |= (port_collection.get_port_data(*port) & 1) << i;
        }

        value
    }
}

impl Component for ShiftRegister {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        // Latch back to front so every stage still sees its neighbor's
        // previous value
        for stage in self.stages.iter_mut().rev() {
            stage.process_cycle(port_collection);
        }
    }
}

/*
Signal generators
 */

/// Counter width shared by the signal generators.
pub const WAVE_COUNTER_WIDTH: usize = 32;

/// First counter bit the generators tap; the low bits only serve to divide
/// the clock down to a visible rate.
pub const WAVE_PRESCALE_BITS: usize = 8;

/// Sample width of the generated waveforms.
pub const WAVE_WIDTH: usize = 8;

/// Square wave tapped from a single counter bit.
pub struct SquareWave {
    counter: Counter,
    tap: BitSelectionRegister<9, 1>,

    pub output_port: PortID,
    pub name: String,
}

impl SquareWave {
    pub fn new(port_collection: &mut PortCollection, name: String) -> Self {
        let counter = Counter::new(
            port_collection,
            WAVE_COUNTER_WIDTH,
            format!("{}_ctr", name),
        );
        let tap = BitSelectionRegister::<9, 1>::new(
            port_collection,
            counter.output_port,
            format!("{}_tap", name),
        );

        let output_port = tap.output_port;

        Self {
            counter,
            tap,
            output_port,
            name,
        }
    }
}

impl Component for SquareWave {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        self.counter.process_cycle(port_collection);
        self.tap.process_cycle(port_collection);
    }
}

/// Sawtooth wave: a byte-wide slice of a free-running counter.
pub struct SawtoothWave {
    counter: Counter,
    slice: BitSelectionRegister<8, 8>,

    pub output_port: PortID,
    pub name: String,
}

impl SawtoothWave {
    pub fn new(port_collection: &mut PortCollection, name: String) -> Self {
        let counter = Counter::new(
            port_collection,
            WAVE_COUNTER_WIDTH,
            format!("{}_ctr", name),
        );
        let slice = BitSelectionRegister::<8, 8>::new(
            port_collection,
            counter.output_port,
            format!("{}_saw", name),
        );

        let output_port = slice.output_port;

        Self {
            counter,
            slice,
            output_port,
            name,
        }
    }
}

impl Component for SawtoothWave {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        self.counter.process_cycle(port_collection);
        self.slice.process_cycle(port_collection);
    }
}

/// Triangle wave: the sawtooth slice, inverted on its falling half. The
/// slice's top bit selects between the raw and the complemented ramp.
pub struct TriangleWave {
    counter: Counter,
    slice: BitSelectionRegister<8, 8>,
    msb_tap: BitSelectionRegister<15, 1>,
    inverter: Inverter,
    mux: Mux<2>,

    pub output_port: PortID,
    pub name: String,
}

impl TriangleWave {
    pub fn new(port_collection: &mut PortCollection, name: String) -> Self {
        let counter = Counter::new(
            port_collection,
            WAVE_COUNTER_WIDTH,
            format!("{}_ctr", name),
        );
        let slice = BitSelectionRegister::<8, 8>::new(
            port_collection,
            counter.output_port,
            format!("{}_saw", name),
        );
        let msb_tap = BitSelectionRegister::<15, 1>::new(
            port_collection,
            counter.output_port,
            format!("{}_msb", name),
        );
        let inverter = Inverter::new(
            port_collection,
            WAVE_WIDTH,
            slice.output_port,
            format!("{}_inv", name),
        );
        let mux = Mux::<2>::new(
            port_collection,
            WAVE_WIDTH,
            &[slice.output_port, inverter.output_port],
            msb_tap.output_port,
            format!("{}_mux", name),
        );

        let output_port = mux.output_port;

        Self {
            counter,
            slice,
            msb_tap,
            inverter,
            mux,
            output_port,
            name,
        }
    }
}

impl Component for TriangleWave {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        self.counter.process_cycle(port_collection);
        self.slice.process_cycle(port_collection);
        self.msb_tap.process_cycle(port_collection);
        self.inverter.process_cycle(port_collection);
        self.mux.process_cycle(port_collection);
    }
}

/// Pulse-width modulator: high while the sawtooth ramp is at or below the
/// duty threshold.
pub struct PwmWave {
    counter: Counter,
    slice: BitSelectionRegister<8, 8>,
    duty: ConstantRegister,
    comparator: Comparator,

    /// OR of the comparator flags: ramp <= duty
    le_lut: Lut<2>,

    pub output_port: PortID,
    pub name: String,
}

impl PwmWave {
    pub fn new(port_collection: &mut PortCollection, duty: Word, name: String) -> Self {
        let counter = Counter::new(
            port_collection,
            WAVE_COUNTER_WIDTH,
            format!("{}_ctr", name),
        );
        let slice = BitSelectionRegister::<8, 8>::new(
            port_collection,
            counter.output_port,
            format!("{}_saw", name),
        );
        let duty_reg = ConstantRegister::new(
            port_collection,
            WAVE_WIDTH,
            duty,
            format!("{}_duty", name),
        );
        let comparator = Comparator::new(
            port_collection,
            slice.output_port,
            duty_reg.output_port,
            format!("{}_cmp", name),
        );
        let le_lut = Lut::<2>::new(
            port_collection,
            &[comparator.out_eq, comparator.out_lt],
            lut_input::I0 | lut_input::I1,
            format!("{}_le", name),
        );

        let output_port = le_lut.output_port;

        Self {
            counter,
            slice,
            duty: duty_reg,
            comparator,
            le_lut,
            output_port,
            name,
        }
    }
}

impl Component for PwmWave {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        self.counter.process_cycle(port_collection);
        self.slice.process_cycle(port_collection);
        self.duty.process_cycle(port_collection);
        self.comparator.process_cycle(port_collection);
        self.le_lut.process_cycle(port_collection);
    }
}

/// First-order delta-sigma modulator: a phase accumulator whose carry-out
/// pulses with density `delta / 2^width`.
pub struct DeltaSigmaWave {
    delta: ConstantRegister,
    accumulator: Register,
    adder: Adder,

    pub output_port: PortID,
    pub name: String,
}

/// Accumulator width of the delta-sigma modulator.
pub const DELTA_SIGMA_WIDTH: usize = 16;

impl DeltaSigmaWave {
    pub fn new(port_collection: &mut PortCollection, delta: Word, name: String) -> Self {
        let delta_reg = ConstantRegister::new(
            port_collection,
            DELTA_SIGMA_WIDTH,
            delta,
            format!("{}_delta", name),
        );
        let mut accumulator = Register::new(
            port_collection,
            DELTA_SIGMA_WIDTH,
            PORT_NULL_ID,
            format!("{}_acc", name),
        );
        let adder = Adder::new(
            port_collection,
            DELTA_SIGMA_WIDTH,
            accumulator.output_port,
            delta_reg.output_port,
            format!("{}_add", name),
        );

        // Close the accumulator loop
        accumulator.input = adder.output_port;

        let output_port = adder.output_carry;

        Self {
            delta: delta_reg,
            accumulator,
            adder,
            output_port,
            name,
        }
    }
}

impl Component for DeltaSigmaWave {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        self.delta.process_cycle(port_collection);
        self.accumulator.process_cycle(port_collection);
        self.adder.process_cycle(port_collection);
    }
}

/// Number of entries in the DDS sine table.
const DDS_TABLE_LEN: usize = 16;

/// Direct digital synthesis of a sine wave: a 4-bit phase slice of the
/// counter addresses a 16-entry sine table, stored as one 4-input LUT per
/// output bit.
pub struct DdsWave {
    counter: Counter,
    phase_bit_0: BitSelectionRegister<8, 1>,
    phase_bit_1: BitSelectionRegister<9, 1>,
    phase_bit_2: BitSelectionRegister<10, 1>,
    phase_bit_3: BitSelectionRegister<11, 1>,
    roms: Vec<Lut<4>>,
    merger: BitMerger<8>,

    pub output_port: PortID,
    pub name: String,
}

/// Sine sample for one table entry, offset into unsigned byte range.
fn dds_sample(index: usize) -> Word {
    let phase = 2.0 * std::f64::consts::PI * (index as f64) / (DDS_TABLE_LEN as f64);
    (128.0 + 127.0 * phase.sin()) as Word
}

impl DdsWave {
    pub fn new(port_collection: &mut PortCollection, name: String) -> Self {
        let counter = Counter::new(
            port_collection,
            WAVE_COUNTER_WIDTH,
            format!("{}_ctr", name),
        );

        let phase_bit_0 = BitSelectionRegister::<8, 1>::new(
            port_collection,
            counter.output_port,
            format!("{}_ph0", name),
        );
        let phase_bit_1 = BitSelectionRegister::<9, 1>::new(
            port_collection,
            counter.output_port,
            format!("{}_ph1", name),
        );
        let phase_bit_2 = BitSelectionRegister::<10, 1>::new(
            port_collection,
            counter.output_port,
            format!("{}_ph2", name),
        );
        let phase_bit_3 = BitSelectionRegister::<11, 1>::new(
            port_collection,
            counter.output_port,
            format!("{}_ph3", name),
        );

        let phase_inputs = [
            phase_bit_0.output_port,
            phase_bit_1.output_port,
            phase_bit_2.output_port,
            phase_bit_3.output_port,
        ];

        // One truth table per output bit: entry i of table y is bit y of the
        // i-th sine sample
        let mut tables = [0 as Word; WAVE_WIDTH];
        for i in 0..DDS_TABLE_LEN {
            let sample = dds_sample(i);
            for (y, table) in tables.iter_mut().enumerate() {
                *table |= ((sample >> y) & 1) << i;
            }
        }

        let roms: Vec<Lut<4>> = tables
            .iter()
            .enumerate()
            .map(|(y, table)| {
                Lut::<4>::new(
                    port_collection,
                    &phase_inputs,
                    *table,
                    format!("{}_rom{}", name, y),
                )
            })
            .collect();

        let rom_outputs = [
            roms[0].output_port,
            roms[1].output_port,
            roms[2].output_port,
            roms[3].output_port,
            roms[4].output_port,
            roms[5].output_port,
            roms[6].output_port,
            roms[7].output_port,
        ];
        let merger = BitMerger::<8>::new(port_collection, &rom_outputs, format!("{}_join", name));

        let output_port = merger.output_port;

        Self {
            counter,
            phase_bit_0,
            phase_bit_1,
            phase_bit_2,
            phase_bit_3,
            roms,
            merger,
            output_port,
            name,
        }
    }
}

impl Component for DdsWave {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        self.counter.process_cycle(port_collection);
        self.phase_bit_0.process_cycle(port_collection);
        self.phase_bit_1.process_cycle(port_collection);
        self.phase_bit_2.process_cycle(port_collection);
        self.phase_bit_3.process_cycle(port_collection);
        for rom in self.roms.iter_mut() {
            rom.process_cycle(port_collection);
        }
        self.merger.process_cycle(port_collection);
    }
}

/*
Tests
 */

#[test]
/// A population counter over constant wires must track changes to those
/// constants across cycles.
fn test_pop_counter_reacts_to_inputs() {
    let mut port_collection = PortCollection::new();

    let mut regs: Vec<ConstantRegister> = (0..3)
        .map(|i| ConstantRegister::new(&mut port_collection, 1, 1, format!("in_{}", i)))
        .collect();
    let input_ports: Vec<PortID> = regs.iter().map(|reg| reg.output_port).collect();

    let mut pop = PopCounter::new(&mut port_collection, &input_ports, String::from("pop"));

    for reg in regs.iter_mut() {
        reg.process_cycle(&mut port_collection);
    }
    pop.process_cycle(&mut port_collection);

    {
        assert_eq!(pop.count(&port_collection), 3);
        assert_eq!(pop.output_ports().len(), 2);
    }

    regs[1].constant_value = 0;
    regs[2].constant_value = 0;

    for reg in regs.iter_mut() {
        reg.process_cycle(&mut port_collection);
    }
    pop.process_cycle(&mut port_collection);

    {
        assert_eq!(pop.count(&port_collection), 1);
    }
}

#[test]
/// A single wire needs no compressors at all.
fn test_pop_counter_single_wire() {
    let mut port_collection = PortCollection::new();

    let mut reg = ConstantRegister::new(&mut port_collection, 1, 1, String::from("in"));
    let mut pop = PopCounter::new(
        &mut port_collection,
        &[reg.output_port],
        String::from("pop"),
    );

    reg.process_cycle(&mut port_collection);
    pop.process_cycle(&mut port_collection);

    assert_eq!(pop.num_compressors(), 0);
    assert_eq!(pop.num_stages(), 0);
    assert_eq!(pop.count(&port_collection), 1);
}

#[test]
/// With the toggle input held high the flip-flop output alternates every
/// cycle after the initial settle.
fn test_tff_toggles() {
    let mut port_collection = PortCollection::new();

    let mut toggle = ConstantRegister::new(&mut port_collection, 1, 1, String::from("t"));
    let mut tff = Tff::new(&mut port_collection, toggle.output_port, String::from("tff"));

    toggle.process_cycle(&mut port_collection);

    let mut trace = Vec::new();
    for _ in 0..6 {
        tff.process_cycle(&mut port_collection);
        trace.push(port_collection.get_port_data(tff.output_port));
    }

    assert_eq!(trace, vec![1, 0, 1, 0, 1, 0]);

    // With the toggle low the state must freeze
    toggle.constant_value = 0;
    toggle.process_cycle(&mut port_collection);

    let frozen = port_collection.get_port_data(tff.output_port);
    for _ in 0..3 {
        tff.process_cycle(&mut port_collection);
        assert_eq!(port_collection.get_port_data(tff.output_port), frozen);
    }
}

#[test]
/// Serial data must march through the chain one stage per cycle, and freeze
/// when the enable line drops.
fn test_shift_register() {
    let mut port_collection = PortCollection::new();

    let mut serial = ConstantRegister::new(&mut port_collection, 1, 1, String::from("si"));
    let mut enable = ConstantRegister::new(&mut port_collection, 1, 1, String::from("ce"));

    let mut sipo = ShiftRegister::new(
        &mut port_collection,
        3,
        serial.output_port,
        enable.output_port,
        String::from("sipo"),
    );

    serial.process_cycle(&mut port_collection);
    enable.process_cycle(&mut port_collection);

    let expected: [Word; 3] = [0b_001, 0b_011, 0b_111];
    for value in expected {
        sipo.process_cycle(&mut port_collection);
        assert_eq!(sipo.parallel_output(&port_collection), value);
    }

    assert_eq!(port_collection.get_port_data(sipo.serial_output_port), 1);

    // Drop the enable line; the chain must hold its contents
    enable.constant_value = 0;
    serial.constant_value = 0;
    enable.process_cycle(&mut port_collection);
    serial.process_cycle(&mut port_collection);

    sipo.process_cycle(&mut port_collection);
    assert_eq!(sipo.parallel_output(&port_collection), 0b_111);
}

#[test]
/// The square output is counter bit 9: low for the first 512 cycles, then
/// high for the next 512.
fn test_square_wave_period() {
    let mut port_collection = PortCollection::new();

    let mut square = SquareWave::new(&mut port_collection, String::from("sq"));

    for _ in 0..511 {
        square.process_cycle(&mut port_collection);
        assert_eq!(port_collection.get_port_data(square.output_port), 0);
    }

    square.process_cycle(&mut port_collection);
    assert_eq!(port_collection.get_port_data(square.output_port), 1);

    for _ in 0..512 {
        square.process_cycle(&mut port_collection);
    }
    assert_eq!(port_collection.get_port_data(square.output_port), 0);
}

#[test]
/// The sawtooth ramp advances once every 256 cycles.
fn test_sawtooth_ramp() {
    let mut port_collection = PortCollection::new();

    let mut saw = SawtoothWave::new(&mut port_collection, String::from("saw"));

    for _ in 0..768 {
        saw.process_cycle(&mut port_collection);
    }

    assert_eq!(port_collection.get_port_data(saw.output_port), 3);
}

#[test]
/// On the falling half of its period the triangle output is the complement
/// of the ramp.
fn test_triangle_folds() {
    let mut port_collection = PortCollection::new();

    let mut tri = TriangleWave::new(&mut port_collection, String::from("tri"));

    // Rising half: counter 0x100 -> ramp 0x01, top bit low
    port_collection.set_port_data(tri.counter.output_port, 0x00FF);
    tri.process_cycle(&mut port_collection);
    assert_eq!(port_collection.get_port_data(tri.output_port), 0x01);

    // Falling half: counter 0x8000 -> ramp 0x80, top bit high
    port_collection.set_port_data(tri.counter.output_port, 0x7FFF);
    tri.process_cycle(&mut port_collection);
    assert_eq!(port_collection.get_port_data(tri.output_port), 0x7F);
}

#[test]
/// A duty threshold of 64 keeps the output high for 65 of every 256 ramp
/// steps.
fn test_pwm_duty_cycle() {
    let mut port_collection = PortCollection::new();

    let mut pwm = PwmWave::new(&mut port_collection, 64, String::from("pwm"));

    let mut high_cycles: u32 = 0;
    for _ in 0..65536 {
        pwm.process_cycle(&mut port_collection);
        high_cycles += port_collection.get_port_data(pwm.output_port);
    }

    assert_eq!(high_cycles, 65 * 256);
}

#[test]
/// The carry-out density of the modulator equals delta / 2^width.
fn test_delta_sigma_density() {
    let mut port_collection = PortCollection::new();

    let mut dsm = DeltaSigmaWave::new(&mut port_collection, 0x4000, String::from("dsm"));

    let mut pulses: u32 = 0;
    for _ in 0..64 {
        dsm.process_cycle(&mut port_collection);
        pulses += port_collection.get_port_data(dsm.output_port);
    }

    // 0x4000 / 0x10000 = 1/4
    assert_eq!(pulses, 16);
}

#[test]
/// Every phase step must reproduce its sine table entry.
fn test_dds_matches_sine_table() {
    let mut port_collection = PortCollection::new();

    let mut dds = DdsWave::new(&mut port_collection, String::from("dds"));

    for phase in 0..DDS_TABLE_LEN {
        let target = (phase as Word) << WAVE_PRESCALE_BITS;
        port_collection.set_port_data(dds.counter.output_port, target.wrapping_sub(1));

        dds.process_cycle(&mut port_collection);

        assert_eq!(
            port_collection.get_port_data(dds.output_port),
            dds_sample(phase),
            "wrong sample for phase {}",
            phase
        );
    }
}
