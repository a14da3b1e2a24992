use crate::bits::{lut_table_len, width_mask, Word};
use crate::circuit::{expect_width, PortCollection, PortID, PORT_DEFAULT_VALUE};

/*
Traits
 */

pub trait Component {
    fn process_cycle(&mut self, port_collection: &mut PortCollection);
}

/*
Registers
 */

/// Standard register that stores its current input every clock cycle.
pub struct Register {
    pub input: PortID,
    pub output_port: PortID,

    pub name: String,
}

/// Register that only commits its input when an enable signal is given.
pub struct GuardedRegister {
    pub input_enable: PortID,
    pub input: PortID,
    pub output_port: PortID,

    pub name: String,
}

/// Register outputting a constant value.
pub struct ConstantRegister {
    pub constant_value: Word,
    pub output_port: PortID,

    pub name: String,
}

/// Selects a contiguous subset of bits from its input and outputs these bits
/// shifted down to weight zero.
///
/// Used to emulate connections that tap a slice of a wider bundle rather
/// than the whole thing, like the high byte of a counter.
pub struct BitSelectionRegister<const START_BIT: usize, const LEN: usize> {
    pub input: PortID,
    pub output_port: PortID,

    pub name: String,
}

impl Component for Register {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let input_value = port_collection.get_port_data(self.input);
        port_collection.set_port_data(self.output_port, input_value);
    }
}

impl Component for GuardedRegister {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        if port_collection.get_port_data(self.input_enable) != 0 {
            let input_value = port_collection.get_port_data(self.input);
            port_collection.set_port_data(self.output_port, input_value);
        }
    }
}

impl Component for ConstantRegister {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        port_collection.set_port_data(self.output_port, self.constant_value);
    }
}

impl<const START_BIT: usize, const LEN: usize> Component for BitSelectionRegister<START_BIT, LEN> {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let input_value = port_collection.get_port_data(self.input);
        let output = (input_value & Self::BIT_MASK) >> START_BIT;

        port_collection.set_port_data(self.output_port, output);
    }
}

impl Register {
    pub fn new(
        port_collection: &mut PortCollection,
        width: usize,
        input_port: PortID,
        name: String,
    ) -> Self {
        Self::new_with_initial(port_collection, width, input_port, PORT_DEFAULT_VALUE, name)
    }

    pub fn new_with_initial(
        port_collection: &mut PortCollection,
        width: usize,
        input_port: PortID,
        initial: Word,
        name: String,
    ) -> Self {
        let output_port_id = port_collection.register_port(width, initial, name.clone() + ".out");

        Self {
            input: input_port,
            output_port: output_port_id,
            name,
        }
    }

    pub fn print_state(&self, port_collection: &PortCollection) {
        let input_value = port_collection.get_port_data(self.input);
        let output_value = port_collection.get_port_data(self.output_port);

        println!(
            "Register '{}': input_value: {},  output_value: {}",
            self.name, input_value, output_value
        );
    }
}

impl GuardedRegister {
    pub fn new(
        port_collection: &mut PortCollection,
        width: usize,
        input_port: PortID,
        input_enable_port: PortID,
        name: String,
    ) -> Self {
        let output_port_id =
            port_collection.register_port(width, PORT_DEFAULT_VALUE, name.clone() + ".out");

        Self {
            input_enable: input_enable_port,
            input: input_port,
            output_port: output_port_id,
            name,
        }
    }
}

impl ConstantRegister {
    pub fn new(
        port_collection: &mut PortCollection,
        width: usize,
        value: Word,
        name: String,
    ) -> Self {
        let port_id = port_collection.register_port(width, value, name.clone() + ".out");

        Self {
            constant_value: value,
            output_port: port_id,
            name,
        }
    }
}

impl<const START_BIT: usize, const LEN: usize> BitSelectionRegister<START_BIT, LEN> {
    const BIT_MASK: Word = ((1 << LEN) - 1) << START_BIT;

    pub fn new(port_collection: &mut PortCollection, input_port: PortID, name: String) -> Self {
        let output_port_id =
            port_collection.register_port(LEN, PORT_DEFAULT_VALUE, name.clone() + ".out");

        Self {
            input: input_port,
            output_port: output_port_id,
            name,
        }
    }
}

#[test]
/// Tests a constant register, normal register, and guarded register (a, b, c)
/// in series. One extra constant register (e) drives the enable line of the
/// guarded register.
fn test_registers() {
    let mut port_collection = PortCollection::new();

    let a_value: Word = 0b_101;
    let e_value: Word = 0;

    let mut a = ConstantRegister::new(&mut port_collection, 3, a_value, String::from("a"));
    let mut b = Register::new(&mut port_collection, 3, a.output_port, String::from("b"));

    let mut e = ConstantRegister::new(&mut port_collection, 1, e_value, String::from("e"));
    let mut c = GuardedRegister::new(
        &mut port_collection,
        3,
        b.output_port,
        e.output_port,
        String::from("c"),
    );

    a.process_cycle(&mut port_collection);
    b.process_cycle(&mut port_collection);
    e.process_cycle(&mut port_collection);
    c.process_cycle(&mut port_collection);

    {
        assert_eq!(port_collection.get_port_data(a.output_port), a_value);
        assert_eq!(port_collection.get_port_data(b.output_port), a_value);

        // Enable is low, so the guarded register must hold its reset value
        assert_eq!(port_collection.get_port_data(c.output_port), PORT_DEFAULT_VALUE);
    }

    let e_value = 1;
    e.constant_value = e_value;

    e.process_cycle(&mut port_collection);
    c.process_cycle(&mut port_collection);

    {
        assert_eq!(port_collection.get_port_data(c.input_enable), e_value);
        assert_eq!(port_collection.get_port_data(c.output_port), a_value);
    }
}

#[test]
/// Tests whether a bit selection register correctly selects and shifts bits
/// from its input.
pub fn test_bit_selection_register() {
    let mut port_collection = PortCollection::new();

    const CONST_VALUE: Word = 0b_101101;
    const NUM_VAL_BITS: usize = 6;
    const OFFSET: usize = 5;

    let mut c = ConstantRegister::new(
        &mut port_collection,
        NUM_VAL_BITS + OFFSET,
        CONST_VALUE << OFFSET,
        String::from("c"),
    );
    let mut s = BitSelectionRegister::<OFFSET, NUM_VAL_BITS>::new(
        &mut port_collection,
        c.output_port,
        String::from("s"),
    );

    c.process_cycle(&mut port_collection);

    {
        assert_eq!(PORT_DEFAULT_VALUE, port_collection.get_port_data(s.output_port));
    }

    s.process_cycle(&mut port_collection);

    {
        assert_eq!(CONST_VALUE, port_collection.get_port_data(s.output_port));
    }
}

/*
Combinational logic
 */

/// Lookup table over `NUM_INPUTS` single-wire inputs (at most 4).
///
/// Truth-table entry k drives the output when the inputs spell out k, with
/// input 0 as the lowest bit of k. Tables are composed from the `lut_input`
/// constants, e.g. `I0 ^ I1` for a 2-input XOR.
pub struct Lut<const NUM_INPUTS: usize> {
    pub inputs: [PortID; NUM_INPUTS],
    pub table: Word,
    pub output_port: PortID,

    pub name: String,
}

/// 2:2 compressor. Reduces two bits of equal weight to a bit of the same
/// weight (sum) and a bit of the next weight (carry).
pub struct HalfAdder {
    pub input_a: PortID,
    pub input_b: PortID,
    pub output_sum: PortID,
    pub output_carry: PortID,

    pub name: String,
}

/// 3:2 compressor. Reduces three bits of equal weight to a bit of the same
/// weight (sum) and a bit of the next weight (carry).
pub struct FullAdder {
    pub input_a: PortID,
    pub input_b: PortID,
    pub input_c: PortID,
    pub output_sum: PortID,
    pub output_carry: PortID,

    pub name: String,
}

/// Bitwise complement of an n-bit input.
pub struct Inverter {
    pub input: PortID,
    pub output_port: PortID,

    pub name: String,
}

/// Unsigned comparator with single-wire equal and less-than outputs.
pub struct Comparator {
    pub input_a: PortID,
    pub input_b: PortID,
    pub out_eq: PortID,
    pub out_lt: PortID,

    pub name: String,
}

/// Joins `NUM_INPUTS` single-wire inputs into one bundle, with input 0 at
/// the lowest weight.
pub struct BitMerger<const NUM_INPUTS: usize> {
    pub inputs: [PortID; NUM_INPUTS],
    pub output_port: PortID,

    pub name: String,
}

impl<const NUM_INPUTS: usize> Component for Lut<NUM_INPUTS> {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let mut index: Word = 0;
        for (i, input) in self.inputs.iter().enumerate() {
            index |= (port_collection.get_port_data(*input) & 1) << i;
        }

        let output = (self.table >> index) & 1;
        port_collection.set_port_data(self.output_port, output);
    }
}

impl Component for HalfAdder {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let in_a = port_collection.get_port_data(self.input_a);
        let in_b = port_collection.get_port_data(self.input_b);

        port_collection.set_port_data(self.output_sum, in_a ^ in_b);
        port_collection.set_port_data(self.output_carry, in_a & in_b);
    }
}

impl Component for FullAdder {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let in_a = port_collection.get_port_data(self.input_a);
        let in_b = port_collection.get_port_data(self.input_b);
        let in_c = port_collection.get_port_data(self.input_c);

        let sum = in_a ^ in_b ^ in_c;
        let carry = (in_a & in_b) | (in_b & in_c) | (in_c & in_a);

        port_collection.set_port_data(self.output_sum, sum);
        port_collection.set_port_data(self.output_carry, carry);
    }
}

impl Component for Inverter {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let input_value = port_collection.get_port_data(self.input);

        // The output port masks the complement down to its own width
        port_collection.set_port_data(self.output_port, !input_value);
    }
}

impl Component for Comparator {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let in_a = port_collection.get_port_data(self.input_a);
        let in_b = port_collection.get_port_data(self.input_b);

        port_collection.set_port_data(self.out_eq, (in_a == in_b) as Word);
        port_collection.set_port_data(self.out_lt, (in_a < in_b) as Word);
    }
}

impl<const NUM_INPUTS: usize> Component for BitMerger<NUM_INPUTS> {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let mut output: Word = 0;
        for (i, input) in self.inputs.iter().enumerate() {
            output |= (port_collection.get_port_data(*input) & 1) << i;
        }

        port_collection.set_port_data(self.output_port, output);
    }
}

impl<const NUM_INPUTS: usize> Lut<NUM_INPUTS> {
    pub fn new(
        port_collection: &mut PortCollection,
        inputs: &[PortID; NUM_INPUTS],
        table: Word,
        name: String,
    ) -> Self {
        assert!(
            NUM_INPUTS >= 1 && NUM_INPUTS <= 4,
            "Unsupported LUT input count: {}",
            NUM_INPUTS
        );

        for input in inputs {
            expect_width(port_collection, *input, 1);
        }

        let output_port_id =
            port_collection.register_bit_port(PORT_DEFAULT_VALUE, name.clone() + ".out");

        Self {
            inputs: inputs.clone(),
            table: table & width_mask(lut_table_len(NUM_INPUTS)),
            output_port: output_port_id,
            name,
        }
    }
}

impl HalfAdder {
    pub fn new(
        port_collection: &mut PortCollection,
        input_a: PortID,
        input_b: PortID,
        name: String,
    ) -> Self {
        expect_width(port_collection, input_a, 1);
        expect_width(port_collection, input_b, 1);

        let output_sum =
            port_collection.register_bit_port(PORT_DEFAULT_VALUE, name.clone() + ".sum");
        let output_carry =
            port_collection.register_bit_port(PORT_DEFAULT_VALUE, name.clone() + ".carry");

        Self {
            input_a,
            input_b,
            output_sum,
            output_carry,
            name,
        }
    }
}

impl FullAdder {
    pub fn new(
        port_collection: &mut PortCollection,
        input_a: PortID,
        input_b: PortID,
        input_c: PortID,
        name: String,
    ) -> Self {
        expect_width(port_collection, input_a, 1);
        expect_width(port_collection, input_b, 1);
        expect_width(port_collection, input_c, 1);

        let output_sum =
            port_collection.register_bit_port(PORT_DEFAULT_VALUE, name.clone() + ".sum");
        let output_carry =
            port_collection.register_bit_port(PORT_DEFAULT_VALUE, name.clone() + ".carry");

        Self {
            input_a,
            input_b,
            input_c,
            output_sum,
            output_carry,
            name,
        }
    }
}

impl Inverter {
    pub fn new(
        port_collection: &mut PortCollection,
        width: usize,
        input: PortID,
        name: String,
    ) -> Self {
        let output_port_id =
            port_collection.register_port(width, PORT_DEFAULT_VALUE, name.clone() + ".out");

        Self {
            input,
            output_port: output_port_id,
            name,
        }
    }
}

impl Comparator {
    pub fn new(
        port_collection: &mut PortCollection,
        input_a: PortID,
        input_b: PortID,
        name: String,
    ) -> Self {
        let out_eq = port_collection.register_bit_port(PORT_DEFAULT_VALUE, name.clone() + ".eq");
        let out_lt = port_collection.register_bit_port(PORT_DEFAULT_VALUE, name.clone() + ".lt");

        Self {
            input_a,
            input_b,
            out_eq,
            out_lt,
            name,
        }
    }
}

impl<const NUM_INPUTS: usize> BitMerger<NUM_INPUTS> {
    pub fn new(
        port_collection: &mut PortCollection,
        inputs: &[PortID; NUM_INPUTS],
        name: String,
    ) -> Self {
        for input in inputs {
            expect_width(port_collection, *input, 1);
        }

        let output_port_id =
            port_collection.register_port(NUM_INPUTS, PORT_DEFAULT_VALUE, name.clone() + ".out");

        Self {
            inputs: inputs.clone(),
            output_port: output_port_id,
            name,
        }
    }
}

#[test]
/// Drives a 3-input LUT loaded with the XOR table through all input
/// combinations.
fn test_lut_xor3() {
    use crate::bits::lut_input::{I0, I1, I2};

    let mut port_collection = PortCollection::new();

    let mut reg_a = ConstantRegister::new(&mut port_collection, 1, 0, String::from("a"));
    let mut reg_b = ConstantRegister::new(&mut port_collection, 1, 0, String::from("b"));
    let mut reg_c = ConstantRegister::new(&mut port_collection, 1, 0, String::from("c"));

    let mut lut = Lut::<3>::new(
        &mut port_collection,
        &[reg_a.output_port, reg_b.output_port, reg_c.output_port],
        I0 ^ I1 ^ I2,
        String::from("xor3"),
    );

    for combination in 0..8u32 {
        reg_a.constant_value = combination & 1;
        reg_b.constant_value = (combination >> 1) & 1;
        reg_c.constant_value = (combination >> 2) & 1;

        reg_a.process_cycle(&mut port_collection);
        reg_b.process_cycle(&mut port_collection);
        reg_c.process_cycle(&mut port_collection);
        lut.process_cycle(&mut port_collection);

        let expected = combination.count_ones() as Word & 1;
        assert_eq!(port_collection.get_port_data(lut.output_port), expected);
    }
}

#[test]
/// A 4-input LUT behaves as a plain 16-entry ROM.
fn test_lut_rom4() {
    const TABLE: Word = 0x68EC;

    let mut port_collection = PortCollection::new();

    let mut regs: Vec<ConstantRegister> = (0..4)
        .map(|i| ConstantRegister::new(&mut port_collection, 1, 0, format!("in_{}", i)))
        .collect();
    let inputs = [
        regs[0].output_port,
        regs[1].output_port,
        regs[2].output_port,
        regs[3].output_port,
    ];

    let mut lut = Lut::<4>::new(&mut port_collection, &inputs, TABLE, String::from("rom4"));

    for combination in 0..16u32 {
        for (i, reg) in regs.iter_mut().enumerate() {
            reg.constant_value = (combination >> i) & 1;
            reg.process_cycle(&mut port_collection);
        }
        lut.process_cycle(&mut port_collection);

        assert_eq!(
            port_collection.get_port_data(lut.output_port),
            (TABLE >> combination) & 1
        );
    }
}

#[test]
/// Exercises all input combinations of the half adder.
fn test_half_adder() {
    let mut port_collection = PortCollection::new();

    let mut reg_a = ConstantRegister::new(&mut port_collection, 1, 0, String::from("a"));
    let mut reg_b = ConstantRegister::new(&mut port_collection, 1, 0, String::from("b"));

    let mut ha = HalfAdder::new(
        &mut port_collection,
        reg_a.output_port,
        reg_b.output_port,
        String::from("ha"),
    );

    for combination in 0..4u32 {
        reg_a.constant_value = combination & 1;
        reg_b.constant_value = (combination >> 1) & 1;

        reg_a.process_cycle(&mut port_collection);
        reg_b.process_cycle(&mut port_collection);
        ha.process_cycle(&mut port_collection);

        let total = combination.count_ones() as Word;
        assert_eq!(port_collection.get_port_data(ha.output_sum), total & 1);
        assert_eq!(port_collection.get_port_data(ha.output_carry), total >> 1);
    }
}

#[test]
/// Exercises all input combinations of the full adder. Sum and carry must
/// together encode the number of high inputs.
fn test_full_adder() {
    let mut port_collection = PortCollection::new();

    let mut reg_a = ConstantRegister::new(&mut port_collection, 1, 0, String::from("a"));
    let mut reg_b = ConstantRegister::new(&mut port_collection, 1, 0, String::from("b"));
    let mut reg_c = ConstantRegister::new(&mut port_collection, 1, 0, String::from("c"));

    let mut fa = FullAdder::new(
        &mut port_collection,
        reg_a.output_port,
        reg_b.output_port,
        reg_c.output_port,
        String::from("fa"),
    );

    for combination in 0..8u32 {
        reg_a.constant_value = combination & 1;
        reg_b.constant_value = (combination >> 1) & 1;
        reg_c.constant_value = (combination >> 2) & 1;

        reg_a.process_cycle(&mut port_collection);
        reg_b.process_cycle(&mut port_collection);
        reg_c.process_cycle(&mut port_collection);
        fa.process_cycle(&mut port_collection);

        let total = combination.count_ones() as Word;
        assert_eq!(port_collection.get_port_data(fa.output_sum), total & 1);
        assert_eq!(port_collection.get_port_data(fa.output_carry), total >> 1);
    }
}

#[test]
fn test_inverter() {
    let mut port_collection = PortCollection::new();

    let mut reg = ConstantRegister::new(&mut port_collection, 8, 0b_1010_0001, String::from("r"));
    let mut inv = Inverter::new(&mut port_collection, 8, reg.output_port, String::from("inv"));

    reg.process_cycle(&mut port_collection);
    inv.process_cycle(&mut port_collection);

    assert_eq!(port_collection.get_port_data(inv.output_port), 0b_0101_1110);
}

#[test]
fn test_comparator() {
    let mut port_collection = PortCollection::new();

    let mut reg_a = ConstantRegister::new(&mut port_collection, 8, 0, String::from("a"));
    let mut reg_b = ConstantRegister::new(&mut port_collection, 8, 0, String::from("b"));

    let mut cmp = Comparator::new(
        &mut port_collection,
        reg_a.output_port,
        reg_b.output_port,
        String::from("cmp"),
    );

    let cases: [(Word, Word, Word, Word); 3] = [
        (5, 5, 1, 0),
        (3, 9, 0, 1),
        (9, 3, 0, 0),
    ];

    for (a, b, eq, lt) in cases {
        reg_a.constant_value = a;
        reg_b.constant_value = b;

        reg_a.process_cycle(&mut port_collection);
        reg_b.process_cycle(&mut port_collection);
        cmp.process_cycle(&mut port_collection);

        assert_eq!(port_collection.get_port_data(cmp.out_eq), eq);
        assert_eq!(port_collection.get_port_data(cmp.out_lt), lt);
    }
}

#[test]
fn test_bit_merger() {
    let mut port_collection = PortCollection::new();

    let mut regs: Vec<ConstantRegister> = [1u32, 0, 1, 1]
        .iter()
        .enumerate()
        .map(|(i, v)| ConstantRegister::new(&mut port_collection, 1, *v, format!("in_{}", i)))
        .collect();
    let inputs = [
        regs[0].output_port,
        regs[1].output_port,
        regs[2].output_port,
        regs[3].output_port,
    ];

    let mut merger = BitMerger::<4>::new(&mut port_collection, &inputs, String::from("join"));

    for reg in regs.iter_mut() {
        reg.process_cycle(&mut port_collection);
    }
    merger.process_cycle(&mut port_collection);

    assert_eq!(port_collection.get_port_data(merger.output_port), 0b_1101);
    assert_eq!(port_collection.get_port_width(merger.output_port), 4);
}

/*
Functional units
 */

/// n-bit adder with a carry-out wire.
pub struct Adder {
    pub input_a: PortID,
    pub input_b: PortID,
    pub output_port: PortID,
    pub output_carry: PortID,

    pub width: usize,
    pub name: String,
}

/// Free-running n-bit counter with a carry-out wire that pulses on wrap.
pub struct Counter {
    pub output_port: PortID,
    pub output_carry: PortID,

    pub width: usize,
    pub name: String,
}

impl Component for Adder {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let in_a = port_collection.get_port_data(self.input_a) as u64;
        let in_b = port_collection.get_port_data(self.input_b) as u64;

        let sum = in_a + in_b;

        port_collection.set_port_data(self.output_port, sum as Word);
        port_collection.set_port_data(self.output_carry, (sum >> self.width) as Word & 1);
    }
}

impl Component for Counter {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let value = port_collection.get_port_data(self.output_port);
        let max = width_mask(self.width);

        port_collection.set_port_data(self.output_port, value.wrapping_add(1));
        port_collection.set_port_data(self.output_carry, (value == max) as Word);
    }
}

impl Adder {
    pub fn new(
        port_collection: &mut PortCollection,
        width: usize,
        input_a: PortID,
        input_b: PortID,
        name: String,
    ) -> Self {
        let output_port_id =
            port_collection.register_port(width, PORT_DEFAULT_VALUE, name.clone() + ".out");
        let output_carry =
            port_collection.register_bit_port(PORT_DEFAULT_VALUE, name.clone() + ".cout");

        Self {
            input_a,
            input_b,
            output_port: output_port_id,
            output_carry,
            width,
            name,
        }
    }

    pub fn print_state(&self, port_collection: &PortCollection) {
        let input_a = port_collection.get_port_data(self.input_a);
        let input_b = port_collection.get_port_data(self.input_b);
        let output_value = port_collection.get_port_data(self.output_port);
        let carry_value = port_collection.get_port_data(self.output_carry);

        println!(
            "Adder '{}': input_a: {}, input_b: {}, output_value: {}, carry: {}",
            self.name, input_a, input_b, output_value, carry_value
        );
    }
}

impl Counter {
    pub fn new(port_collection: &mut PortCollection, width: usize, name: String) -> Self {
        let output_port_id =
            port_collection.register_port(width, PORT_DEFAULT_VALUE, name.clone() + ".out");
        let output_carry =
            port_collection.register_bit_port(PORT_DEFAULT_VALUE, name.clone() + ".cout");

        Self {
            output_port: output_port_id,
            output_carry,
            width,
            name,
        }
    }

    pub fn print_state(&self, port_collection: &PortCollection) {
        let output_value = port_collection.get_port_data(self.output_port);
        let carry_value = port_collection.get_port_data(self.output_carry);

        println!(
            "Counter '{}': output_value: {}, carry: {}",
            self.name, output_value, carry_value
        );
    }
}

#[test]
fn test_adder_with_carry_out() {
    let mut port_collection = PortCollection::new();

    let mut reg_a = ConstantRegister::new(&mut port_collection, 8, 0xF0, String::from("a"));
    let mut reg_b = ConstantRegister::new(&mut port_collection, 8, 0x11, String::from("b"));

    let mut adder = Adder::new(
        &mut port_collection,
        8,
        reg_a.output_port,
        reg_b.output_port,
        String::from("add"),
    );

    reg_a.process_cycle(&mut port_collection);
    reg_b.process_cycle(&mut port_collection);
    adder.process_cycle(&mut port_collection);

    {
        assert_eq!(port_collection.get_port_data(adder.output_port), 0x01);
        assert_eq!(port_collection.get_port_data(adder.output_carry), 1);
    }

    reg_b.constant_value = 0x01;
    reg_b.process_cycle(&mut port_collection);
    adder.process_cycle(&mut port_collection);

    {
        assert_eq!(port_collection.get_port_data(adder.output_port), 0xF1);
        assert_eq!(port_collection.get_port_data(adder.output_carry), 0);
    }
}

#[test]
/// A 2-bit counter must count 1, 2, 3, 0 and pulse its carry on the wrap.
fn test_counter_wrap() {
    let mut port_collection = PortCollection::new();

    let mut counter = Counter::new(&mut port_collection, 2, String::from("ctr"));

    let expected: [(Word, Word); 5] = [(1, 0), (2, 0), (3, 0), (0, 1), (1, 0)];

    for (value, carry) in expected {
        counter.process_cycle(&mut port_collection);

        assert_eq!(port_collection.get_port_data(counter.output_port), value);
        assert_eq!(port_collection.get_port_data(counter.output_carry), carry);
    }
}

/*
Switching
 */

pub struct Mux<const NUM_INPUTS: usize> {
    pub selection_input: PortID,
    pub inputs: [PortID; NUM_INPUTS],
    pub output_port: PortID,
    pub input_mask: Word,

    pub name: String,
}

impl<const NUM_INPUTS: usize> Component for Mux<NUM_INPUTS> {
    fn process_cycle(&mut self, port_collection: &mut PortCollection) {
        let selected_input = port_collection.get_port_data(self.selection_input) & self.input_mask;
        assert!((selected_input as usize) < NUM_INPUTS);

        let input_value = port_collection.get_port_data(self.inputs[selected_input as usize]);

        port_collection.set_port_data(self.output_port, input_value);
    }
}

impl<const NUM_INPUTS: usize> Mux<NUM_INPUTS> {
    pub fn new(
        port_collection: &mut PortCollection,
        width: usize,
        inputs: &[PortID; NUM_INPUTS],
        selection_input: PortID,
        name: String,
    ) -> Self {
        let output_port_id =
            port_collection.register_port(width, PORT_DEFAULT_VALUE, name.clone() + ".out");

        let num_selection_bits = (NUM_INPUTS as f64).log2().ceil() as u32;
        let input_mask = (2_u32.pow(num_selection_bits) as Word) - 1;

        Self {
            selection_input,
            inputs: inputs.clone(),
            output_port: output_port_id,
            input_mask,
            name,
        }
    }
}

#[test]
/// Tests an isolated mux with 2 inputs and a single bit selection line.
fn test_binary_mux() {
    let mut port_collection = PortCollection::new();

    let a_value: Word = 0b_0011;
    let b_value: Word = 0b_1100;

    let mut reg_a = ConstantRegister::new(&mut port_collection, 4, a_value, String::from("a"));
    let mut reg_b = ConstantRegister::new(&mut port_collection, 4, b_value, String::from("b"));
    let mut reg_s = ConstantRegister::new(&mut port_collection, 1, 0, String::from("s"));

    let mut mux = Mux::<2>::new(
        &mut port_collection,
        4,
        &[reg_a.output_port, reg_b.output_port],
        reg_s.output_port,
        String::from("mux"),
    );

    reg_a.process_cycle(&mut port_collection);
    reg_b.process_cycle(&mut port_collection);
    reg_s.process_cycle(&mut port_collection);
    mux.process_cycle(&mut port_collection);

    assert_eq!(port_collection.get_port_data(mux.output_port), a_value);

    reg_s.constant_value = 1;
    reg_s.process_cycle(&mut port_collection);
    mux.process_cycle(&mut port_collection);

    assert_eq!(port_collection.get_port_data(mux.output_port), b_value);
}
