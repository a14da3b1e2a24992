use clap::{App, Arg};

use wpc_core::bits::{bits_to_word, Bit, Word};
use wpc_core::circuit::{PortCollection, PortID};
use wpc_core::components::{Component, ConstantRegister};
use wpc_core::designs::{
    DdsWave, DeltaSigmaWave, PopCounter, PwmWave, SawtoothWave, ShiftRegister, SquareWave, Tff,
    TriangleWave, WAVE_PRESCALE_BITS,
};
use wpc_core::popcount;
use wpc_core::sim::Tracer;

/// Cycles between two printed samples of the prescaled waveform demos: one
/// ramp step of the generators.
const WAVE_SAMPLE_CYCLES: u32 = 1 << WAVE_PRESCALE_BITS;

fn main() {
    let matches = App::new("wpc-demos")
        .about("Simulates the bundled logic designs and prints their traces")
        .arg(
            Arg::with_name("demo")
                .required(true)
                .possible_values(&[
                    "popcount",
                    "tff",
                    "shift",
                    "square",
                    "sawtooth",
                    "triangle",
                    "pwm",
                    "deltasigma",
                    "dds",
                ])
                .help("Design to simulate"),
        )
        .arg(
            Arg::with_name("cycles")
                .long("cycles")
                .short("c")
                .takes_value(true)
                .default_value("32")
                .help("Number of samples (or cycles, for the per-cycle demos) to print"),
        )
        .arg(
            Arg::with_name("input")
                .long("input")
                .short("i")
                .takes_value(true)
                .default_value("10110100")
                .help("Bit pattern for the popcount and shift demos"),
        )
        .get_matches();

    let demo = matches.value_of("demo").unwrap();
    let cycles = matches.value_of("cycles").unwrap();
    let input = matches.value_of("input").unwrap();

    if let Err(message) = run_demo(demo, cycles, input) {
        eprintln!("error: {}", message);
        std::process::exit(1);
    }
}

fn run_demo(demo: &str, cycles: &str, input: &str) -> Result<(), String> {
    let cycles: u32 = cycles
        .parse()
        .map_err(|_| format!("Invalid cycle count: {}", cycles))?;
    let input_bits = parse_bits(input)?;

    match demo {
        "popcount" => demo_popcount(&input_bits),
        "tff" => demo_tff(cycles),
        "shift" => demo_shift(&input_bits),
        "square" => demo_square(cycles),
        "sawtooth" => demo_sawtooth(cycles),
        "triangle" => demo_triangle(cycles),
        "pwm" => demo_pwm(cycles),
        "deltasigma" => demo_delta_sigma(cycles),
        "dds" => demo_dds(cycles),
        _ => return Err(format!("Unrecognized demo: {}", demo)),
    }

    Ok(())
}

fn parse_bits(text: &str) -> Result<Vec<Bit>, String> {
    text.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(format!("Invalid bit '{}' in input pattern", c)),
        })
        .collect()
}

fn print_sample(cycle: u64, value: Word) {
    let bar = "#".repeat((value / 4) as usize);
    println!("{:7}  {:3}  {}", cycle, value, bar);
}

fn print_bit_sample(cycle: u64, value: Word) {
    let glyph = if value != 0 { '#' } else { '_' };
    println!("{:7}  {}", cycle, glyph);
}

/// Wires the input pattern to constant registers, settles the reduction
/// network in a single cycle, and prints the surviving weight columns next
/// to the functional count.
fn demo_popcount(input: &[Bit]) {
    let mut port_collection = PortCollection::new();

    let mut regs: Vec<ConstantRegister> = input
        .iter()
        .enumerate()
        .map(|(i, bit)| {
            ConstantRegister::new(&mut port_collection, 1, *bit as Word, format!("in_{}", i))
        })
        .collect();
    let input_ports: Vec<PortID> = regs.iter().map(|reg| reg.output_port).collect();

    let mut pop = PopCounter::new(&mut port_collection, &input_ports, String::from("pop"));

    for reg in regs.iter_mut() {
        reg.process_cycle(&mut port_collection);
    }
    pop.process_cycle(&mut port_collection);

    println!("input:       {} bits", input.len());
    println!("compressors: {}", pop.num_compressors());
    println!("stages:      {}", pop.num_stages());

    for (weight, port) in pop.output_ports().iter().enumerate() {
        println!(
            "weight 2^{}:  {}",
            weight,
            port_collection.get_port_data(*port)
        );
    }

    println!("count:       {}", pop.count(&port_collection));
    println!(
        "functional:  {}",
        bits_to_word(&popcount::popcount(input))
    );
}

fn demo_tff(cycles: u32) {
    let mut port_collection = PortCollection::new();

    let mut toggle = ConstantRegister::new(&mut port_collection, 1, 1, String::from("t"));
    let mut tff = Tff::new(&mut port_collection, toggle.output_port, String::from("tff"));

    toggle.process_cycle(&mut port_collection);

    for cycle in 0..cycles {
        tff.process_cycle(&mut port_collection);
        print_bit_sample(
            cycle as u64,
            port_collection.get_port_data(tff.output_port),
        );
    }
}

fn demo_shift(pattern: &[Bit]) {
    let mut port_collection = PortCollection::new();

    let mut serial = ConstantRegister::new(&mut port_collection, 1, 0, String::from("si"));
    let mut enable = ConstantRegister::new(&mut port_collection, 1, 1, String::from("ce"));

    let mut sipo = ShiftRegister::new(
        &mut port_collection,
        8,
        serial.output_port,
        enable.output_port,
        String::from("sipo"),
    );

    enable.process_cycle(&mut port_collection);

    for bit in pattern {
        serial.constant_value = *bit as Word;
        serial.process_cycle(&mut port_collection);
        sipo.process_cycle(&mut port_collection);

        println!(
            "in: {}  taps: {:08b}  serial out: {}",
            *bit as Word,
            sipo.parallel_output(&port_collection),
            port_collection.get_port_data(sipo.serial_output_port)
        );
    }
}

fn demo_square(samples: u32) {
    let mut tracer = Tracer::new(|ports| SquareWave::new(ports, String::from("sq")));
    let out = tracer.design().output_port;

    for _ in 0..samples {
        tracer.run(WAVE_SAMPLE_CYCLES);
        print_bit_sample(tracer.cycle(), tracer.peek(out));
    }
}

fn demo_sawtooth(samples: u32) {
    let mut tracer = Tracer::new(|ports| SawtoothWave::new(ports, String::from("saw")));
    let out = tracer.design().output_port;

    for _ in 0..samples {
        tracer.run(WAVE_SAMPLE_CYCLES);
        print_sample(tracer.cycle(), tracer.peek(out));
    }
}

fn demo_triangle(samples: u32) {
    let mut tracer = Tracer::new(|ports| TriangleWave::new(ports, String::from("tri")));
    let out = tracer.design().output_port;

    for _ in 0..samples {
        tracer.run(WAVE_SAMPLE_CYCLES);
        print_sample(tracer.cycle(), tracer.peek(out));
    }
}

fn demo_pwm(samples: u32) {
    let mut tracer = Tracer::new(|ports| PwmWave::new(ports, 64, String::from("pwm")));
    let out = tracer.design().output_port;

    for _ in 0..samples {
        tracer.run(WAVE_SAMPLE_CYCLES);
        print_bit_sample(tracer.cycle(), tracer.peek(out));
    }
}

fn demo_delta_sigma(cycles: u32) {
    let mut tracer = Tracer::new(|ports| DeltaSigmaWave::new(ports, 0x4000, String::from("dsm")));
    let out = tracer.design().output_port;

    for _ in 0..cycles {
        tracer.tick();
        print_bit_sample(tracer.cycle(), tracer.peek(out));
    }
}

fn demo_dds(samples: u32) {
    let mut tracer = Tracer::new(|ports| DdsWave::new(ports, String::from("dds")));
    let out = tracer.design().output_port;

    for _ in 0..samples {
        tracer.run(WAVE_SAMPLE_CYCLES);
        print_sample(tracer.cycle(), tracer.peek(out));
    }
}
