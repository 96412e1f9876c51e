use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use clap::ValueEnum;
use probe_hash::HashMap;
use probe_hash::Policy;
use probe_hash::hash::DefaultHashPair;
use probe_hash::policy::Cuckoo;
use probe_hash::policy::Linear;
use probe_hash::policy::Quadratic;
use probe_hash::policy::RobinHood;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Linear,
    Quadratic,
    RobinHood,
    Cuckoo,
    All,
}

/// Runs the insert / increment / erase scenario and reports timing and
/// table statistics.
#[derive(Parser, Debug)]
struct Args {
    /// Collision-resolution policy to exercise.
    #[arg(short, long, value_enum, default_value_t = PolicyArg::All)]
    policy: PolicyArg,

    /// Capacity hint passed to the map at construction.
    #[arg(short = 'c', long = "capacity_hint", default_value_t = 1 << 20)]
    capacity_hint: usize,

    /// Number of keys inserted, incremented and erased.
    #[arg(short, long, default_value_t = 1 << 19)]
    keys: u64,

    /// Print the probe-length histogram after the insert phase.
    #[arg(long)]
    histogram: bool,
}

struct Timings {
    insert: Duration,
    increment: Duration,
    erase: Duration,
}

fn run<P: Policy>(args: &Args) -> Result<Timings, String> {
    let mut map: HashMap<u64, u64, P, DefaultHashPair> = HashMap::with_capacity(args.capacity_hint);
    tracing::info!(
        policy = P::NAME,
        capacity = map.capacity(),
        keys = args.keys,
        "starting scenario"
    );

    let start = Instant::now();
    for key in 0..args.keys {
        if !map.insert(key, key + 10).1 {
            return Err(format!("{}: key {key} reported as already present", P::NAME));
        }
    }
    let insert = start.elapsed();

    if map.len() as u64 != args.keys {
        return Err(format!("{}: len {} after insert", P::NAME, map.len()));
    }
    map.debug_stats().print();
    if args.histogram {
        map.probe_histogram().print();
    }

    let start = Instant::now();
    for key in 0..args.keys {
        match map.at_mut(&key) {
            Ok(value) => *value += 1,
            Err(err) => return Err(format!("{}: key {key}: {err}", P::NAME)),
        }
    }
    let increment = start.elapsed();

    if let Some((key, value)) = map.iter().find(|(k, v)| **v != **k + 11) {
        return Err(format!("{}: key {key} holds {value}", P::NAME));
    }

    let start = Instant::now();
    for key in 0..args.keys {
        if map.erase(&key) != 1 {
            return Err(format!("{}: key {key} missing at erase", P::NAME));
        }
    }
    let erase = start.elapsed();

    if !map.is_empty() {
        return Err(format!("{}: {} entries left after erase", P::NAME, map.len()));
    }

    Ok(Timings {
        insert,
        increment,
        erase,
    })
}

fn report<P: Policy>(args: &Args) -> bool {
    match run::<P>(args) {
        Ok(timings) => {
            println!(
                "{:<10} insert {:>10.2?}  increment {:>10.2?}  erase {:>10.2?}",
                P::NAME,
                timings.insert,
                timings.increment,
                timings.erase
            );
            true
        }
        Err(message) => {
            tracing::error!(policy = P::NAME, "{message}");
            false
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut passed = true;
    if matches!(args.policy, PolicyArg::Linear | PolicyArg::All) {
        passed &= report::<Linear>(&args);
    }
    if matches!(args.policy, PolicyArg::Quadratic | PolicyArg::All) {
        passed &= report::<Quadratic>(&args);
    }
    if matches!(args.policy, PolicyArg::RobinHood | PolicyArg::All) {
        passed &= report::<RobinHood>(&args);
    }
    if matches!(args.policy, PolicyArg::Cuckoo | PolicyArg::All) {
        passed &= report::<Cuckoo>(&args);
    }

    if !passed {
        std::process::exit(1);
    }
}
