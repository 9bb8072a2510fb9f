use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use voq_switch::{
    SchedulerKind, Switch, SwitchConfig, simulation,
    config::{
        DEFAULT_ARRIVAL_RATE, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT,
        DEFAULT_NUM_PORTS, DEFAULT_SIMULATION_TIME,
    },
    traffic::TrafficPattern,
};

/// Timeslot simulation of a VOQ crossbar switch.
#[derive(Parser, Debug)]
#[command(name = "voq-switch", version)]
struct Cli {
    /// Arbitration policy. Runs all three, one after another, when omitted.
    #[arg(long, value_enum)]
    scheduler: Option<SchedulerKind>,
    #[arg(long, value_enum, default_value_t = TrafficPattern::Uniform)]
    traffic: TrafficPattern,
    #[arg(long, default_value_t = DEFAULT_NUM_PORTS)]
    ports: usize,
    /// Capacity of every (input, output) VOQ.
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,
    #[arg(long, default_value_t = DEFAULT_SIMULATION_TIME)]
    time: u64,
    /// Base packets per input per slot (uniform and bursty traffic).
    #[arg(long, default_value_t = DEFAULT_ARRIVAL_RATE)]
    rate: usize,
    #[arg(long, default_value_t = DEFAULT_MIN_WEIGHT)]
    min_weight: u64,
    #[arg(long, default_value_t = DEFAULT_MAX_WEIGHT)]
    max_weight: u64,
    /// Seeds both the traffic source and the DRR weights.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = SwitchConfig::default()
        .with_ports(cli.ports)
        .with_buffer_size(cli.buffer_size)
        .with_simulation_time(cli.time)
        .with_weight_range(cli.min_weight..=cli.max_weight);
    config.validate()?;

    let kinds = match cli.scheduler {
        Some(kind) => vec![kind],
        None => SchedulerKind::ALL.to_vec(),
    };

    for kind in kinds {
        let mut rng = StdRng::seed_from_u64(cli.seed);
        let arbiter = kind.build(&config, &mut rng)?;
        let mut switch = Switch::with_output_queues(config.clone(), arbiter)?;
        let mut source = cli.traffic.build(config.num_ports, cli.rate, cli.seed);

        simulation::run(&mut switch, source.as_mut(), config.simulation_time)?;
        switch
            .stats()
            .print_report(switch.arbiter_name(), config.simulation_time);
    }
    Ok(())
}
