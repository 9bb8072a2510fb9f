use rand::Rng;

use crate::packet::{Arrival, PriorityClass};

mod bursty;
mod non_uniform;
mod scripted;
mod uniform;

pub use bursty::BurstyTraffic;
pub use non_uniform::NonUniformTraffic;
pub use scripted::ScriptedTraffic;
pub use uniform::UniformTraffic;

pub const MAX_SERVICE_TIME: u64 = 10;
pub const MAX_PACKET_SIZE: u64 = 10;

pub trait TrafficSource {
    /// Arrivals for slot `now`, in the order they hit the switch.
    fn arrivals(&mut self, now: u64) -> Vec<Arrival>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TrafficPattern {
    Uniform,
    NonUniform,
    Bursty,
}

impl TrafficPattern {
    pub fn build(self, num_ports: usize, rate: usize, seed: u64) -> Box<dyn TrafficSource> {
        match self {
            TrafficPattern::Uniform => Box::new(UniformTraffic::new(num_ports, rate, seed)),
            TrafficPattern::NonUniform => Box::new(NonUniformTraffic::new(num_ports, seed)),
            TrafficPattern::Bursty => Box::new(BurstyTraffic::new(num_ports, rate, seed)),
        }
    }
}

// random priority, service time, destination and size for one packet from `input`
pub(crate) fn random_arrival<R: Rng>(rng: &mut R, input: usize, num_ports: usize) -> Arrival {
    let priority = PriorityClass::ALL[rng.gen_range(0..PriorityClass::ALL.len())];
    let service_time = rng.gen_range(1..=MAX_SERVICE_TIME);
    let output = rng.gen_range(0..num_ports);
    let size = rng.gen_range(1..=MAX_PACKET_SIZE);
    Arrival::new(input, output, priority)
        .with_service_time(service_time)
        .with_size(size)
}
