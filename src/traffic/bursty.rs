use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::packet::Arrival;
use crate::traffic::{TrafficSource, random_arrival};

pub const BURST_PROBABILITY: f64 = 0.3;

// Per input and slot: bursting at twice the base rate, otherwise half of it
pub struct BurstyTraffic {
    num_ports: usize,
    rate: usize,
    rng: StdRng,
}

impl BurstyTraffic {
    pub fn new(num_ports: usize, rate: usize, seed: u64) -> Self {
        Self {
            num_ports,
            rate,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TrafficSource for BurstyTraffic {
    fn arrivals(&mut self, _now: u64) -> Vec<Arrival> {
        let mut out = Vec::new();
        for input in 0..self.num_ports {
            let count = if self.rng.gen_bool(BURST_PROBABILITY) {
                self.rate * 2
            } else {
                self.rate / 2
            };
            for _ in 0..count {
                out.push(random_arrival(&mut self.rng, input, self.num_ports));
            }
        }
        out
    }
}
