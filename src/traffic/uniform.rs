use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::packet::Arrival;
use crate::traffic::{TrafficSource, random_arrival};

// Every input emits `rate` packets per slot
pub struct UniformTraffic {
    num_ports: usize,
    rate: usize,
    rng: StdRng,
}

impl UniformTraffic {
    pub fn new(num_ports: usize, rate: usize, seed: u64) -> Self {
        Self {
            num_ports,
            rate,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TrafficSource for UniformTraffic {
    fn arrivals(&mut self, _now: u64) -> Vec<Arrival> {
        let mut out = Vec::with_capacity(self.num_ports * self.rate);
        for input in 0..self.num_ports {
            for _ in 0..self.rate {
                out.push(random_arrival(&mut self.rng, input, self.num_ports));
            }
        }
        out
    }
}
