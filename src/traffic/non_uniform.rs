use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::packet::Arrival;
use crate::traffic::{TrafficSource, random_arrival};

pub const MAX_NON_UNIFORM_RATE: usize = 10;

// Every input draws its own packet count in [0, 10) each slot
pub struct NonUniformTraffic {
    num_ports: usize,
    rng: StdRng,
}

impl NonUniformTraffic {
    pub fn new(num_ports: usize, seed: u64) -> Self {
        Self {
            num_ports,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TrafficSource for NonUniformTraffic {
    fn arrivals(&mut self, _now: u64) -> Vec<Arrival> {
        let mut out = Vec::new();
        for input in 0..self.num_ports {
            let count = self.rng.gen_range(0..MAX_NON_UNIFORM_RATE);
            for _ in 0..count {
                out.push(random_arrival(&mut self.rng, input, self.num_ports));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_input_count_is_bounded() {
        let mut source = NonUniformTraffic::new(4, 11);
        for t in 0..50 {
            let arrivals = source.arrivals(t);
            for input in 0..4 {
                let count = arrivals.iter().filter(|a| a.input_port == input).count();
                assert!(count < MAX_NON_UNIFORM_RATE);
            }
        }
    }
}
