use std::ops::RangeInclusive;

use crate::error::ConfigError;

pub const DEFAULT_NUM_PORTS: usize = 8;
pub const DEFAULT_BUFFER_SIZE: usize = 64;
pub const DEFAULT_SIMULATION_TIME: u64 = 1000;
pub const DEFAULT_ARRIVAL_RATE: usize = 4;
pub const DEFAULT_MIN_WEIGHT: u64 = 1;
pub const DEFAULT_MAX_WEIGHT: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchConfig {
    pub num_ports: usize,
    /// Capacity of a single (input, output) VOQ, counted across all classes.
    pub buffer_size: usize,
    pub simulation_time: u64,
    /// Range DRR weights are drawn from, once, when the arbiter is built.
    pub weight_range: RangeInclusive<u64>,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            num_ports: DEFAULT_NUM_PORTS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            simulation_time: DEFAULT_SIMULATION_TIME,
            weight_range: DEFAULT_MIN_WEIGHT..=DEFAULT_MAX_WEIGHT,
        }
    }
}

impl SwitchConfig {
    pub fn with_ports(mut self, num_ports: usize) -> Self {
        self.num_ports = num_ports;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_simulation_time(mut self, simulation_time: u64) -> Self {
        self.simulation_time = simulation_time;
        self
    }

    pub fn with_weight_range(mut self, weight_range: RangeInclusive<u64>) -> Self {
        self.weight_range = weight_range;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_ports == 0 {
            return Err(ConfigError::NoPorts);
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        let (min, max) = (*self.weight_range.start(), *self.weight_range.end());
        if min == 0 || min > max {
            return Err(ConfigError::InvalidWeightRange { min, max });
        }
        Ok(())
    }

    pub fn num_pairs(&self) -> usize {
        self.num_ports * self.num_ports
    }
}
