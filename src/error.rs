use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Switch needs at least one port")]
    NoPorts,
    #[error("Buffer size must be greater than zero")]
    ZeroBufferSize,
    #[error("Invalid weight range {min}..={max}")]
    InvalidWeightRange { min: u64, max: u64 },
    #[error("Expected {expected} weights, got {actual}")]
    WeightCount { expected: usize, actual: usize },
    #[error("Weight for pair ({input}, {output}) must be greater than zero")]
    ZeroWeight { input: usize, output: usize },
    #[error("Arbiter built for {actual} ports, switch has {expected}")]
    ArbiterPorts { expected: usize, actual: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwitchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Port {port} out of range (switch has {num_ports} ports)")]
    PortOutOfRange { port: usize, num_ports: usize },
    #[error("Invalid priority class {0}, expected 1..=3")]
    InvalidPriority(u8),
    #[error("Dequeue from empty VOQ ({input}, {output})")]
    EmptyQueue { input: usize, output: usize },
}
