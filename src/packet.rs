use std::fmt;

use crate::error::SwitchError;

pub const NUM_CLASSES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriorityClass {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl PriorityClass {
    pub const ALL: [PriorityClass; NUM_CLASSES] =
        [PriorityClass::Low, PriorityClass::Medium, PriorityClass::High];

    /// Sub-queue index inside a VOQ (0 = Low .. 2 = High).
    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl TryFrom<u8> for PriorityClass {
    type Error = SwitchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PriorityClass::Low),
            2 => Ok(PriorityClass::Medium),
            3 => Ok(PriorityClass::High),
            other => Err(SwitchError::InvalidPriority(other)),
        }
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

// ==========================================
// Arrival tuple handed over by a traffic source
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub input_port: usize,
    pub output_port: usize,
    pub priority: PriorityClass,
    pub service_time: u64,
    pub size: u64,
}

impl Arrival {
    pub fn new(input_port: usize, output_port: usize, priority: PriorityClass) -> Self {
        Self {
            input_port,
            output_port,
            priority,
            service_time: 1,
            size: 1,
        }
    }

    pub fn with_service_time(mut self, service_time: u64) -> Self {
        self.service_time = service_time;
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

// ==========================================
// Packet resident in the switch
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub priority: PriorityClass,
    pub arrival_time: u64,
    pub service_time: u64,
    pub input_port: usize,
    pub output_port: usize,
    pub size: u64,
    // admission order, breaks ties between equal priorities
    pub seq: u64,
}

impl Packet {
    pub fn from_arrival(arrival: &Arrival, arrival_time: u64, seq: u64) -> Self {
        Self {
            priority: arrival.priority,
            arrival_time,
            service_time: arrival.service_time,
            input_port: arrival.input_port,
            output_port: arrival.output_port,
            size: arrival.size,
            seq,
        }
    }

    pub fn class_index(&self) -> usize {
        self.priority.index()
    }
}
