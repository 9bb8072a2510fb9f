use std::collections::VecDeque;

use crate::packet::Packet;

pub trait OutputSink {
    fn push(&mut self, output: usize, packet: Packet, waiting_time: u64, turnaround_time: u64);
}

// ==========================================
// Unbounded per-port output queues, nothing drains them
// ==========================================
#[derive(Debug, Default)]
pub struct OutputQueues {
    queues: Vec<VecDeque<Packet>>,
}

impl OutputQueues {
    pub fn new(num_ports: usize) -> Self {
        Self {
            queues: (0..num_ports).map(|_| VecDeque::new()).collect(),
        }
    }

    pub fn queue(&self, output: usize) -> Option<&VecDeque<Packet>> {
        self.queues.get(output)
    }

    pub fn len(&self, output: usize) -> usize {
        self.queues.get(output).map_or(0, VecDeque::len)
    }

    pub fn total(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }
}

impl OutputSink for OutputQueues {
    fn push(&mut self, output: usize, packet: Packet, _waiting_time: u64, _turnaround_time: u64) {
        if output >= self.queues.len() {
            self.queues.resize_with(output + 1, VecDeque::new);
        }
        self.queues[output].push_back(packet);
    }
}
