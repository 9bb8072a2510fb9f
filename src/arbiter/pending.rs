use std::collections::VecDeque;

// ==========================================
// Per-output FIFO of inputs holding traffic for that output
// An input is queued at most once per output
// ==========================================
#[derive(Debug)]
pub struct PendingInputs {
    num_ports: usize,
    queues: Vec<VecDeque<usize>>,
    queued: Vec<bool>,
}

impl PendingInputs {
    pub fn new(num_ports: usize) -> Self {
        Self {
            num_ports,
            queues: (0..num_ports).map(|_| VecDeque::new()).collect(),
            queued: vec![false; num_ports * num_ports],
        }
    }

    /// Appends `input` to the tail of `output`'s queue unless already there.
    pub fn mark(&mut self, input: usize, output: usize) {
        if !self.contains(input, output) {
            self.queued[input * self.num_ports + output] = true;
            self.queues[output].push_back(input);
        }
    }

    pub fn front(&self, output: usize) -> Option<usize> {
        self.queues[output].front().copied()
    }

    pub fn pop(&mut self, output: usize) -> Option<usize> {
        let input = self.queues[output].pop_front()?;
        self.queued[input * self.num_ports + output] = false;
        Some(input)
    }

    #[cfg(test)]
    pub fn len(&self, output: usize) -> usize {
        self.queues[output].len()
    }

    pub fn contains(&self, input: usize, output: usize) -> bool {
        self.queued[input * self.num_ports + output]
    }
}
