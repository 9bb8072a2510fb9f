use std::ops::RangeInclusive;

use rand::Rng;
use tracing::trace;

use crate::arbiter::{Arbiter, PendingInputs, Transfer};
use crate::error::{ConfigError, SwitchError};
use crate::packet::{NUM_CLASSES, PriorityClass};
use crate::voq::VoqBuffer;

// ==========================================
// Weighted deficit round robin over three classes per VOQ
// Credit accrues every slot with no cap, a blocked head is never bypassed
// ==========================================
#[derive(Debug)]
pub struct DeficitRoundRobin {
    num_ports: usize,
    weights: Vec<u64>,
    deficit: Vec<u64>,
    current_class: Vec<usize>,
    pending: PendingInputs,
}

impl DeficitRoundRobin {
    /// `weights` is row-major by input, one entry per (input, output) pair.
    pub fn new(num_ports: usize, weights: Vec<u64>) -> Result<Self, ConfigError> {
        let expected = num_ports * num_ports;
        if weights.len() != expected {
            return Err(ConfigError::WeightCount {
                expected,
                actual: weights.len(),
            });
        }
        if let Some(slot) = weights.iter().position(|&w| w == 0) {
            return Err(ConfigError::ZeroWeight {
                input: slot / num_ports,
                output: slot % num_ports,
            });
        }

        Ok(Self {
            num_ports,
            weights,
            deficit: vec![0; expected],
            current_class: vec![PriorityClass::High.index(); expected],
            pending: PendingInputs::new(num_ports),
        })
    }

    pub fn with_random_weights<R: Rng>(
        num_ports: usize,
        range: RangeInclusive<u64>,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let (min, max) = (*range.start(), *range.end());
        if min == 0 || min > max {
            return Err(ConfigError::InvalidWeightRange { min, max });
        }
        let weights = (0..num_ports * num_ports)
            .map(|_| rng.gen_range(min..=max))
            .collect();
        Self::new(num_ports, weights)
    }

    pub fn weight(&self, input: usize, output: usize) -> u64 {
        self.weights[input * self.num_ports + output]
    }

    pub fn deficit(&self, input: usize, output: usize) -> u64 {
        self.deficit[input * self.num_ports + output]
    }

    pub fn current_class(&self, input: usize, output: usize) -> usize {
        self.current_class[input * self.num_ports + output]
    }
}

impl Arbiter for DeficitRoundRobin {
    fn name(&self) -> &'static str {
        "deficit-round-robin"
    }

    fn num_ports(&self) -> usize {
        self.num_ports
    }

    fn on_enqueue(&mut self, input: usize, output: usize) {
        self.pending.mark(input, output);
    }

    fn arbitrate(&mut self, now: u64, buffer: &mut VoqBuffer) -> Result<Vec<Transfer>, SwitchError> {
        let n = self.num_ports;
        for (deficit, weight) in self.deficit.iter_mut().zip(&self.weights) {
            *deficit = deficit.saturating_add(*weight);
        }

        let mut input_taken = vec![false; n];
        let mut commits = Vec::new();

        for output in 0..n {
            let Some(input) = self.pending.front(output) else {
                continue;
            };
            if input_taken[input] {
                continue;
            }
            let slot = input * n + output;
            let Some(class) = buffer.first_nonempty_class(input, output, self.current_class[slot])
            else {
                self.pending.pop(output);
                continue;
            };
            let Some(size) = buffer.peek_class(input, output, class).map(|p| p.size) else {
                continue;
            };
            if size > self.deficit[slot] {
                trace!(
                    "slot {now}: ({input}, {output}) class {class} blocked, size {size} > deficit {}",
                    self.deficit[slot]
                );
                continue;
            }
            self.pending.pop(output);
            input_taken[input] = true;
            commits.push((input, output, class));
        }

        let mut transfers = Vec::with_capacity(commits.len());
        for (input, output, class) in commits {
            let slot = input * n + output;
            let packet = buffer.dequeue_class(input, output, class)?;
            self.deficit[slot] -= packet.size;
            self.current_class[slot] = (class + 2) % NUM_CLASSES;
            // only the served class keeps the input queued; other classes wait for an arrival
            if buffer.peek_class(input, output, class).is_some() {
                self.pending.mark(input, output);
            }
            transfers.push(Transfer {
                input,
                output,
                packet,
            });
        }
        Ok(transfers)
    }
}
