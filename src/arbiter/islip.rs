use tracing::trace;

use crate::arbiter::{Arbiter, Transfer};
use crate::error::SwitchError;
use crate::voq::VoqBuffer;

// ==========================================
// Single-pass request / grant / accept matching
// Both pointer sets move on every grant and accept, accepted or not
// ==========================================
#[derive(Debug)]
pub struct Islip {
    num_ports: usize,
    grant_pointer: Vec<usize>,
    accept_pointer: Vec<usize>,
}

impl Islip {
    pub fn new(num_ports: usize) -> Self {
        Self {
            num_ports,
            grant_pointer: vec![0; num_ports],
            accept_pointer: vec![0; num_ports],
        }
    }

    pub fn grant_pointer(&self, output: usize) -> usize {
        self.grant_pointer[output]
    }

    pub fn accept_pointer(&self, input: usize) -> usize {
        self.accept_pointer[input]
    }

    // first index in pointer, pointer + 1, ... (mod n) matching the predicate
    fn scan_from(n: usize, pointer: usize, hit: impl Fn(usize) -> bool) -> Option<usize> {
        (0..n).map(|k| (pointer + k) % n).find(|&idx| hit(idx))
    }
}

impl Arbiter for Islip {
    fn name(&self) -> &'static str {
        "islip"
    }

    fn num_ports(&self) -> usize {
        self.num_ports
    }

    fn arbitrate(&mut self, now: u64, buffer: &mut VoqBuffer) -> Result<Vec<Transfer>, SwitchError> {
        let n = self.num_ports;
        let requests = buffer.requests();

        // grant: indexed by output
        let mut granted: Vec<Option<usize>> = vec![None; n];
        for output in 0..n {
            let pointer = self.grant_pointer[output];
            if let Some(input) = Self::scan_from(n, pointer, |i| requests[i * n + output]) {
                granted[output] = Some(input);
                self.grant_pointer[output] = (input + 1) % n;
                trace!("slot {now}: output {output} grants input {input}");
            }
        }

        // accept: indexed by input
        let mut accepted: Vec<Option<usize>> = vec![None; n];
        for input in 0..n {
            let pointer = self.accept_pointer[input];
            if let Some(output) = Self::scan_from(n, pointer, |o| granted[o] == Some(input)) {
                accepted[input] = Some(output);
                self.accept_pointer[input] = (output + 1) % n;
                trace!("slot {now}: input {input} accepts output {output}");
            }
        }

        let mut transfers = Vec::new();
        for (input, output) in accepted.into_iter().enumerate() {
            let Some(output) = output else { continue };
            let packet = buffer.dequeue_head(input, output)?;
            transfers.push(Transfer {
                input,
                output,
                packet,
            });
        }
        Ok(transfers)
    }
}
