use rand::Rng;

use crate::config::SwitchConfig;
use crate::error::SwitchError;
use crate::packet::Packet;
use crate::voq::VoqBuffer;

mod drr;
mod islip;
mod pending;
mod stable;

pub use drr::DeficitRoundRobin;
pub use islip::Islip;
pub use pending::PendingInputs;
pub use stable::StableMatching;

/// A packet moved from VOQ(input, output) across the crossbar in this slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub input: usize,
    pub output: usize,
    pub packet: Packet,
}

pub trait Arbiter {
    fn name(&self) -> &'static str;

    /// Port count the arbiter's state was sized for.
    fn num_ports(&self) -> usize;

    /// Called once for every packet the buffer accepted.
    fn on_enqueue(&mut self, _input: usize, _output: usize) {}

    /// Computes this slot's matching and dequeues one packet per matched pair.
    fn arbitrate(&mut self, now: u64, buffer: &mut VoqBuffer) -> Result<Vec<Transfer>, SwitchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchedulerKind {
    Islip,
    #[value(name = "stable")]
    StableMatching,
    #[value(name = "drr")]
    DeficitRoundRobin,
}

impl SchedulerKind {
    pub const ALL: [SchedulerKind; 3] = [
        SchedulerKind::Islip,
        SchedulerKind::StableMatching,
        SchedulerKind::DeficitRoundRobin,
    ];

    pub fn build<R: Rng>(
        self,
        config: &SwitchConfig,
        rng: &mut R,
    ) -> Result<Box<dyn Arbiter>, SwitchError> {
        config.validate()?;
        let arbiter: Box<dyn Arbiter> = match self {
            SchedulerKind::Islip => Box::new(Islip::new(config.num_ports)),
            SchedulerKind::StableMatching => Box::new(StableMatching::new(config.num_ports)),
            SchedulerKind::DeficitRoundRobin => Box::new(DeficitRoundRobin::with_random_weights(
                config.num_ports,
                config.weight_range.clone(),
                rng,
            )?),
        };
        Ok(arbiter)
    }
}
