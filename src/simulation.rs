use tracing::info;

use crate::error::SwitchError;
use crate::sink::OutputSink;
use crate::switch::Switch;
use crate::traffic::TrafficSource;

/// Runs slots `0..horizon`: admit the slot's arrivals, then arbitrate once.
pub fn run<S: OutputSink>(
    switch: &mut Switch<S>,
    source: &mut dyn TrafficSource,
    horizon: u64,
) -> Result<(), SwitchError> {
    run_with(switch, source, horizon, |_, _| {})
}

/// Same as [`run`], calling `after_slot` once every slot has been arbitrated.
pub fn run_with<S, F>(
    switch: &mut Switch<S>,
    source: &mut dyn TrafficSource,
    horizon: u64,
    mut after_slot: F,
) -> Result<(), SwitchError>
where
    S: OutputSink,
    F: FnMut(u64, &Switch<S>),
{
    info!(
        "starting {} over {} ports for {} slots",
        switch.arbiter_name(),
        switch.config().num_ports,
        horizon
    );

    for now in 0..horizon {
        for arrival in source.arrivals(now) {
            switch.enqueue(now, &arrival)?;
        }
        switch.run_timeslot(now)?;
        after_slot(now, switch);
    }

    let stats = switch.stats();
    info!(
        "finished {}: {} arrivals, {} processed, {} dropped, {} still buffered",
        switch.arbiter_name(),
        stats.total_arrivals,
        stats.packets_processed,
        stats.total_packets_dropped,
        switch.buffer().total_occupancy()
    );
    Ok(())
}
