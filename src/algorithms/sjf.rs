use rand::Rng;

use super::run_non_preemptive;
use crate::process::Process;
use crate::timeline::Schedule;
use crate::transient::TransientEvent;

/// Shortest Job First: no preemptivo, elige la menor duración entre los llegados.
///
/// Empates por llegada y luego por PID. El proceso transitorio no compite
/// por duración: se ejecuta en cuanto se dispara.
pub fn sjf<R: Rng>(processes: &[Process], event: &mut TransientEvent<R>) -> Schedule {
    run_non_preemptive(processes, event, |p| p.duration)
}
