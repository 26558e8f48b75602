use rand::Rng;
use tracing::debug;

use super::{absorb_transient, by_arrival, run_to_completion};
use crate::process::{Process, Time};
use crate::timeline::Schedule;
use crate::transient::TransientEvent;

/// First-Come First-Served: no preemptivo, en orden de llegada.
///
/// Los procesos se atienden por llegada (empates por PID). Si el siguiente
/// aún no llegó, el reloj salta hasta su llegada sin contar espera.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use cpu_scheduling_simulator::{algorithms, Process, TransientEvent};
///
/// let processes = vec![Process::new(1, 0, 3, 1), Process::new(2, 1, 2, 1)];
/// let mut event = TransientEvent::disabled(StdRng::seed_from_u64(0));
///
/// let schedule = algorithms::fcfs(&processes, &mut event);
/// assert_eq!(schedule.completion_order(), vec![1, 2]);
/// assert_eq!(schedule.completed[1].waiting_time, 2);
/// ```
pub fn fcfs<R: Rng>(processes: &[Process], event: &mut TransientEvent<R>) -> Schedule {
    let queue = by_arrival(processes);
    let mut schedule = Schedule::with_capacity(queue.len() + 1);
    let mut clock: Time = 0;

    for process in queue {
        absorb_transient(event, &mut clock, &mut schedule);

        if clock < process.arrival_time {
            debug!(from = clock, to = process.arrival_time, "procesador ocioso");
            clock = process.arrival_time;
        }

        debug!(pid = process.pid, clock, "iniciando proceso {}", process.pid);
        run_to_completion(process, &mut clock, &mut schedule);
    }

    schedule
}
