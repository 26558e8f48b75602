use std::collections::VecDeque;

use rand::Rng;
use tracing::debug;

use super::{absorb_transient, by_arrival, run_to_completion};
use crate::error::SimulationError;
use crate::process::{Process, Time};
use crate::timeline::Schedule;
use crate::transient::TransientEvent;

/// Round Robin: preemptivo con quantum fijo.
///
/// Los procesos llegados forman una cola FIFO. Cada turno el primero de la
/// cola recibe hasta `quantum` unidades: si le alcanza termina; si no, se
/// descuenta el quantum y vuelve al final de la cola, detrás de los procesos
/// que llegaron durante su turno.
///
/// # Errors
///
/// Devuelve `SimulationError::InvalidQuantum` si `quantum` es 0.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use cpu_scheduling_simulator::{algorithms, Process, TransientEvent};
///
/// let processes = vec![Process::new(1, 0, 5, 1), Process::new(2, 0, 3, 1)];
/// let mut event = TransientEvent::disabled(StdRng::seed_from_u64(0));
///
/// let schedule = algorithms::round_robin(&processes, 2, &mut event).unwrap();
/// assert_eq!(schedule.completion_order(), vec![2, 1]);
/// ```
pub fn round_robin<R: Rng>(
    processes: &[Process],
    quantum: Time,
    event: &mut TransientEvent<R>,
) -> Result<Schedule, SimulationError> {
    if quantum == 0 {
        return Err(SimulationError::InvalidQuantum(quantum));
    }

    let mut pending: VecDeque<Process> = by_arrival(processes).into();
    let mut ready: VecDeque<Process> = VecDeque::with_capacity(pending.len() + 1);
    let mut schedule = Schedule::with_capacity(pending.len() + 1);
    let mut clock: Time = 0;

    while !pending.is_empty() || !ready.is_empty() {
        absorb_transient(event, &mut clock, &mut schedule);
        admit_arrivals(&mut pending, &mut ready, clock);

        let Some(mut process) = ready.pop_front() else {
            if let Some(next) = pending.front().map(|p| p.arrival_time) {
                debug!(from = clock, to = next, "procesador ocioso");
                clock = next;
            }
            continue;
        };

        debug!(
            pid = process.pid,
            clock,
            remaining = process.remaining_duration,
            "iniciando/reanudando proceso {}",
            process.pid
        );

        if process.remaining_duration <= quantum {
            run_to_completion(process, &mut clock, &mut schedule);
            continue;
        }

        schedule.record(process.pid, clock, clock + quantum);
        process.remaining_duration -= quantum;
        clock += quantum;

        debug!(
            pid = process.pid,
            clock,
            remaining = process.remaining_duration,
            "proceso {} agotó su quantum",
            process.pid
        );

        // Los recién llegados entran antes que el proceso interrumpido
        admit_arrivals(&mut pending, &mut ready, clock);
        ready.push_back(process);
    }

    Ok(schedule)
}

/// Pasa a la cola de listos todos los procesos con llegada <= `clock`.
///
/// `pending` está ordenada por llegada, así que se conserva ese orden.
fn admit_arrivals(pending: &mut VecDeque<Process>, ready: &mut VecDeque<Process>, clock: Time) {
    while pending.front().is_some_and(|p| p.has_arrived(clock)) {
        if let Some(process) = pending.pop_front() {
            ready.push_back(process);
        }
    }
}
