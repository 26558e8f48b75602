//! # Módulo de Algoritmos de Planificación
//!
//! Cada algoritmo es una rutina independiente que clona el conjunto inicial,
//! avanza su propio reloj simulado y devuelve un `Schedule` con todos los
//! procesos finalizados (incluido el transitorio, si llegó a dispararse).
//!
//! Todos comparten la misma semántica para el evento transitorio: cuando se
//! dispara, el proceso nuevo se ejecuta de inmediato hasta terminar, en el
//! instante actual del reloj, y luego el algoritmo retoma su política.

use rand::Rng;
use tracing::debug;

use crate::process::{Process, Time};
use crate::timeline::{self, Schedule};
use crate::transient::TransientEvent;

mod fcfs;
mod priority;
mod round_robin;
mod sjf;
mod srtf;

pub use fcfs::fcfs;
pub use priority::priority;
pub use round_robin::round_robin;
pub use sjf::sjf;
pub use srtf::srtf;

/// Copia el conjunto ordenándolo por llegada (empates por PID).
fn by_arrival(processes: &[Process]) -> Vec<Process> {
    let mut sorted = processes.to_vec();
    sorted.sort_by_key(|p| (p.arrival_time, p.pid));
    sorted
}

/// Menor instante de llegada entre los procesos dados.
fn earliest_arrival<'a>(processes: impl IntoIterator<Item = &'a Process>) -> Option<Time> {
    processes.into_iter().map(|p| p.arrival_time).min()
}

/// Ejecuta `process` sin interrupción desde `clock` y lo agrega al resultado.
fn run_to_completion(mut process: Process, clock: &mut Time, schedule: &mut Schedule) {
    let start = *clock;
    let end = timeline::completion_time(&process, start);

    schedule.record(process.pid, start, end);
    process.finalize(end);
    *clock = end;

    debug!(
        pid = process.pid,
        start,
        end,
        waiting = process.waiting_time,
        "proceso {} completado",
        process.pid
    );
    schedule.complete(process);
}

/// Ejecuta el proceso transitorio si su instante de disparo ya llegó.
///
/// El proceso se admite en el instante actual (su llegada se fija en
/// `clock`), por lo que no acumula espera.
fn absorb_transient<R: Rng>(
    event: &mut TransientEvent<R>,
    clock: &mut Time,
    schedule: &mut Schedule,
) {
    if let Some(mut transient) = event.poll(*clock) {
        transient.arrival_time = *clock;
        debug!(pid = transient.pid, clock = *clock, "iniciando proceso transitorio");
        run_to_completion(transient, clock, schedule);
    }
}

/// Bucle común de SJF y Prioridad.
///
/// Entre los procesos ya llegados elige el de menor `key`, con empates por
/// llegada y luego por PID, y lo ejecuta hasta terminar. Si ninguno llegó,
/// adelanta el reloj a la próxima llegada.
fn run_non_preemptive<R, K, F>(
    processes: &[Process],
    event: &mut TransientEvent<R>,
    key: F,
) -> Schedule
where
    R: Rng,
    K: Ord,
    F: Fn(&Process) -> K,
{
    let mut remaining = by_arrival(processes);
    let mut schedule = Schedule::with_capacity(remaining.len() + 1);
    let mut clock: Time = 0;

    while !remaining.is_empty() {
        absorb_transient(event, &mut clock, &mut schedule);

        let selected = remaining
            .iter()
            .enumerate()
            .filter(|&(_, p)| p.has_arrived(clock))
            .min_by_key(|&(_, p)| (key(p), p.arrival_time, p.pid))
            .map(|(index, _)| index);

        let Some(index) = selected else {
            if let Some(next) = earliest_arrival(&remaining) {
                debug!(from = clock, to = next, "procesador ocioso");
                clock = next;
            }
            continue;
        };

        let process = remaining.remove(index);
        debug!(pid = process.pid, clock, "iniciando proceso {}", process.pid);
        run_to_completion(process, &mut clock, &mut schedule);
    }

    schedule
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::process::{Pid, Process, Time};
    use crate::timeline::Schedule;
    use crate::transient::TransientEvent;

    pub fn no_event() -> TransientEvent<StdRng> {
        TransientEvent::disabled(StdRng::seed_from_u64(0))
    }

    pub fn event_at(pid: Pid, trigger: Time) -> TransientEvent<StdRng> {
        TransientEvent::with_trigger(StdRng::seed_from_u64(99), pid, trigger)
    }

    pub fn find(schedule: &Schedule, pid: Pid) -> &Process {
        schedule
            .completed
            .iter()
            .find(|p| p.pid == pid)
            .expect("proceso ausente del resultado")
    }

    /// Comprueba las invariantes comunes de cualquier resultado.
    pub fn assert_consistent(input: &[Process], schedule: &Schedule) {
        for process in &schedule.completed {
            assert!(process.is_completed());
            assert_eq!(
                process.turnaround_time,
                process.completion_time - process.arrival_time
            );
            assert_eq!(process.waiting_time, process.turnaround_time - process.duration);
            assert_eq!(schedule.busy_time(process.pid), process.duration);
        }
        for original in input {
            let count = schedule
                .completed
                .iter()
                .filter(|p| p.pid == original.pid)
                .count();
            assert_eq!(count, 1, "proceso {} debe aparecer una vez", original.pid);
        }
        // El procesador nunca ejecuta dos rebanadas a la vez
        for pair in schedule.slices.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_by_arrival_breaks_ties_by_pid() {
        let processes = vec![
            Process::new(3, 2, 1, 1),
            Process::new(2, 0, 1, 1),
            Process::new(1, 2, 1, 1),
        ];
        let order: Vec<_> = by_arrival(&processes).iter().map(|p| p.pid).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn test_transient_runs_at_current_clock() {
        let mut schedule = Schedule::default();
        let mut event = event_at(50, 4);
        let mut clock = 6;

        absorb_transient(&mut event, &mut clock, &mut schedule);

        let transient = find(&schedule, 50);
        assert_eq!(transient.arrival_time, 6);
        assert_eq!(transient.waiting_time, 0);
        assert_eq!(clock, 6 + transient.duration);

        // No se vuelve a disparar
        absorb_transient(&mut event, &mut clock, &mut schedule);
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_non_preemptive_idle_skip() {
        let processes = vec![Process::new(1, 3, 2, 1)];
        let schedule = run_non_preemptive(&processes, &mut no_event(), |p| p.duration);

        let process = find(&schedule, 1);
        assert_eq!(process.completion_time, 5);
        assert_eq!(process.waiting_time, 0);
    }
}
