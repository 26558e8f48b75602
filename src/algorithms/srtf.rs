use rand::Rng;
use tracing::debug;

use super::{absorb_transient, by_arrival, earliest_arrival, run_to_completion};
use crate::process::{Process, Time};
use crate::timeline::Schedule;
use crate::transient::TransientEvent;

/// Shortest Remaining Time First: preemptivo.
///
/// En cada punto de decisión elige, entre los procesos llegados, el de menor
/// tiempo restante (empates por llegada y luego por PID). Si antes de que
/// termine llega otro proceso, se interrumpe en esa llegada, se descuenta lo
/// ejecutado y se vuelve a decidir.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use cpu_scheduling_simulator::{algorithms, Process, TransientEvent};
///
/// let processes = vec![Process::new(1, 0, 8, 1), Process::new(2, 4, 2, 1)];
/// let mut event = TransientEvent::disabled(StdRng::seed_from_u64(0));
///
/// let schedule = algorithms::srtf(&processes, &mut event);
/// assert_eq!(schedule.completion_order(), vec![2, 1]);
/// assert_eq!(schedule.completed[1].completion_time, 10);
/// ```
pub fn srtf<R: Rng>(processes: &[Process], event: &mut TransientEvent<R>) -> Schedule {
    let mut remaining = by_arrival(processes);
    let mut schedule = Schedule::with_capacity(remaining.len() + 1);
    let mut clock: Time = 0;

    while !remaining.is_empty() {
        absorb_transient(event, &mut clock, &mut schedule);

        let selected = remaining
            .iter()
            .enumerate()
            .filter(|&(_, p)| p.has_arrived(clock))
            .min_by_key(|&(_, p)| (p.remaining_duration, p.arrival_time, p.pid))
            .map(|(index, _)| index);

        let Some(index) = selected else {
            if let Some(next) = earliest_arrival(&remaining) {
                debug!(from = clock, to = next, "procesador ocioso");
                clock = next;
            }
            continue;
        };

        let next_arrival = earliest_arrival(remaining.iter().filter(|p| !p.has_arrived(clock)));
        let finish = clock + remaining[index].remaining_duration;

        match next_arrival {
            Some(boundary) if boundary < finish => {
                let process = &mut remaining[index];
                let slice = boundary - clock;

                schedule.record(process.pid, clock, boundary);
                process.remaining_duration -= slice;
                clock = boundary;

                debug!(
                    pid = process.pid,
                    clock,
                    remaining = process.remaining_duration,
                    "proceso {} interrumpido",
                    process.pid
                );
            }
            _ => {
                let process = remaining.remove(index);
                debug!(
                    pid = process.pid,
                    clock,
                    remaining = process.remaining_duration,
                    "iniciando/reanudando proceso {}",
                    process.pid
                );
                run_to_completion(process, &mut clock, &mut schedule);
            }
        }
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_srtf_preempts_on_shorter_arrival() {
        let processes = vec![Process::new(1, 0, 8, 1), Process::new(2, 4, 2, 1)];
        let schedule = srtf(&processes, &mut no_event());

        let p1 = find(&schedule, 1);
        let p2 = find(&schedule, 2);
        assert_eq!(p2.completion_time, 6);
        assert_eq!(p2.turnaround_time, 2);
        assert_eq!(p2.waiting_time, 0);
        assert_eq!(p1.completion_time, 10);
        assert_eq!(p1.turnaround_time, 10);
        assert_eq!(p1.waiting_time, 2);

        // P1 0-4, P2 4-6, P1 6-10
        let pids: Vec<_> = schedule.slices.iter().map(|s| (s.pid, s.start, s.end)).collect();
        assert_eq!(pids, vec![(1, 0, 4), (2, 4, 6), (1, 6, 10)]);
        assert_consistent(&processes, &schedule);
    }

    #[test]
    fn test_srtf_keeps_running_when_arrival_is_longer() {
        // P2 llega en 2 con 9 > 4 restantes de P1: P1 continúa
        let processes = vec![Process::new(1, 0, 6, 1), Process::new(2, 2, 9, 1)];
        let schedule = srtf(&processes, &mut no_event());

        assert_eq!(schedule.completion_order(), vec![1, 2]);
        assert_eq!(find(&schedule, 1).completion_time, 6);
        assert_eq!(find(&schedule, 2).completion_time, 15);
        // La rebanada interrumpida en 2 se fusiona con la siguiente
        assert_eq!(schedule.slices.len(), 2);
        assert_consistent(&processes, &schedule);
    }

    #[test]
    fn test_srtf_idle_then_arrivals() {
        let processes = vec![
            Process::new(1, 3, 5, 1),
            Process::new(2, 4, 1, 1),
            Process::new(3, 20, 2, 1),
        ];
        let schedule = srtf(&processes, &mut no_event());

        assert_eq!(find(&schedule, 2).completion_time, 5);
        assert_eq!(find(&schedule, 1).completion_time, 9);
        assert_eq!(find(&schedule, 3).completion_time, 22);
        assert_eq!(find(&schedule, 3).waiting_time, 0);
        assert_consistent(&processes, &schedule);
    }

    #[test]
    fn test_srtf_transient_interrupts_once() {
        let processes = vec![Process::new(1, 0, 10, 1), Process::new(2, 6, 3, 1)];
        let schedule = srtf(&processes, &mut event_at(7, 5));

        // P1 corre 0-6 (interrumpido por la llegada de P2); en 6 se dispara el transitorio
        let transient = find(&schedule, 7);
        assert_eq!(transient.arrival_time, 6);
        assert_eq!(transient.waiting_time, 0);
        assert_eq!(schedule.slices[1].pid, 7);
        assert_eq!(schedule.len(), 3);
        assert_consistent(&processes, &schedule);
    }
}
