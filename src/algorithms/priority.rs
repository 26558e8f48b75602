use rand::Rng;

use super::run_non_preemptive;
use crate::process::Process;
use crate::timeline::Schedule;
use crate::transient::TransientEvent;

/// Planificación por prioridad, no preemptiva.
///
/// Entre los procesos llegados elige el de menor valor de prioridad
/// (1 = más alta); empates por llegada y luego por PID. Un proceso en
/// ejecución no se interrumpe aunque llegue otro más prioritario.
pub fn priority<R: Rng>(processes: &[Process], event: &mut TransientEvent<R>) -> Schedule {
    run_non_preemptive(processes, event, |p| p.priority)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_priority_order() {
        let processes = vec![
            Process::new(1, 0, 3, 3),
            Process::new(2, 1, 2, 1),
            Process::new(3, 1, 4, 2),
            Process::new(4, 2, 1, 1),
        ];
        let schedule = priority(&processes, &mut no_event());

        // P1 es el único en 0; luego P2 y P4 (prioridad 1, P2 llegó antes), después P3
        assert_eq!(schedule.completion_order(), vec![1, 2, 4, 3]);
        assert_eq!(find(&schedule, 2).completion_time, 5);
        assert_eq!(find(&schedule, 4).completion_time, 6);
        assert_eq!(find(&schedule, 3).completion_time, 10);
        assert_eq!(find(&schedule, 3).waiting_time, 5);
        assert_consistent(&processes, &schedule);
    }

    #[test]
    fn test_priority_is_not_preemptive() {
        let processes = vec![Process::new(1, 0, 6, 5), Process::new(2, 2, 1, 1)];
        let schedule = priority(&processes, &mut no_event());

        assert_eq!(schedule.completion_order(), vec![1, 2]);
        assert_eq!(find(&schedule, 2).waiting_time, 4);
    }

    #[test]
    fn test_priority_transient_ignores_priority() {
        let processes = vec![Process::new(1, 0, 5, 1), Process::new(2, 0, 5, 1)];
        let schedule = priority(&processes, &mut event_at(9, 5));

        // El transitorio corre en 5 aunque su prioridad sea peor
        assert_eq!(schedule.completion_order(), vec![1, 9, 2]);
        assert_consistent(&processes, &schedule);
    }
}
