//! # Módulo de Evento Transitorio
//!
//! Simula la llegada imprevista de un proceso adicional durante una
//! ejecución. Cada ejecución recibe su propio `TransientEvent`, con su propio
//! generador aleatorio y un instante de disparo elegido una sola vez.

use rand::Rng;
use tracing::info;

use crate::config;
use crate::process::{Pid, Process, Time};

/// Inyector de la llegada transitoria de una ejecución.
///
/// Se dispara como máximo una vez: la primera vez que el reloj del algoritmo
/// alcanza o supera el instante de disparo. El algoritmo es dueño del
/// proceso devuelto y decide cómo insertarlo.
#[derive(Debug)]
pub struct TransientEvent<R> {
    /// Instante de disparo pendiente; `None` si ya se disparó o está deshabilitado
    trigger_time: Option<Time>,
    /// PID reservado para el proceso transitorio
    pid: Pid,
    /// PID del proceso ya inyectado
    injected: Option<Pid>,
    rng: R,
}

impl<R: Rng> TransientEvent<R> {
    /// Crea un inyector con un instante de disparo aleatorio.
    ///
    /// # Arguments
    ///
    /// * `rng` - Generador propio de esta ejecución
    /// * `pid` - PID disjunto de todos los existentes
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use cpu_scheduling_simulator::TransientEvent;
    ///
    /// let event = TransientEvent::new(StdRng::seed_from_u64(7), 14);
    /// let trigger = event.trigger_time().unwrap();
    /// assert!((5..=15).contains(&trigger));
    /// ```
    pub fn new(mut rng: R, pid: Pid) -> Self {
        let trigger_time = rng.gen_range(config::TRIGGER_RANGE);
        Self::with_trigger(rng, pid, trigger_time)
    }

    /// Crea un inyector con un instante de disparo fijo.
    pub fn with_trigger(rng: R, pid: Pid, trigger_time: Time) -> Self {
        Self {
            trigger_time: Some(trigger_time),
            pid,
            injected: None,
            rng,
        }
    }

    /// Crea un inyector que nunca se dispara.
    pub fn disabled(rng: R) -> Self {
        Self {
            trigger_time: None,
            pid: 0,
            injected: None,
            rng,
        }
    }

    /// Instante de disparo pendiente, si lo hay.
    pub fn trigger_time(&self) -> Option<Time> {
        self.trigger_time
    }

    /// PID del proceso transitorio si ya se disparó.
    pub fn injected_pid(&self) -> Option<Pid> {
        self.injected
    }

    /// Comprueba el disparo en el instante `clock`.
    ///
    /// Devuelve el proceso transitorio la primera vez que `clock` alcanza el
    /// instante de disparo, con llegada `clock + 1`, duración y prioridad
    /// aleatorias. Después siempre devuelve `None`.
    pub fn poll(&mut self, clock: Time) -> Option<Process> {
        let trigger_time = self.trigger_time?;
        if clock < trigger_time {
            return None;
        }
        self.trigger_time = None;
        self.injected = Some(self.pid);

        let duration = self.rng.gen_range(config::DURATION_RANGE);
        let priority = self.rng.gen_range(config::PRIORITY_RANGE);
        let process = Process::new(self.pid, clock + 1, duration, priority);

        info!(
            pid = process.pid,
            clock,
            duration,
            priority,
            "llegada transitoria del proceso {}",
            process.pid
        );

        Some(process)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fires_once_at_trigger() {
        let mut event = TransientEvent::with_trigger(StdRng::seed_from_u64(1), 20, 6);

        assert!(event.poll(5).is_none());

        let process = event.poll(8).expect("debe dispararse al superar el instante");
        assert_eq!(process.pid, 20);
        assert_eq!(process.arrival_time, 9);
        assert!(config::DURATION_RANGE.contains(&process.duration));
        assert!(config::PRIORITY_RANGE.contains(&process.priority));
        assert_eq!(process.remaining_duration, process.duration);

        // Solo una vez por ejecución
        assert!(event.poll(8).is_none());
        assert!(event.poll(100).is_none());
        assert!(event.trigger_time().is_none());
        assert_eq!(event.injected_pid(), Some(20));
    }

    #[test]
    fn test_disabled_never_fires() {
        let mut event = TransientEvent::disabled(StdRng::seed_from_u64(1));
        assert!(event.poll(0).is_none());
        assert!(event.poll(1_000).is_none());
        assert!(event.injected_pid().is_none());
    }

    #[test]
    fn test_same_seed_same_event() {
        let mut a = TransientEvent::new(StdRng::seed_from_u64(42), 5);
        let mut b = TransientEvent::new(StdRng::seed_from_u64(42), 5);
        assert_eq!(a.trigger_time(), b.trigger_time());
        assert_eq!(a.poll(50), b.poll(50));
    }
}
