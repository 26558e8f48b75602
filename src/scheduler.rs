//! # Módulo de Selección de Algoritmo
//!
//! Este módulo define los algoritmos de planificación disponibles y despacha
//! cada uno hacia su rutina de simulación en `algorithms`.

use std::fmt;

use rand::Rng;

use crate::algorithms;
use crate::error::SimulationError;
use crate::process::{Process, Time};
use crate::timeline::Schedule;
use crate::transient::TransientEvent;

/// Algoritmos de planificación disponibles.
///
/// Cada algoritmo define una estrategia diferente para ordenar los procesos:
/// - FCFS, SJF y Prioridad ejecutan cada proceso hasta terminar
/// - SRTF y Round Robin pueden interrumpir al proceso en ejecución
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulingAlgorithm {
    /// First-Come First-Served: orden de llegada, no preemptivo.
    Fcfs,

    /// Shortest Job First: menor duración entre los llegados, no preemptivo.
    Sjf,

    /// Menor valor de prioridad entre los llegados, no preemptivo.
    Priority,

    /// Shortest Remaining Time First: menor tiempo restante, preemptivo en
    /// cada llegada.
    Srtf,

    /// Round Robin: preemptivo con quantum fijo.
    ///
    /// Los procesos se atienden en rondas, donde cada uno recibe un quantum
    /// antes de volver al final de la cola si no ha terminado.
    RoundRobin {
        /// Tiempo máximo de ejecución continua por turno
        quantum: Time,
    },
}

impl SchedulingAlgorithm {
    /// Crea un algoritmo Round Robin con el quantum especificado.
    ///
    /// El quantum se valida al ejecutar: 0 produce
    /// `SimulationError::InvalidQuantum`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// let algorithm = SchedulingAlgorithm::round_robin(2);
    /// assert_eq!(algorithm.quantum(), Some(2));
    /// ```
    pub fn round_robin(quantum: Time) -> Self {
        Self::RoundRobin { quantum }
    }

    /// Los cinco algoritmos, en el orden en que se comparan.
    pub fn all(quantum: Time) -> Vec<Self> {
        vec![
            Self::Fcfs,
            Self::Sjf,
            Self::Priority,
            Self::Srtf,
            Self::round_robin(quantum),
        ]
    }

    /// Índice fijo del algoritmo, usado para derivar su semilla.
    pub fn index(&self) -> u64 {
        match self {
            Self::Fcfs => 0,
            Self::Sjf => 1,
            Self::Priority => 2,
            Self::Srtf => 3,
            Self::RoundRobin { .. } => 4,
        }
    }

    /// Determina si el algoritmo es preemptivo.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// assert!(!SchedulingAlgorithm::Sjf.is_preemptive());
    /// assert!(SchedulingAlgorithm::Srtf.is_preemptive());
    /// ```
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::Srtf | Self::RoundRobin { .. })
    }

    /// Obtiene el quantum configurado para Round Robin.
    pub fn quantum(&self) -> Option<Time> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Nombre corto usado en reportes y tablas.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Priority => "Prioridad",
            Self::Srtf => "SRTF",
            Self::RoundRobin { .. } => "Round Robin",
        }
    }

    /// Obtiene una descripción textual del algoritmo.
    pub fn description(&self) -> String {
        match self {
            Self::Fcfs => "First-Come First-Served (no preemptivo)".to_string(),
            Self::Sjf => "Shortest Job First (no preemptivo)".to_string(),
            Self::Priority => "Prioridad (no preemptivo, 1 = más alta)".to_string(),
            Self::Srtf => "Shortest Remaining Time First (preemptivo)".to_string(),
            Self::RoundRobin { quantum } => {
                format!("Round Robin preemptivo (quantum: {})", quantum)
            }
        }
    }

    /// Ejecuta el algoritmo sobre una copia de `processes`.
    ///
    /// # Arguments
    ///
    /// * `processes` - Conjunto inicial; no se modifica
    /// * `event` - Inyector transitorio propio de esta ejecución
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidQuantum` si es Round Robin con quantum 0.
    pub fn schedule<R: Rng>(
        &self,
        processes: &[Process],
        event: &mut TransientEvent<R>,
    ) -> Result<Schedule, SimulationError> {
        match self {
            Self::Fcfs => Ok(algorithms::fcfs(processes, event)),
            Self::Sjf => Ok(algorithms::sjf(processes, event)),
            Self::Priority => Ok(algorithms::priority(processes, event)),
            Self::Srtf => Ok(algorithms::srtf(processes, event)),
            Self::RoundRobin { quantum } => algorithms::round_robin(processes, *quantum, event),
        }
    }
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "Round Robin (quantum {})", quantum),
            other => write!(f, "{}", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_round_robin_creation() {
        let algorithm = SchedulingAlgorithm::round_robin(4);

        match algorithm {
            SchedulingAlgorithm::RoundRobin { quantum } => assert_eq!(quantum, 4),
            _ => panic!("Expected RoundRobin variant"),
        }

        assert!(algorithm.is_preemptive());
        assert_eq!(SchedulingAlgorithm::Fcfs.quantum(), None);
    }

    #[test]
    fn test_all_has_distinct_indices() {
        let all = SchedulingAlgorithm::all(2);
        assert_eq!(all.len(), 5);

        let indices: HashSet<u64> = all.iter().map(SchedulingAlgorithm::index).collect();
        assert_eq!(indices.len(), 5);
        assert!(indices.iter().all(|&index| index < 5));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SchedulingAlgorithm::Fcfs), "FCFS");
        assert_eq!(format!("{}", SchedulingAlgorithm::Priority), "Prioridad");
        assert_eq!(
            format!("{}", SchedulingAlgorithm::round_robin(2)),
            "Round Robin (quantum 2)"
        );
    }

    #[test]
    fn test_schedule_dispatch() {
        let processes = vec![Process::new(1, 0, 3, 1)];

        for algorithm in SchedulingAlgorithm::all(2) {
            let mut event = TransientEvent::disabled(StdRng::seed_from_u64(0));
            let schedule = algorithm.schedule(&processes, &mut event).unwrap();
            assert_eq!(schedule.completed[0].completion_time, 3, "{}", algorithm);
        }

        let mut event = TransientEvent::disabled(StdRng::seed_from_u64(0));
        let result = SchedulingAlgorithm::round_robin(0).schedule(&processes, &mut event);
        assert!(result.is_err());
    }
}
