//! # Módulo de Generación de Procesos
//!
//! Genera el conjunto inicial de procesos sintéticos con atributos
//! uniformemente aleatorios dentro de los rangos de `config`.

use rand::Rng;
use tracing::debug;

use crate::config;
use crate::process::{Pid, Process};

/// Genera `count` procesos con PIDs `1..=count`.
///
/// # Arguments
///
/// * `count` - Cantidad de procesos
/// * `rng` - Generador aleatorio (con semilla para reproducir el conjunto)
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use cpu_scheduling_simulator::generator;
///
/// let processes = generator::generate_processes(13, &mut StdRng::seed_from_u64(3));
/// assert_eq!(processes.len(), 13);
/// assert_eq!(processes[12].pid, 13);
/// ```
pub fn generate_processes<R: Rng>(count: usize, rng: &mut R) -> Vec<Process> {
    let processes: Vec<Process> = (1..=count as Pid)
        .map(|pid| {
            let arrival_time = rng.gen_range(config::ARRIVAL_RANGE);
            let duration = rng.gen_range(config::DURATION_RANGE);
            let priority = rng.gen_range(config::PRIORITY_RANGE);
            Process::new(pid, arrival_time, duration, priority)
        })
        .collect();

    debug!(count = processes.len(), "procesos generados");
    processes
}
