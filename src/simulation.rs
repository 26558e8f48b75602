//! # Módulo de Simulación Principal
//!
//! Este módulo coordina las ejecuciones: cada algoritmo recibe su propia
//! copia del conjunto inicial y su propio inyector transitorio con semilla
//! derivada de la semilla maestra, de modo que una misma semilla reproduce
//! todas las ejecuciones.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config;
use crate::error::SimulationError;
use crate::metrics::{Comparison, MetricsCalculator, RunMetrics};
use crate::process::{self, Pid, Process, Time};
use crate::scheduler::SchedulingAlgorithm;
use crate::transient::TransientEvent;

/// Orquestador de las ejecuciones sobre un conjunto fijo de procesos.
///
/// La `Simulation` coordina:
/// - El conjunto inicial, que nunca se modifica
/// - La semilla de cada ejecución y su evento transitorio
/// - El cálculo de métricas y reportes
pub struct Simulation {
    /// Conjunto inicial de procesos
    processes: Vec<Process>,
    /// Quantum para Round Robin
    quantum: Time,
    /// Semilla maestra
    seed: u64,
    /// Calculadora de métricas para generar reportes
    metrics_calculator: MetricsCalculator,
}

impl Simulation {
    /// Crea una simulación con el quantum por defecto.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{Process, SchedulingAlgorithm, Simulation};
    ///
    /// let simulation = Simulation::new(vec![Process::new(1, 0, 4, 1)], 42);
    /// let metrics = simulation.run(&SchedulingAlgorithm::Fcfs).unwrap();
    /// assert_eq!(metrics.schedule.completed[0].completion_time, 4);
    /// ```
    pub fn new(processes: Vec<Process>, seed: u64) -> Self {
        Self::with_config(processes, config::DEFAULT_QUANTUM, seed)
    }

    /// Crea una simulación con quantum personalizado.
    pub fn with_config(processes: Vec<Process>, quantum: Time, seed: u64) -> Self {
        Self {
            processes,
            quantum,
            seed,
            metrics_calculator: MetricsCalculator::new(),
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Los cinco algoritmos con el quantum de esta simulación.
    pub fn algorithms(&self) -> Vec<SchedulingAlgorithm> {
        SchedulingAlgorithm::all(self.quantum)
    }

    /// PID reservado para el proceso transitorio.
    pub fn transient_pid(&self) -> Pid {
        process::next_free_pid(&self.processes)
    }

    /// Semilla de la ejecución de `algorithm`.
    pub fn run_seed(&self, algorithm: &SchedulingAlgorithm) -> u64 {
        self.seed.wrapping_add(1 + algorithm.index())
    }

    /// Inyector transitorio de la ejecución de `algorithm`.
    pub fn transient_event(&self, algorithm: &SchedulingAlgorithm) -> TransientEvent<StdRng> {
        let rng = StdRng::seed_from_u64(self.run_seed(algorithm));
        TransientEvent::new(rng, self.transient_pid())
    }

    /// Ejecuta un algoritmo con su inyector transitorio sembrado.
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidQuantum` si el quantum de Round Robin es 0.
    pub fn run(&self, algorithm: &SchedulingAlgorithm) -> Result<RunMetrics, SimulationError> {
        let mut event = self.transient_event(algorithm);
        info!(
            algorithm = %algorithm,
            trigger = ?event.trigger_time(),
            "iniciando ejecución"
        );
        self.run_with_event(algorithm, &mut event)
    }

    /// Ejecuta un algoritmo con un inyector provisto por el llamador.
    pub fn run_with_event<R: Rng>(
        &self,
        algorithm: &SchedulingAlgorithm,
        event: &mut TransientEvent<R>,
    ) -> Result<RunMetrics, SimulationError> {
        let schedule = algorithm.schedule(&self.processes, event)?;
        let metrics = self.metrics_calculator.calculate_run_metrics(
            algorithm.clone(),
            schedule,
            event.injected_pid(),
        );

        info!(
            algorithm = %algorithm,
            completed = metrics.schedule.len(),
            makespan = metrics.makespan,
            "ejecución completada"
        );
        Ok(metrics)
    }

    /// Ejecuta los cinco algoritmos en orden.
    pub fn run_all(&self) -> Result<Vec<RunMetrics>, SimulationError> {
        self.algorithms()
            .iter()
            .map(|algorithm| self.run(algorithm))
            .collect()
    }

    /// Genera la tabla comparativa de varias ejecuciones.
    pub fn compare(&self, runs: &[RunMetrics]) -> Comparison {
        self.metrics_calculator.compare(runs)
    }

    /// Genera un reporte detallado de una ejecución.
    pub fn generate_report(&self, metrics: &RunMetrics) -> String {
        self.metrics_calculator.generate_report(metrics)
    }

    /// Genera el reporte comparativo.
    pub fn generate_comparison_report(&self, comparison: &Comparison) -> String {
        self.metrics_calculator.generate_comparison_report(comparison)
    }

    /// Genera un reporte en formato CSV de una ejecución.
    pub fn generate_csv_report(&self, metrics: &RunMetrics) -> String {
        self.metrics_calculator.generate_csv_report(metrics)
    }
}
