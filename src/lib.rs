//! # Simulador de Planificación de CPU
//!
//! Esta biblioteca implementa un simulador de eventos discretos que compara
//! cinco algoritmos clásicos de planificación de CPU sobre un mismo conjunto
//! de procesos sintéticos, ejecutados en un único procesador con un reloj
//! simulado.
//!
//! ## Características principales
//!
//! - **Algoritmos de scheduling**: FCFS, SJF, Prioridad (no preemptivos),
//!   SRTF (preemptivo) y Round Robin con quantum configurable.
//! - **Evento transitorio**: cada ejecución absorbe una llegada imprevista
//!   de un proceso adicional en un instante aleatorio.
//! - **Reproducibilidad**: toda la aleatoriedad proviene de generadores con
//!   semilla inyectados explícitamente.
//! - **Métricas comparativas**: tiempos de finalización, espera y turnaround
//!   por proceso, con promedios por algoritmo y una tabla comparativa.
//!
//! ## Estructura del proyecto
//!
//! - `process`: Registro de proceso y su estado de simulación
//! - `timeline`: Cálculos de tiempos y traza de ejecución
//! - `transient`: Inyector del evento transitorio
//! - `algorithms`: Los cinco algoritmos de planificación
//! - `scheduler`: Selección y despacho del algoritmo
//! - `metrics`: Cálculo de promedios, comparación y reportes
//! - `generator`: Generación aleatoria del conjunto inicial
//! - `persistence`: Lectura y escritura del archivo de procesos
//! - `simulation`: Coordinación de las ejecuciones
//! - `error`: Errores del simulador

pub mod algorithms;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod persistence;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod timeline;
pub mod transient;

// Re-exportar las estructuras principales para facilitar su uso
pub use error::SimulationError;
pub use metrics::{Averages, Comparison, MetricsCalculator, RunMetrics};
pub use process::{Pid, Process, Time};
pub use scheduler::SchedulingAlgorithm;
pub use simulation::Simulation;
pub use timeline::{ExecutionSlice, Schedule};
pub use transient::TransientEvent;

/// Configuración por defecto del simulador
pub mod config {
    use std::ops::RangeInclusive;
    use std::path::PathBuf;

    use crate::error::SimulationError;
    use crate::process::Time;

    /// Número de procesos generados cuando no existe el archivo
    pub const PROCESS_COUNT: usize = 13;

    /// Archivo donde se persiste el conjunto de procesos
    pub const PROCESSES_FILE: &str = "processes.csv";

    /// Quantum por defecto para Round Robin (en unidades de tiempo)
    pub const DEFAULT_QUANTUM: Time = 2;

    /// Rango de tiempos de llegada generados
    pub const ARRIVAL_RANGE: RangeInclusive<Time> = 0..=10;

    /// Rango de duraciones generadas (también usado por el evento transitorio)
    pub const DURATION_RANGE: RangeInclusive<Time> = 1..=10;

    /// Rango de prioridades (1 = más alta)
    pub const PRIORITY_RANGE: RangeInclusive<u32> = 1..=5;

    /// Rango del instante de disparo del evento transitorio
    pub const TRIGGER_RANGE: RangeInclusive<Time> = 5..=15;

    /// Variable de entorno con la semilla maestra
    pub const SEED_ENV_VAR: &str = "CPU_SCHED_SEED";

    /// Parámetros de una sesión completa de simulación.
    #[derive(Clone, Debug, PartialEq)]
    pub struct SimulationConfig {
        /// Cantidad de procesos a generar si no hay archivo
        pub process_count: usize,
        /// Quantum de Round Robin
        pub quantum: Time,
        /// Semilla maestra; `None` usa entropía del sistema
        pub seed: Option<u64>,
        /// Ruta del archivo de procesos
        pub processes_file: PathBuf,
    }

    impl SimulationConfig {
        /// Configuración por defecto, con la semilla tomada de `CPU_SCHED_SEED`.
        ///
        /// # Errors
        ///
        /// `SimulationError::InvalidSeed` si la variable existe pero no es un `u64`.
        pub fn from_env() -> Result<Self, SimulationError> {
            let seed = match std::env::var(SEED_ENV_VAR) {
                Ok(value) => Some(parse_seed(&value)?),
                Err(_) => None,
            };
            Ok(Self {
                seed,
                ..Self::default()
            })
        }

        /// Semilla configurada, o una nueva tomada de la entropía del sistema.
        pub fn resolved_seed(&self) -> u64 {
            self.seed.unwrap_or_else(rand::random)
        }
    }

    impl Default for SimulationConfig {
        fn default() -> Self {
            Self {
                process_count: PROCESS_COUNT,
                quantum: DEFAULT_QUANTUM,
                seed: None,
                processes_file: PathBuf::from(PROCESSES_FILE),
            }
        }
    }

    /// Interpreta una semilla en texto.
    pub fn parse_seed(value: &str) -> Result<u64, SimulationError> {
        value
            .trim()
            .parse()
            .map_err(|_| SimulationError::InvalidSeed(value.to_string()))
    }

}
