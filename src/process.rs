//! # Módulo de Procesos
//!
//! Este módulo define el registro de proceso que consumen todos los
//! algoritmos: sus atributos estáticos (llegada, duración, prioridad) y el
//! estado mutable que cada ejecución rellena al finalizarlo.

use std::fmt;

use crate::timeline;

/// Instante o intervalo del reloj simulado, en unidades de tiempo.
pub type Time = u64;

/// Identificador de proceso.
pub type Pid = u32;

/// Representa un proceso (unidad de trabajo) en la simulación.
///
/// Los atributos estáticos se fijan al crearlo. El estado de simulación se
/// inicializa en cero y solo se completa una vez, cuando el algoritmo
/// determina que el proceso terminó su última ráfaga.
///
/// Cada algoritmo trabaja sobre sus propias copias (`Clone`), de modo que
/// ninguna ejecución comparte estado mutable con otra.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    /// Identificador único dentro de una ejecución
    pub pid: Pid,
    /// Instante en que el proceso puede empezar a ejecutarse
    pub arrival_time: Time,
    /// Tiempo total de CPU requerido (> 0)
    pub duration: Time,
    /// Prioridad (menor valor = mayor prioridad)
    pub priority: u32,
    /// Tiempo de CPU que aún le falta
    pub remaining_duration: Time,
    /// Instante de finalización
    pub completion_time: Time,
    /// Finalización menos llegada
    pub turnaround_time: Time,
    /// Turnaround menos duración
    pub waiting_time: Time,
}

impl Process {
    /// Crea un nuevo proceso con el estado de simulación en cero.
    ///
    /// # Arguments
    ///
    /// * `pid` - Identificador del proceso
    /// * `arrival_time` - Instante de llegada
    /// * `duration` - Tiempo total de CPU requerido
    /// * `priority` - Prioridad (1 = más alta)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::Process;
    ///
    /// let process = Process::new(1, 4, 6, 2);
    /// assert_eq!(process.remaining_duration, 6);
    /// assert_eq!(process.completion_time, 0);
    /// ```
    pub fn new(pid: Pid, arrival_time: Time, duration: Time, priority: u32) -> Self {
        Self {
            pid,
            arrival_time,
            duration,
            priority,
            remaining_duration: duration,
            completion_time: 0,
            turnaround_time: 0,
            waiting_time: 0,
        }
    }

    /// Indica si el proceso ya llegó en el instante dado.
    pub fn has_arrived(&self, clock: Time) -> bool {
        self.arrival_time <= clock
    }

    /// Marca el proceso como terminado en `completion_time`.
    ///
    /// Deja el tiempo restante en cero y calcula turnaround y espera con
    /// las utilidades de `timeline`.
    pub fn finalize(&mut self, completion_time: Time) {
        self.remaining_duration = 0;
        self.completion_time = completion_time;
        self.turnaround_time = timeline::turnaround_time(self);
        self.waiting_time = timeline::waiting_time(self);
    }

    /// Indica si el proceso ya fue finalizado.
    pub fn is_completed(&self) -> bool {
        self.remaining_duration == 0
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Proceso({}, llegada {}, duración {}, prioridad {})",
            self.pid, self.arrival_time, self.duration, self.priority
        )
    }
}

/// Calcula un PID libre para el conjunto dado (máximo + 1).
///
/// Funciona aunque los PIDs cargados no sean contiguos.
pub fn next_free_pid(processes: &[Process]) -> Pid {
    processes.iter().map(|p| p.pid).max().map_or(1, |max| max + 1)
}
