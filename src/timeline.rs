//! # Módulo de Línea de Tiempo
//!
//! Funciones puras para calcular los tiempos de un proceso a partir del
//! reloj simulado, y la traza de ejecución (`Schedule`) que cada algoritmo
//! construye mientras avanza.

use crate::process::{Pid, Process, Time};

/// Instante en que terminaría el proceso si se ejecuta ahora sin interrupción.
///
/// Para los algoritmos no preemptivos el tiempo restante coincide con la
/// duración total.
///
/// # Examples
///
/// ```rust
/// use cpu_scheduling_simulator::{timeline, Process};
///
/// let process = Process::new(1, 0, 4, 1);
/// assert_eq!(timeline::completion_time(&process, 3), 7);
/// ```
pub fn completion_time(process: &Process, current_time: Time) -> Time {
    current_time + process.remaining_duration
}

/// Turnaround: finalización menos llegada.
pub fn turnaround_time(process: &Process) -> Time {
    debug_assert!(
        process.completion_time >= process.arrival_time,
        "proceso {} termina antes de llegar",
        process.pid
    );
    process.completion_time.saturating_sub(process.arrival_time)
}

/// Espera: turnaround menos duración.
///
/// Los huecos ociosos previos a la llegada no cuentan como espera.
pub fn waiting_time(process: &Process) -> Time {
    let turnaround = turnaround_time(process);
    debug_assert!(
        turnaround >= process.duration,
        "proceso {} con turnaround menor que su duración",
        process.pid
    );
    turnaround.saturating_sub(process.duration)
}

/// Intervalo `[start, end)` en el que un proceso ocupó el procesador.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionSlice {
    pub pid: Pid,
    pub start: Time,
    pub end: Time,
}

impl ExecutionSlice {
    /// Longitud del intervalo.
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// Resultado de una ejecución: procesos completados y traza de rebanadas.
///
/// Los procesos aparecen en `completed` en orden de finalización. Las
/// rebanadas contiguas del mismo proceso se fusionan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Procesos finalizados, en orden de finalización
    pub completed: Vec<Process>,
    /// Rebanadas de ejecución en orden cronológico
    pub slices: Vec<ExecutionSlice>,
}

impl Schedule {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            completed: Vec::with_capacity(capacity),
            slices: Vec::with_capacity(capacity),
        }
    }

    /// Registra que `pid` ocupó el procesador entre `start` y `end`.
    pub fn record(&mut self, pid: Pid, start: Time, end: Time) {
        if end <= start {
            return;
        }
        match self.slices.last_mut() {
            Some(last) if last.pid == pid && last.end == start => last.end = end,
            _ => self.slices.push(ExecutionSlice { pid, start, end }),
        }
    }

    /// Agrega un proceso ya finalizado al resultado.
    pub fn complete(&mut self, process: Process) {
        debug_assert!(process.is_completed());
        self.completed.push(process);
    }

    /// PIDs en el orden en que terminaron.
    pub fn completion_order(&self) -> Vec<Pid> {
        self.completed.iter().map(|p| p.pid).collect()
    }

    /// Tiempo total de CPU consumido por `pid` según la traza.
    pub fn busy_time(&self, pid: Pid) -> Time {
        self.slices
            .iter()
            .filter(|slice| slice.pid == pid)
            .map(ExecutionSlice::duration)
            .sum()
    }

    /// Instante en que termina el último proceso (0 si no hay procesos).
    pub fn makespan(&self) -> Time {
        self.completed
            .iter()
            .map(|p| p.completion_time)
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}
