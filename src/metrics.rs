//! # Módulo de Métricas y Reportes
//!
//! Este módulo reduce el resultado de cada algoritmo a estadísticas
//! resumidas, compara los algoritmos entre sí y genera los reportes de
//! texto y CSV.

use crate::process::{Pid, Process, Time};
use crate::scheduler::SchedulingAlgorithm;
use crate::timeline::Schedule;

/// Promedios de un conjunto de procesos completados.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Averages {
    /// Tiempo promedio de espera
    pub waiting: f64,
    /// Tiempo promedio de turnaround
    pub turnaround: f64,
}

/// Métricas de una ejecución de un algoritmo.
#[derive(Clone, Debug)]
pub struct RunMetrics {
    /// Algoritmo ejecutado
    pub algorithm: SchedulingAlgorithm,
    /// Procesos completados y traza de ejecución
    pub schedule: Schedule,
    /// Promedios; `None` si no hubo procesos
    pub averages: Option<Averages>,
    /// Instante en que terminó el último proceso
    pub makespan: Time,
    /// Procesos completados por unidad de tiempo; `None` si el makespan es 0
    pub throughput: Option<f64>,
    /// PID del proceso transitorio, si llegó a dispararse
    pub transient_pid: Option<Pid>,
}

/// Fila de la tabla comparativa.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonRow {
    pub algorithm: String,
    pub averages: Option<Averages>,
}

/// Tabla comparativa de promedios por algoritmo.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Algoritmo con menor espera promedio (ignora los que no tienen datos).
    pub fn best_by_waiting(&self) -> Option<&ComparisonRow> {
        self.rows
            .iter()
            .filter_map(|row| row.averages.map(|avg| (row, avg.waiting)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(row, _)| row)
    }
}

/// Calculadora de métricas para la simulación.
///
/// Proporciona métodos para calcular métricas por ejecución, compararlas y
/// generar reportes formateados de los resultados.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Crea una nueva instancia del calculador de métricas.
    pub fn new() -> Self {
        Self
    }

    /// Calcula los promedios de espera y turnaround.
    ///
    /// # Returns
    ///
    /// `None` si no hay procesos: no se divide por cero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::MetricsCalculator;
    ///
    /// assert!(MetricsCalculator::averages(&[]).is_none());
    /// ```
    pub fn averages(processes: &[Process]) -> Option<Averages> {
        if processes.is_empty() {
            return None;
        }

        let count = processes.len() as f64;
        let total_waiting: Time = processes.iter().map(|p| p.waiting_time).sum();
        let total_turnaround: Time = processes.iter().map(|p| p.turnaround_time).sum();

        Some(Averages {
            waiting: total_waiting as f64 / count,
            turnaround: total_turnaround as f64 / count,
        })
    }

    /// Calcula las métricas de una ejecución.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - Algoritmo que produjo el resultado
    /// * `schedule` - Resultado de la ejecución
    /// * `transient_pid` - PID del proceso transitorio, si se inyectó
    pub fn calculate_run_metrics(
        &self,
        algorithm: SchedulingAlgorithm,
        schedule: Schedule,
        transient_pid: Option<Pid>,
    ) -> RunMetrics {
        let averages = Self::averages(&schedule.completed);
        let makespan = schedule.makespan();
        let throughput = if makespan > 0 {
            Some(schedule.len() as f64 / makespan as f64)
        } else {
            None
        };
        RunMetrics {
            algorithm,
            schedule,
            averages,
            makespan,
            throughput,
            transient_pid,
        }
    }

    /// Reduce varias ejecuciones a la tabla comparativa.
    pub fn compare(&self, runs: &[RunMetrics]) -> Comparison {
        Comparison {
            rows: runs
                .iter()
                .map(|run| ComparisonRow {
                    algorithm: run.algorithm.to_string(),
                    averages: run.averages,
                })
                .collect(),
        }
    }

    /// Genera el reporte detallado de una ejecución.
    pub fn generate_report(&self, metrics: &RunMetrics) -> String {
        let mut report = String::new();

        report.push_str(&format!("\n--- {} ---\n", metrics.algorithm.description()));

        for process in &metrics.schedule.completed {
            let marker = if Some(process.pid) == metrics.transient_pid {
                " (transitorio)"
            } else {
                ""
            };
            report.push_str(&format!(
                "Proceso {}{} completado en t={}, Espera: {}, Turnaround: {}\n",
                process.pid,
                marker,
                process.completion_time,
                process.waiting_time,
                process.turnaround_time
            ));
        }

        report.push_str(&format!("Gantt: {}\n", Self::format_gantt(&metrics.schedule)));

        report.push_str(&format!("\n--- Resumen {} ---\n", metrics.algorithm.name()));
        match metrics.averages {
            Some(averages) => {
                report.push_str(&format!(
                    "Tiempo promedio de espera: {:.2}\n",
                    averages.waiting
                ));
                report.push_str(&format!(
                    "Tiempo promedio de turnaround: {:.2}\n",
                    averages.turnaround
                ));
            }
            None => {
                report.push_str("Tiempo promedio de espera: sin datos\n");
                report.push_str("Tiempo promedio de turnaround: sin datos\n");
            }
        }
        report.push_str(&format!("Makespan: {}\n", metrics.makespan));
        report.push_str(&format!(
            "Throughput: {}\n",
            metrics
                .throughput
                .map_or_else(|| "sin datos".to_string(), |t| format!("{:.3} procesos/unidad", t))
        ));
        report.push_str(&format!(
            "Orden de finalización: {:?}\n",
            metrics.schedule.completion_order()
        ));

        report
    }

    /// Genera la tabla comparativa final.
    pub fn generate_comparison_report(&self, comparison: &Comparison) -> String {
        let mut report = String::new();

        report.push_str(&format!("\n{:=^60}\n", "  COMPARACIÓN DE ALGORITMOS  "));
        report.push_str(&format!(
            "{:<26} {:>15} {:>17}\n",
            "Algoritmo", "Espera prom.", "Turnaround prom."
        ));
        report.push_str(&format!("{:-<60}\n", ""));

        for row in &comparison.rows {
            let (waiting, turnaround) = match row.averages {
                Some(avg) => (format!("{:.2}", avg.waiting), format!("{:.2}", avg.turnaround)),
                None => ("sin datos".to_string(), "sin datos".to_string()),
            };
            report.push_str(&format!(
                "{:<26} {:>15} {:>17}\n",
                row.algorithm, waiting, turnaround
            ));
        }

        report.push_str(&format!("{:=<60}\n", ""));
        if let Some(best) = comparison.best_by_waiting() {
            report.push_str(&format!("Menor espera promedio: {}\n", best.algorithm));
        }

        report
    }

    /// Genera el resultado de una ejecución en formato CSV.
    pub fn generate_csv_report(&self, metrics: &RunMetrics) -> String {
        let mut csv = String::new();

        csv.push_str("PID,Arrival,Duration,Priority,Completion,Turnaround,Waiting\n");

        for p in &metrics.schedule.completed {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                p.pid,
                p.arrival_time,
                p.duration,
                p.priority,
                p.completion_time,
                p.turnaround_time,
                p.waiting_time
            ));
        }

        csv
    }

    /// Formatea la traza como un diagrama de Gantt de una línea.
    ///
    /// Los huecos ociosos se muestran como `idle`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{MetricsCalculator, Schedule};
    ///
    /// let mut schedule = Schedule::default();
    /// schedule.record(1, 0, 2);
    /// schedule.record(2, 4, 5);
    /// assert_eq!(
    ///     MetricsCalculator::format_gantt(&schedule),
    ///     "| P1 0-2 | idle 2-4 | P2 4-5 |"
    /// );
    /// ```
    pub fn format_gantt(schedule: &Schedule) -> String {
        if schedule.slices.is_empty() {
            return "(vacío)".to_string();
        }

        let mut gantt = String::from("|");
        let mut clock = 0;
        for slice in &schedule.slices {
            if slice.start > clock {
                gantt.push_str(&format!(" idle {}-{} |", clock, slice.start));
            }
            gantt.push_str(&format!(" P{} {}-{} |", slice.pid, slice.start, slice.end));
            clock = slice.end;
        }
        gantt
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(pid: Pid, arrival: Time, duration: Time, completion: Time) -> Process {
        let mut process = Process::new(pid, arrival, duration, 1);
        process.finalize(completion);
        process
    }

    fn sample_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.record(1, 0, 3);
        schedule.complete(finished(1, 0, 3, 3));
        schedule.record(2, 3, 5);
        schedule.complete(finished(2, 1, 2, 5));
        schedule
    }

    #[test]
    fn test_averages() {
        let schedule = sample_schedule();
        let averages = MetricsCalculator::averages(&schedule.completed).unwrap();

        // Esperas 0 y 2, turnarounds 3 y 4
        assert_eq!(averages.waiting, 1.0);
        assert_eq!(averages.turnaround, 3.5);
    }

    #[test]
    fn test_empty_run_has_no_data() {
        let calculator = MetricsCalculator::new();
        let metrics =
            calculator.calculate_run_metrics(SchedulingAlgorithm::Fcfs, Schedule::default(), None);

        assert!(metrics.averages.is_none());
        assert!(metrics.throughput.is_none());
        assert_eq!(metrics.makespan, 0);

        let report = calculator.generate_report(&metrics);
        assert!(report.contains("sin datos"));
        assert!(report.contains("(vacío)"));
    }

    #[test]
    fn test_report_lines() {
        let calculator = MetricsCalculator::new();
        let metrics = calculator.calculate_run_metrics(SchedulingAlgorithm::Fcfs, sample_schedule(), None);
        let report = calculator.generate_report(&metrics);
        let lines: Vec<&str> = report.lines().collect();

        assert!(lines.contains(&"Proceso 1 completado en t=3, Espera: 0, Turnaround: 3"));
        assert!(lines.contains(&"Proceso 2 completado en t=5, Espera: 2, Turnaround: 4"));
        assert!(lines.contains(&"Gantt: | P1 0-3 | P2 3-5 |"));
        assert!(lines.contains(&"Tiempo promedio de espera: 1.00"));
        assert!(lines.contains(&"Tiempo promedio de turnaround: 3.50"));
        assert!(lines.contains(&"Makespan: 5"));
        assert!(lines.contains(&"Throughput: 0.400 procesos/unidad"));
        assert!(lines.contains(&"Orden de finalización: [1, 2]"));
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn test_run_metrics_marks_transient() {
        let calculator = MetricsCalculator::new();
        let metrics = calculator.calculate_run_metrics(SchedulingAlgorithm::Sjf, sample_schedule(), Some(2));

        assert_eq!(metrics.transient_pid, Some(2));
        assert_eq!(metrics.makespan, 5);
        assert_eq!(metrics.throughput, Some(0.4));
        assert!(calculator.generate_report(&metrics).contains("Proceso 2 (transitorio)"));

        let metrics = calculator.calculate_run_metrics(SchedulingAlgorithm::Sjf, sample_schedule(), None);
        assert_eq!(metrics.transient_pid, None);
    }

    #[test]
    fn test_comparison_best_by_waiting() {
        let comparison = Comparison {
            rows: vec![
                ComparisonRow {
                    algorithm: "FCFS".to_string(),
                    averages: Some(Averages { waiting: 4.0, turnaround: 9.0 }),
                },
                ComparisonRow {
                    algorithm: "Vacío".to_string(),
                    averages: None,
                },
                ComparisonRow {
                    algorithm: "SJF".to_string(),
                    averages: Some(Averages { waiting: 2.5, turnaround: 7.0 }),
                },
            ],
        };

        assert_eq!(comparison.best_by_waiting().unwrap().algorithm, "SJF");

        let report = MetricsCalculator::new().generate_comparison_report(&comparison);
        assert!(report.contains("COMPARACIÓN DE ALGORITMOS"));
        assert!(report.contains("sin datos"));
        assert!(report.contains("Menor espera promedio: SJF"));
    }

    #[test]
    fn test_csv_report() {
        let calculator = MetricsCalculator::new();
        let metrics = calculator.calculate_run_metrics(SchedulingAlgorithm::Fcfs, sample_schedule(), None);
        let csv = calculator.generate_csv_report(&metrics);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "2,1,2,1,5,4,2");
    }
}
