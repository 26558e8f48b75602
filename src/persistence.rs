//! # Módulo de Persistencia
//!
//! Lee y escribe el conjunto de procesos en un archivo tabular plano:
//! una cabecera `PID,Arrival Time,Duration,Priority` y una fila de enteros
//! por proceso. Cargar y guardar son inversos exactos.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use rand::Rng;
use tracing::{info, warn};

use crate::config::{self, SimulationConfig};
use crate::error::SimulationError;
use crate::generator;
use crate::process::{Pid, Process, Time};

/// Cabecera del archivo de procesos
pub const HEADER: &str = "PID,Arrival Time,Duration,Priority";

/// Origen del conjunto de procesos de una sesión.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessSource {
    /// Leído del archivo existente
    Loaded,
    /// Generado y guardado porque el archivo no existía
    Generated,
}

/// Convierte los procesos al formato del archivo.
pub fn render_processes(processes: &[Process]) -> String {
    let mut contents = String::with_capacity(HEADER.len() + processes.len() * 12);
    contents.push_str(HEADER);
    contents.push('\n');

    for p in processes {
        contents.push_str(&format!(
            "{},{},{},{}\n",
            p.pid, p.arrival_time, p.duration, p.priority
        ));
    }

    contents
}

/// Interpreta el contenido de un archivo de procesos.
///
/// La primera línea debe ser la cabecera (se toleran espacios alrededor de
/// las comas); las líneas vacías se ignoran. Los procesos quedan con el
/// tiempo restante igual a la duración y el resto de tiempos en cero.
///
/// # Errors
///
/// `SimulationError::MalformedRow` si falta la cabecera, una fila no tiene 4
/// columnas, algún campo no es entero, la duración es 0, el PID está
/// repetido o no deja lugar al PID transitorio, o los tiempos no caben en el
/// reloj simulado.
///
/// # Examples
///
/// ```rust
/// use cpu_scheduling_simulator::persistence;
///
/// let processes = persistence::parse_processes("PID,Arrival Time,Duration,Priority\n1,0,5,2\n").unwrap();
/// assert_eq!(processes[0].remaining_duration, 5);
///
/// assert!(persistence::parse_processes("PID,Arrival Time,Duration,Priority\n1,0,x,2\n").is_err());
/// assert!(persistence::parse_processes("1,0,5,2\n").is_err());
/// ```
pub fn parse_processes(contents: &str) -> Result<Vec<Process>, SimulationError> {
    let mut lines = contents.lines().enumerate();
    match lines.next() {
        Some((_, first)) if is_header(first) => {}
        _ => {
            return Err(SimulationError::MalformedRow {
                line: 1,
                reason: format!("se esperaba la cabecera {:?}", HEADER),
            })
        }
    }

    let mut processes = Vec::new();
    let mut seen = HashSet::new();
    let mut latest_arrival: Time = 0;
    let mut total_duration: Time = 0;

    for (index, raw) in lines {
        let line = index + 1;
        let row = raw.trim();
        if row.is_empty() {
            continue;
        }

        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(SimulationError::MalformedRow {
                line,
                reason: format!("se esperaban 4 columnas, hay {}", fields.len()),
            });
        }

        let pid: Pid = parse_field(fields[0], "PID", line)?;
        let arrival_time: Time = parse_field(fields[1], "Arrival Time", line)?;
        let duration: Time = parse_field(fields[2], "Duration", line)?;
        let priority = parse_field(fields[3], "Priority", line)?;

        if duration == 0 {
            return Err(SimulationError::MalformedRow {
                line,
                reason: "la duración debe ser > 0".to_string(),
            });
        }
        if pid == Pid::MAX {
            return Err(SimulationError::MalformedRow {
                line,
                reason: format!("PID {} no deja lugar al proceso transitorio", pid),
            });
        }
        if !seen.insert(pid) {
            return Err(SimulationError::MalformedRow {
                line,
                reason: format!("PID {} repetido", pid),
            });
        }

        latest_arrival = latest_arrival.max(arrival_time);
        total_duration = total_duration.saturating_add(duration);
        if clock_horizon(latest_arrival, total_duration).is_none() {
            return Err(SimulationError::MalformedRow {
                line,
                reason: "los tiempos exceden el rango del reloj simulado".to_string(),
            });
        }

        processes.push(Process::new(pid, arrival_time, duration, priority));
    }

    Ok(processes)
}

fn is_header(line: &str) -> bool {
    line.trim().split(',').map(str::trim).eq(HEADER.split(','))
}

/// Último instante que puede alcanzar el reloj de una ejecución.
///
/// Ningún algoritmo avanza más allá de la última llegada más todo el
/// trabajo pendiente, contando el proceso transitorio y su llegada `clock + 1`.
fn clock_horizon(latest_arrival: Time, total_duration: Time) -> Option<Time> {
    latest_arrival
        .checked_add(total_duration)?
        .checked_add(*config::DURATION_RANGE.end())?
        .checked_add(1)
}

fn parse_field<T: FromStr>(value: &str, name: &str, line: usize) -> Result<T, SimulationError> {
    value.parse().map_err(|_| SimulationError::MalformedRow {
        line,
        reason: format!("campo {} no es un entero válido: {:?}", name, value),
    })
}

/// Guarda los procesos en `path`.
pub fn save_processes(path: &Path, processes: &[Process]) -> Result<(), SimulationError> {
    fs::write(path, render_processes(processes))?;
    info!(path = %path.display(), count = processes.len(), "procesos guardados");
    Ok(())
}

/// Carga los procesos desde `path`.
pub fn load_processes(path: &Path) -> Result<Vec<Process>, SimulationError> {
    let contents = fs::read_to_string(path)?;
    let processes = parse_processes(&contents)?;
    info!(path = %path.display(), count = processes.len(), "procesos cargados");
    Ok(processes)
}

/// Carga el archivo configurado o, si no existe, genera y guarda un conjunto nuevo.
///
/// La ausencia del archivo no es un error; un archivo mal formado sí lo es.
pub fn load_or_generate<R: Rng>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<(Vec<Process>, ProcessSource), SimulationError> {
    let path = config.processes_file.as_path();

    if path.exists() {
        return Ok((load_processes(path)?, ProcessSource::Loaded));
    }

    warn!(path = %path.display(), "archivo de procesos no encontrado, generando procesos nuevos");
    let processes = generator::generate_processes(config.process_count, rng);
    save_processes(path, &processes)?;
    Ok((processes, ProcessSource::Generated))
}
