//! # Módulo de Errores
//!
//! Errores que puede reportar el simulador. Todos son entradas rechazadas:
//! la simulación es un cálculo por lotes y no hay fallos transitorios que
//! justifiquen reintentos.

use std::error::Error;
use std::fmt;
use std::io;

use crate::process::Time;

/// Errores del simulador de planificación.
#[derive(Debug)]
pub enum SimulationError {
    /// Fallo de lectura o escritura del archivo de procesos
    Io(io::Error),
    /// Fila del archivo de procesos que no se puede interpretar
    MalformedRow {
        /// Número de línea (1-indexado, incluyendo la cabecera)
        line: usize,
        /// Descripción del problema encontrado
        reason: String,
    },
    /// Quantum de Round Robin no positivo
    InvalidQuantum(Time),
    /// Semilla de configuración que no es un entero sin signo
    InvalidSeed(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "error de E/S: {}", err),
            Self::MalformedRow { line, reason } => {
                write!(f, "fila {} mal formada: {}", line, reason)
            }
            Self::InvalidQuantum(quantum) => {
                write!(f, "quantum inválido para Round Robin: {} (debe ser > 0)", quantum)
            }
            Self::InvalidSeed(value) => write!(f, "semilla inválida: {:?}", value),
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SimulationError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimulationError::MalformedRow {
            line: 3,
            reason: "se esperaban 4 columnas".to_string(),
        };
        assert_eq!(err.to_string(), "fila 3 mal formada: se esperaban 4 columnas");

        let err = SimulationError::InvalidQuantum(0);
        assert!(err.to_string().contains("debe ser > 0"));
    }

    #[test]
    fn test_io_source_is_preserved() {
        let err = SimulationError::from(io::Error::new(io::ErrorKind::NotFound, "falta"));
        assert!(err.source().is_some());
        assert!(SimulationError::InvalidQuantum(0).source().is_none());
    }
}
