use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cpu_scheduling_simulator::config::{self, SimulationConfig};
use cpu_scheduling_simulator::persistence::{self, ProcessSource};
use cpu_scheduling_simulator::Simulation;

fn main() -> Result<()> {
    // ---------- LOGS ----------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // ---------- CONFIGURACIÓN ----------
    let config = SimulationConfig::from_env().context("configuración inválida")?;
    let seed = config.resolved_seed();
    info!(seed, "semilla maestra (usar {}={} para repetir)", config::SEED_ENV_VAR, seed);

    // ---------- PROCESOS ----------
    let mut rng = StdRng::seed_from_u64(seed);
    let (processes, source) = persistence::load_or_generate(&config, &mut rng)
        .with_context(|| {
            format!(
                "no se pudo preparar el archivo de procesos {}",
                config.processes_file.display()
            )
        })?;

    match source {
        ProcessSource::Loaded => println!("Procesos cargados desde archivo:"),
        ProcessSource::Generated => println!("Procesos generados y guardados en archivo:"),
    }
    for process in &processes {
        println!("{}", process);
    }

    // ---------- EJECUCIONES ----------
    let simulation = Simulation::with_config(processes, config.quantum, seed);
    let runs = simulation.run_all()?;

    for run in &runs {
        print!("{}", simulation.generate_report(run));
    }

    // ---------- COMPARACIÓN ----------
    let comparison = simulation.compare(&runs);
    print!("{}", simulation.generate_comparison_report(&comparison));

    Ok(())
}
