//! # Anatomogram Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de desarrollo.
//!
//! Flujo de arranque: parsear CLI → resolver rutas absolutas → validar los
//! archivos de datos → bindear el socket → servir hasta Ctrl+C. Todo error
//! previo al bind es fail-fast con exit code 1.

use anatomogram_server::config::{self, Config};
use anatomogram_server::router::DataPaths;
use anatomogram_server::server::Server;
use anatomogram_server::validator::{self, DataKind};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e);
        process::exit(1);
    }

    // Datos de expresión (requeridos)
    println!("\n🧬 Validating expression data...");
    let expression_path = config::absolute(&config.expression_data);
    if !expression_path.exists() {
        eprintln!(
            "❌ Expression data file not found: {}",
            expression_path.display()
        );
        process::exit(1);
    }
    if !validator::validate_json_file(&expression_path, DataKind::Expression) {
        process::exit(1);
    }

    // Mapeo UBERON (opcional, con búsqueda de uno por defecto)
    let uberon_path = resolve_uberon_map(&config);

    // Ctrl+C: aviso de apagado y exit 0, sin drenar el request en curso
    if let Err(e) = ctrlc::set_handler(|| {
        println!("\n\n✋ Server stopped.");
        process::exit(0);
    }) {
        eprintln!("⚠️  Could not install Ctrl+C handler: {}", e);
    }

    let data = DataPaths {
        expression: Some(expression_path.clone()),
        uberon: uberon_path.clone(),
    };
    let mut server = Server::new(config.clone(), data);

    if let Err(e) = server.bind() {
        eprintln!("\n❌ Error starting server: {}", e);
        if e.kind() == std::io::ErrorKind::AddrInUse {
            eprintln!(
                "   Port {} is already in use. Try a different port with -p",
                config.port
            );
        }
        process::exit(1);
    }

    print_banner(&config, &expression_path, uberon_path.as_deref());

    if let Err(e) = server.run() {
        eprintln!("❌ Fatal server error: {}", e);
        process::exit(1);
    }
}

/// Resuelve el archivo de mapeo UBERON a usar
///
/// Uno indicado por CLI debe existir y validar (error fatal si no); si no se
/// indicó ninguno, se prueba la lista de rutas por defecto en orden y un
/// archivo encontrado ahí se valida solo a título informativo.
fn resolve_uberon_map(config: &Config) -> Option<PathBuf> {
    match &config.uberon_map {
        Some(user_path) => {
            let path = config::absolute(user_path);
            if !path.exists() {
                eprintln!("❌ UBERON mapping file not found: {}", path.display());
                process::exit(1);
            }
            if !validator::validate_json_file(&path, DataKind::Uberon) {
                process::exit(1);
            }
            Some(path)
        }
        None => match config::find_default_uberon_map() {
            Some(path) => {
                println!("\n📖 Using default UBERON mapping: {}", path.display());
                validator::validate_json_file(&path, DataKind::Uberon);
                Some(path)
            }
            None => {
                println!("\n⚠️  No UBERON mapping file found, using embedded mappings");
                None
            }
        },
    }
}

/// Imprime el banner de arranque con las rutas efectivas
fn print_banner(config: &Config, expression: &Path, uberon: Option<&Path>) {
    println!("\n🚀 Anatomogram Visualization Server");
    println!("{}", "─".repeat(50));
    println!("Server: http://{}:{}", config.host, config.port);
    println!("Expression data: {}", expression.display());
    if let Some(uberon) = uberon {
        println!("UBERON mapping: {}", uberon.display());
    }
    println!("\nPress Ctrl+C to stop the server");
    println!("{}\n", "─".repeat(50));
}
