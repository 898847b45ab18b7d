//! # Configuración del Servidor
//! src/config.rs
//!
//! Argumentos CLI del servidor de desarrollo, con soporte para variables de
//! entorno, más la resolución de rutas de los archivos de datos.
//!
//! ## Ejemplos de uso
//!
//! ```bash
//! # Datos de expresión propios
//! ./anatomogram_server -e my_expression_data.json
//!
//! # Expresión y mapeo UBERON propios, en otro puerto
//! ./anatomogram_server -e my_data.json -u my_uberon_map.json -p 8080
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! ANATOMOGRAM_PORT=8080 ./anatomogram_server -e data.json
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};

/// Rutas relativas donde se busca el mapeo UBERON por defecto.
///
/// Se prueban en este orden exacto y gana la primera que exista en disco.
pub const DEFAULT_UBERON_CANDIDATES: [&str; 4] = [
    "data/sample/uberon_id_map.json",
    "../data/sample/uberon_id_map.json",
    "data/uberon_id_map.json",
    "../data/uberon_id_map.json",
];

/// Configuración del servidor de desarrollo
#[derive(Debug, Clone, Parser)]
#[command(name = "anatomogram_server")]
#[command(about = "Servidor de desarrollo para la visualización de anatomogramas")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Ruta del archivo JSON de datos de expresión (requerido)
    #[arg(short = 'e', long = "expression-data")]
    pub expression_data: String,

    /// Ruta del archivo JSON de mapeo UBERON (si no se indica, se busca uno
    /// por defecto en las rutas candidatas)
    #[arg(short = 'u', long = "uberon-map")]
    pub uberon_map: Option<String>,

    /// Puerto en el que escucha el servidor
    #[arg(short = 'p', long, default_value = "8000", env = "ANATOMOGRAM_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "ANATOMOGRAM_HOST")]
    pub host: String,

    /// Document root desde donde se sirven los archivos estáticos
    #[arg(long, default_value = ".", env = "ANATOMOGRAM_ROOT")]
    pub root: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// clap se encarga del mensaje de uso y del exit si falta `-e`.
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.expression_data.trim().is_empty() {
            return Err("Expression data path must not be empty".to_string());
        }
        if !Path::new(&self.root).is_dir() {
            return Err(format!("Document root is not a directory: {}", self.root));
        }
        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto (para tests; `-e` es obligatorio en CLI)
    fn default() -> Self {
        Self {
            expression_data: String::new(),
            uberon_map: None,
            port: 8000,
            host: "127.0.0.1".to_string(),
            root: ".".to_string(),
        }
    }
}

/// Convierte una ruta a absoluta respecto del directorio actual
///
/// No exige que el archivo exista (eso se chequea aparte, con su propio
/// mensaje de error).
pub fn absolute(path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(p),
            Err(_) => p.to_path_buf(),
        }
    }
}

/// Busca el mapeo UBERON por defecto bajo un directorio base
///
/// Prueba [`DEFAULT_UBERON_CANDIDATES`] en orden y retorna la primera ruta
/// que exista. El orden importa: los datos de muestra tienen prioridad.
pub fn find_default_uberon_map_in(base: &Path) -> Option<PathBuf> {
    DEFAULT_UBERON_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .find(|path| path.exists())
}

/// Busca el mapeo UBERON por defecto respecto del directorio actual
pub fn find_default_uberon_map() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_default_uberon_map_in(&cwd)
}
