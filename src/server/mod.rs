//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes, de a una por vez
//! 3. Lee y parsea requests HTTP
//! 4. Genera y envía responses HTTP
//!
//! También contiene el handler de archivos estáticos al que delega el router.

pub mod static_files;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
