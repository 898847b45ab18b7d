//! # Anatomogram Visualization Server
//! src/lib.rs
//!
//! Servidor HTTP de desarrollo para la herramienta de visualización de
//! anatomogramas. Sirve los assets web estáticos y sustituye dos endpoints
//! de datos JSON (datos de expresión y mapeo de identificadores UBERON) por
//! archivos indicados en la línea de comandos, para previsualizar la
//! visualización contra datasets propios sin tocar el front-end.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing y manejo del protocolo HTTP/1.0
//! - `config`: Argumentos CLI y resolución de rutas de archivos
//! - `validator`: Validación de forma de los archivos JSON de datos
//! - `router`: Decisión de origen de cada respuesta (datos vs estáticos)
//! - `server`: Loop TCP bloqueante de una conexión a la vez y archivos estáticos
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use anatomogram_server::config::Config;
//! use anatomogram_server::server::Server;
//!
//! let config = Config::new(); // parsea CLI
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod http;
pub mod config;
pub mod validator;
pub mod router;
pub mod server;
