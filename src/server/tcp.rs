//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Loop de servicio bloqueante de una conexión a la vez: se acepta una
//! conexión, se procesa el request completo y recién entonces se acepta la
//! siguiente. Sin pool de workers ni I/O asíncrono: para un servidor de
//! desarrollo local con un solo cliente (el navegador) alcanza y sobra, y
//! elimina todo estado compartido entre requests.

use crate::config::{self, Config};
use crate::http::{request::Method, Request, Response, StatusCode};
use crate::router::{DataPaths, Router};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

/// Servidor HTTP de desarrollo
pub struct Server {
    config: Config,
    router: Router,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor con su configuración y las rutas de datos resueltas
    pub fn new(config: Config, data: DataPaths) -> Self {
        let root = config::absolute(&config.root);
        let router = Router::new(data, root);

        Self {
            config,
            router,
            listener: None,
        }
    }

    /// Bindea el socket de escucha sin empezar a servir
    ///
    /// Separado de [`run`](Self::run) para que el caller pueda distinguir un
    /// error de bind (puerto ocupado) de un error de servicio, y para que
    /// los tests puedan conocer el puerto efímero asignado.
    pub fn bind(&mut self) -> io::Result<()> {
        let listener = TcpListener::bind(self.config.address())?;
        self.listener = Some(listener);
        Ok(())
    }

    /// Dirección local del socket ya bindeado
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Acepta y procesa conexiones hasta que el proceso sea interrumpido
    pub fn run(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = match &self.listener {
            Some(l) => l,
            None => return Err(io::Error::new(io::ErrorKind::NotConnected, "not bound")),
        };

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    // Un error de conexión queda contenido en ese request;
                    // el loop sigue aceptando
                    if let Err(e) = Self::handle_connection(&self.router, stream) {
                        eprintln!("❌ Connection error: {}", e);
                    }
                }
                Err(e) => {
                    eprintln!("❌ Accept error: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Procesa una conexión completa: leer, parsear, responder, cerrar
    fn handle_connection(router: &Router, mut stream: TcpStream) -> io::Result<()> {
        let mut buffer = [0u8; 8192];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            // El peer cerró sin mandar nada
            return Ok(());
        }

        let (response, path) = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => {
                let path = request.path().to_string();
                let mut response = router.route(&request);
                if request.method() == Method::HEAD {
                    response = response.without_body();
                }
                (response, path)
            }
            Err(e) => (
                Response::error(StatusCode::BadRequest, &format!("Invalid request: {}", e)),
                "-".to_string(),
            ),
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        log_response(&path, response.status());

        Ok(())
    }
}

/// Política de logging del servidor de desarrollo
///
/// Los 200 de archivos de datos o markup se muestran (son los que el
/// desarrollador está esperando ver); los 304 de assets cacheados se
/// silencian para no llenar la consola; el resto sale con su status.
fn log_response(path: &str, status: StatusCode) {
    if status == StatusCode::Ok {
        if path.contains("/data/") || path.ends_with(".html") {
            println!("✅ {}", path);
        }
    } else if status != StatusCode::NotModified {
        println!("   {} {}", status, path);
    }
}
