//! # Enrutamiento de Peticiones
//! src/router/mod.rs
//!
//! Decide el origen de cada respuesta GET: uno de los dos archivos de datos
//! inyectados por CLI, un asset estático bajo el subdirectorio de assets, o
//! el servido estático por defecto desde el document root.
//!
//! ## Orden de decisión (gana la primera que aplique)
//!
//! 1. Ruta virtual de datos de expresión (si hay archivo configurado)
//! 2. Ruta virtual del mapeo UBERON (si hay archivo configurado)
//! 3. `/` o `/index.html` → documento índice bajo el subdirectorio de assets
//! 4. `*.html|*.js|*.css` sin prefijo de assets → se antepone el prefijo
//! 5. Cualquier otro path → servido estático sin reescribir

use crate::http::{Request, Response, StatusCode};
use crate::server::static_files;
use std::fs;
use std::path::{Path, PathBuf};

// Rutas fijas compartidas con el front-end del anatomograma. Son contrato
// externo: el JS las pide tal cual, así que nunca se derivan ni se calculan.

/// Ruta virtual de los datos de expresión
pub const EXPRESSION_DATA_ROUTE: &str = "/data/expression_data.json";

/// Ruta virtual del mapeo de identificadores UBERON
pub const UBERON_MAP_ROUTE: &str = "/data/uberon_id_map.json";

/// Subdirectorio del document root donde viven los assets web
pub const ASSETS_PREFIX: &str = "/src";

/// Documento que responde a `/` y `/index.html`
pub const INDEX_DOCUMENT: &str = "/src/index.html";

/// Rutas de los dos archivos de datos, resueltas en el arranque.
///
/// Configuración inmutable de proceso: el router la recibe en construcción
/// y nadie la modifica después. Los archivos se releen de disco en cada
/// request para reflejar ediciones en vivo.
#[derive(Debug, Clone, Default)]
pub struct DataPaths {
    /// Archivo de datos de expresión (la CLI lo exige, pero el router
    /// funciona sin él)
    pub expression: Option<PathBuf>,

    /// Archivo de mapeo UBERON (opcional; sin él la ruta virtual cae al
    /// servido por defecto)
    pub uberon: Option<PathBuf>,
}

/// Resultado de la decisión de enrutamiento (separado para poder testearla
/// sin tocar disco)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Servir el archivo de expresión configurado
    ExpressionData,

    /// Servir el archivo UBERON configurado
    UberonMap,

    /// Delegar al servido estático con el path indicado (quizás reescrito)
    Static(String),
}

/// Router del servidor de desarrollo
pub struct Router {
    data: DataPaths,
    root: PathBuf,
}

impl Router {
    /// Crea el router con las rutas de datos y el document root
    pub fn new(data: DataPaths, root: PathBuf) -> Self {
        Self { data, root }
    }

    /// Aplica el orden de decisión a un path de request
    pub fn resolve(&self, path: &str) -> Route {
        if path == EXPRESSION_DATA_ROUTE && self.data.expression.is_some() {
            return Route::ExpressionData;
        }

        if path == UBERON_MAP_ROUTE && self.data.uberon.is_some() {
            return Route::UberonMap;
        }

        if path == "/" || path == "/index.html" {
            return Route::Static(INDEX_DOCUMENT.to_string());
        }

        if has_asset_suffix(path) && !path.starts_with(&format!("{}/", ASSETS_PREFIX)) {
            return Route::Static(format!("{}{}", ASSETS_PREFIX, path));
        }

        Route::Static(path.to_string())
    }

    /// Resuelve y ejecuta: produce la respuesta completa para un request
    pub fn route(&self, request: &Request) -> Response {
        let mut response = match self.resolve(request.path()) {
            Route::ExpressionData => match &self.data.expression {
                Some(path) => Self::serve_data_file(path),
                None => self.serve_static(request.path(), request),
            },
            Route::UberonMap => match &self.data.uberon {
                Some(path) => Self::serve_data_file(path),
                None => self.serve_static(request.path(), request),
            },
            Route::Static(rewritten) => self.serve_static(&rewritten, request),
        };

        self.add_common_headers(&mut response);
        response
    }

    /// Sirve uno de los archivos de datos inyectados
    ///
    /// Lectura de disco en cada request, sin caché: así las ediciones al
    /// dataset se ven con un simple refresh. El fallo de lectura queda
    /// contenido en este request como 404.
    fn serve_data_file(path: &Path) -> Response {
        match fs::read(path) {
            Ok(bytes) => Response::new(StatusCode::Ok)
                .with_header("Content-Type", "application/json")
                .with_header("Access-Control-Allow-Origin", "*")
                .with_header("Cache-Control", "no-cache")
                .with_body_bytes(bytes),
            Err(e) => Response::error(StatusCode::NotFound, &format!("File not found: {}", e)),
        }
    }

    /// Delegación al handler de estáticos, propagando el GET condicional
    fn serve_static(&self, path: &str, request: &Request) -> Response {
        static_files::serve(&self.root, path, request.header("If-Modified-Since"))
    }

    /// Agrega headers comunes a todas las respuestas
    fn add_common_headers(&self, response: &mut Response) {
        response.add_header("Server", "AnatomogramDev/0.1");
        response.add_header("Connection", "close");
    }
}

/// ¿El path termina en una extensión de asset reconocida?
fn has_asset_suffix(path: &str) -> bool {
    path.ends_with(".html") || path.ends_with(".js") || path.ends_with(".css")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    /// Router con document root temporal e índice mínimo
    fn temp_router(name: &str, data: DataPaths) -> (Router, PathBuf) {
        let root = std::env::temp_dir().join(format!(
            "anatomogram_router_{}_{}_{}",
            std::process::id(),
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::create_dir_all(root.join("src")).unwrap();
        let mut index = File::create(root.join("src/index.html")).unwrap();
        index.write_all(b"<html>index</html>").unwrap();
        (Router::new(data, root.clone()), root)
    }

    fn parse(raw: &[u8]) -> Request {
        Request::parse(raw).unwrap()
    }

    fn configured_paths(root: &Path) -> DataPaths {
        let expression = root.join("expression.json");
        fs::write(&expression, r#"{"genes": {"TP53": {"UBERON_0002107": 0.8}}}"#).unwrap();
        let uberon = root.join("uberon.json");
        fs::write(&uberon, r#"{"UBERON_0002107": "liver"}"#).unwrap();
        DataPaths {
            expression: Some(expression),
            uberon: Some(uberon),
        }
    }

    // ==================== Orden de decisión ====================

    #[test]
    fn test_resolve_expression_route_when_configured() {
        let data = DataPaths {
            expression: Some(PathBuf::from("/tmp/e.json")),
            uberon: None,
        };
        let (router, root) = temp_router("res_expr", data);

        assert_eq!(router.resolve(EXPRESSION_DATA_ROUTE), Route::ExpressionData);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_data_route_unconfigured_falls_through() {
        // Sin archivo configurado, la ruta virtual es un path estático más
        let (router, root) = temp_router("res_unconf", DataPaths::default());

        assert_eq!(
            router.resolve(EXPRESSION_DATA_ROUTE),
            Route::Static(EXPRESSION_DATA_ROUTE.to_string())
        );
        assert_eq!(
            router.resolve(UBERON_MAP_ROUTE),
            Route::Static(UBERON_MAP_ROUTE.to_string())
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_root_and_index_rewritten() {
        let (router, root) = temp_router("res_index", DataPaths::default());

        assert_eq!(router.resolve("/"), Route::Static(INDEX_DOCUMENT.to_string()));
        assert_eq!(
            router.resolve("/index.html"),
            Route::Static(INDEX_DOCUMENT.to_string())
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_asset_gets_prefix() {
        let (router, root) = temp_router("res_prefix", DataPaths::default());

        assert_eq!(
            router.resolve("/js/main.js"),
            Route::Static("/src/js/main.js".to_string())
        );
        assert_eq!(
            router.resolve("/css/style.css"),
            Route::Static("/src/css/style.css".to_string())
        );
        assert_eq!(
            router.resolve("/about.html"),
            Route::Static("/src/about.html".to_string())
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_no_double_prefix() {
        let (router, root) = temp_router("res_noprefix", DataPaths::default());

        assert_eq!(
            router.resolve("/src/js/main.js"),
            Route::Static("/src/js/main.js".to_string())
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_resolve_other_paths_unchanged() {
        let (router, root) = temp_router("res_other", DataPaths::default());

        assert_eq!(
            router.resolve("/favicon.ico"),
            Route::Static("/favicon.ico".to_string())
        );
        assert_eq!(
            router.resolve("/data/other.json"),
            Route::Static("/data/other.json".to_string())
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_non_virtual_data_path_gets_prefix() {
        // Las rutas virtuales terminan en .json, no .js: verificar que un
        // path .js bajo /data/ no se confunde con una ruta de datos
        let (router, root) = temp_router("res_order", DataPaths::default());

        assert_eq!(
            router.resolve("/data/loader.js"),
            Route::Static("/src/data/loader.js".to_string())
        );
        let _ = fs::remove_dir_all(&root);
    }

    // ==================== Servido de datos ====================

    #[test]
    fn test_route_expression_serves_exact_bytes() {
        let (_, root) = temp_router("bytes", DataPaths::default());
        let data = configured_paths(&root);
        let router = Router::new(data, root.clone());

        let request = parse(b"GET /data/expression_data.json HTTP/1.0\r\n\r\n");
        let response = router.route(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(response.header("Cache-Control"), Some("no-cache"));

        // Byte-idéntico al contenido en disco
        let on_disk = fs::read(root.join("expression.json")).unwrap();
        assert_eq!(response.body(), &on_disk[..]);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_route_uberon_serves_file() {
        let (_, root) = temp_router("uberon", DataPaths::default());
        let data = configured_paths(&root);
        let router = Router::new(data, root.clone());

        let request = parse(b"GET /data/uberon_id_map.json HTTP/1.0\r\n\r\n");
        let response = router.route(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), br#"{"UBERON_0002107": "liver"}"#);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_route_deleted_data_file_is_404() {
        // Sin caché: si el archivo desaparece, el siguiente request es 404
        let (_, root) = temp_router("deleted", DataPaths::default());
        let data = configured_paths(&root);
        let router = Router::new(data, root.clone());

        fs::remove_file(root.join("expression.json")).unwrap();

        let request = parse(b"GET /data/expression_data.json HTTP/1.0\r\n\r\n");
        let response = router.route(&request);

        assert_eq!(response.status(), StatusCode::NotFound);
        let body = String::from_utf8_lossy(response.body()).to_string();
        assert!(body.contains("File not found"), "got: {}", body);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_route_live_edit_reflected() {
        // La relectura por request hace visibles las ediciones en vivo
        let (_, root) = temp_router("live", DataPaths::default());
        let data = configured_paths(&root);
        let router = Router::new(data, root.clone());

        let request = parse(b"GET /data/expression_data.json HTTP/1.0\r\n\r\n");
        let first = router.route(&request);

        fs::write(root.join("expression.json"), r#"{"genes": {}}"#).unwrap();
        let second = router.route(&request);

        assert_ne!(first.body(), second.body());
        assert_eq!(second.body(), br#"{"genes": {}}"#);
        let _ = fs::remove_dir_all(&root);
    }

    // ==================== Delegación a estáticos ====================

    #[test]
    fn test_route_root_same_as_index_document() {
        let (router, root) = temp_router("root_eq", DataPaths::default());

        let via_root = router.route(&parse(b"GET / HTTP/1.0\r\n\r\n"));
        let via_index = router.route(&parse(b"GET /src/index.html HTTP/1.0\r\n\r\n"));

        assert_eq!(via_root.status(), StatusCode::Ok);
        assert_eq!(via_root.status(), via_index.status());
        assert_eq!(via_root.body(), via_index.body());
        assert_eq!(
            via_root.header("Content-Type"),
            via_index.header("Content-Type")
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_route_asset_served_with_prefix() {
        let (router, root) = temp_router("asset", DataPaths::default());
        fs::create_dir_all(root.join("src/js")).unwrap();
        fs::write(root.join("src/js/main.js"), "let x = 1;").unwrap();

        // Sin prefijo: se sirve desde /src
        let response = router.route(&parse(b"GET /js/main.js HTTP/1.0\r\n\r\n"));
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"let x = 1;");

        // Ya prefijado: mismo archivo, sin duplicar el prefijo
        let prefixed = router.route(&parse(b"GET /src/js/main.js HTTP/1.0\r\n\r\n"));
        assert_eq!(prefixed.status(), StatusCode::Ok);
        assert_eq!(prefixed.body(), b"let x = 1;");
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_route_missing_static_is_404() {
        let (router, root) = temp_router("static404", DataPaths::default());

        let response = router.route(&parse(b"GET /nope.png HTTP/1.0\r\n\r\n"));
        assert_eq!(response.status(), StatusCode::NotFound);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_common_headers_present() {
        let (router, root) = temp_router("headers", DataPaths::default());

        let response = router.route(&parse(b"GET / HTTP/1.0\r\n\r\n"));
        assert_eq!(response.header("Server"), Some("AnatomogramDev/0.1"));
        assert_eq!(response.header("Connection"), Some("close"));
        let _ = fs::remove_dir_all(&root);
    }
}
