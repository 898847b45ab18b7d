//! # Archivos Estáticos
//! src/server/static_files.rs
//!
//! Handler por defecto del servidor: resuelve un path de URL bajo el
//! document root y lo sirve con su Content-Type. Soporta GET condicional
//! (`If-Modified-Since` / `Last-Modified`) para que el navegador no
//! re-descargue assets sin cambios durante el desarrollo.

use crate::http::{request, Response, StatusCode};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Documento índice de un directorio
const INDEX_FILE: &str = "index.html";

/// Sirve un path de URL desde el document root
///
/// - Path inexistente → 404
/// - Path que escapa del root (traversal) → 403
/// - Directorio → su `index.html`, o 404 si no tiene
/// - `If-Modified-Since` vigente → 304 sin body
pub fn serve(root: &Path, url_path: &str, if_modified_since: Option<&str>) -> Response {
    // El root tiene que existir para poder anclar el chequeo de traversal
    let canonical_root = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                StatusCode::NotFound,
                &format!("Document root not accessible: {}", e),
            );
        }
    };

    let decoded = request::url_decode(url_path);
    let relative = decoded.trim_start_matches('/');
    let mut file_path = canonical_root.join(relative);

    // Un directorio se resuelve a su documento índice
    if file_path.is_dir() {
        file_path = file_path.join(INDEX_FILE);
    }

    let canonical_file = match file_path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                StatusCode::NotFound,
                &format!("File not found: {}", e),
            );
        }
    };

    if !canonical_file.starts_with(&canonical_root) {
        return Response::error(StatusCode::Forbidden, "Path outside document root");
    }

    // GET condicional: si el archivo no cambió desde la fecha del cliente,
    // basta un 304 sin body
    let modified = fs::metadata(&canonical_file)
        .and_then(|m| m.modified())
        .ok();

    if let (Some(mtime), Some(since)) = (modified, if_modified_since) {
        if !modified_after(mtime, since) {
            return Response::not_modified();
        }
    }

    let content = match fs::read(&canonical_file) {
        Ok(c) => c,
        Err(e) => {
            return Response::error(
                StatusCode::NotFound,
                &format!("File not found: {}", e),
            );
        }
    };

    let extension = canonical_file.extension().and_then(|e| e.to_str());
    let mut response = Response::new(StatusCode::Ok)
        .with_header("Content-Type", content_type(extension))
        .with_body_bytes(content);

    if let Some(mtime) = modified {
        response.add_header("Last-Modified", &http_date(mtime));
    }

    response
}

/// Content-Type según la extensión del archivo
///
/// Subconjunto suficiente para los assets del anatomograma (markup, scripts,
/// estilos, SVG del diagrama y datos JSON).
///
/// # Ejemplos
/// ```
/// use anatomogram_server::server::static_files::content_type;
/// assert_eq!(content_type(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(content_type(Some("svg")), "image/svg+xml");
/// assert_eq!(content_type(None), "application/octet-stream");
/// ```
pub fn content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// Formatea un instante como fecha HTTP (RFC 7231, ej: "Tue, 15 Nov 1994 08:12:31 GMT")
pub fn http_date(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parsea una fecha HTTP de un header de cliente
pub fn parse_http_date(value: &str) -> Option<SystemTime> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(SystemTime::from)
}

/// ¿El archivo cambió después de la fecha que tiene el cliente?
///
/// Las fechas HTTP tienen precisión de segundos, así que el mtime se trunca
/// antes de comparar; un header imparseable cuenta como "sí cambió".
fn modified_after(mtime: SystemTime, if_modified_since: &str) -> bool {
    let Some(client_time) = parse_http_date(if_modified_since) else {
        return true;
    };

    let mtime_secs = mtime
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let client_secs = client_time
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    mtime_secs > client_secs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;

    /// Crea un document root temporal con index y un asset
    fn temp_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "anatomogram_static_{}_{}_{}",
            std::process::id(),
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::create_dir_all(root.join("src")).unwrap();
        let mut index = File::create(root.join("src/index.html")).unwrap();
        index.write_all(b"<html>anatomogram</html>").unwrap();
        let mut js = File::create(root.join("src/main.js")).unwrap();
        js.write_all(b"console.log('hi');").unwrap();
        root
    }

    #[test]
    fn test_serve_file() {
        let root = temp_root("serve");
        let response = serve(&root, "/src/index.html", None);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(
            response.header("Content-Type"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(response.body(), b"<html>anatomogram</html>");
        assert!(response.header("Last-Modified").is_some());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_serve_js_content_type() {
        let root = temp_root("js");
        let response = serve(&root, "/src/main.js", None);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(
            response.header("Content-Type"),
            Some("application/javascript")
        );
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_serve_missing_file() {
        let root = temp_root("missing");
        let response = serve(&root, "/src/nope.css", None);

        assert_eq!(response.status(), StatusCode::NotFound);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_serve_directory_uses_index() {
        let root = temp_root("dir");
        let response = serve(&root, "/src", None);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"<html>anatomogram</html>");
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_traversal_blocked() {
        let root = temp_root("traversal");
        // Archivo hermano del root, alcanzable solo escapando de él
        let secret = root.parent().unwrap().join(format!(
            "anatomogram_static_secret_{}",
            std::process::id()
        ));
        fs::write(&secret, "secret").unwrap();

        let response = serve(
            &root,
            &format!("/../{}", secret.file_name().unwrap().to_str().unwrap()),
            None,
        );
        assert_eq!(response.status(), StatusCode::Forbidden);

        let _ = fs::remove_file(&secret);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_percent_decoded_path() {
        let root = temp_root("decode");
        fs::write(root.join("src/my diagram.svg"), "<svg/>").unwrap();

        let response = serve(&root, "/src/my%20diagram.svg", None);
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("image/svg+xml"));
        let _ = fs::remove_dir_all(&root);
    }

    // ==================== GET condicional ====================

    #[test]
    fn test_if_modified_since_hit() {
        let root = temp_root("ims_hit");
        let first = serve(&root, "/src/index.html", None);
        let last_modified = first.header("Last-Modified").unwrap().to_string();

        // Mismo mtime que el cliente → 304 sin body
        let second = serve(&root, "/src/index.html", Some(&last_modified));
        assert_eq!(second.status(), StatusCode::NotModified);
        assert!(second.body().is_empty());
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_if_modified_since_stale() {
        let root = temp_root("ims_stale");
        let response = serve(
            &root,
            "/src/index.html",
            Some("Tue, 15 Nov 1994 08:12:31 GMT"),
        );
        assert_eq!(response.status(), StatusCode::Ok);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_if_modified_since_garbage_header() {
        let root = temp_root("ims_garbage");
        let response = serve(&root, "/src/index.html", Some("not a date"));
        assert_eq!(response.status(), StatusCode::Ok);
        let _ = fs::remove_dir_all(&root);
    }

    // ==================== Fechas HTTP ====================

    #[test]
    fn test_http_date_round_trip() {
        let time = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(784_887_151);
        let formatted = http_date(time);
        assert_eq!(formatted, "Tue, 15 Nov 1994 08:12:31 GMT");
        assert_eq!(parse_http_date(&formatted), Some(time));
    }

    #[test]
    fn test_parse_http_date_invalid() {
        assert!(parse_http_date("yesterday").is_none());
    }
}
