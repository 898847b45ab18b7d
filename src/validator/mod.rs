//! # Validación de Archivos de Datos
//! src/validator/mod.rs
//!
//! Comprueba que un archivo JSON sea sintácticamente válido y, para los dos
//! tipos reconocidos, que tenga la estructura mínima que espera el front-end.
//! La validación corre antes de bindear el socket: un archivo inválido
//! aborta el arranque con exit code 1.
//!
//! Solo se chequea presencia y forma, nunca contenido: tipos de los valores
//! de expresión, rangos y etiquetas UBERON quedan sin verificar a propósito.

use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Clave de nivel superior que debe contener el archivo de expresión.
///
/// Es parte del contrato con el front-end del anatomograma (que hace
/// `data.genes[...]`), no un detalle interno: no derivarla ni renombrarla.
pub const GENES_KEY: &str = "genes";

/// Cuántos elementos se muestran en los diagnósticos de muestra
const SAMPLE_SIZE: usize = 3;

/// Tipo declarado del archivo a validar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// Datos de expresión: `{"genes": {gen: {tejido: valor}}}`
    Expression,

    /// Mapeo UBERON: `{id_uberon: etiqueta}` (cualquier JSON parseable)
    Uberon,

    /// Cualquier otro tipo: solo se valida la sintaxis JSON
    Json,
}

/// Resumen estructural de un archivo validado
///
/// Las muestras son diagnósticos para inspección humana, no un contrato
/// que el caller deba examinar programáticamente.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Expression {
        gene_count: usize,
        sample_genes: Vec<String>,
        sample_tissue_counts: Vec<usize>,
    },
    Uberon {
        entry_count: usize,
        sample: Vec<(String, String)>,
    },
    /// El archivo parsea como JSON; no se chequeó estructura
    Json,
}

/// Parsea y examina un archivo JSON según su tipo declarado
///
/// Todo error (I/O, sintaxis, clave faltante) se convierte en un mensaje
/// legible; esta función nunca hace panic ni propaga errores sin formatear.
///
/// # Ejemplo
/// ```no_run
/// use std::path::Path;
/// use anatomogram_server::validator::{inspect, DataKind};
///
/// let summary = inspect(Path::new("expression.json"), DataKind::Expression);
/// ```
pub fn inspect(path: &Path, kind: DataKind) -> Result<Summary, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Error validating {}: {}", path.display(), e))?;

    let data: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;

    match kind {
        DataKind::Expression => inspect_expression(path, &data),
        DataKind::Uberon => Ok(inspect_uberon(&data)),
        DataKind::Json => Ok(Summary::Json),
    }
}

/// Chequea la forma mínima de un archivo de expresión
fn inspect_expression(path: &Path, data: &Value) -> Result<Summary, String> {
    let genes = data
        .get(GENES_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            format!(
                "Error validating {}: Expression data must have '{}' key",
                path.display(),
                GENES_KEY
            )
        })?;

    let sample_genes: Vec<String> = genes.keys().take(SAMPLE_SIZE).cloned().collect();

    // Tejidos por gen: solo para los diagnósticos, no se valida nada
    let sample_tissue_counts: Vec<usize> = genes
        .values()
        .take(SAMPLE_SIZE)
        .map(|tissues| tissues.as_object().map_or(0, |t| t.len()))
        .collect();

    Ok(Summary::Expression {
        gene_count: genes.len(),
        sample_genes,
        sample_tissue_counts,
    })
}

/// Resume un mapeo UBERON: cualquier JSON parseable se acepta
fn inspect_uberon(data: &Value) -> Summary {
    match data {
        Value::Object(map) => Summary::Uberon {
            entry_count: map.len(),
            sample: map
                .iter()
                .take(SAMPLE_SIZE)
                .map(|(k, v)| (k.clone(), render_value(v)))
                .collect(),
        },
        Value::Array(items) => Summary::Uberon {
            entry_count: items.len(),
            sample: items
                .iter()
                .take(SAMPLE_SIZE)
                .enumerate()
                .map(|(i, v)| (i.to_string(), render_value(v)))
                .collect(),
        },
        // JSON escalar: válido, pero sin entradas que contar
        _ => Summary::Uberon {
            entry_count: 0,
            sample: Vec::new(),
        },
    }
}

/// Representación corta de un valor para las muestras
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Valida un archivo y escribe los diagnósticos a consola
///
/// Retorna `true` si el archivo es aceptable para servir. Todos los errores
/// quedan contenidos aquí: el caller solo decide si aborta el arranque.
pub fn validate_json_file(path: &Path, kind: DataKind) -> bool {
    match inspect(path, kind) {
        Ok(summary) => {
            print!("{}", describe(&summary));
            true
        }
        Err(message) => {
            eprintln!("❌ {}", message);
            false
        }
    }
}

/// Formatea el resumen en el estilo de los mensajes de arranque
fn describe(summary: &Summary) -> String {
    let mut out = String::new();
    match summary {
        Summary::Expression {
            gene_count,
            sample_genes,
            sample_tissue_counts,
        } => {
            let _ = writeln!(out, "✅ Loaded {} genes", gene_count);
            let _ = writeln!(out, "   Sample: {:?}...", sample_genes);
            let _ = writeln!(out, "   Tissues per gene: {:?}...", sample_tissue_counts);
        }
        Summary::Uberon {
            entry_count,
            sample,
        } => {
            let _ = writeln!(out, "✅ Loaded {} UBERON mappings", entry_count);
            let _ = writeln!(out, "   Sample: {:?}...", sample);
        }
        Summary::Json => {
            let _ = writeln!(out, "✅ Valid JSON");
        }
    }
    out
}
