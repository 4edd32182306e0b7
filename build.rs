use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Cargar variables de entorno desde .env si existe
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for (key, value) in contents.lines().filter_map(parse_env_line) {
                // Las variables ya definidas en el entorno tienen prioridad
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using built-in API_BASE_URL and defaults.");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=API_BASE_URL");
    println!("cargo:rerun-if-env-changed=ENVIRONMENT");
}

/// Parsea `KEY=VALUE`, ignorando comentarios, líneas vacías y comillas
fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let value = value.trim().trim_matches('"');
    Some((key.trim(), value))
}
