use std::env;
use std::fs;
use std::path::PathBuf;

/// Factory tap timeout when no override is given (ms)
const FALLBACK_TIMEOUT_MS: u16 = 200;

fn main() {
    // Space Cadet factory defaults (optional)
    // These are used when the settings slice has never been written

    // Tap timeout in milliseconds
    let timeout = match env::var("SPACECADET_DEFAULT_TIMEOUT_MS") {
        Ok(value) => match value.trim().parse::<u16>() {
            Ok(ms) => {
                println!(
                    "cargo:warning=Using SPACECADET_DEFAULT_TIMEOUT_MS from environment: {}",
                    ms
                );
                ms
            }
            Err(_) => {
                println!(
                    "cargo:warning=Ignoring invalid SPACECADET_DEFAULT_TIMEOUT_MS '{}', using {}",
                    value, FALLBACK_TIMEOUT_MS
                );
                FALLBACK_TIMEOUT_MS
            }
        },
        Err(_) => FALLBACK_TIMEOUT_MS,
    };

    let generated = format!(
        "/// Default tap timeout (ms), from `SPACECADET_DEFAULT_TIMEOUT_MS`\n\
         pub const DEFAULT_TIMEOUT_MS: u16 = {timeout};\n"
    );

    // Write to OUT_DIR
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let path = PathBuf::from(out_dir).join("spacecadet_defaults.rs");
    fs::write(&path, generated).expect("Failed to write spacecadet_defaults.rs");

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=SPACECADET_DEFAULT_TIMEOUT_MS");
    println!("cargo:rerun-if-changed=build.rs");
}
