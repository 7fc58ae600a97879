//! Generates the Swift and Kotlin bindings for the `sqlshim` library.
//!
//! `cargo run -p uniffi-bindgen -- generate --library <libsqlshim> --language swift --out-dir <dir>`

fn main() {
    uniffi::uniffi_bindgen_main();
}
