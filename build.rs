fn main() {
    // Tauri codegen only when the desktop shell is compiled in.
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
