//! WASM entry point
//!
//! Trunk compiles this to WASM. Startup is async (the configuration is
//! fetched first), so the app is launched in the background.

fn main() {
    // Set up panic hook for better error messages in browser console
    console_error_panic_hook::set_once();

    buzz_ui::launch();
}
