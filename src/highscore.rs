//! High score persistence
//!
//! A single integer in LocalStorage. Missing or corrupt values fall back to
//! zero; writes are fire-and-forget.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "cosmic_dash_high_score";

/// Load the stored high score (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load() -> u32 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            if let Ok(value) = serde_json::from_str::<u32>(&raw) {
                log::info!("Loaded high score: {value}");
                return value;
            }
            log::warn!("Stored high score unreadable, starting from 0");
        }
    }

    0
}

/// Store a new high score (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save(value: u32) {
    if let Some(storage) = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
    {
        let _ = storage.set_item(STORAGE_KEY, &value.to_string());
        log::info!("High score saved ({value})");
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> u32 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_value: u32) {
    // No-op for native
}
