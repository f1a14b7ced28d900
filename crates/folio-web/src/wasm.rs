#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for [`ScrollSpyHost`](crate::ScrollSpyHost).
//!
//! Only compiled on `wasm32` targets.

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::host::{HostError, ScrollSpyHost};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!("panic at {}:{}: {info}", loc.file(), loc.line()),
                None => format!("panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

fn to_js(err: HostError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

/// JS handle for one page's scroll-spy.
#[wasm_bindgen]
pub struct ScrollSpy {
    inner: ScrollSpyHost,
}

#[wasm_bindgen]
impl ScrollSpy {
    /// `descriptors` is a JSON array of `{ id, label }`.
    #[wasm_bindgen(constructor)]
    pub fn new(descriptors: &str, marker_height: f64) -> Result<ScrollSpy, JsValue> {
        install_panic_hook();
        let inner = ScrollSpyHost::from_json(descriptors, marker_height).map_err(to_js)?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(js_name = setSupported)]
    pub fn set_supported(&mut self, supported: bool) {
        self.inner.set_supported(supported);
    }

    pub fn mount(&mut self) -> bool {
        self.inner.mount()
    }

    pub fn unmount(&mut self) {
        self.inner.unmount();
    }

    /// Pending observer commands as a JSON array.
    #[wasm_bindgen(js_name = drainCommands)]
    pub fn drain_commands(&mut self) -> Result<String, JsValue> {
        self.inner.drain_commands_json().map_err(to_js)
    }

    /// Apply a JSON array of intersection entries. Returns the active index.
    #[wasm_bindgen(js_name = pushEntries)]
    pub fn push_entries(&mut self, entries: &str) -> Result<u32, JsValue> {
        let active = self.inner.push_entries_json(entries).map_err(to_js)?;
        Ok(u32::try_from(active).unwrap_or(u32::MAX))
    }

    /// Replace nav geometry from a JSON array of `{ top, height }`.
    #[wasm_bindgen(js_name = setNavGeometry)]
    pub fn set_nav_geometry(&mut self, nav: &str) -> Result<(), JsValue> {
        self.inner.set_nav_geometry_json(nav).map_err(to_js)
    }

    /// Advance the marker by `dt_ms`; returns its offset in pixels.
    pub fn tick(&mut self, dt_ms: f64) -> f64 {
        self.inner.tick(dt_ms)
    }

    pub fn active(&self) -> u32 {
        u32::try_from(self.inner.active()).unwrap_or(u32::MAX)
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }

    /// Element id to scroll into view for nav entry `index`.
    #[wasm_bindgen(js_name = scrollTarget)]
    pub fn scroll_target(&self, index: u32) -> Result<String, JsValue> {
        self.inner
            .scroll_target(index as usize)
            .map(str::to_string)
            .map_err(to_js)
    }
}
