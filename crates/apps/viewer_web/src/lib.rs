use console_error_panic_hook::set_once;
use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use scene::{ViewConfig, load_view_data};

mod dom;
mod http;
mod map;

use http::HttpSource;
use map::{MountedView, build_map};

/// Views the page mounts when it does not pick its own.
pub const DEFAULT_VIEWS: [&str; 2] = ["mare", "nonmare"];

thread_local! {
    static MOUNTED: RefCell<HashMap<String, MountedView>> = RefCell::new(HashMap::new());
}

fn log_error(prefix: &str, msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(&format!("[{prefix}] {msg}")));
}

/// Loads everything the view needs, then builds it. A load failure is
/// reported once and leaves the container empty.
fn mount(config: ViewConfig) {
    spawn_local(async move {
        let prefix = config.prefix.clone();
        let data = match load_view_data(&HttpSource, &config).await {
            Ok(data) => data,
            Err(err) => {
                log_error(&prefix, &format!("failed to load crater data: {err}"));
                return;
            }
        };

        if let Some(warning) = &data.outline_warning {
            web_sys::console::warn_1(&JsValue::from_str(&format!("[{prefix}] {warning}")));
        }

        // Detach any earlier mount of this prefix before its container is reused.
        let previous = MOUNTED.with(|m| m.borrow_mut().remove(&prefix));
        drop(previous);

        let mounted = dom::document().and_then(|doc| build_map(&doc, config, data));
        match mounted {
            Ok(view) => {
                MOUNTED.with(|m| m.borrow_mut().insert(prefix, view));
            }
            Err(err) => web_sys::console::error_1(&err),
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Mounts a built-in view (`mare` or `nonmare`).
#[wasm_bindgen]
pub fn mount_preset(name: &str) -> Result<(), JsValue> {
    let config = ViewConfig::preset(name)
        .ok_or_else(|| JsValue::from_str(&format!("unknown view preset: {name}")))?;
    mount(config);
    Ok(())
}

/// Mounts a view described by a JSON `ViewConfig`.
#[wasm_bindgen]
pub fn mount_view_with_config(json: &str) -> Result<(), JsValue> {
    let config = ViewConfig::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    mount(config);
    Ok(())
}

#[wasm_bindgen]
pub fn mount_default_views() -> Result<(), JsValue> {
    for name in DEFAULT_VIEWS {
        mount_preset(name)?;
    }
    Ok(())
}

/// Removes a mounted view. Returns whether one was mounted under `prefix`.
#[wasm_bindgen]
pub fn unmount_view(prefix: &str) -> bool {
    MOUNTED.with(|m| m.borrow_mut().remove(prefix)).is_some()
}

/// Redraws a mounted view from its current control state.
#[wasm_bindgen]
pub fn redraw_view(prefix: &str) -> Result<(), JsValue> {
    MOUNTED.with(|m| {
        let mounted = m.borrow();
        let view = mounted
            .get(prefix)
            .ok_or_else(|| JsValue::from_str(&format!("no view mounted for {prefix}")))?;
        view.runtime().borrow_mut().redraw()
    })
}

/// Restores the identity pan/zoom transform of a mounted view.
#[wasm_bindgen]
pub fn reset_zoom(prefix: &str) -> Result<(), JsValue> {
    MOUNTED.with(|m| {
        let mounted = m.borrow();
        let view = mounted
            .get(prefix)
            .ok_or_else(|| JsValue::from_str(&format!("no view mounted for {prefix}")))?;
        view.runtime().borrow_mut().reset_zoom()
    })
}

/// Number of crater markers currently drawn by a mounted view.
#[wasm_bindgen]
pub fn marker_count(prefix: &str) -> Option<u32> {
    MOUNTED.with(|m| {
        m.borrow()
            .get(prefix)
            .map(|v| v.runtime().borrow().view().markers().len() as u32)
    })
}
