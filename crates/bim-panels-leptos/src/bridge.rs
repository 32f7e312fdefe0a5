//! Browser bridge: console, alerts and downloads

use bim_panels_archive::ExportFile;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Log to console (always shows, regardless of the `log` level)
pub fn log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

/// Log error to console
pub fn log_error(msg: &str) {
    web_sys::console::error_1(&msg.into());
}

/// Log warning to console
pub fn log_warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

/// Log info to console
pub fn log_info(msg: &str) {
    web_sys::console::info_1(&msg.into());
}

/// Blocking browser alert
pub fn alert(msg: &str) {
    if let Some(window) = web_sys::window() {
        if window.alert_with_message(msg).is_err() {
            log_error(msg);
        }
    }
}

/// Hand a file to the browser as a download
pub fn download(file: &ExportFile) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(file.bytes.as_slice()));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&file.mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let link: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(&file.name);
    body.append_child(&link)?;
    link.click();
    link.remove();
    web_sys::Url::revoke_object_url(&url)?;

    log::debug!("Downloaded {} ({} bytes)", file.name, file.bytes.len());
    Ok(())
}

/// Download every file, logging failures
pub fn download_all(files: &[ExportFile]) {
    for file in files {
        if let Err(e) = download(file) {
            log_error(&format!("Failed to download {}: {:?}", file.name, e));
        }
    }
}
