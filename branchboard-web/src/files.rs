//! File export/import plumbing: blob downloads, file reads, and the
//! import serialization guard.

use anyhow::{Context, anyhow};
use js_sys::{Function, Promise};
use std::cell::Cell;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Blob, BlobPropertyBag, File, FileReader, HtmlAnchorElement, HtmlInputElement, Url};

use crate::dom;

thread_local! {
    static IMPORT_BUSY: Cell<bool> = const { Cell::new(false) };
}

/// Held while an import is in flight; a second import cannot start until
/// the first one's guard drops, so two file reads can never interleave
/// and double-apply.
pub struct ImportGuard(());

impl Drop for ImportGuard {
    fn drop(&mut self) {
        IMPORT_BUSY.with(|busy| busy.set(false));
    }
}

/// Claim the import slot, or `None` when an import is already running.
#[must_use]
pub fn begin_import() -> Option<ImportGuard> {
    IMPORT_BUSY.with(|busy| {
        if busy.get() {
            None
        } else {
            busy.set(true);
            Some(ImportGuard(()))
        }
    })
}

/// Current wall-clock formatted as `YYYYMMDD-HHMMSS` for download names.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn timestamp_stamp() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}{:02}{:02}-{:02}{:02}{:02}",
        now.get_full_year() as u32,
        now.get_month() as u32 + 1,
        now.get_date() as u32,
        now.get_hours() as u32,
        now.get_minutes() as u32,
        now.get_seconds() as u32,
    )
}

/// Trigger a browser download of `payload` as a JSON file. Returns whether
/// the download was handed to the browser; failures are logged, never
/// thrown.
pub fn download_json(file_name: &str, payload: &str) -> bool {
    match try_download(file_name, payload) {
        Ok(()) => true,
        Err(err) => {
            dom::console_error(&format!(
                "export of {file_name} failed: {}",
                dom::js_error_message(&err)
            ));
            false
        }
    }
}

fn try_download(file_name: &str, payload: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(payload));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = dom::document();
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?
        .append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    // allow freeing the blob URL once the click has been serviced
    spawn_local(async move {
        let _ = dom::sleep_ms(1_000).await;
        let _ = Url::revoke_object_url(&url);
    });
    Ok(())
}

/// Read the first file selected in an `<input type="file">` as text.
///
/// # Errors
///
/// Fails when nothing is selected or the browser cannot read the file.
#[allow(clippy::future_not_send)]
pub async fn read_selected_file(input: &HtmlInputElement) -> anyhow::Result<String> {
    let file = input
        .files()
        .and_then(|files| files.get(0))
        .context("no file selected")?;
    let text = JsFuture::from(file.text())
        .await
        .map_err(|err| anyhow!("file read failed: {}", dom::js_error_message(&err)))?;
    text.as_string().context("file contents are not text")
}

/// Read a dropped file as a data URL, for icon drops onto a card.
///
/// # Errors
///
/// Fails when the reader cannot be constructed or the read errors out.
#[allow(clippy::future_not_send)]
pub async fn read_file_as_data_url(file: &File) -> anyhow::Result<String> {
    let reader =
        FileReader::new().map_err(|err| anyhow!(dom::js_error_message(&err)))?;

    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });
    let resolve = resolve_slot.context("resolve function should be set")?;
    let on_loadend = Closure::once(move |_event: web_sys::Event| {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });
    reader.set_onloadend(Some(on_loadend.as_ref().unchecked_ref()));
    on_loadend.forget();

    reader
        .read_as_data_url(file)
        .map_err(|err| anyhow!("read_as_data_url failed: {}", dom::js_error_message(&err)))?;
    JsFuture::from(promise)
        .await
        .map_err(|err| anyhow!("reader promise rejected: {}", dom::js_error_message(&err)))?;

    reader
        .result()
        .ok()
        .and_then(|value| value.as_string())
        .context("reader produced no text result")
}
