use std::rc::Rc;

use session::{export_csv, PredictionResult, EXPORT_FILE_NAME, EXPORT_MIME};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};
use yew::prelude::*;

use crate::widgets::toast::ToastContext;

#[derive(Properties, PartialEq)]
pub struct ExportButtonProps {
    pub result: Rc<PredictionResult>,
}

#[function_component(ExportButton)]
pub fn export_button(props: &ExportButtonProps) -> Html {
    let toast_ctx = use_context::<ToastContext>();

    let onclick = {
        let result = props.result.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(csv) = export_csv(&result) else {
                log::debug!("Nothing to export");
                return;
            };

            match download_text(EXPORT_FILE_NAME, EXPORT_MIME, &csv) {
                Ok(()) => {
                    log::info!("Exported {} predictions to {}", result.records().len(), EXPORT_FILE_NAME);
                    if let Some(toast_ctx) = &toast_ctx {
                        toast_ctx.show_success("CSV download started".to_string());
                    }
                }
                Err(e) => {
                    log::error!("CSV export failed: {}", e);
                    if let Some(toast_ctx) = &toast_ctx {
                        toast_ctx.show_error(format!("Export failed: {}", e));
                    }
                }
            }
        })
    };

    html! {
        <button class="btn btn-outline btn-sm" disabled={props.result.is_empty()} {onclick}>
            <i class="fas fa-download"></i>
            {" Download CSV Report"}
        </button>
    }
}

fn download_text(filename: &str, mime: &str, text: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));

    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "Failed to create blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create download".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Unable to create anchor")?
        .dyn_into()
        .map_err(|_| "Anchor cast failed")?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none").ok();

    document
        .body()
        .ok_or("Missing body")?
        .append_child(&anchor)
        .ok();
    anchor.click();
    anchor.remove();
    Url::revoke_object_url(&url).ok();

    Ok(())
}
