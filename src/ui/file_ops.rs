//! File operations for delivering exports.
//!
//! This module hands encoded exports to a native save dialog or, on WASM, to a
//! browser download, and reports the outcome back to the editor.

use super::state::{DotLogoApp, FileOperationResult, PendingExport};
use crate::export::ExportedImage;
use eframe::egui;

impl DotLogoApp {
    /// Processes completed file operations and starts any requested export.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for requesting repaints
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        if let Some(receiver) = &self.file.file_operation_receiver {
            while let Ok(result) = receiver.try_recv() {
                match result {
                    FileOperationResult::ExportCompleted(path) => {
                        log::info!("export saved to {path}");
                        self.status = Some(format!("Saved {path}"));
                    }
                    FileOperationResult::OperationFailed(error) => {
                        log::error!("export failed: {error}");
                        self.status = Some(error);
                    }
                }
            }
        }

        let Some(request) = self.file.pending_export.take() else {
            return;
        };

        let encoded = match request {
            PendingExport::Current => self.session.export(),
            PendingExport::Preset(preset) => self.session.export_preset(&preset),
        };
        match encoded {
            Ok(image) => self.deliver(ctx, image),
            Err(err) => {
                log::error!("export failed: {err}");
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    /// Queues an export with the current settings.
    pub fn request_export(&mut self) {
        self.file.pending_export = Some(PendingExport::Current);
    }

    /// Writes an encoded image through the platform's save path.
    fn deliver(&mut self, ctx: &egui::Context, image: ExportedImage) {
        let sender = self.file.file_operation_sender.clone();

        #[cfg(target_arch = "wasm32")]
        {
            let result = match Self::trigger_download(
                &image.file_name,
                &image.bytes,
                image.format.mime_type(),
            ) {
                Ok(()) => FileOperationResult::ExportCompleted(image.file_name.clone()),
                Err(e) => FileOperationResult::OperationFailed(e),
            };
            if let Some(tx) = sender {
                let _ = tx.send(result);
            }
            ctx.request_repaint();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                let extension = image.format.extension();
                if let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter(image.format.label(), &[extension])
                    .set_file_name(&image.file_name)
                    .save_file()
                    .await
                {
                    let path = handle.path();
                    let result = match std::fs::write(path, &image.bytes) {
                        Ok(()) => FileOperationResult::ExportCompleted(path.display().to_string()),
                        Err(e) => FileOperationResult::OperationFailed(format!(
                            "Failed to save {}: {}",
                            path.display(),
                            e
                        )),
                    };
                    if let Some(tx) = sender {
                        let _ = tx.send(result);
                    }
                }
                ctx.request_repaint();
            });
        }
    }

    /// Triggers a file download in the browser (WASM only).
    ///
    /// Creates a temporary anchor element with a blob URL and clicks it.
    #[cfg(target_arch = "wasm32")]
    fn trigger_download(filename: &str, bytes: &[u8], mime: &str) -> Result<(), String> {
        use eframe::wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("No window found")?;
        let document = window.document().ok_or("No document found")?;

        let blob_parts = js_sys::Array::new();
        blob_parts.push(&js_sys::Uint8Array::from(bytes));

        let blob_options = web_sys::BlobPropertyBag::new();
        blob_options.set_type(mime);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &blob_options)
            .map_err(|_| "Failed to create blob")?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Failed to create object URL")?;

        let anchor = document
            .create_element("a")
            .map_err(|_| "Failed to create anchor element")?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Failed to cast to anchor element")?;

        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        let body = document.body().ok_or("No body found")?;
        body.append_child(&anchor)
            .map_err(|_| "Failed to append anchor")?;
        anchor.click();
        body.remove_child(&anchor)
            .map_err(|_| "Failed to remove anchor")?;

        web_sys::Url::revoke_object_url(&url)
            .map_err(|_| "Failed to revoke object URL")?;

        Ok(())
    }
}
