//! Submission Dialog Component
//!
//! Hands local records to the maintainers, either as a prefilled GitHub
//! issue or as a JSON file to send by other means.

use chrono::Utc;
use leptos::prelude::*;

use plant_core::export::{issue_url, submission_file_name, submission_json};

use crate::bindings::{alert, download_text, open_in_new_tab};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn SubmissionDialog() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let close = move || ctx.set_submission_open(false);

    let via_issue = move |_: web_sys::MouseEvent| {
        let url = ctx.with(|s| issue_url(&s.config().submission, s.local_plants(), Utc::now()));
        match url {
            Ok(url) => {
                if let Err(e) = open_in_new_tab(&url) {
                    log::error!("failed to open issue page: {:?}", e);
                }
                alert("A GitHub issue page is opening. Sign in and press \"Submit new issue\" to finish.");
                close();
            }
            Err(e) => alert(&e.to_string()),
        }
    };

    let via_download = move |_: web_sys::MouseEvent| {
        let now = Utc::now();
        match ctx.with(|s| submission_json(s.local_plants(), now)) {
            Ok(json) => {
                if let Err(e) = download_text(&submission_file_name(now), &json, "application/json") {
                    log::error!("download failed: {:?}", e);
                    alert("The file could not be downloaded.");
                    return;
                }
                close();
            }
            Err(e) => alert(&e.to_string()),
        }
    };

    view! {
        <Show when=move || ctx.submission_open.get()>
            <div class="modal-backdrop" on:click=move |_| close()>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <h2>"Submit plant data"</h2>
                    <p>
                        {move || format!(
                            "{} local records are ready. Choose how to send them:",
                            store.local_plants().read().len()
                        )}
                    </p>
                    <button class="submission-option" on:click=via_issue>
                        <strong>"GitHub issue"</strong>
                        <span>"Opens a prefilled issue for review (needs a GitHub account)"</span>
                    </button>
                    <button class="submission-option" on:click=via_download>
                        <strong>"Download JSON"</strong>
                        <span>"Save a file and send it to the maintainers"</span>
                    </button>
                    <button class="btn" on:click=move |_| close()>"Close"</button>
                </div>
            </div>
        </Show>
    }
}
