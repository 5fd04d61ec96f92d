//! chartform-wasm: WebAssembly bindings for chartform-core
//!
//! Exposes the location autocomplete of the birth-chart page to JavaScript.
//! Page JS keeps what only a browser can do (DOM updates, timers, `fetch`)
//! and forwards every event to a [`LocationForm`], which owns all of the
//! form's state.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { Dataset, LocationForm } from 'chartform-wasm';
//!
//! await init();
//! const json = await (await fetch('/static/data/countries+states+cities.json')).text();
//! const form = new LocationForm(Dataset.from_json(json), undefined);
//!
//! input.addEventListener('input', () => {
//!   const due = form.on_input(input.value, performance.now());
//!   if (due !== undefined) setTimeout(() => form.tick(performance.now()) && render(), due - performance.now());
//! });
//! ```
//!
//! Notes
//! -----
//! - The dataset is parsed once into a [`Dataset`] and shared (read-only)
//!   by every form created from it.
//! - Submission is two-phase: [`LocationForm::begin_submit`] returns the
//!   fields to POST (or why not), JS performs the request and reports back
//!   through [`LocationForm::finish_submit`] / [`LocationForm::fail_submit`].
//! - See `www/location.js` for the complete DOM wiring.

use std::sync::Arc;
use wasm_bindgen::prelude::*;

use chartform_core::cards::CardCatalog;
use chartform_core::form::{self, FormData};
use chartform_core::presenter::{Key, KeyOutcome};
use chartform_core::session::{BlurOutcome, InputOutcome};
use chartform_core::submit::{BlockReason, SubmitOutcome, TransportResponse};
use chartform_core::{
    config::FormConfig, ChartFormError, DefaultBackend, DefaultDataset, LocationSearch,
    PageSession,
};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    log("chartform wasm module ready");
}

fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn log_error(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    to_value(value).unwrap_or(JsValue::NULL)
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/* --------------------------------------------------------------------------
   Dataset
-------------------------------------------------------------------------- */

/// The parsed countries → states → cities dataset.
#[wasm_bindgen]
pub struct Dataset {
    inner: Arc<DefaultDataset>,
}

#[wasm_bindgen]
impl Dataset {
    pub fn from_json(json: &str) -> Result<Dataset, JsValue> {
        let db = DefaultDataset::from_json_str(json).map_err(|e| {
            log_error(&format!("Error loading locations: {e}"));
            js_err(e)
        })?;
        let stats = db.stats();
        log(&format!(
            "✓ Loaded {} countries, {} cities",
            stats.countries, stats.cities
        ));
        Ok(Dataset {
            inner: Arc::new(db),
        })
    }

    /// `{countries, states, cities}` as a plain object.
    pub fn stats(&self) -> JsValue {
        to_js(&self.inner.stats())
    }

    /// Ranked matches as `{city, state, country, latitude, longitude}`.
    pub fn search(&self, query: &str) -> JsValue {
        to_js(&self.inner.search(query))
    }
}

/* --------------------------------------------------------------------------
   Location form session
-------------------------------------------------------------------------- */

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SubmitStart {
    Ready {
        endpoint: String,
        fields: Vec<(String, String)>,
    },
    Blocked {
        reason: BlockReason,
    },
}

#[wasm_bindgen]
pub struct LocationForm {
    session: PageSession<DefaultBackend>,
}

#[wasm_bindgen]
impl LocationForm {
    /// `config` is a partial `FormConfig` object, or `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(dataset: &Dataset, config: JsValue) -> Result<LocationForm, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            FormConfig::default()
        } else {
            let config: FormConfig = from_value(config).map_err(js_err)?;
            config.validate().map_err(js_err)?;
            config
        };
        Ok(LocationForm {
            session: PageSession::new(Arc::clone(&dataset.inner), config),
        })
    }

    /// Returns the time (same clock as `now`) at which `tick` should run, or
    /// `undefined` when the query is too short and the box was hidden.
    pub fn on_input(&mut self, text: &str, now: f64) -> Option<f64> {
        match self.session.on_input(text, now.max(0.0) as u64) {
            InputOutcome::Hidden => None,
            InputOutcome::Scheduled { due_at } => Some(due_at as f64),
        }
    }

    /// `true` when the suggestions changed and must be re-rendered.
    pub fn tick(&mut self, now: f64) -> bool {
        self.session.tick(now.max(0.0) as u64)
    }

    /// Labels of the rendered suggestions (`"City, State, Country"`).
    pub fn suggestions(&self) -> JsValue {
        let array = js_sys::Array::new();
        for label in self.session.presenter().labels() {
            array.push(&JsValue::from_str(&label));
        }
        array.into()
    }

    pub fn highlighted(&self) -> Option<u32> {
        self.session.presenter().highlighted().map(|i| i as u32)
    }

    pub fn is_showing(&self) -> bool {
        self.session.presenter().is_showing()
    }

    /// Takes a `KeyboardEvent.key`. Returns `true` when the key was handled
    /// and its default action should be prevented.
    pub fn on_key(&mut self, key: &str) -> bool {
        !matches!(self.session.on_key(Key::from_dom(key)), KeyOutcome::Ignored)
    }

    /// Call on `mousedown`, not `click`: the commit must precede `blur`.
    pub fn on_pointer_down(&mut self, index: u32) -> bool {
        self.session.on_pointer_down(index as usize).is_some()
    }

    pub fn on_outside_click(&mut self) {
        self.session.on_outside_click();
    }

    /// One of `already_selected`, `valid`, `rejected`, `empty`.
    pub fn on_blur(&mut self) -> String {
        match self.session.on_blur() {
            BlurOutcome::AlreadySelected => "already_selected",
            BlurOutcome::Valid(_) => "valid",
            BlurOutcome::Rejected => "rejected",
            BlurOutcome::Empty => "empty",
        }
        .to_string()
    }

    pub fn location_text(&self) -> String {
        self.session.location_text().to_string()
    }

    pub fn is_validated(&self) -> bool {
        self.session.is_validated()
    }

    /// `idle`, `showing`, `validated` or `submitting`.
    pub fn state(&self) -> JsValue {
        to_js(&self.session.state())
    }

    /// `[[name, value], ...]` of the hidden latitude/longitude inputs.
    pub fn hidden_fields(&self) -> JsValue {
        to_js(self.session.hidden_fields().pairs())
    }

    /// `{visible, message}` of `#customModal`.
    pub fn modal(&self) -> JsValue {
        to_js(self.session.modal())
    }

    pub fn dismiss_modal(&mut self) {
        self.session.dismiss_modal();
    }

    pub fn submit_label(&self) -> String {
        self.session.submit_label().to_string()
    }

    pub fn submit_enabled(&self) -> bool {
        self.session.submit_enabled()
    }

    /// `fields` is `Array.from(new FormData(form))`. Returns either
    /// `{kind: "ready", endpoint, fields}` or `{kind: "blocked", reason}`.
    pub fn begin_submit(&mut self, fields: JsValue) -> Result<JsValue, JsValue> {
        let pairs: Vec<(String, String)> = from_value(fields).map_err(js_err)?;
        let visible: FormData = pairs.into_iter().collect();

        let start = match self.session.begin_submit(&visible) {
            Ok(request) => SubmitStart::Ready {
                endpoint: request.endpoint,
                fields: request.form.into_pairs(),
            },
            Err(reason) => SubmitStart::Blocked { reason },
        };
        Ok(to_js(&start))
    }

    /// Report the (redirect-followed) response. Returns the `SubmitOutcome`;
    /// on `replace_page` JS swaps the document body for `html`.
    pub fn finish_submit(&mut self, status: u16, body: String) -> JsValue {
        let outcome = self
            .session
            .finish_submit(Ok(TransportResponse { status, body }));
        if let SubmitOutcome::ServerError { status, body } = &outcome {
            log_error(&format!("Error from server ({status}): {body}"));
        }
        to_js(&outcome)
    }

    /// Report a network failure. Logged, never shown as a modal.
    pub fn fail_submit(&mut self, message: String) -> JsValue {
        log_error(&format!("Error submitting form: {message}"));
        let outcome = self
            .session
            .finish_submit(Err(ChartFormError::Transport(message)));
        to_js(&outcome)
    }
}

/* --------------------------------------------------------------------------
   Input masks
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn mask_date(input: &str) -> String {
    form::mask_date(input)
}

#[wasm_bindgen]
pub fn mask_time(input: &str) -> String {
    form::mask_time(input)
}

/// `DD/MM/YYYY` → `YYYY-MM-DD`; throws on impossible dates.
#[wasm_bindgen]
pub fn rewrite_dob(value: &str) -> Result<String, JsValue> {
    form::rewrite_dob(value).map_err(js_err)
}

/* --------------------------------------------------------------------------
   Card details (astrology.json)
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub struct Cards {
    inner: CardCatalog,
}

#[wasm_bindgen]
impl Cards {
    pub fn from_json(json: &str) -> Result<Cards, JsValue> {
        let inner = CardCatalog::from_json_str(json).map_err(|e| {
            log_error(&format!("Error loading card details: {e}"));
            js_err(e)
        })?;
        Ok(Cards { inner })
    }

    /// `{title, description}` or `null`.
    pub fn get(&self, category: &str, key: &str) -> JsValue {
        match self.inner.get(category, key) {
            Some(detail) => to_js(detail),
            None => JsValue::NULL,
        }
    }
}
