//! WASM <-> JavaScript bridge for dashboard widgets.

use savings_core::{ReportConfig, ReportError};
use savings_report::CaseFilter;
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsReportConfig {
    #[serde(default)]
    medication_limit: Option<usize>,
    #[serde(default)]
    doctor_roi_limit: Option<usize>,
    #[serde(default)]
    yearly_window: Option<usize>,
    #[serde(default)]
    unassigned_doctor_label: Option<String>,
    #[serde(default)]
    unnamed_medication_label: Option<String>,
    #[serde(default)]
    unknown_specialty_label: Option<String>,
    #[serde(default)]
    no_specialty_label: Option<String>,
}

impl From<JsReportConfig> for ReportConfig {
    fn from(cfg: JsReportConfig) -> Self {
        let mut base = ReportConfig::default();
        if let Some(limit) = cfg.medication_limit {
            base.medication_limit = limit;
        }
        if let Some(limit) = cfg.doctor_roi_limit {
            base.doctor_roi_limit = limit;
        }
        if let Some(window) = cfg.yearly_window {
            base.yearly_window = window;
        }
        if let Some(label) = cfg.unassigned_doctor_label {
            base.unassigned_doctor_label = label;
        }
        if let Some(label) = cfg.unnamed_medication_label {
            base.unnamed_medication_label = label;
        }
        if let Some(label) = cfg.unknown_specialty_label {
            base.unknown_specialty_label = label;
        }
        if let Some(label) = cfg.no_specialty_label {
            base.no_specialty_label = label;
        }
        base
    }
}

/// Build the full report from an array of case rows, optionally narrowed by
/// a filter object before aggregation.
#[wasm_bindgen]
pub fn build_report(
    cases: JsValue,
    config: Option<JsValue>,
    filter: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cases_value = from_value::<serde_json::Value>(cases)
        .map_err(|err| JsValue::from_str(&format!("Could not read case rows: {err}")))?;

    let cfg = match config {
        Some(js_cfg) => {
            let cfg: JsReportConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            ReportConfig::from(cfg)
        }
        None => ReportConfig::default(),
    };

    let case_filter = match filter {
        Some(js_filter) => from_value::<CaseFilter>(js_filter)
            .map_err(|err| JsValue::from_str(&format!("Could not read filter: {err}")))?,
        None => CaseFilter::default(),
    };

    let cases = savings_report::cases_from_value(&cases_value)
        .map_err(|err| JsValue::from_str(&format_report_error(err)))?;
    let report = savings_report::build_report(&case_filter.apply(cases), &cfg);

    to_value(&report)
        .map_err(|err| JsValue::from_str(&format!("Could not serialize report: {err}")))
}

fn format_report_error(err: ReportError) -> String {
    format!("Report error: {err}")
}
