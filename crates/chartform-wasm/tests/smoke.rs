use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

use chartform_wasm::{mask_date, rewrite_dob, Dataset, LocationForm};

const DATA: &str = r#"[{"name":"United Kingdom","states":[{"name":"England","cities":[
    {"name":"London","latitude":"51.50853","longitude":"-0.12574"}]}]}]"#;

#[wasm_bindgen_test]
fn select_with_keyboard_then_blur() {
    let dataset = Dataset::from_json(DATA).unwrap();
    let mut form = LocationForm::new(&dataset, JsValue::UNDEFINED).unwrap();

    assert!(form.on_input("L", 0.0).is_none());
    assert_eq!(form.on_input("Lon", 0.0), Some(200.0));
    assert!(form.tick(200.0));
    assert!(form.is_showing());

    assert!(form.on_key("ArrowDown"));
    assert!(form.on_key("Enter"));
    assert_eq!(form.location_text(), "London, England, United Kingdom");
    assert_eq!(form.on_blur(), "already_selected");
}

#[wasm_bindgen_test]
fn unknown_city_is_rejected_on_blur() {
    let dataset = Dataset::from_json(DATA).unwrap();
    let mut form = LocationForm::new(&dataset, JsValue::UNDEFINED).unwrap();

    form.on_input("Par", 0.0);
    assert_eq!(form.on_blur(), "rejected");
    assert_eq!(form.location_text(), "");
    assert!(!form.is_validated());
}

#[wasm_bindgen_test]
fn masks_and_dob() {
    assert_eq!(mask_date("07031988"), "07/03/1988");
    assert_eq!(rewrite_dob("07/03/1988").unwrap(), "1988-03-07");
    assert!(rewrite_dob("99/99/1988").is_err());
}

#[wasm_bindgen_test]
fn stats_is_a_plain_object() {
    let dataset = Dataset::from_json(DATA).unwrap();
    let stats = dataset.stats();
    assert!(!stats.is_instance_of::<js_sys::Map>());
    let cities = js_sys::Reflect::get(&stats, &JsValue::from_str("cities")).unwrap();
    assert_eq!(cities.as_f64(), Some(1.0));
}
