// Browser-side checks for the JS boundary. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use greeting_core::Experience;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    assert!(Experience::new("{not json").is_err());
    assert!(Experience::new(r#"{"loading":{"tick_ms":0}}"#).is_err());
    assert!(Experience::new(r#"{"gallery":[]}"#).is_err());
}

#[wasm_bindgen_test]
fn bad_inputs_are_rejected() {
    let mut experience = Experience::new("{}").unwrap();
    assert!(experience.process(0.0, r#"[{"type":"jump"}]"#).is_err());
    assert!(experience.is_revealed("footer").is_err());
}

#[wasm_bindgen_test]
fn out_of_range_open_lands_in_rejected() {
    let mut experience = Experience::new(r#"{"seed":1}"#).unwrap();
    experience.process(0.0, r#"[{"type":"enter"}]"#).unwrap();
    experience.process(3500.0, "[]").unwrap();

    let frame = experience
        .process(3600.0, r#"[{"type":"open_lightbox","index":99}]"#)
        .unwrap();
    let frame: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert!(frame["lightbox"].is_null());
    assert_eq!(frame["rejected"].as_array().unwrap().len(), 1);
}

#[wasm_bindgen_test]
fn lightbox_keys_round_the_ring() {
    let mut experience = Experience::new(r#"{"seed":1}"#).unwrap();
    experience.process(0.0, r#"[{"type":"enter"}]"#).unwrap();
    experience.process(3500.0, "[]").unwrap();

    let frame = experience
        .process(
            3600.0,
            r#"[{"type":"open_lightbox","index":14},{"type":"key","key":"ArrowRight"}]"#,
        )
        .unwrap();
    let frame: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(frame["lightbox"]["index"], 0);
    assert_eq!(frame["lightbox"]["direction"], 1);
    assert_eq!(frame["listeners"][0]["listener"], "keydown");
}
