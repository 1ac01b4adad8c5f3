use anyhow::Result;
use maptrans::{is_similar, mappers, translate, Descriptor, MapTransError, Record, Rule, Value};
use serde_json::json;

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {}", other),
    }
}

fn structural_descriptor() -> Descriptor {
    Descriptor::new()
        .rename("name", "Name")
        .rule(
            "info",
            Rule::nested(
                Descriptor::new().rename("address", "Address").rule(
                    "routes",
                    Rule::nested_array(
                        Descriptor::new()
                            .rename("destination", "Destination")
                            .rename("gateway", "Gateway"),
                    )
                    .target("Routes"),
                ),
            )
            .target("Info"),
        )
}

/// 轉換結果與來源經反向描述比對應一致
#[test]
fn test_round_trip_with_inverted_descriptor() -> Result<()> {
    let descriptor = structural_descriptor();
    let source = record(json!({
        "name": "eth0",
        "ignored": 42,
        "info": {
            "address": "10.0.0.2/24",
            "routes": [
                {"destination": "0.0.0.0/0", "gateway": "10.0.0.1"},
                {"destination": "192.168.0.0/16", "gateway": "10.0.0.254"}
            ]
        }
    }));

    let result = translate(&source, Some(&descriptor))?;

    assert!(is_similar(&result, &source, &descriptor.inverted())?);
    // The forward descriptor also checks source against result.
    assert!(is_similar(&source, &result, &descriptor)?);
    Ok(())
}

#[test]
fn test_reordered_array_is_detected() -> Result<()> {
    let descriptor = structural_descriptor();
    let source = record(json!({
        "info": {
            "routes": [
                {"destination": "a", "gateway": "1"},
                {"destination": "b", "gateway": "2"}
            ]
        }
    }));
    let mut result = translate(&source, Some(&descriptor))?;

    let routes = result
        .get_mut("Info")
        .and_then(Value::as_object_mut)
        .and_then(|info| info.get_mut("Routes"))
        .and_then(Value::as_array_mut)
        .expect("translated routes");
    routes.reverse();

    let err = is_similar(&result, &source, &descriptor.inverted()).unwrap_err();
    assert!(matches!(err, MapTransError::Mismatch { .. }));
    Ok(())
}

#[test]
fn test_result_with_wrong_shape() {
    let descriptor = structural_descriptor();
    let source = record(json!({"info": {"routes": [{"gateway": "1"}]}}));
    let result = record(json!({"Info": {"Routes": {"Gateway": "1"}}}));

    let err = is_similar(&source, &result, &descriptor).unwrap_err();
    assert!(err.to_string().contains("invalid destination object"));
}

#[test]
fn test_missing_nested_target() {
    let descriptor = structural_descriptor();
    let source = record(json!({"info": {"address": "x"}}));

    let err = is_similar(&source, &Record::new(), &descriptor).unwrap_err();
    assert!(err.to_string().contains("missing value for 'Info'"));
}

#[test]
fn test_value_mapping_rules_are_not_checked() {
    let descriptor = Descriptor::new().rule("port", Rule::custom(mappers::integer));
    let source = record(json!({"port": 80}));
    let result = record(json!({"port": "80"}));

    let err = is_similar(&source, &result, &descriptor).unwrap_err();
    assert!(matches!(err, MapTransError::UnsupportedTranslation { ref kind } if kind == "custom"));
    assert_eq!(err.to_string(), "unsupported translation type custom");
}
