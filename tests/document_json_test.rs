use registry_document_service::models::{Description, Document, Product, ToJson};
use serde_json::Value;

#[test]
fn empty_document_serializes_to_empty_object() {
    assert_eq!(Document::default().to_json(), "{}");
}

#[test]
fn absent_fields_and_empty_product_list_are_omitted() {
    let document = Document {
        doc_id: Some("1".to_string()),
        ..Default::default()
    };

    assert_eq!(document.to_json(), r#"{"doc_id":"1"}"#);

    let parsed: Value = serde_json::from_str(&document.to_json()).unwrap();
    assert!(parsed.get("products").is_none());
    assert!(parsed.get("doc_status").is_none());
    assert!(parsed.get("description").is_none());
}

#[test]
fn nested_description_and_products_serialize_recursively() {
    let document = Document {
        description: Some(Description {
            participant_inn: Some("7700000000".to_string()),
        }),
        doc_id: Some("doc-42".to_string()),
        doc_type: Some("LP_INTRODUCE_GOODS".to_string()),
        products: vec![
            Product {
                tnved_code: Some("6403".to_string()),
                uit_code: Some("uit-1".to_string()),
                ..Default::default()
            },
            Product {
                uitu_code: Some("uitu-2".to_string()),
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let parsed: Value = serde_json::from_str(&document.to_json()).unwrap();
    assert_eq!(parsed["description"]["participantInn"], "7700000000");
    assert_eq!(parsed["doc_id"], "doc-42");

    let products = parsed["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["tnved_code"], "6403");
    assert_eq!(products[1]["uitu_code"], "uitu-2");
    assert!(products[0].get("owner_inn").is_none());
}

#[test]
fn embedded_quotes_are_escaped() {
    let document = Document {
        doc_id: Some(r#"say "hi""#.to_string()),
        ..Default::default()
    };

    assert_eq!(document.to_json(), r#"{"doc_id":"say \"hi\""}"#);

    let parsed: Value = serde_json::from_str(&document.to_json()).unwrap();
    assert_eq!(parsed["doc_id"], r#"say "hi""#);
}

#[test]
fn import_request_keeps_camel_case_wire_name() {
    let document = Document {
        import_request: Some("true".to_string()),
        owner_inn: Some("1".to_string()),
        ..Default::default()
    };

    assert_eq!(
        document.to_json(),
        r#"{"importRequest":"true","owner_inn":"1"}"#
    );
}
