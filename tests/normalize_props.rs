use academy_codelab_lib::normalize::normalize;
use academy_codelab_lib::types::{FORMAT_KIND, FORMAT_VERSION};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        ".{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{0,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("html".to_string()),
        Just("css".to_string()),
        Just("js".to_string()),
        Just("web".to_string()),
        Just("assignment".to_string()),
        Just("task".to_string()),
        Just("test".to_string()),
        Just("tests".to_string()),
        Just("version".to_string()),
        Just("kind".to_string()),
        "[a-z]{1,6}",
    ]
}

/// Objects biased towards the keys the normalizer actually reads, including
/// `web` objects with source fields.
fn arb_project_like() -> impl Strategy<Value = Value> {
    let web = prop::collection::btree_map(
        prop_oneof![Just("html".to_string()), Just("css".to_string()), Just("js".to_string())],
        arb_json(),
        0..3,
    )
    .prop_map(|m| Value::Object(m.into_iter().collect()));

    (prop::collection::btree_map(arb_key(), arb_json(), 0..8), prop::option::of(web)).prop_map(|(fields, web)| {
        let mut map: Map<String, Value> = fields.into_iter().collect();
        if let Some(web) = web {
            map.insert("web".to_string(), web);
        }
        Value::Object(map)
    })
}

fn arb_non_object() -> impl Strategy<Value = Value> {
    arb_json().prop_filter("objects are accepted", |v| !v.is_object())
}

proptest! {
    #[test]
    fn normalize_is_total_on_objects(raw in arb_project_like()) {
        let project = normalize(&raw).unwrap();
        prop_assert_eq!(project.version, FORMAT_VERSION);
        prop_assert_eq!(project.kind.as_str(), FORMAT_KIND);
    }

    #[test]
    fn normalize_rejects_everything_else(raw in arb_non_object()) {
        prop_assert!(normalize(&raw).is_err());
    }

    #[test]
    fn normalizing_a_canonical_project_is_a_no_op(raw in arb_project_like()) {
        let once = normalize(&raw).unwrap();
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = normalize(&serialized).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn direct_strings_always_win(html in ".{0,16}", nested in ".{0,16}") {
        let raw = serde_json::json!({ "html": html.clone(), "web": { "html": nested } });
        prop_assert_eq!(normalize(&raw).unwrap().html, html);
    }
}
