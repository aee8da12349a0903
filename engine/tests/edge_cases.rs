//! Edge case tests for memquery
//!
//! These tests cover boundary conditions and unusual inputs.

use memquery::{doc, query, Collection, Error, Store, Value};
use std::sync::Arc;
use std::thread;

fn items(store: &Store) -> Collection {
    store.create_collection("items").unwrap()
}

// ============================================================================
// String Edge Cases
// ============================================================================

#[test]
fn empty_string_fields() {
    let store = Store::new();
    let coll = items(&store);
    coll.insert(doc!({"name": ""})).unwrap();

    assert_eq!(coll.find(query!({"name": ""})).unwrap().len(), 1);
    assert!(coll.find(query!({"name": {"$gt": ""}})).unwrap().is_empty());
}

#[test]
fn unicode_strings() {
    let store = Store::new();
    let coll = items(&store);

    let unicode_names = vec![
        "日本語テスト",      // Japanese
        "Привет мир",        // Russian
        "مرحبا بالعالم",     // Arabic
        "🎉🚀💯",            // Emoji
        "Ω≈ç√∫",             // Math symbols
        "Hello\nWorld\tTab", // Whitespace
        "Null\0Test",        // Embedded null
    ];

    for name in &unicode_names {
        coll.insert(doc!({"name": name})).unwrap();
    }

    for name in &unicode_names {
        let docs = coll.find(query!({"name": name})).unwrap();
        assert_eq!(docs.len(), 1, "Failed for: {}", name);
        assert_eq!(docs[0]["name"], *name);
    }
}

#[test]
fn strings_order_by_code_point() {
    let store = Store::new();
    let coll = items(&store);
    for name in ["b", "B", "é", "a"] {
        coll.insert(doc!({"name": name})).unwrap();
    }

    // 'B' (U+0042) < 'a' (U+0061) < 'b' < 'é' (U+00E9)
    let docs = coll.find(query!({"name": {"$gt": "a"}})).unwrap();
    let found: Vec<_> = docs.iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(found, vec!["b", "é"]);
}

#[test]
fn very_long_strings() {
    let store = Store::new();
    let coll = items(&store);

    // 1MB string
    let long_string = "x".repeat(1024 * 1024);
    coll.insert(doc!({"name": long_string.clone()})).unwrap();

    let docs = coll.find(query!({"name": long_string})).unwrap();
    assert_eq!(docs[0]["name"].as_str().unwrap().len(), 1024 * 1024);
}

#[test]
fn field_with_special_characters_in_name() {
    let store = Store::new();
    let coll = items(&store);
    coll.insert(doc!({"field-with-dash": 1, "field.with.dot": 2, "": 3, " ": 4}))
        .unwrap();

    assert_eq!(coll.count(query!({"field-with-dash": 1})).unwrap(), 1);
    assert_eq!(coll.count(query!({"field.with.dot": 2})).unwrap(), 1);
    assert_eq!(coll.count(query!({"": 3})).unwrap(), 1);
    assert_eq!(coll.count(query!({" ": 4})).unwrap(), 1);
}

#[test]
fn dollar_prefixed_field_cannot_be_queried() {
    let store = Store::new();
    let coll = items(&store);
    coll.insert(doc!({"$price": 5})).unwrap();

    assert_eq!(
        coll.find(query!({"$price": 5})),
        Err(Error::UnsupportedOperator("$price".into()))
    );
}

// ============================================================================
// Numeric Edge Cases
// ============================================================================

#[test]
fn integer_and_float_are_one_kind() {
    let store = Store::new();
    let coll = items(&store);
    coll.insert(doc!({"n": 1})).unwrap();

    assert_eq!(coll.count(query!({"n": 1.0})).unwrap(), 1);
    assert_eq!(coll.count(query!({"n": {"$lt": 1.5}})).unwrap(), 1);
}

#[test]
fn large_integers() {
    let store = Store::new();
    let coll = items(&store);

    let values = vec![i64::MIN, -1i64, 0i64, 1i64, 1i64 << 53];
    for value in &values {
        coll.insert(doc!({"count": value})).unwrap();
    }

    for value in &values {
        let docs = coll.find(query!({"count": value})).unwrap();
        assert_eq!(docs.len(), 1, "Failed for: {}", value);
    }

    assert_eq!(coll.count(query!({"count": {"$lt": 0}})).unwrap(), 2);
}

#[test]
fn float_edge_values() {
    let store = Store::new();
    let coll = items(&store);
    coll.insert(doc!({"v": 0.1})).unwrap();
    coll.insert(doc!({"v": -0.0})).unwrap();
    coll.insert(doc!({"v": f64::MAX})).unwrap();

    // -0.0 == 0.0 under IEEE-754
    assert_eq!(coll.count(query!({"v": 0})).unwrap(), 1);
    assert_eq!(coll.count(query!({"v": {"$gt": 1e300}})).unwrap(), 1);
}

#[test]
fn nan_matches_nothing() {
    let store = Store::new();
    let coll = items(&store);

    let mut doc = Value::object();
    doc.as_object_mut()
        .unwrap()
        .insert("v".to_string(), Value::Number(f64::NAN));
    coll.insert(doc.clone()).unwrap();

    let mut nan_query = Value::object();
    nan_query
        .as_object_mut()
        .unwrap()
        .insert("v".to_string(), Value::Number(f64::NAN));

    assert!(coll.find(nan_query).unwrap().is_empty());
    assert_eq!(coll.count(query!({"v": {"$gt": 0}})).unwrap(), 0);
    assert_eq!(coll.count(query!({"v": {"$lte": 0}})).unwrap(), 0);
    // Still stored and returned by a match-all scan
    assert_eq!(coll.count(query!({})).unwrap(), 1);
}

// ============================================================================
// Kind Edge Cases
// ============================================================================

#[test]
fn json_with_all_types() {
    let store = Store::new();
    let coll = items(&store);
    let document = doc!({
        "string": "hello",
        "number": 42,
        "float": 2.5,
        "bool_true": true,
        "bool_false": false,
        "null": null,
        "array": [1, 2, 3],
        "object": {"nested": "value"}
    });
    coll.insert(document.clone()).unwrap();

    let docs = coll.find(query!({})).unwrap();
    assert_eq!(docs[0], document);
    assert_eq!(coll.count(query!({"null": null})).unwrap(), 1);
    assert_eq!(coll.count(query!({"bool_true": {"$gt": false}})).unwrap(), 1);
    assert_eq!(coll.count(query!({"bool_false": {"$lt": true}})).unwrap(), 1);
}

#[test]
fn null_field_is_not_absent() {
    let store = Store::new();
    let coll = items(&store);
    coll.insert(doc!({"name": "with-null", "x": null})).unwrap();
    coll.insert(doc!({"name": "without"})).unwrap();

    let docs = coll.find(query!({"x": null})).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["name"], "with-null");

    // Null is unordered, but inclusive bounds still accept an equal value
    assert_eq!(coll.count(query!({"x": {"$gte": null}})).unwrap(), 1);
    assert_eq!(coll.count(query!({"x": {"$gt": null}})).unwrap(), 0);
}

#[test]
fn inclusive_bounds_accept_equal_compound_values() {
    let store = Store::new();
    let coll = items(&store);
    coll.insert(doc!({"tags": ["a"], "meta": {"k": 1}, "n": null})).unwrap();

    assert_eq!(coll.count(query!({"tags": {"$eq": ["a"]}})).unwrap(), 1);
    assert_eq!(coll.count(query!({"tags": {"$gte": ["a"]}})).unwrap(), 1);
    assert_eq!(coll.count(query!({"meta": {"$lte": {"k": 1}}})).unwrap(), 1);
    assert_eq!(coll.count(query!({"n": {"$gte": null}})).unwrap(), 1);

    assert_eq!(coll.count(query!({"tags": {"$lt": ["b"]}})).unwrap(), 0);
    assert_eq!(coll.count(query!({"meta": {"$gte": {"k": 2}}})).unwrap(), 0);
}

#[test]
fn deeply_nested_json() {
    let store = Store::new();
    let coll = items(&store);

    let mut nested = doc!({"value": "deep"});
    for i in 0..50 {
        nested = doc!({"level": i, "child": nested});
    }
    coll.insert(nested.clone()).unwrap();

    let docs = coll.find(query!({"child": nested["child"].clone()})).unwrap();
    assert_eq!(docs.len(), 1);
}

#[test]
fn deeply_nested_query_rejected() {
    let store = Store::new();
    let coll = items(&store);
    coll.insert(doc!({"a": 1})).unwrap();

    let mut q = query!({"a": 1});
    for _ in 0..100 {
        q = query!({"$and": [q]});
    }
    assert!(matches!(coll.find(q), Err(Error::MalformedQuery(_))));
}

// ============================================================================
// Concurrent Operations
// ============================================================================

#[test]
fn concurrent_inserts_from_threads() {
    let store = Store::new();
    let coll = items(&store);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let coll = coll.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    coll.insert(doc!({"thread": t, "i": i})).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(coll.len().unwrap(), 800);
    assert_eq!(coll.count(query!({"thread": 3})).unwrap(), 100);

    // Per-thread insertion order is preserved
    let docs = coll.find(query!({"thread": 5})).unwrap();
    let seen: Vec<_> = docs.iter().map(|d| d["i"].as_f64().unwrap()).collect();
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn concurrent_registry_access() {
    let store = Arc::new(Store::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let name = format!("c{}", t);
                let coll = store.create_collection(&name).unwrap();
                coll.insert(doc!({"owner": t})).unwrap();
                // Everyone races to create the shared collection; exactly one wins
                store.create_collection("shared").is_ok()
            })
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(store.len(), 9);
}

#[test]
fn find_and_update_in_threads() {
    let store = Store::new();
    let coll = items(&store);
    for i in 0..10 {
        coll.insert(doc!({"i": i, "hits": 0})).unwrap();
    }

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let coll = coll.clone();
            thread::spawn(move || {
                coll.find_and_update(query!({"i": {"$lt": 5}}), query!({"$set": {"by": t}}))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 5);
    }
    assert_eq!(coll.count(query!({"by": {"$gte": 0}})).unwrap(), 5);
}
