//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Expected tasks are written in wire form and
//! decoded, so the vectors double as fixtures for the codec. Comparing parsed
//! JSON (not raw strings) avoids false negatives from field ordering.

use chrono::DateTime;
use serde_json::Value;
use task_core::codec::decode_task;
use task_core::report::describe;
use task_core::wire::WireTask;
use task_core::{
    Draft, HttpMethod, HttpRequest, HttpResponse, Operation, Priority, Task, TaskClient, TaskError,
    TaskId,
};

const BASE_URL: &str = "http://localhost:8000";

fn client() -> TaskClient {
    TaskClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn wire_task(value: &Value) -> Task {
    let wire: WireTask = serde_json::from_value(value.clone()).unwrap();
    decode_task(wire).unwrap()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
    match expected.get("body") {
        Some(body) => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Checks an expected failure. Returns true when the case expected one.
fn check_error<T: std::fmt::Debug>(name: &str, case: &Value, operation: Operation, result: &Result<T, TaskError>) -> bool {
    let Some(expected) = case.get("expected_error") else {
        return false;
    };
    let err = result.as_ref().unwrap_err();
    match expected.as_str().unwrap() {
        "Decode" => assert!(matches!(err, TaskError::Decode(_)), "{name}: expected Decode, got {err:?}"),
        "Server" => assert!(matches!(err, TaskError::Server { .. }), "{name}: expected Server, got {err:?}"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
    if let Some(message) = case.get("expected_message") {
        assert_eq!(describe(operation, err), message.as_str().unwrap(), "{name}: message");
    }
    true
}

fn draft_from(input: &Value) -> Draft {
    Draft {
        title: input["title"].as_str().unwrap().to_string(),
        description: input["description"].as_str().unwrap().to_string(),
        priority: input["priority"].as_str().map(|p| p.parse::<Priority>().unwrap()),
        due_date: input["due_date"]
            .as_str()
            .map(|d| DateTime::parse_from_rfc3339(d).unwrap()),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_tasks();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_tasks(simulated_response(case));
        if check_error(name, case, Operation::Fetch, &result) {
            continue;
        }
        let expected: Vec<Task> = case["expected_result"]
            .as_array()
            .unwrap()
            .iter()
            .map(wire_task)
            .collect();
        assert_eq!(result.unwrap(), expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_create_task(&draft_from(&case["input"])).unwrap();
        assert_request(name, &req, expected_req);

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let result = c.parse_create_task(simulated_response(case));
        if check_error(name, case, Operation::Create, &result) {
            continue;
        }
        assert_eq!(result.unwrap(), wire_task(&case["expected_result"]), "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_update_task(&wire_task(&case["input"])).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_task(simulated_response(case));
        if check_error(name, case, Operation::Update, &result) {
            continue;
        }
        assert_eq!(result.unwrap(), wire_task(&case["expected_result"]), "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = TaskId(case["input_id"].as_i64().unwrap());

        let req = c.build_delete_task(id);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_task(simulated_response(case));
        if check_error(name, case, Operation::Delete, &result) {
            continue;
        }
        assert!(result.is_ok(), "{name}: expected success");
    }
}
