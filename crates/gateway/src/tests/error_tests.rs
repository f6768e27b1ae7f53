// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;

use crate::GatewayError;

fn classify(status: u16, body: &serde_json::Value) -> GatewayError {
    GatewayError::from_response(status, body.to_string().as_bytes())
}

#[test]
fn test_401_is_fixed_message_whatever_the_body() {
    assert_eq!(classify(401, &json!({"message": "Unauthenticated."})), GatewayError::Auth);
    assert_eq!(GatewayError::from_response(401, b"not json"), GatewayError::Auth);
}

#[test]
fn test_422_joins_every_field_message() {
    let err: GatewayError = classify(
        422,
        &json!({"errors": {"titulo": ["m1", "m2"], "año_publicacion": ["m3"]}}),
    );
    assert_eq!(err.message(), "m1 m2 m3");
}

#[test]
fn test_422_keeps_body_key_order_not_alphabetical() {
    let err: GatewayError = classify(
        422,
        &serde_json::from_str(r#"{"errors": {"zeta": ["m1"], "alpha": ["m2"]}}"#).unwrap(),
    );
    assert_eq!(err.message(), "m1 m2");
}

#[test]
fn test_422_accepts_plain_string_field_messages() {
    let err: GatewayError = classify(422, &json!({"errors": {"libro_id": "Sin stock."}}));
    assert_eq!(err.message(), "Sin stock.");
}

#[test]
fn test_422_without_field_errors_uses_server_message() {
    let err: GatewayError = classify(422, &json!({"message": "El préstamo ya fue devuelto."}));
    assert_eq!(
        err,
        GatewayError::Validation {
            message: String::from("El préstamo ya fue devuelto."),
            fields: Vec::new(),
        }
    );
}

#[test]
fn test_422_with_empty_errors_falls_back_to_message() {
    let err: GatewayError = classify(422, &json!({"message": "Invalid.", "errors": {}}));
    assert_eq!(err.message(), "Invalid.");

    let err: GatewayError = classify(422, &json!({}));
    assert_eq!(err.message(), "Request failed.");
}

#[test]
fn test_404_message_or_generic() {
    assert_eq!(classify(404, &json!({"message": "No query results."})).message(), "No query results.");
    assert_eq!(classify(404, &json!({"message": ""})).message(), "Resource not found.");
}

#[test]
fn test_500_prefers_error_then_message_then_generic() {
    assert_eq!(classify(500, &json!({"error": "e", "message": "m"})).message(), "e");
    assert_eq!(classify(500, &json!({"message": "m"})).message(), "m");
    assert_eq!(classify(500, &json!({})).message(), "Internal server error.");
}

#[test]
fn test_other_statuses_keep_their_code() {
    let err: GatewayError = classify(409, &json!({"message": "Conflict."}));
    assert_eq!(
        err,
        GatewayError::UnknownHttp {
            status: 409,
            message: String::from("Conflict."),
        }
    );
    assert_eq!(err.status(), Some(409));

    let err: GatewayError = GatewayError::from_response(503, b"<html>Service Unavailable</html>");
    assert_eq!(err.message(), "Request failed.");
}

#[test]
fn test_transport_message_names_the_origin() {
    let err: GatewayError = GatewayError::Transport {
        base_url: String::from("http://localhost:8000"),
        detail: String::from("connection refused"),
    };
    assert_eq!(
        err.message(),
        "Connection error. Verify that the backend is reachable at http://localhost:8000."
    );
    assert!(err.is_transport());
}
