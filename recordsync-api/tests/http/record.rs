use crate::context::{record, MockIntegrationClient, TestServer, CUSTOMER_ID};
use http::{Method, StatusCode};
use recordsync_domain::RemoteActionError;
use serde_json::{json, Value};

fn vendor_fault() -> Value {
    json!({ "data": { "Fault": { "Error": [{ "Message": "X" }] } } })
}

#[tokio::test]
async fn create_runs_the_create_action_on_the_matching_connection() {
    let server = TestServer::with_integration(
        MockIntegrationClient::default()
            .with_connection("conn_xero", "xero")
            .with_connection("conn_qbo", "qbo")
            .with_output(json!({ "id": "35", "name": "Cash", "status": "Active" })),
    )
    .await;

    let res = server
        .send_request(
            "api/records/create",
            Method::POST,
            Some(CUSTOMER_ID),
            Some(&json!({ "integrationKey": "qbo", "fields": { "name": "Cash" } })),
        )
        .await
        .expect("Failed to call create");

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(
        res.data,
        json!({ "success": true, "data": { "id": "35", "name": "Cash", "status": "Active" } })
    );

    let calls = server.integration.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].customer_id, CUSTOMER_ID);
    assert_eq!(calls[0].connection_id, "conn_qbo");
    assert_eq!(calls[0].action_key, "create-ledger-account");
    assert_eq!(calls[0].input, json!({ "fields": { "name": "Cash" } }));

    // create does not write to the local store
    assert!(server.records.all().await.is_empty());
}

#[tokio::test]
async fn create_rejects_invalid_payloads_before_any_remote_call() {
    let server = TestServer::new().await;

    let cases = [
        (
            json!({ "fields": { "name": "Cash" } }),
            "Integration key is required",
        ),
        (
            json!({ "integrationKey": "", "fields": { "name": "Cash" } }),
            "Integration key is required",
        ),
        (json!({ "integrationKey": "qbo" }), "Fields are required"),
        (
            json!({ "integrationKey": "qbo", "fields": null }),
            "Fields are required",
        ),
        (
            json!({ "integrationKey": "qbo", "fields": "name=Cash" }),
            "Fields are required",
        ),
    ];

    for (payload, message) in cases {
        let res = server
            .send_request(
                "api/records/create",
                Method::POST,
                Some(CUSTOMER_ID),
                Some(&payload),
            )
            .await
            .expect("Failed to call create");

        assert_eq!(res.code, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(res.data, json!({ "error": message }), "payload: {payload}");
    }

    assert_eq!(server.integration.connection_lookups(), 0);
    assert!(server.integration.calls().is_empty());
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let server = TestServer::new().await;

    let res = server
        .send_raw(
            "api/records/create",
            Method::POST,
            Some(CUSTOMER_ID),
            "{\"integrationKey\": ",
        )
        .await
        .expect("Failed to call create");

    assert_eq!(res.code, StatusCode::BAD_REQUEST);
    assert!(res.data["error"].is_string());
    assert!(server.integration.calls().is_empty());
}

#[tokio::test]
async fn create_with_unknown_record_type_is_not_found() {
    let server = TestServer::new().await;

    let res = server
        .send_request(
            "api/records/create",
            Method::POST,
            Some(CUSTOMER_ID),
            Some(&json!({
                "integrationKey": "qbo",
                "fields": { "name": "Jane" },
                "recordType": "get-contacts"
            })),
        )
        .await
        .expect("Failed to call create");

    assert_eq!(res.code, StatusCode::NOT_FOUND);
    assert_eq!(
        res.data,
        json!({ "error": "Record action not found: get-contacts" })
    );
    assert!(server.integration.calls().is_empty());
}

#[tokio::test]
async fn create_without_connection_is_not_found_and_runs_nothing() {
    let server = TestServer::new().await;

    let res = server
        .send_request(
            "api/records/create",
            Method::POST,
            Some(CUSTOMER_ID),
            Some(&json!({ "integrationKey": "xero", "fields": { "name": "Cash" } })),
        )
        .await
        .expect("Failed to call create");

    assert_eq!(res.code, StatusCode::NOT_FOUND);
    assert_eq!(
        res.data,
        json!({ "error": "No connection found for integration: xero" })
    );
    assert!(server.integration.calls().is_empty());
}

#[tokio::test]
async fn create_surfaces_the_vendor_fault_message() {
    let server = TestServer::with_integration(
        MockIntegrationClient::default()
            .with_connection("conn_qbo", "qbo")
            .failing_with(RemoteActionError::integration_app(
                400,
                "Request failed with status code 400",
                Some(vendor_fault()),
            )),
    )
    .await;

    let res = server
        .send_request(
            "api/records/create",
            Method::POST,
            Some(CUSTOMER_ID),
            Some(&json!({ "integrationKey": "qbo", "fields": { "name": "Cash" } })),
        )
        .await
        .expect("Failed to call create");

    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.data["error"], "X");
    assert_eq!(res.data["errorData"], vendor_fault());
}

#[tokio::test]
async fn create_falls_back_to_the_platform_message() {
    let server = TestServer::with_integration(
        MockIntegrationClient::default()
            .with_connection("conn_qbo", "qbo")
            .failing_with(RemoteActionError::transport("connection reset")),
    )
    .await;

    let res = server
        .send_request(
            "api/records/create",
            Method::POST,
            Some(CUSTOMER_ID),
            Some(&json!({ "integrationKey": "qbo", "fields": { "name": "Cash" } })),
        )
        .await
        .expect("Failed to call create");

    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.data, json!({ "error": "connection reset" }));
}

#[tokio::test]
async fn update_runs_the_update_action() {
    let server = TestServer::new().await;

    let res = server
        .send_request(
            "api/records/update",
            Method::PUT,
            Some(CUSTOMER_ID),
            Some(&json!({
                "integrationKey": "qbo",
                "id": "35",
                "fields": { "name": "Petty Cash" }
            })),
        )
        .await
        .expect("Failed to call update");

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(res.data["success"], true);
    assert_eq!(res.data["data"], json!({ "id": "35", "name": "Cash" }));

    let calls = server.integration.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].action_key, "update-ledger-account");
    assert_eq!(
        calls[0].input,
        json!({ "input": { "id": "35", "fields": { "name": "Petty Cash" } } })
    );
}

#[tokio::test]
async fn update_forwards_the_record_id_as_sent() {
    let server = TestServer::new().await;

    let res = server
        .send_request(
            "api/records/update",
            Method::PUT,
            Some(CUSTOMER_ID),
            Some(&json!({
                "integrationKey": "qbo",
                "id": " 35 ",
                "fields": { "name": "Petty Cash" }
            })),
        )
        .await
        .expect("Failed to call update");

    assert_eq!(res.code, StatusCode::OK);

    let calls = server.integration.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].input,
        json!({ "input": { "id": " 35 ", "fields": { "name": "Petty Cash" } } })
    );
}

#[tokio::test]
async fn update_matches_the_integration_key_as_sent() {
    let server = TestServer::new().await;

    let res = server
        .send_request(
            "api/records/update",
            Method::PUT,
            Some(CUSTOMER_ID),
            Some(&json!({
                "integrationKey": " qbo ",
                "id": "35",
                "fields": { "name": "Petty Cash" }
            })),
        )
        .await
        .expect("Failed to call update");

    assert_eq!(res.code, StatusCode::NOT_FOUND);
    assert_eq!(
        res.data,
        json!({ "error": "No connection found for integration:  qbo " })
    );
    assert!(server.integration.calls().is_empty());
}

#[tokio::test]
async fn update_validates_in_order() {
    let server = TestServer::new().await;

    let cases = [
        (json!({}), "Integration key is required"),
        (json!({ "id": "35" }), "Integration key is required"),
        (json!({ "integrationKey": "qbo" }), "Record ID is required"),
        (
            json!({ "integrationKey": "qbo", "fields": { "name": "Cash" } }),
            "Record ID is required",
        ),
        (
            json!({ "integrationKey": "qbo", "id": "35" }),
            "Fields are required",
        ),
    ];

    for (payload, message) in cases {
        let res = server
            .send_request(
                "api/records/update",
                Method::PUT,
                Some(CUSTOMER_ID),
                Some(&payload),
            )
            .await
            .expect("Failed to call update");

        assert_eq!(res.code, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(res.data, json!({ "error": message }), "payload: {payload}");
    }

    assert!(server.integration.calls().is_empty());
}

#[tokio::test]
async fn update_without_connection_is_not_found() {
    let server = TestServer::with_integration(
        MockIntegrationClient::default()
            .with_connection("conn_xero", "xero")
            .with_dangling_connection("conn_orphan"),
    )
    .await;

    let res = server
        .send_request(
            "api/records/update",
            Method::PUT,
            Some(CUSTOMER_ID),
            Some(&json!({ "integrationKey": "qbo", "id": "35", "fields": { "name": "Cash" } })),
        )
        .await
        .expect("Failed to call update");

    assert_eq!(res.code, StatusCode::NOT_FOUND);
    assert_eq!(
        res.data,
        json!({ "error": "No connection found for integration: qbo" })
    );
    assert!(server.integration.calls().is_empty());
}

#[tokio::test]
async fn update_surfaces_the_vendor_fault_message() {
    let server = TestServer::with_integration(
        MockIntegrationClient::default()
            .with_connection("conn_qbo", "qbo")
            .failing_with(RemoteActionError::integration_app(
                400,
                "Bad Request",
                Some(vendor_fault()),
            )),
    )
    .await;

    let res = server
        .send_request(
            "api/records/update",
            Method::PUT,
            Some(CUSTOMER_ID),
            Some(&json!({ "integrationKey": "qbo", "id": "35", "fields": { "name": "Cash" } })),
        )
        .await
        .expect("Failed to call update");

    assert_eq!(res.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.data["error"], "X");
}

#[tokio::test]
async fn delete_removes_remotely_by_external_id_then_locally() {
    let server = TestServer::new().await;
    server
        .records
        .insert(record("rec_1", CUSTOMER_ID, json!({ "name": "Cash", "ExternalId": "93" })))
        .await;

    let res = server
        .send_request::<Value>(
            "api/records/delete?id=rec_1&integrationKey=qbo",
            Method::DELETE,
            Some(CUSTOMER_ID),
            None,
        )
        .await
        .expect("Failed to call delete");

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(
        res.data,
        json!({ "success": true, "message": "Record deleted successfully" })
    );

    let calls = server.integration.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].action_key, "delete-ledger-account");
    assert_eq!(calls[0].input, json!({ "id": "93" }));
    assert!(server.records.all().await.is_empty());
}

#[tokio::test]
async fn delete_falls_back_to_the_local_id() {
    let server = TestServer::new().await;
    server
        .records
        .insert(record("rec_2", CUSTOMER_ID, json!({ "name": "Bank" })))
        .await;

    let res = server
        .send_request::<Value>(
            "api/records/delete?id=rec_2&integrationKey=qbo",
            Method::DELETE,
            Some(CUSTOMER_ID),
            None,
        )
        .await
        .expect("Failed to call delete");

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(server.integration.calls()[0].input, json!({ "id": "rec_2" }));
}

#[tokio::test]
async fn deleting_twice_is_not_found() {
    let server = TestServer::new().await;
    server
        .records
        .insert(record("rec_1", CUSTOMER_ID, json!({})))
        .await;

    let path = "api/records/delete?id=rec_1&integrationKey=qbo";
    let first = server
        .send_request::<Value>(path, Method::DELETE, Some(CUSTOMER_ID), None)
        .await
        .expect("Failed to call delete");
    let second = server
        .send_request::<Value>(path, Method::DELETE, Some(CUSTOMER_ID), None)
        .await
        .expect("Failed to call delete");

    assert_eq!(first.code, StatusCode::OK);
    assert_eq!(second.code, StatusCode::NOT_FOUND);
    assert_eq!(second.data, json!({ "error": "Record not found" }));
    assert_eq!(server.integration.calls().len(), 1);
}

#[tokio::test]
async fn delete_removes_locally_when_the_remote_delete_fails() {
    let server = TestServer::with_integration(
        MockIntegrationClient::default()
            .with_connection("conn_qbo", "qbo")
            .failing_with(RemoteActionError::integration_app(
                400,
                "Bad Request",
                Some(vendor_fault()),
            )),
    )
    .await;
    server
        .records
        .insert(record("rec_1", CUSTOMER_ID, json!({ "ExternalId": 93 })))
        .await;

    let res = server
        .send_request::<Value>(
            "api/records/delete?id=rec_1&integrationKey=qbo",
            Method::DELETE,
            Some(CUSTOMER_ID),
            None,
        )
        .await
        .expect("Failed to call delete");

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(server.integration.calls()[0].input, json!({ "id": "93" }));
    assert!(server.records.all().await.is_empty());
}

#[tokio::test]
async fn delete_only_sees_the_callers_records() {
    let server = TestServer::new().await;
    server
        .records
        .insert(record("rec_1", "cust_2", json!({})))
        .await;

    let res = server
        .send_request::<Value>(
            "api/records/delete?id=rec_1&integrationKey=qbo",
            Method::DELETE,
            Some(CUSTOMER_ID),
            None,
        )
        .await
        .expect("Failed to call delete");

    assert_eq!(res.code, StatusCode::NOT_FOUND);
    assert_eq!(server.records.all().await.len(), 1);
    assert!(server.integration.calls().is_empty());
}

#[tokio::test]
async fn delete_requires_id_and_integration_key() {
    let server = TestServer::new().await;

    let cases = [
        ("api/records/delete", "Record ID is required"),
        ("api/records/delete?integrationKey=qbo", "Record ID is required"),
        ("api/records/delete?id=rec_1", "Integration key is required"),
        (
            "api/records/delete?id=rec_1&integrationKey=",
            "Integration key is required",
        ),
    ];

    for (path, message) in cases {
        let res = server
            .send_request::<Value>(path, Method::DELETE, Some(CUSTOMER_ID), None)
            .await
            .expect("Failed to call delete");

        assert_eq!(res.code, StatusCode::BAD_REQUEST, "path: {path}");
        assert_eq!(res.data, json!({ "error": message }), "path: {path}");
    }
}

#[tokio::test]
async fn delete_without_connection_keeps_the_record() {
    let server = TestServer::new().await;
    server
        .records
        .insert(record("rec_1", CUSTOMER_ID, json!({})))
        .await;

    let res = server
        .send_request::<Value>(
            "api/records/delete?id=rec_1&integrationKey=xero",
            Method::DELETE,
            Some(CUSTOMER_ID),
            None,
        )
        .await
        .expect("Failed to call delete");

    assert_eq!(res.code, StatusCode::NOT_FOUND);
    assert_eq!(
        res.data,
        json!({ "error": "No connection found for integration: xero" })
    );
    assert_eq!(server.records.all().await.len(), 1);
}

#[tokio::test]
async fn list_is_scoped_to_the_caller() {
    let server = TestServer::new().await;
    for id in ["rec_1", "rec_2", "rec_3"] {
        server
            .records
            .insert(record(id, CUSTOMER_ID, json!({ "name": id })))
            .await;
    }
    server
        .records
        .insert(record("rec_9", "cust_2", json!({})))
        .await;

    let res = server
        .send_request::<Value>("api/records?limit=2", Method::GET, Some(CUSTOMER_ID), None)
        .await
        .expect("Failed to list records");

    assert_eq!(res.code, StatusCode::OK);
    assert_eq!(res.data["success"], true);
    assert_eq!(res.data["data"]["total"], 3);
    assert_eq!(res.data["data"]["limit"], 2);
    assert_eq!(res.data["data"]["skip"], 0);

    let rows = res.data["data"]["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["customerId"] == CUSTOMER_ID));
}

#[tokio::test]
async fn list_rejects_malformed_pagination() {
    let server = TestServer::new().await;

    let res = server
        .send_request::<Value>(
            "api/records?limit=many",
            Method::GET,
            Some(CUSTOMER_ID),
            None,
        )
        .await
        .expect("Failed to list records");

    assert_eq!(res.code, StatusCode::BAD_REQUEST);
    assert!(res.data["error"].is_string());
}
