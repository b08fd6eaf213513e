//! Integration tests against a faked store action endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use docbridge::{DocumentStore, Error, Params, StoreConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn store_for(server: &MockServer) -> DocumentStore {
    init_tracing();
    let config = StoreConfig {
        endpoint: server.uri(),
        api_key: "test-key".to_string(),
        data_source: "test-cluster".to_string(),
        database: "backoffice".to_string(),
        timeout_secs: 2,
    };
    DocumentStore::new(config).unwrap()
}

#[tokio::test]
async fn insert_then_read_back_round_trip() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    // The write must carry the full connection envelope and the document.
    Mock::given(method("POST"))
        .and(path("/action/insertOne"))
        .and(header("api-key", "test-key"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "dataSource": "test-cluster",
            "database": "backoffice",
            "collection": "orders",
            "document": { "customerId": "c-118", "total": 129.9 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "insertedId": "65af01" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .and(body_partial_json(json!({
            "collection": "orders",
            "filter": { "_id": "65af01" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{ "_id": "65af01", "customerId": "c-118", "total": 129.9 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let insert = store.prepare("INSERT INTO orders (customerId, total) VALUES (?, ?)");
    let written = insert
        .run(&Params::from(vec![json!("c-118"), json!(129.9)]))
        .await
        .unwrap();
    assert_eq!(written.changes, 1);
    let id = written.inserted_id.expect("store reports an inserted id");

    let select = store.prepare("SELECT * FROM orders WHERE _id = ?");
    let rows = select.all(&Params::from(vec![json!(id)])).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["customerId"], json!("c-118"));
    assert_eq!(rows[0]["total"], json!(129.9));
}

#[tokio::test]
async fn update_sends_set_document_and_reports_changes() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    Mock::given(method("POST"))
        .and(path("/action/updateMany"))
        .and(body_partial_json(json!({
            "collection": "tasks",
            "filter": { "id": 4 },
            "update": { "$set": { "title": "re-check invoice" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "modifiedCount": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let update = store.prepare("UPDATE tasks SET title = :title WHERE id = :id");
    let written = update
        .run(&Params::from(json!({ "title": "re-check invoice", "id": 4 })))
        .await
        .unwrap();
    assert_eq!(written.changes, 1);
    assert_eq!(written.inserted_id, None);
}

#[tokio::test]
async fn delete_reports_deleted_count() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    Mock::given(method("POST"))
        .and(path("/action/deleteMany"))
        .and(body_partial_json(json!({
            "collection": "boletos",
            "filter": { "id": { "$in": [7, 8] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deletedCount": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let delete = store.prepare("DELETE FROM boletos WHERE id IN (?, ?)");
    let written = delete
        .run(&Params::from(vec![json!(7), json!(8)]))
        .await
        .unwrap();
    assert_eq!(written.changes, 2);
}

#[tokio::test]
async fn get_returns_first_row_after_sort_or_none() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .and(body_partial_json(json!({ "collection": "orders" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                { "id": 1, "total": 10 },
                { "id": 2, "total": 90 }
            ]
        })))
        .mount(&server)
        .await;

    let stmt = store.prepare("SELECT * FROM orders ORDER BY total DESC");
    let first = stmt.get(&Params::None).await.unwrap().unwrap();
    assert_eq!(first["id"], json!(2));

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "documents": [] })))
        .mount(&server)
        .await;

    let none = stmt.get(&Params::None).await.unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn remote_error_surfaces_status_and_body() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let stmt = store.prepare("SELECT * FROM orders");
    let err = stmt.all(&Params::None).await.unwrap_err();
    match err {
        Error::Remote { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("internal error"));
        }
        other => panic!("expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn unsupported_statements_never_reach_the_network() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    // Any request at all fails the test.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let err = store.prepare("VACUUM").run(&Params::None).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));

    let multi = store.prepare("SELECT * FROM orders WHERE a = ? AND b = ?");
    let err = multi
        .all(&Params::from(vec![json!(1), json!(2)]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedPredicate(_)));

    server.verify().await;
}

#[tokio::test]
async fn transaction_runs_once_and_does_not_roll_back() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    // First step lands; second step fails at the store.
    Mock::given(method("POST"))
        .and(path("/action/insertOne"))
        .and(body_partial_json(json!({ "collection": "audit" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "insertedId": "a1" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/action/updateMany"))
        .respond_with(ResponseTemplate::new(500).set_body_string("write refused"))
        .expect(1)
        .mount(&server)
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let tx = store.transaction({
        let store = store.clone();
        let calls = Arc::clone(&calls);
        move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            store
                .prepare("INSERT INTO audit (event) VALUES (?)")
                .run(&Params::from(vec![json!("closing-started")]))
                .await?;
            store
                .prepare("UPDATE caixa SET aberto = :aberto WHERE id = :id")
                .run(&Params::from(json!({ "aberto": false, "id": 1 })))
                .await?;
            Ok::<(), Error>(())
        }
    });

    let result = tx().await;
    assert!(matches!(result, Err(Error::Remote { status: 500, .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // The insert is not undone by the failed update: both expectations
    // (one insertOne, one updateMany) hold.
    server.verify().await;
}
