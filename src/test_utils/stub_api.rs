//! An in-process stand-in for the transactions API.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use time::OffsetDateTime;

use crate::api::{ApiClient, Category, Transaction, TransactionType};

/// Serve `router` on an ephemeral local port and return its base URL.
pub(crate) async fn spawn_stub_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind stub API listener");
    let address = listener
        .local_addr()
        .expect("Could not get stub API address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub API server failed");
    });

    format!("http://{address}")
}

pub(crate) fn stub_api_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, ApiClient::DEFAULT_TIMEOUT).expect("Could not create API client")
}

/// A stub API whose `GET /transactions` always answers with `body`.
pub(crate) fn stub_listing(body: Value) -> Router {
    Router::new().route(
        "/transactions",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    )
}

/// Two transactions listed as (B, A) with a balance of 1000/200/800.
pub(crate) fn scenario_response() -> Value {
    json!({
        "balance": { "income": 1000, "outcome": 200, "total": 800 },
        "transactions": [
            {
                "id": "1",
                "title": "B",
                "value": 50,
                "type": "income",
                "category": { "title": "Food" },
                "created_at": "2020-01-02"
            },
            {
                "id": "2",
                "title": "A",
                "value": 30,
                "type": "outcome",
                "category": { "title": "Bills" },
                "created_at": "2020-01-01"
            }
        ]
    })
}

pub(crate) fn scenario_listing() -> Router {
    stub_listing(scenario_response())
}

pub(crate) fn test_transaction(
    id: &str,
    title: &str,
    value: f64,
    category: &str,
    created_at: OffsetDateTime,
) -> Transaction {
    Transaction {
        id: id.to_owned(),
        title: title.to_owned(),
        value,
        kind: TransactionType::Income,
        category: Category {
            title: category.to_owned(),
        },
        created_at,
    }
}
