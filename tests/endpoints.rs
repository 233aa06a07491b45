mod common;

use std::sync::Arc;

use mytrip::model::{TripDetail, TripRequest, TripResponse};
use mytrip::{Config, Database, PaymentService, Request, Response, Router, Status, TripClient, app};
use serde_json::json;
use tempfile::TempDir;

use common::{Running, count, open_database_with, post_json, send, spawn_server, sqlite_config};

struct App {
    server: Running,
    db: Arc<Database>,
    _dir: TempDir,
}

async fn start_app(trip_service_url: String) -> App {
    start_app_with_sql(trip_service_url, &[]).await
}

/// Like [`start_app`], with some named queries replaced.
async fn start_app_with_sql(trip_service_url: String, sql: &[(&str, &str)]) -> App {
    let dir = TempDir::new().unwrap();
    let mut database = sqlite_config(&dir);
    for (name, text) in sql {
        database.sql.insert((*name).to_owned(), (*text).to_owned());
    }
    let db = open_database_with(database.clone()).await;
    let config = Config {
        root_url: "/mytrip".to_owned(),
        trip_service_url,
        database,
        ..Config::default()
    };
    let trips = TripClient::new(&config.trip_service_url).unwrap();
    let service = Arc::new(PaymentService::new(Arc::clone(&db), trips));
    let server = spawn_server(app::routes(&config, service)).await;
    App { server, db, _dir: dir }
}

async fn start_app_without_trips() -> App {
    start_app("http://127.0.0.1:9/travel/GetTripsSample.php".to_owned()).await
}

// ── FastPay ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fastpay_lists_the_merchants_channels() {
    let app = start_app_without_trips().await;
    for (code, name, merchant) in [
        ("BCA", json!("Bank BCA"), "M1"),
        ("OVO", json!(null), "M1"),
        ("GOPAY", json!("GoPay"), "M2"),
    ] {
        app.db
            .exec(
                "INSERT INTO list_payment (pg_code, pg_name, merchant_id) VALUES (?, ?, ?)",
                &[json!(code), name, json!(merchant)],
            )
            .await
            .unwrap();
    }

    let (status, body) = post_json(
        &app.server.url("/mytrip/fastpay"),
        r#"{"merchant":"Toko Kita","merchant_id":"M1","request":"channels","signature":"sig"}"#,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["merchant"], "Toko Kita");
    assert_eq!(body["merchant_id"], "M1");
    let mut channels = body["payment_channel"].as_array().unwrap().clone();
    channels.sort_by_key(|c| c["pg_code"].as_str().unwrap_or_default().to_owned());
    assert_eq!(
        channels,
        vec![
            json!({"pg_code": "BCA", "pg_name": "Bank BCA"}),
            json!({"pg_code": "OVO", "pg_name": ""}),
        ]
    );
    app.server.stop().await;
}

// ── Decode failures ───────────────────────────────────────────────────────────

#[tokio::test]
async fn malformed_json_is_code_100_on_every_endpoint() {
    let app = start_app_without_trips().await;

    for path in ["/mytrip/orders", "/mytrip/costumer", "/mytrip/fastpay", "/mytrip/trips"] {
        let (status, body) = post_json(&app.server.url(path), "{this is not json").await;
        assert_eq!(status, 500, "{path}");
        assert_eq!(body["code"], 100, "{path}");
        assert_eq!(body["remark"], "Failed decoding json message", "{path}");
    }
    app.server.stop().await;
}

#[tokio::test]
async fn non_object_body_is_code_99() {
    let app = start_app_without_trips().await;

    let (status, body) = post_json(&app.server.url("/mytrip/fastpay"), r#"["M1"]"#).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"code": 99, "remark": "Invalid Request"}));
    app.server.stop().await;
}

#[tokio::test]
async fn mistyped_field_is_code_100() {
    let app = start_app_without_trips().await;

    let (status, body) = post_json(&app.server.url("/mytrip/fastpay"), r#"{"merchant_id": 5}"#).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({"code": 100, "remark": "Failed decoding json message"}));
    app.server.stop().await;
}

// ── Orders and customers ──────────────────────────────────────────────────────

#[tokio::test]
async fn order_is_stored_with_its_lines() {
    let app = start_app_without_trips().await;

    let (status, body) = post_json(
        &app.server.url("/mytrip/orders"),
        r#"{
            "orders": {
                "orderID": "O-77", "customerID": "C-1", "employeeID": "E-2",
                "orderDate": "2024-03-01",
                "ordersDetail": [
                    {"orderID": "O-77", "ProductID": "P-1", "ProductName": "Teh", "UnitPrice": 5.5, "Quantity": 2},
                    {"orderID": "O-77", "ProductID": "P-2", "ProductName": "Kopi", "UnitPrice": 8, "Quantity": 1}
                ]
            }
        }"#,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["code"], 0);
    assert_eq!(body["remark"], "Success");
    assert_eq!(body["orderID"], "O-77");
    assert_eq!(body["orders"]["ordersDetail"].as_array().unwrap().len(), 2);
    assert!(body.get("result").is_none());
    assert_eq!(count(&app.db, "orders").await, "1");
    assert_eq!(count(&app.db, "order_details").await, "2");
    app.server.stop().await;
}

#[tokio::test]
async fn order_without_orders_is_a_bad_request() {
    let app = start_app_without_trips().await;

    let (status, body) = post_json(&app.server.url("/mytrip/orders"), r#"{"orderID":"O-1"}"#).await;

    assert_eq!(status, 400);
    assert_eq!(body["result"], json!({"code": 10, "remark": "Missing orders"}));
    assert_eq!(count(&app.db, "orders").await, "0");
    app.server.stop().await;
}

#[tokio::test]
async fn customer_is_stored_and_echoed() {
    let app = start_app_without_trips().await;
    let customer = json!({
        "CustomerID": "ALFKI", "CompanyName": "Alfreds Futterkiste", "ContactName": "Maria Anders",
        "ContactTitle": "Sales Representative", "Address": "Obere Str. 57", "City": "Berlin",
        "Country": "Germany", "Phone": "030-0074321", "PostalCode": "12209"
    });

    let (status, body) = post_json(&app.server.url("/mytrip/costumer"), &customer.to_string()).await;

    assert_eq!(status, 200);
    assert_eq!(body, customer);
    let rows = app
        .db
        .query("SELECT city FROM customers WHERE customer_id = ?", &[json!("ALFKI")])
        .await
        .unwrap();
    assert_eq!(mytrip::db::first_row_value(&rows, "city").unwrap(), "Berlin");
    app.server.stop().await;
}

#[tokio::test]
async fn order_is_all_or_nothing() {
    let app = start_app_with_sql(
        "http://127.0.0.1:9/travel/GetTripsSample.php".to_owned(),
        &[("orders.insert_detail", "INSERT INTO no_such_table VALUES (?, ?, ?, ?, ?)")],
    )
    .await;

    let (status, body) = post_json(
        &app.server.url("/mytrip/orders"),
        r#"{"orders": {"orderID": "O-9", "ordersDetail": [{"orderID": "O-9", "ProductID": "P-1"}]}}"#,
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["code"], 98);
    assert_eq!(count(&app.db, "orders").await, "0");
    app.server.stop().await;
}

#[tokio::test]
async fn client_supplied_result_does_not_pick_the_status() {
    let app = start_app_without_trips().await;

    let (status, body) = post_json(
        &app.server.url("/mytrip/costumer"),
        r#"{"CustomerID": "A", "result": {"code": 50}}"#,
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.get("result").is_none());
    assert_eq!(count(&app.db, "customers").await, "1");

    let (status, body) = post_json(
        &app.server.url("/mytrip/orders"),
        r#"{"orders": {"orderID": "O-5"}, "result": {"code": 95, "remark": "x"}}"#,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["code"], 0);
    assert!(body.get("result").is_none());

    let (status, body) = post_json(&app.server.url("/mytrip/orders"), r#"{"result": {"code": 0}}"#).await;
    assert_eq!(status, 400);
    assert_eq!(body["result"]["code"], 10);
    app.server.stop().await;
}

// ── Trips ─────────────────────────────────────────────────────────────────────

async fn fake_trip_service(req: Request) -> Response {
    let Ok(query) = serde_json::from_slice::<TripRequest>(req.body().unwrap_or_default()) else {
        return Response::status(Status::BadRequest);
    };
    let detail = |airline: &str, airport: &str, city: &str| TripDetail {
        airline_name: airline.to_owned(),
        airport_name: airport.to_owned(),
        city_name: city.to_owned(),
        price: "1500000".to_owned(),
        ..TripDetail::default()
    };
    let answer = TripResponse {
        message: format!("trips in {} from {}", query.provinsi, query.departure_from),
        status: "OK".to_owned(),
        trips: vec![detail("Garuda", "DPS", "Denpasar"), detail("Lion", "LOP", "Mataram")],
        result: None,
    };
    Response::json(serde_json::to_vec(&answer).unwrap())
}

#[tokio::test]
async fn trips_are_fetched_and_recorded() {
    let upstream = spawn_server(Router::new().post("/travel/GetTripsSample.php", fake_trip_service)).await;
    let app = start_app(upstream.url("/travel/GetTripsSample.php")).await;

    let (status, body) = post_json(
        &app.server.url("/mytrip/trips"),
        r#"{"depature_date_1":"2024-05-01","depature_date_2":"2024-05-07","provinsi":51}"#,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["message"], "trips in 51 from 2024-05-01");
    assert_eq!(body["status"], "OK");
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["AirlineName"], "Garuda");
    assert_eq!(data[0]["Price"], "1500000");
    assert!(data[0].get("HotelName").is_none());

    let rows = app
        .db
        .query("SELECT AirlineName, AirportName, CityName FROM trip ORDER BY AirlineName", &[])
        .await
        .unwrap();
    let mapping = mytrip::db::to_row_mapping(&rows).unwrap();
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping[&1]["CityName"], "Denpasar");
    assert_eq!(mapping[&2]["AirportName"], "LOP");

    app.server.stop().await;
    upstream.stop().await;
}

#[tokio::test]
async fn unreachable_trip_service_is_an_internal_error() {
    let closed = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = closed.local_addr().unwrap();
    drop(closed);
    let app = start_app(format!("http://{addr}/travel/GetTripsSample.php")).await;

    let (status, body) = post_json(&app.server.url("/mytrip/trips"), r#"{"provinsi":51}"#).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({"code": 98, "remark": "Internal Server Error"}));
    assert_eq!(count(&app.db, "trip").await, "0");
    app.server.stop().await;
}

// ── Routing and probes ────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_routes_and_methods() {
    let app = start_app_without_trips().await;

    let (status, _) = send("POST", &app.server.url("/mytrip/payments"), "{}").await;
    assert_eq!(status, 404);
    let (status, _) = send("GET", &app.server.url("/mytrip/fastpay"), "").await;
    assert_eq!(status, 404);
    let (status, _) = send("PURGE", &app.server.url("/mytrip/fastpay"), "").await;
    assert_eq!(status, 405);
    app.server.stop().await;
}

#[tokio::test]
async fn probes_follow_the_database() {
    let app = start_app_without_trips().await;

    let (status, body) = send("GET", &app.server.url("/healthz"), "").await;
    assert_eq!((status, &body[..]), (200, &b"ok"[..]));
    let (status, body) = send("GET", &app.server.url("/readyz"), "").await;
    assert_eq!((status, &body[..]), (200, &b"ready"[..]));

    app.db.close().await;
    let (status, _) = send("GET", &app.server.url("/readyz"), "").await;
    assert_eq!(status, 503);
    let (status, body) = post_json(&app.server.url("/mytrip/fastpay"), r#"{"merchant_id":"M1"}"#).await;
    assert_eq!(status, 500);
    assert_eq!(body["code"], 98);

    let (status, _) = send("GET", &app.server.url("/healthz"), "").await;
    assert_eq!(status, 200);
    app.server.stop().await;
}
