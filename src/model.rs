//! Request and response envelopes.
//!
//! Field names follow the wire format clients already speak, including its
//! inconsistencies (`orderID` next to `ProductID`, `depature_date_1`). Every
//! field is optional on the way in and decodes to its zero value when absent.

use serde::{Deserialize, Serialize};

/// Numeric codes carried in [`Outcome::code`].
pub mod code {
    pub const SUCCESS: i64 = 0;
    pub const MISSING_ORDERS: i64 = 10;
    pub const INTERNAL: i64 = 98;
    pub const INVALID_REQUEST: i64 = 99;
    pub const DECODE_FAILED: i64 = 100;
}

/// Generic status/remark pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub code: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remark: String,
}

impl Outcome {
    pub fn new(code: i64, remark: impl Into<String>) -> Self {
        Self { code, remark: remark.into() }
    }

    pub fn unreadable_body() -> Self {
        Self::new(code::DECODE_FAILED, "Unable to read request body")
    }

    pub fn malformed_json() -> Self {
        Self::new(code::DECODE_FAILED, "Failed decoding json message")
    }

    pub fn invalid_request() -> Self {
        Self::new(code::INVALID_REQUEST, "Invalid Request")
    }

    pub fn internal() -> Self {
        Self::new(code::INTERNAL, "Internal Server Error")
    }
}

/// A payload that may carry an [`Outcome`] code.
///
/// The response encoder picks the HTTP status from it.
pub trait Coded {
    fn code(&self) -> Option<i64>;
}

impl Coded for Outcome {
    fn code(&self) -> Option<i64> {
        Some(self.code)
    }
}

// ── Orders ────────────────────────────────────────────────────────────────────

/// Order message: request and response of `POST {root}/orders`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderMessage {
    pub code: i64,
    pub remark: String,
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<Order>,
    /// Set by the service only; ignored on input.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub result: Option<Outcome>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(rename = "customerID")]
    pub customer_id: String,
    #[serde(rename = "employeeID")]
    pub employee_id: String,
    #[serde(rename = "orderDate")]
    pub order_date: String,
    #[serde(rename = "ordersDetail")]
    pub details: Vec<OrderDetail>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetail {
    #[serde(rename = "orderID")]
    pub order_id: String,
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "ProductName")]
    pub product_name: String,
    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
}

impl Coded for OrderMessage {
    fn code(&self) -> Option<i64> {
        self.result.as_ref().map(|r| r.code)
    }
}

// ── Customers ─────────────────────────────────────────────────────────────────

/// Customer record: request and response of `POST {root}/costumer`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Customer {
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    pub company_name: String,
    pub contact_name: String,
    pub contact_title: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub phone: String,
    pub postal_code: String,
    #[serde(rename = "result", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub result: Option<Outcome>,
}

impl Coded for Customer {
    fn code(&self) -> Option<i64> {
        self.result.as_ref().map(|r| r.code)
    }
}

// ── FastPay ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastPayRequest {
    pub merchant: String,
    pub merchant_id: String,
    pub request: String,
    pub signature: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastPayResponse {
    pub response: String,
    pub merchant: String,
    pub merchant_id: String,
    pub payment_channel: Vec<PaymentChannel>,
    pub response_code: String,
    pub response_desc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Outcome>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentChannel {
    pub pg_code: String,
    pub pg_name: String,
}

impl Coded for FastPayResponse {
    fn code(&self) -> Option<i64> {
        self.result.as_ref().map(|r| r.code)
    }
}

// ── Trips ─────────────────────────────────────────────────────────────────────

/// Date range and province filter, forwarded verbatim to the trip service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripRequest {
    #[serde(rename = "depature_date_1")]
    pub departure_from: String,
    #[serde(rename = "depature_date_2")]
    pub departure_to: String,
    pub provinsi: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripResponse {
    pub message: String,
    pub status: String,
    #[serde(rename = "data")]
    pub trips: Vec<TripDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Outcome>,
}

impl Coded for TripResponse {
    fn code(&self) -> Option<i64> {
        self.result.as_ref().map(|r| r.code)
    }
}

/// One trip offer as the trip service describes it. Empty fields are left
/// out of the JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TripDetail {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub airline_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub airport_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub currency: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub departure_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub destination: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail_transit: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub double_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub duration: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub goods: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hotel_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hotel_rating: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lat: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub license_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub logo: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub long: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub origin: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub origin_city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub price: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub promo_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub promo_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub provinsi: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub quad_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rating: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub return_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub term_condition: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub transit: String,
    #[serde(rename = "TravelID", skip_serializing_if = "String::is_empty")]
    pub travel_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub travel_name: String,
    #[serde(rename = "TripID", skip_serializing_if = "String::is_empty")]
    pub trip_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub triple_type: String,
}
