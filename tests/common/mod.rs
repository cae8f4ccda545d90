//! Shared test utilities for the DUT harness tests.
//!
//! The centerpiece is an in-process fake of the demo firmware's web
//! server, so the endpoint checks can run end-to-end without hardware.
//! Its handlers mirror the firmware's responses byte for byte.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

/// Mutable state of the fake device.
#[derive(Debug)]
struct DeviceState {
    title: &'static str,
    led_on: bool,
    stored: String,
}

type SharedState = Arc<Mutex<DeviceState>>;

/// Handle to a running fake device server.
pub struct FakeDevice {
    base_url: String,
}

impl FakeDevice {
    /// Base URL of the fake device (e.g., "http://127.0.0.1:41234").
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Start a fake device with the real firmware's root page title.
pub async fn spawn_fake_device() -> FakeDevice {
    spawn_fake_device_with_title("ESP32 LED and String Control").await
}

/// Start a fake device with an arbitrary root page title, for tests that
/// exercise check failures.
pub async fn spawn_fake_device_with_title(title: &'static str) -> FakeDevice {
    let state: SharedState = Arc::new(Mutex::new(DeviceState {
        title,
        led_on: false,
        stored: String::new(),
    }));

    let app = Router::new()
        .route("/", get(root_page))
        .route("/led", get(led_control))
        .route(
            "/string",
            get(read_string).post(save_string).delete(delete_string),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake device listener");
    let addr = listener.local_addr().expect("fake device local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake device server");
    });

    FakeDevice {
        base_url: format!("http://{addr}"),
    }
}

async fn root_page(State(state): State<SharedState>) -> Html<String> {
    let state = state.lock().unwrap();
    let stored = if state.stored.is_empty() {
        "(empty)"
    } else {
        &state.stored
    };

    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>ESP32 Control</title></head>\n<body>\n\
         <h1>{}</h1>\n<p>LED is currently: {}</p>\n<p>Stored string: '{}'</p>\n\
         </body>\n</html>\n",
        state.title,
        if state.led_on { "ON" } else { "OFF" },
        stored,
    ))
}

async fn led_control(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> String {
    match params.get("state").map(String::as_str) {
        Some("on") => {
            state.lock().unwrap().led_on = true;
            "LED turned ON\n".to_string()
        }
        Some("off") => {
            state.lock().unwrap().led_on = false;
            "LED turned OFF\n".to_string()
        }
        _ => "Use /led?state=on or /led?state=off\n".to_string(),
    }
}

async fn read_string(State(state): State<SharedState>) -> String {
    let state = state.lock().unwrap();
    if state.stored.is_empty() {
        "(empty)\n".to_string()
    } else {
        state.stored.clone()
    }
}

#[derive(Debug, Deserialize)]
struct StringForm {
    value: String,
}

async fn save_string(State(state): State<SharedState>, Form(form): Form<StringForm>) -> String {
    state.lock().unwrap().stored = form.value;
    "String saved\n".to_string()
}

async fn delete_string(State(state): State<SharedState>) -> String {
    state.lock().unwrap().stored.clear();
    "String deleted\n".to_string()
}
