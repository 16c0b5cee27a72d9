//! Shared harness for the staybook-state integration tests.
//!
//! A scripted in-memory [`Transport`] stands in for the booking API. Each
//! scripted reply may be gated so a test decides when the call completes.

#![allow(dead_code)]

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use staybook_client::transport::TransportFuture;
use staybook_client::{ApiClient, ApiError, ApiRequest, Transport};
use staybook_core::Subscription;
use staybook_state::{App, Navigator, Notification, RecordingNavigator};
use tokio::sync::oneshot;

pub const API_BASE: &str = "http://localhost:8080/api";
pub const LOGIN_URL: &str = "http://localhost:4200/oauth2/authorization/okta";

pub const LISTING_A: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const LISTING_B: &str = "550e8400-e29b-41d4-a716-4466554400bb";
pub const BOOKING_1: &str = "6f1c2d3e-4b5a-4c6d-8e7f-000000000001";
pub const BOOKING_2: &str = "6f1c2d3e-4b5a-4c6d-8e7f-000000000002";

/// What a scripted call resolves to.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(serde_json::Value),
    Status(u16, &'static str),
    Unreachable,
}

struct Scripted {
    endpoint: String,
    query: Option<(String, String)>,
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

/// Transport answering from a script, recording every request.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<Vec<Scripted>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer the next `endpoint` call (e.g. `"GET /booking/get-booked-listing"`).
    pub fn reply(&self, endpoint: &str, reply: Reply) {
        self.push(endpoint, None, reply, None);
    }

    /// Answer the next `endpoint` call whose query carries `name=value`.
    pub fn reply_when(&self, endpoint: &str, name: &str, value: &str, reply: Reply) {
        self.push(endpoint, Some((name.into(), value.into())), reply, None);
    }

    /// Like [`reply_when`](Self::reply_when), but the call only completes
    /// once the returned sender fires.
    pub fn reply_gated(
        &self,
        endpoint: &str,
        name: &str,
        value: &str,
        reply: Reply,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(endpoint, Some((name.into(), value.into())), reply, Some(rx));
        tx
    }

    fn push(
        &self,
        endpoint: &str,
        query: Option<(String, String)>,
        reply: Reply,
        gate: Option<oneshot::Receiver<()>>,
    ) {
        self.scripts.lock().unwrap().push(Scripted {
            endpoint: endpoint.into(),
            query,
            reply,
            gate,
        });
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, endpoint: &str) -> Vec<ApiRequest> {
        self.sent()
            .into_iter()
            .filter(|r| r.endpoint() == endpoint)
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
        let endpoint = request.endpoint();
        let url = self.url_for(&request);
        let scripted = {
            let mut scripts = self.scripts.lock().unwrap();
            scripts
                .iter()
                .position(|s| {
                    s.endpoint == endpoint
                        && s.query.as_ref().map_or(true, |q| request.query.contains(q))
                })
                .map(|i| scripts.remove(i))
        };
        self.sent.lock().unwrap().push(request);

        Box::pin(async move {
            let Some(Scripted { reply, gate, .. }) = scripted else {
                return Err(ApiError::Unreachable {
                    endpoint,
                    url,
                    reason: "no scripted reply".into(),
                });
            };
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match reply {
                Reply::Json(value) => Ok(value),
                Reply::Status(status, body) => Err(ApiError::Status {
                    endpoint,
                    url,
                    status,
                    body: body.into(),
                }),
                Reply::Unreachable => Err(ApiError::Unreachable {
                    endpoint,
                    url,
                    reason: "connection refused".into(),
                }),
            }
        })
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{API_BASE}{}", request.path)
    }
}

/// An [`App`] over a scripted transport, with its navigations and toasts
/// recorded.
pub struct Harness {
    pub app: App,
    pub transport: Arc<ScriptedTransport>,
    pub navigator: Rc<RecordingNavigator>,
    pub toasts: Rc<RefCell<Vec<Notification>>>,
    _toast_subscription: Subscription,
}

impl Harness {
    pub fn new() -> Self {
        let transport = ScriptedTransport::new();
        let client = ApiClient::with_transport(transport.clone());
        let navigator = Rc::new(RecordingNavigator::new());
        let nav: Rc<dyn Navigator> = navigator.clone();
        let app = App::new(client, LOGIN_URL, nav);

        let toasts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&toasts);
        let toast_subscription = app.toast.subscribe(move |n| sink.borrow_mut().push(n.clone()));

        Self {
            app,
            transport,
            navigator,
            toasts,
            _toast_subscription: toast_subscription,
        }
    }

    pub fn toasts(&self) -> Vec<Notification> {
        self.toasts.borrow().clone()
    }

    /// Sign `email` in by scripting and running a user fetch.
    pub async fn sign_in(&self, email: &str, authorities: &[&str]) {
        self.transport.reply(
            "GET /auth/get-authenticated-user",
            Reply::Json(user_json(email, authorities)),
        );
        self.app.auth.fetch(false).await;
        assert!(self.app.auth.is_authenticated());
    }
}

/// Run `test` inside a `LocalSet` on a current-thread runtime.
pub fn run_local<F: Future>(test: F) -> F::Output {
    staybook_state::runtime::block_on_local(test).unwrap()
}

/// Let every ready local task run to its next pending point.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

/// Record every value a reader delivers.
pub fn record<T: Clone + 'static>(
    reader: &staybook_core::StateReader<T>,
) -> (Rc<RefCell<Vec<T>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = reader.subscribe(move |v: &T| sink.borrow_mut().push(v.clone()));
    (seen, sub)
}

// -- Fixtures -----------------------------------------------------------------

pub fn user_json(email: &str, authorities: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "firstName": "Ana",
        "lastName": "Silva",
        "email": email,
        "imageUrl": null,
        "authorities": authorities,
    })
}

pub fn picture_json(file: &str, is_cover: bool) -> serde_json::Value {
    serde_json::json!({"file": file, "fileContentType": "image/png", "isCover": is_cover})
}

pub fn card_json(public_id: &str, price: u32) -> serde_json::Value {
    serde_json::json!({
        "price": {"value": price},
        "location": "PT",
        "cover": picture_json("cover", true),
        "bookingCategory": "BEACH",
        "publicId": public_id,
    })
}

pub fn page_json(cards: Vec<serde_json::Value>) -> serde_json::Value {
    let len = cards.len();
    serde_json::json!({
        "content": cards,
        "totalElements": len,
        "totalPages": 1,
        "number": 0,
        "size": 20,
    })
}

pub fn listing_json(title: &str, pictures: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "description": {"title": {"value": title}, "description": {"value": "Nice"}},
        "pictures": pictures,
        "infos": {
            "guests": {"value": 4},
            "bedrooms": {"value": 2},
            "beds": {"value": 2},
            "baths": {"value": 1},
        },
        "price": {"value": 120},
        "category": "LAKE",
        "location": "PT",
        "landlord": {"firstname": "Rui", "imageUrl": null},
    })
}

pub fn booked_json(booking_id: &str, listing_id: &str) -> serde_json::Value {
    serde_json::json!({
        "cover": picture_json("cover", true),
        "location": "PT",
        "dates": {"startDate": "2026-05-01T00:00:00Z", "endDate": "2026-05-03T00:00:00Z"},
        "totalPrice": {"value": 240},
        "bookingPublicId": booking_id,
        "listingPublicId": listing_id,
    })
}
