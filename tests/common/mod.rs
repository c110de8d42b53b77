//! In-process HTTP double of the workshop backend.
//!
//! Serves the same REST surface the production backend exposes, with
//! controllable state, so the remote client can be exercised without a
//! real deployment. Registration goes through the library's own
//! capacity guard, which keeps the double's seat bookkeeping honest.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::CONTENT_TYPE;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use taller_core::guard;
use taller_core::model::dtos::{
    Credentials, EnrollmentRequest, LoginReply, NewAccount, RegistrationReceipt, ServerMessage,
    StudentRecord, WorkshopDraft, WorkshopUpdate,
};
use taller_core::model::structs::{Account, Role, Workshop, WorkshopStatus};

#[derive(Default)]
struct State {
    workshops: Vec<Workshop>,
    accounts: Vec<Account>,
    next_id: u32,
}

pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<Mutex<State>>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> MockBackend {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(State {
            next_id: 1,
            ..State::default()
        }));

        let serve_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let io = TokioIo::new(stream);
                let state = Arc::clone(&serve_state);
                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { route(state, req).await }
                    });
                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        MockBackend {
            addr,
            state,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn add_account(&self, name: &str, email: &str, password: &str, role: Role) {
        self.state.lock().unwrap().accounts.push(Account {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        });
    }

    /// Seed a workshop in an arbitrary state; the id is assigned here.
    pub fn add_workshop(&self, workshop: Workshop) -> u32 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.workshops.push(Workshop { id, ..workshop });
        id
    }

    pub fn workshop(&self, id: u32) -> Option<Workshop> {
        self.state
            .lock()
            .unwrap()
            .workshops
            .iter()
            .find(|w| w.id == id)
            .cloned()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn route(
    state: Arc<Mutex<State>>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let body = req.into_body().collect().await?.to_bytes();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let response = match (method, segments.as_slice()) {
        (Method::POST, ["login"]) => login(&state, &body),
        (Method::POST, ["users"]) => register_account(&state, &body),
        (Method::GET, ["workshops"]) => list_workshops(&state),
        (Method::POST, ["workshops"]) => create_workshop(&state, &body),
        (Method::PUT, ["workshops", id]) => update_workshop(&state, id, &body),
        (Method::DELETE, ["workshops", id]) => delete_workshop(&state, id),
        (Method::POST, ["workshops", id, "register"]) => register_student(&state, id, &body),
        _ => message(StatusCode::NOT_FOUND, "no such route"),
    };
    Ok(response)
}

fn login(state: &Arc<Mutex<State>>, body: &[u8]) -> Response<Full<Bytes>> {
    let Ok(credentials) = serde_json::from_slice::<Credentials>(body) else {
        return message(StatusCode::BAD_REQUEST, "invalid request body");
    };
    let state = state.lock().unwrap();
    match state
        .accounts
        .iter()
        .find(|a| a.email == credentials.email && a.password == credentials.password)
    {
        Some(account) => json(
            StatusCode::OK,
            &LoginReply {
                message: "Login successful".to_string(),
                user: account.user(),
            },
        ),
        None => message(StatusCode::UNAUTHORIZED, "invalid email or password"),
    }
}

fn register_account(state: &Arc<Mutex<State>>, body: &[u8]) -> Response<Full<Bytes>> {
    let Ok(account) = serde_json::from_slice::<NewAccount>(body) else {
        return message(StatusCode::BAD_REQUEST, "invalid request body");
    };
    if let Err(e) = account.validate() {
        return message(StatusCode::BAD_REQUEST, &e.to_string());
    }

    let mut state = state.lock().unwrap();
    if state.accounts.iter().any(|a| a.email == account.email) {
        return message(StatusCode::CONFLICT, "email already registered");
    }
    state.accounts.push(Account {
        name: account.name,
        email: account.email,
        password: account.password,
        role: Role::Student,
    });
    message(StatusCode::CREATED, "User registered")
}

fn list_workshops(state: &Arc<Mutex<State>>) -> Response<Full<Bytes>> {
    json(StatusCode::OK, &state.lock().unwrap().workshops)
}

fn create_workshop(state: &Arc<Mutex<State>>, body: &[u8]) -> Response<Full<Bytes>> {
    let Ok(draft) = serde_json::from_slice::<WorkshopDraft>(body) else {
        return message(StatusCode::BAD_REQUEST, "invalid request body");
    };
    if let Err(e) = draft.validate() {
        return message(StatusCode::BAD_REQUEST, &e.to_string());
    }

    let mut state = state.lock().unwrap();
    let id = state.next_id;
    state.next_id += 1;
    let workshop = Workshop {
        id,
        title: draft.title,
        description: draft.description,
        location: draft.location,
        date: draft.date,
        time: draft.time,
        category: draft.category,
        capacity: draft.capacity,
        enrolled: 0,
        status: WorkshopStatus::Active,
    };
    state.workshops.push(workshop.clone());
    json(StatusCode::CREATED, &workshop)
}

fn update_workshop(state: &Arc<Mutex<State>>, id: &str, body: &[u8]) -> Response<Full<Bytes>> {
    let Ok(id) = id.parse::<u32>() else {
        return message(StatusCode::NOT_FOUND, "workshop not found");
    };
    let Ok(update) = serde_json::from_slice::<WorkshopUpdate>(body) else {
        return message(StatusCode::BAD_REQUEST, "invalid request body");
    };

    let mut state = state.lock().unwrap();
    let Some(workshop) = state.workshops.iter_mut().find(|w| w.id == id) else {
        return message(StatusCode::NOT_FOUND, "workshop not found");
    };
    workshop.title = update.fields.title;
    workshop.description = update.fields.description;
    workshop.location = update.fields.location;
    workshop.date = update.fields.date;
    workshop.time = update.fields.time;
    workshop.category = update.fields.category;
    workshop.capacity = update.fields.capacity;
    if workshop.status.is_active() {
        workshop.status = update.status;
    }
    json(StatusCode::OK, workshop)
}

fn delete_workshop(state: &Arc<Mutex<State>>, id: &str) -> Response<Full<Bytes>> {
    let Ok(id) = id.parse::<u32>() else {
        return message(StatusCode::NOT_FOUND, "workshop not found");
    };
    let mut state = state.lock().unwrap();
    let before = state.workshops.len();
    state.workshops.retain(|w| w.id != id);
    if state.workshops.len() == before {
        return message(StatusCode::NOT_FOUND, "workshop not found");
    }
    message(StatusCode::OK, "Workshop deleted")
}

fn register_student(state: &Arc<Mutex<State>>, id: &str, body: &[u8]) -> Response<Full<Bytes>> {
    let Ok(id) = id.parse::<u32>() else {
        return message(StatusCode::NOT_FOUND, "workshop not found");
    };
    let Ok(request) = serde_json::from_slice::<EnrollmentRequest>(body) else {
        return message(StatusCode::BAD_REQUEST, "invalid request body");
    };
    if let Err(e) = request.validate() {
        return message(StatusCode::BAD_REQUEST, &e.to_string());
    }

    let mut state = state.lock().unwrap();
    let Some(workshop) = state.workshops.iter_mut().find(|w| w.id == id) else {
        return message(StatusCode::NOT_FOUND, "workshop not found");
    };
    if let Err(e) = guard::admit(workshop) {
        return message(StatusCode::CONFLICT, &e.to_string());
    }

    let receipt = RegistrationReceipt {
        message: "Registration successful".to_string(),
        student: StudentRecord {
            name: request.student_name,
            email: request.student_email,
            workshop_id: id,
        },
        workshop: workshop.clone(),
    };
    json(StatusCode::CREATED, &receipt)
}

fn json<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(value).unwrap();
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

fn message(status: StatusCode, text: &str) -> Response<Full<Bytes>> {
    json(
        status,
        &ServerMessage {
            message: text.to_string(),
        },
    )
}
