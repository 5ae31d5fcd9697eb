//! REST API for faqbot.
//!
//! JSON endpoints over one shared [`ChatBot`] guarded by a mutex. Every
//! mutating request holds the lock across mutate → persist → rebuild, so a
//! chat request never scores against a vector space stale relative to the
//! stored pairs.
//!
//! ## Endpoints
//!
//! - `POST /chat` - Ask the bot a question
//! - `GET /qa` - List all stored pairs
//! - `POST /admin/add` - Add a pair (credentials required)
//! - `POST /admin/update` - Update a pair (credentials required)
//! - `POST /admin/delete` - Delete a pair (credentials required)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Mutex;
//! use actix_web::{web, App, HttpServer};
//! use faqbot::ChatBot;
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let bot = web::Data::new(Mutex::new(ChatBot::load("data/qa_data.json")));
//!     HttpServer::new(move || {
//!         App::new()
//!             .app_data(bot.clone())
//!             .configure(faqbot::server::config)
//!     })
//!     .bind("0.0.0.0:7878")?
//!     .run()
//!     .await
//! }
//! ```

use std::sync::Mutex;

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::bot::ChatBot;
use crate::store::QaPair;

type BotData = web::Data<Mutex<ChatBot>>;

// --- Request structs ---

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Deserialize)]
struct AdminAuth {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct AddRequest {
    #[serde(flatten)]
    auth: AdminAuth,
    question: String,
    answer: String,
}

#[derive(Deserialize)]
struct UpdateRequest {
    #[serde(flatten)]
    auth: AdminAuth,
    id: u32,
    question: String,
    answer: String,
}

#[derive(Deserialize)]
struct DeleteRequest {
    #[serde(flatten)]
    auth: AdminAuth,
    id: u32,
}

// --- Response structs ---

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    confidence: String,
}

#[derive(Serialize)]
struct ListResponse {
    qa_pairs: Vec<QaPair>,
}

#[derive(Serialize)]
struct MutationResponse {
    ok: bool,
    message: String,
}

// --- Handlers ---

/// Locks the shared bot, mapping a poisoned mutex to a 500. A poisoned lock
/// means a handler panicked while mutating; refusing to serve is the
/// conservative choice.
macro_rules! lock_bot {
    ($data:expr) => {
        match $data.lock() {
            Ok(bot) => bot,
            Err(e) => {
                error!("bot state poisoned: {}", e);
                return HttpResponse::InternalServerError()
                    .json(serde_json::json!({"error": "internal error"}));
            }
        }
    };
}

async fn chat_handler(data: BotData, body: web::Json<ChatRequest>) -> impl Responder {
    let message = body.message.trim();
    if message.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({"error": "Empty message"}));
    }

    let mut bot = lock_bot!(data);
    let reply = bot.reply(message);
    HttpResponse::Ok().json(ChatResponse { response: reply.response, confidence: reply.confidence })
}

async fn list_handler(data: BotData) -> impl Responder {
    let bot = lock_bot!(data);
    HttpResponse::Ok().json(ListResponse { qa_pairs: bot.pairs().to_vec() })
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"error": "Invalid credentials"}))
}

async fn add_handler(data: BotData, body: web::Json<AddRequest>) -> impl Responder {
    let mut bot = lock_bot!(data);

    if !bot.verify_credentials(&body.auth.username, &body.auth.password) {
        return unauthorized();
    }
    if body.question.trim().is_empty() || body.answer.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({"error": "Both question and answer are required"}));
    }

    let ok = bot.add(body.question.trim(), body.answer.trim());
    let message = if ok { "Q&A pair added" } else { "Failed to add Q&A pair" };
    HttpResponse::Ok().json(MutationResponse { ok, message: message.to_string() })
}

async fn update_handler(data: BotData, body: web::Json<UpdateRequest>) -> impl Responder {
    let mut bot = lock_bot!(data);

    if !bot.verify_credentials(&body.auth.username, &body.auth.password) {
        return unauthorized();
    }
    if body.question.trim().is_empty() || body.answer.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({"error": "Both question and answer are required"}));
    }

    let ok = bot.update(body.id, body.question.trim(), body.answer.trim());
    let message = if ok { "Q&A pair updated" } else { "Q&A pair not found" };
    HttpResponse::Ok().json(MutationResponse { ok, message: message.to_string() })
}

async fn delete_handler(data: BotData, body: web::Json<DeleteRequest>) -> impl Responder {
    let mut bot = lock_bot!(data);

    if !bot.verify_credentials(&body.auth.username, &body.auth.password) {
        return unauthorized();
    }

    let ok = bot.delete(body.id);
    let message = if ok { "Q&A pair deleted" } else { "Q&A pair not found" };
    HttpResponse::Ok().json(MutationResponse { ok, message: message.to_string() })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/chat").route(web::post().to(chat_handler)))
        .service(web::resource("/qa").route(web::get().to(list_handler)))
        .service(web::resource("/admin/add").route(web::post().to(add_handler)))
        .service(web::resource("/admin/update").route(web::post().to(update_handler)))
        .service(web::resource("/admin/delete").route(web::post().to(delete_handler)));
}
