use std::sync::Mutex;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware, put, web};

use serde::Deserialize;

use rs_markov_core::error::MarkovError;
use rs_markov_core::model::chain::{DEFAULT_LENGTH, MarkovChain};
use rs_markov_core::model::store::ModelStore;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<usize>,
}

struct SharedData {
	chain: MarkovChain,
}

/// HTTP PUT endpoint `/v1/train`
///
/// Trains the shared model from the raw text body and persists the
/// snapshot. Returns the updated prefix count on success.
#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.chain.train(&body) {
		Ok(()) => HttpResponse::Ok().body(format!("Model trained, {} prefixes known", shared_data.chain.count())),
		Err(e @ MarkovError::FormatText) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a word sequence from the shared model. The `length` query
/// parameter defaults to 20; the result may be slightly longer because
/// dead-end recovery appends two words at a time.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let length = query.length.unwrap_or(DEFAULT_LENGTH);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.chain.generate(length) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e @ MarkovError::NotTrained) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/count`
///
/// Returns the number of distinct prefix keys in the model.
#[get("/v1/count")]
async fn get_count(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.chain.count().to_string())
}

/// HTTP GET endpoint `/v1/model`
///
/// Returns the raw entry map as JSON, for inspection.
#[get("/v1/model")]
async fn get_model(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().json(shared_data.chain.store().entries())
}

/// Main entry point for the server.
///
/// Opens the model snapshot (`./Model.json`), wraps the chain in a
/// `Mutex` so training and generation are serialized, and starts an
/// Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Currently, the snapshot path is hardcoded and should be made configurable.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

	let store = ModelStore::open_default().map_err(std::io::Error::other)?;
	let chain = MarkovChain::new(store);
	log::info!(
		"model opened with {} prefixes (trained: {})",
		chain.count(),
		chain.is_trained()
	);

	let shared_model = web::Data::new(Mutex::new(SharedData { chain }));

	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.wrap(middleware::Logger::default())
			.service(put_train)
			.service(get_generated)
			.service(get_count)
			.service(get_model)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
