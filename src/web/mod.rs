//! Local web form for the Parkinson's prediction system.
//!
//! Serves server-rendered HTML pages on `127.0.0.1:8501` by default.
//!
//! ## Routes
//!
//! - `GET /` - Home page
//! - `GET /predict?mode=fields|pasted` - Prediction form
//! - `POST /predict` - Form submission, renders the verdict or an error
//! - `GET /about` - About Parkinson's disease
//! - `GET /model` - ML model info
//! - `GET /about-us` - About this application
//!
//! The classifier is injected once through [`AppState`] and never mutated.
//!
//! ```ignore
//! let classifier: Arc<dyn Classifier> = Arc::new(SvmClassifier::load(&model_path)?);
//! let state = AppState::new(classifier, RangePolicy::Permissive, None);
//! web::serve(state, config.bind_address).await?;
//! ```

mod assets;
mod handlers;
mod pages;
mod server;

pub use assets::Background;
pub use server::{router, serve, AppState};
