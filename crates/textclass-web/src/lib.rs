//! Web front-end: render the form, run the prediction pipeline on posted
//! text, render the label back into the same page.

pub mod routes;

pub use routes::{AppState, router};
