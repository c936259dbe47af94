//! Core session functionality
//!
//! This module contains the session controller, the typed wallet
//! operations it issues, and the deployment pipeline.

pub mod network;
pub mod session;
pub mod transactions;
