//! # IO Module
//!
//! Interface layer between HTTP clients and the domain logic. Translates
//! requests into domain calls and domain results into `shared` DTOs; holds no
//! business rules of its own.

pub mod rest;
