//! HTTP surface for the front-desk workflow.

pub mod rest;
