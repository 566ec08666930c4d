//! Data Transfer Objects for the HTTP surface
//!
//! Request and reply bodies shared by the server and the client.

pub mod run;
pub mod text;
