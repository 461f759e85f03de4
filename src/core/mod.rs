/*
* Core application plumbing: logging setup and server lifecycle.
*/

pub mod logging;
pub mod server;
