/*
* HTTP surface: one module per feature, plus the middleware stack.
* Each feature follows the handler/routes split.
*/

pub mod auth;
pub mod health;
pub mod hello;
pub mod middleware;
pub mod todos;
