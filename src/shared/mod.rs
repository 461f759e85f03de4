/*
* Shared building blocks: the API error taxonomy and the
* tower-layer error mapper.
*/

pub mod error;
pub mod error_handler;
