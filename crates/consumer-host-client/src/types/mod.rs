/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod error_code;
pub mod models;
pub mod reply;
pub mod requests;

pub use error_code::*;
pub use models::*;
pub use reply::*;
pub use requests::*;
