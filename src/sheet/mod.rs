pub mod extra;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod validation;


pub use extra::*;
pub use loader::*;
pub use models::*;
pub use normalize::*;
pub use validation::*;
