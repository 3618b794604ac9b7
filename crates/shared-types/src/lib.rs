pub mod error;
pub mod feature_flags;
pub mod models;

// Role & permission domain
pub mod permission;
pub mod resolver;
pub mod role;
pub mod tab;

pub use error::*;
pub use feature_flags::*;
pub use models::*;
pub use permission::*;
pub use resolver::*;
pub use role::*;
pub use tab::*;
