mod error;
pub use error::Error;

pub mod config;
pub mod expr;
pub mod matching;
pub mod naming;
pub mod plan;
pub mod profile;
pub mod strategy;
pub mod ty;

mod mapper;
pub use mapper::MapperConfig;

mod seal;
mod validate;

pub use naming::NamingConvention;
pub use plan::{MemberList, TypeMap, TypeMapId};
pub use profile::{Profile, ProfileId};
pub use strategy::{AssignableMapper, ObjectMapper};
pub use ty::{MemberId, MemberPath, TypeId, TypePair, TypeSpace};

/// A Result type alias that uses Graft's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
