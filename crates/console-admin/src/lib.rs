//! Admin Console Resources
//!
//! Typed access to the admin API behind the request gateway:
//! users (list, show, save, delete), permissions (list) and countries
//! (list, show).

mod country;
mod entity;
mod error;
mod permission;
mod user;

#[cfg(test)]
mod testing;

pub use country::{Country, CountryService};
pub use entity::{decode_entity, decode_list};
pub use error::AdminError;
pub use permission::{Permission, PermissionsService};
pub use user::{User, UsersService};

pub type Result<T> = std::result::Result<T, AdminError>;
