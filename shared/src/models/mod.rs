//! Domain records
//!
//! One file per table. Each record has a `XxxCreate` payload struct used
//! by the repositories; the stored row type derives `sqlx::FromRow` when
//! the `db` feature is enabled.

pub mod lunch;
pub mod menu_item;
pub mod place;
pub mod review;
pub mod user;

pub use lunch::{BusinessLunch, BusinessLunchCreate};
pub use menu_item::{MenuItem, MenuItemCreate};
pub use place::{Place, PlaceCreate};
pub use review::{Review, ReviewCreate, ReviewSummary};
pub use user::UserProfile;
