//! Database Models
//!
//! Entity structs matching the SurrealDB tables, plus their
//! Create/Update payload types.

pub mod serde_helpers;

pub mod admin;
pub mod booking;
pub mod expense;
pub mod guest;
pub mod room;
pub mod sale;
pub mod settings;

pub use admin::{Admin, AdminCreate};
pub use booking::{Booking, BookingCreate, BookingWithDetails};
pub use expense::{Expense, ExpenseCreate};
pub use guest::{Guest, GuestCreate};
pub use room::{Room, RoomCreate, RoomOccupancy, RoomType, RoomUpdate};
pub use sale::Sale;
pub use settings::{Settings, SettingsUpdate};
