pub mod error;
pub mod file;
pub mod memory;
pub mod snapshot;
pub mod slot;

pub use error::{Result, SlotError};
pub use file::FileSlot;
pub use memory::InMemorySlot;
pub use snapshot::{CURRENT_FORMAT_VERSION, PersistedCart};
pub use slot::{CART_SLOT_KEY, CartSlot};
