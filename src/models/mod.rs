pub mod item;
pub mod user;

pub use item::{ItemDetails, ItemState, ListItemsRequest, NewItem, Priority, TodoItem};
pub use user::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, User, UserCredentials};
