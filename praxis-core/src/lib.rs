//! Core logic for the praxis workspace.
//!
//! Two independent utilities live here:
//! - CPF check-digit validation ([`validate`], [`Cpf`]).
//! - Order-preserving search and removal over queues and stacks of
//!   [`Car`] records ([`garage`]).

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod car;
pub mod containers;
pub mod cpf;
pub mod error;
pub mod garage;

pub use car::Car;
pub use containers::{Deque, Stack};
pub use cpf::{check_digit, validate, Cpf, CPF_LEN};
pub use error::CoreError;
pub use garage::{delete_first_match, peek_by_plate, remove_all_by_owner, select_all_by_model};
