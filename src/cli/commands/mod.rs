//! Command implementations

mod check;
mod policy;
mod support;
mod verify_prov;

pub use check::check;
pub use policy::{policy_draft, policy_show};
pub use verify_prov::verify_prov;
