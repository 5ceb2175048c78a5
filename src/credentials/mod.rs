//! Client credential issuance.

pub mod clock;
pub mod generator;
pub mod model;
pub mod uuid_v4;

pub use clock::{Clock, SystemClock, REFERENCE_TIMEZONE};
pub use generator::CredentialGenerator;
pub use model::ClientCredential;
pub use uuid_v4::new_uuid_v4;
