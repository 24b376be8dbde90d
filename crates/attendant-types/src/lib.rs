pub mod profile;
pub mod session;

pub use profile::{BusinessDocument, BusinessFact, ClientProfile};
pub use session::{MessageRole, SessionKey};
