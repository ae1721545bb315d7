pub mod case;
pub mod category;
pub mod complainant;
pub mod complaint;
pub mod patient;

pub use case::Case;
pub use category::ComplaintCategory;
pub use complainant::Complainant;
pub use complaint::Complaint;
pub use patient::Patient;
