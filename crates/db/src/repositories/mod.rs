//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod contract_repo;
pub mod invoice_repo;
pub mod lifecycle_repo;
pub mod payment_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod proposal_repo;
pub mod task_repo;

pub use contract_repo::ContractRepo;
pub use invoice_repo::InvoiceRepo;
pub use lifecycle_repo::LifecycleRepo;
pub use payment_repo::PaymentRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use proposal_repo::ProposalRepo;
pub use task_repo::TaskRepo;
