//! Repository traits (ports)

pub mod user_repository;
pub mod group_repository;
pub mod report_repository;
pub mod session_repository;
pub mod attachment_store;

pub use user_repository::UserRepository;
pub use group_repository::GroupRepository;
pub use report_repository::ReportRepository;
pub use session_repository::SessionRepository;
pub use attachment_store::AttachmentStore;

#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use group_repository::MockGroupRepository;
#[cfg(test)]
pub use report_repository::MockReportRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use attachment_store::MockAttachmentStore;
