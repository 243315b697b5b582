//! Attachment file storage

pub mod filesystem;

pub use filesystem::FilesystemAttachmentStore;
