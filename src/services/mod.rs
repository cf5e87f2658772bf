pub mod angle_rotator;
pub mod downloads;
pub mod gallery;
pub mod ledger;
pub mod run_log_writer;
pub mod upload_store;

pub use angle_rotator::AngleRotator;
pub use downloads::{Download, DownloadService};
pub use gallery::GalleryCard;
pub use ledger::ResultLedger;
pub use run_log_writer::RunLogWriter;
pub use upload_store::{PreviewRegistry, UploadStore};
