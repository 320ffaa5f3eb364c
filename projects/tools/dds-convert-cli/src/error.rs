use dds_convert_api::ConvertError;
use dds_convert_dds::DdsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{path}: {source}")]
    Convert {
        path: PathBuf,
        #[source]
        source: ConvertError,
    },
    #[error(transparent)]
    Dds(#[from] DdsError),
    #[error("{failed} of {total} files failed to convert")]
    Batch { failed: usize, total: usize },
}
