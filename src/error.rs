use crate::climate::error::ClimateDataError;
use crate::download::error::DownloadError;
use crate::fires::error::FireTableError;
use crate::model::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FireClimError {
    #[error(transparent)]
    ClimateData(#[from] ClimateDataError),

    #[error(transparent)]
    FireTable(#[from] FireTableError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Download(#[from] DownloadError),
}
