use thiserror::Error;

#[derive(Error, Debug)]
pub enum SystemError {
    #[error("Store actor task failed: {0}")]
    ActorTaskFailed(#[from] tokio::task::JoinError),
}
