use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrailError {
    #[error("a trail needs at least one point")]
    Empty,
}
