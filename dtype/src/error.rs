use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Raw host pointers cannot cross the host/device boundary without an
    /// explicit device-resident wrapper.
    #[snafu(display("unsupported argument: raw host pointer cannot cross the host/device boundary"))]
    UnsupportedArgument,
}
