//! mobfot: unofficial FotMob API client
//!
//! ```no_run
//! use mobfot::{ClientConfig, FotMob};
//!
//! # async fn demo() -> Result<(), mobfot::ApiError> {
//! let client = FotMob::new(ClientConfig::default())?;
//! let details = client.get_match_details(3901203).await?;
//! println!("{}", details["general"]["matchName"]);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod archive;
pub mod cache;
pub mod cli;
pub mod transport;

pub use api::{
    ApiError, CacheMode, ClientConfig, FotMob, LeagueOptions, TeamOptions, TransportError,
    TransportErrorKind,
};
pub use transport::{HttpRequest, HttpResponse, HttpTransport};
